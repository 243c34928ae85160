//! The two seeding flows, run top to bottom.
//!
//! Configuration and connection problems print their failure block and
//! terminate with exit status 1 before any data is touched; failures
//! during the write or the read-back propagate to `main` instead.

use std::process;
use std::time::Instant;

use tracing::debug;

use visits_core::{MANAGED_ROWS, VM_ROWS};
use visits_db::{DbConfig, DbHandle, DbReader, DbWriter, Target, VISITS_TABLE};

use crate::report;

pub async fn run(target: Target) -> anyhow::Result<()> {
    match target {
        Target::Managed => run_managed().await,
        Target::Vm => run_vm().await,
    }
}

/// Managed flow: the database is provisioned ahead of time, so the
/// flow connects straight to it and replaces the table.
async fn run_managed() -> anyhow::Result<()> {
    report::env_summary(Target::Managed);

    let config = match DbConfig::from_env(Target::Managed) {
        Ok(config) => config,
        Err(err) => {
            report::managed_missing_config(&err);
            process::exit(1);
        }
    };

    let started = Instant::now();
    println!(
        "[STEP 1] Connecting to Managed MySQL database: {}",
        config.database
    );
    println!("URL (masked): {}", config.masked_url());

    let handle = match DbHandle::connect(&config).await {
        Ok(handle) => handle,
        Err(err) => {
            report::managed_connect_failure(&err);
            process::exit(1);
        }
    };
    println!(
        "[OK] Successfully connected to database `{}`.",
        config.database
    );

    let rows = &MANAGED_ROWS;
    println!("[STEP 2] Writing {} rows to table: {VISITS_TABLE}", rows.len());
    let writer = DbWriter::new(handle.clone());
    let written = writer.replace_visits(rows).await?;
    println!("[OK] Wrote {written} rows to table `{VISITS_TABLE}`.");

    println!("[STEP 3] Reading back row count from `{VISITS_TABLE}`...");
    let reader = DbReader::new(handle.clone());
    let count = reader.visits_count().await?;
    println!("[OK] n_rows = {count}");

    handle.close().await;
    report::done("Managed", started.elapsed());
    Ok(())
}

/// VM flow: the server is reachable but the database may not exist
/// yet, so the bootstrap creates it before the table is written.
async fn run_vm() -> anyhow::Result<()> {
    report::env_summary(Target::Vm);

    let config = match DbConfig::from_env(Target::Vm) {
        Ok(config) => config,
        Err(err) => {
            debug!(error = %err, "configuration rejected");
            report::vm_missing_config();
            process::exit(1);
        }
    };

    let started = Instant::now();
    println!();
    report::separator();
    println!(
        "[STEP 1] Connecting to MySQL VM ({}): {}",
        config.host,
        config.masked_server_url()
    );

    let handle = match DbHandle::connect_with_bootstrap(&config).await {
        Ok(handle) => handle,
        Err(err) => {
            report::vm_connect_failure(&err);
            process::exit(1);
        }
    };
    println!("[OK] Ensured database `{}` exists.", config.database);
    println!(
        "[STEP 2] Successfully connected to database: {}",
        config.database
    );

    let rows = &VM_ROWS;
    let writer = DbWriter::new(handle.clone());
    let written = writer.replace_visits(rows).await?;
    println!("[STEP 3] Successfully wrote {written} records to table `{VISITS_TABLE}`.");

    println!("[STEP 4] Reading back row count to verify data...");
    let reader = DbReader::new(handle.clone());
    let count = reader.visits_count().await?;
    println!("[OK] n_rows = {count}");

    handle.close().await;
    report::done("VM", started.elapsed());
    Ok(())
}
