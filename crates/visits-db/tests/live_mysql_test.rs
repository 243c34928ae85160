//! Opt-in tests against a live MySQL server.
//!
//! These run the real driver path end to end and are ignored by
//! default. Point the `VM_DB_*` variables at a reachable server and run
//! `cargo test -p visits-db -- --ignored`.

use visits_core::VM_ROWS;
use visits_db::{DbConfig, DbHandle, DbReader, DbWriter, Target};

#[tokio::test]
#[ignore = "requires a live MySQL server configured via the VM_DB_* variables"]
async fn vm_bootstrap_write_and_count_against_live_server() {
    let config = DbConfig::from_env(Target::Vm).unwrap();

    let handle = DbHandle::connect_with_bootstrap(&config).await.unwrap();
    assert!(handle.database_exists(&config.database).await.unwrap());

    // Re-issuing the create is a no-op on an existing database.
    handle.ensure_database(&config.database).await.unwrap();

    let writer = DbWriter::new(handle.clone());
    let reader = DbReader::new(handle.clone());

    assert_eq!(writer.replace_visits(&VM_ROWS).await.unwrap(), 5);
    assert_eq!(reader.visits_count().await.unwrap(), 5);
    assert_eq!(reader.fetch_visits().await.unwrap(), VM_ROWS);

    handle.close().await;
}

#[tokio::test]
#[ignore = "requires a live MySQL server configured via the VM_DB_* variables"]
async fn replace_write_is_idempotent_against_live_server() {
    let config = DbConfig::from_env(Target::Vm).unwrap();

    let handle = DbHandle::connect_with_bootstrap(&config).await.unwrap();
    let writer = DbWriter::new(handle.clone());
    let reader = DbReader::new(handle.clone());

    writer.replace_visits(&VM_ROWS).await.unwrap();
    writer.replace_visits(&VM_ROWS).await.unwrap();
    assert_eq!(reader.visits_count().await.unwrap(), 5);

    handle.close().await;
}
