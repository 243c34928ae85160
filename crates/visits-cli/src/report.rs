//! Console blocks shared by the demo flows.
//!
//! The step lines printed on stdout are the user-facing contract; the
//! `tracing` output stays diagnostic. Nothing in this module prints
//! the password, and the masked URLs it receives were built masked.

use std::env;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};

use visits_db::{DEFAULT_MYSQL_PORT, Error, Target};

const SEPARATOR_WIDTH: usize = 50;

pub fn separator() {
    println!("{}", "=".repeat(SEPARATOR_WIDTH));
}

/// Print the `[ENV]` block for `target`: host, port, user and database
/// name, never the password. Unset values show as placeholders so the
/// operator can see at a glance which variable is wrong.
pub fn env_summary(target: Target) {
    let prefix = target.prefix();
    for suffix in ["HOST", "PORT", "USER", "NAME"] {
        let name = format!("{prefix}_{suffix}");
        let value = match env::var(&name) {
            Ok(value) if !value.is_empty() => value,
            _ if suffix == "PORT" => DEFAULT_MYSQL_PORT.to_string(),
            _ => "(not set)".to_string(),
        };
        println!("[ENV] {name}: {value}");
    }
}

pub fn managed_missing_config(err: &Error) {
    println!();
    println!("[ERROR] Missing environment variables. Please check your .env file.");
    println!("        ({err})");
}

pub fn vm_missing_config() {
    println!();
    println!(
        "[ERROR] Missing one or more required environment variables \
         (VM_DB_HOST, VM_DB_USER, VM_DB_PASS, VM_DB_NAME)."
    );
    println!("Please check your .env file for correct casing and values.");
}

pub fn managed_connect_failure(err: &Error) {
    println!("[ERROR] Could not connect to the database.");
    println!("Common causes:");
    println!("  1. The database does not exist (managed services require creating it first).");
    println!("  2. A network firewall or IP allow-list is blocking the connection.");
    println!("  3. The credentials are incorrect.");
    println!("Error details: {err}");
}

pub fn vm_connect_failure(err: &Error) {
    println!();
    println!("[CRITICAL ERROR] Failed to connect to VM MySQL Server in Step 1.");
    println!("Please check the following:");
    println!("  1. Is the firewall open for tcp:3306?");
    println!("  2. Is bind-address set to 0.0.0.0 in mysqld.cnf?");
    println!("  3. Are VM_DB_USER / VM_DB_PASS correct in .env?");
    println!("Details: {err}");
}

/// Closing line: elapsed wall-clock seconds with one decimal and the
/// UTC completion timestamp.
pub fn done(label: &str, elapsed: Duration) {
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    println!();
    println!(
        "[DONE] {label} path completed in {:.1}s at {stamp}",
        elapsed.as_secs_f64()
    );
}
