#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # visits-core
//!
//! Row type and seed datasets for the MySQL visits demos.
//!
//! Both demo flows write the same table shape; this crate holds the
//! record type and the two fixed datasets so the adapter and CLI crates
//! agree on what a visit row is.

/// The visit row type.
pub mod record;
/// Fixed datasets the demo flows write.
pub mod seed;

/// One row of the visits table.
pub use record::VisitRecord;
/// Seed rows for the managed and VM flows.
pub use seed::{MANAGED_ROWS, VM_ROWS};
