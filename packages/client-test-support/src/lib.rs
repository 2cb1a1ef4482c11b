//! Table client test support utilities
//!
//! This crate provides the unified logging initialization shared by unit
//! tests and integration tests of the table client.

pub mod logging;
