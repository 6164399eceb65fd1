//! Test sessions
//!
//! Parameter validation, the poll loop that owns the radio while a test
//! runs, and the queue that feeds scan results into it.

pub mod controller;
pub mod params;
pub mod scan;
