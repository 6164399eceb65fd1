//! `bt` console command family
//!
//! The registry of subcommands and the dispatcher that validates input,
//! runs a test session and restores advertising afterwards.

pub mod commands;
pub mod dispatch;
