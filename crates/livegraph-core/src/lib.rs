//! livegraph Core
//!
//! Shared plumbing for the livegraph crates: logging setup, profiling scopes,
//! fast hash collections and the plot settings block.

pub mod collections;
pub mod config;
pub mod logging;
pub mod profiling;
