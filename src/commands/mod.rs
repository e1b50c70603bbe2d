//! Command implementations for the CLI
//!
//! - start: Start the HTTP server
//! - test: Test configuration validity
//! - config: Configuration display
//! - seed: Load the standard plans and price tables

pub mod config;
pub mod seed;
pub mod start;
