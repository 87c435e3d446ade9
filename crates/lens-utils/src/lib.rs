//! Shared utilities for thesis-lens
//!
//! Logging setup and small helpers for reading configuration from the
//! environment, used by the library crates and the CLI alike.

pub mod env;
pub mod logging;

pub use env::env_var;
pub use logging::{init_tracing, init_tracing_with};
