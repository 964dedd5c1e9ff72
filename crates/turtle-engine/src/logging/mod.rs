//! Logger initialization.
//!
//! The engine only logs through the `log` facade; this module installs
//! `env_logger` as the backend for binaries and tests.

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
