//! Observability for equipscan.
//! `tracing` crate with `EnvFilter`, per-crate log levels.

pub mod setup;

pub use setup::init_tracing;
