//! Kiln compiler driver.
//!
//! Wires the front end together: a [`Session`] loads files, pre-scans and
//! parses them with its own directive registry, runs semantic
//! [`checks`] and collects diagnostics. The `kiln` binary exposes this as
//! the `lex`, `parse` and `check` [`commands`].

mod cache;
pub mod checks;
pub mod commands;
pub mod config;
mod session;

pub use cache::DocumentCache;
pub use commands::Command;
pub use config::Config;
pub use session::Session;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
