//! Stepwise CLI library.
//!
//! The binary is a thin argument dispatcher; the commands and their
//! rendering live here so they can be tested without a process.

use std::sync::Once;

pub mod commands;

static TRACING_INIT: Once = Once::new();

/// Install the `tracing` subscriber. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
