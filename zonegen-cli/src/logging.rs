//! Tracing setup
//!
//! Library crates log through the `log` facade; the subscriber installs the
//! `log` bridge so those records show up here as well. Everything goes to
//! stderr so the report on stdout stays clean.

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// `-v` enables info, `-vv` debug. `RUST_LOG` directives still apply.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(verbosity > 1),
        )
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
