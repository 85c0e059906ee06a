//! Tracing initialization for tests and binaries.
//!
//! Uses the `RUST_LOG` environment variable for filtering:
//! - `RUST_LOG=rustyjs8=debug` - all debug output
//! - `RUST_LOG=rustyjs8::decoder=trace` - trace one module

#[cfg(test)]
use once_cell::sync::Lazy;

/// Initialize tracing for tests. Safe to call from every test; the
/// subscriber is installed once.
#[cfg(test)]
pub fn init_test_tracing() {
    static TRACING: Lazy<()> = Lazy::new(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rustyjs8=warn"));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_test_writer()
            .init();
    });

    Lazy::force(&TRACING);
}

/// Initialize tracing for binaries. Call once, early in main().
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rustyjs8=info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
