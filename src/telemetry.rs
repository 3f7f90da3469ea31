//! Telemetry helpers for applications embedding `chart-grid`.
//!
//! Grid builds emit `tracing` events (axis allocation, grid rollback,
//! unbound series). Nothing is printed unless a subscriber is installed,
//! either through `init_default_tracing` or by the host application.

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter is read from `RUST_LOG`, falling back to `chart_grid=info`.
/// Returns `false` when the feature is disabled or a global subscriber was
/// already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chart_grid=info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
