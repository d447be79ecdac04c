//! Tracing/logging initialization.
//!
//! One fmt subscriber per process, filtered by `RUST_LOG` or the configured
//! level. [`LogFormat`] picks the line shape: JSON objects for log shipping
//! (the default) or multi-line pretty text for local runs. Further layers
//! (request spans, correlation IDs) would be added here.

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Output format of the fmt layer, read from `telemetry.log_format`
/// (`"json"` or `"pretty"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Initialize tracing for the process.
///
/// `RUST_LOG` wins over `default_level`. Safe to call multiple times
/// (subsequent calls are no-ops).
pub fn init(default_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init("debug", LogFormat::Json);
        init("not a [valid filter", LogFormat::Pretty);
        ::tracing::info!("still logging");
    }

    #[test]
    fn json_is_the_default_format() {
        assert_eq!(LogFormat::default(), LogFormat::Json);
    }
}
