//! Logging setup for the `fapshi` binary.
//!
//! Logs go to stderr so stdout carries only the JSON response.

use std::io;

use clap::ValueEnum;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, for terminals.
    #[default]
    Pretty,
    /// One JSON object per line, for log shippers.
    Json,
}

/// Default filter directive for a `-v` count.
///
/// `RUST_LOG`, when set, takes precedence over this.
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn build_filter(rust_log: Option<&str>, verbosity: u8) -> EnvFilter {
    rust_log
        .filter(|directive| !directive.trim().is_empty())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbosity)))
}

/// Installs the global tracing subscriber.
///
/// # Environment Variables
///
/// - `RUST_LOG`: filter directive, overrides `verbosity`
///
/// Span close events are emitted so each gateway call logs its duration.
pub fn init_observability(format: LogFormat, verbosity: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), verbosity);

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => {
            subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
        LogFormat::Json => {
            subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "info");
        assert_eq!(default_directive(1), "debug");
        assert_eq!(default_directive(2), "trace");
        assert_eq!(default_directive(u8::MAX), "trace");
    }

    #[test]
    fn test_build_filter_prefers_rust_log() {
        let filter = build_filter(Some("fapshi_client=trace"), 0);
        assert_eq!(filter.to_string(), "fapshi_client=trace");
    }

    #[test]
    fn test_build_filter_falls_back_to_verbosity() {
        assert_eq!(build_filter(None, 1).to_string(), "debug");
        assert_eq!(build_filter(Some("   "), 0).to_string(), "info");
    }

    #[test]
    fn test_log_format_value_enum() {
        assert_eq!(LogFormat::from_str("json", true), Ok(LogFormat::Json));
        assert_eq!(LogFormat::from_str("PRETTY", true), Ok(LogFormat::Pretty));
        assert!(LogFormat::from_str("xml", true).is_err());
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }
}
