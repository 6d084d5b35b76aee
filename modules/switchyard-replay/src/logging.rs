//! Subscriber filter selection for the replay binary.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Build the subscriber filter. A non-empty `rust_log` wins outright; the
/// configured `fallback` applies only when it is absent or blank.
pub fn env_filter(rust_log: Option<&str>, fallback: &str) -> Result<EnvFilter> {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("Invalid RUST_LOG filter: {directives}")),
        None => EnvFilter::try_new(fallback)
            .with_context(|| format!("Invalid log filter in config: {fallback}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_overrides_the_configured_filter() {
        let filter = env_filter(Some("switchyard=debug"), "switchyard=info").unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("switchyard=debug"));
        assert!(!rendered.contains("switchyard=info"));
    }

    #[test]
    fn configured_filter_applies_when_rust_log_is_unset_or_blank() {
        for rust_log in [None, Some(""), Some("  ")] {
            let filter = env_filter(rust_log, "switchyard=warn").unwrap();
            assert!(filter.to_string().contains("switchyard=warn"));
        }
    }

    #[test]
    fn invalid_configured_filter_is_reported() {
        let err = env_filter(None, "switchyard=loud").unwrap_err();
        assert!(err.to_string().contains("switchyard=loud"));
    }
}
