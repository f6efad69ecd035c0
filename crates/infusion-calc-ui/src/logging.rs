//! Log filter setup for the binaries.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "RUST_LOG";

/// Filter used when `RUST_LOG` is unset, blank or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "infusion_calc_core=info,infusion_calc_ui=info";

/// Build the log filter from a `RUST_LOG` value.
///
/// A valid value is used as-is, so it can raise or lower any target.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Log filter from the process environment.
pub fn env_log_filter() -> EnvFilter {
    log_filter(std::env::var(LOG_ENV).ok().as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_overrides_default() {
        let filter = log_filter(Some("infusion_calc_core=debug")).to_string();
        assert!(filter.contains("infusion_calc_core=debug"));
        assert!(!filter.contains("warn"));
        assert!(!filter.contains("infusion_calc_ui=info"));
    }

    #[test]
    fn test_default_when_unset_or_blank() {
        for directives in [None, Some(""), Some("   ")] {
            let filter = log_filter(directives).to_string();
            assert!(filter.contains("infusion_calc_core=info"), "{:?}", directives);
            assert!(filter.contains("infusion_calc_ui=info"), "{:?}", directives);
        }
    }

    #[test]
    fn test_default_when_invalid() {
        let filter = log_filter(Some("infusion_calc_core=loud")).to_string();
        assert!(filter.contains("infusion_calc_core=info"));
    }
}
