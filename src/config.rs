//! Application configuration loaded from environment variables.
//!
//! Every setting is optional:
//! - `TICKERSCOPE_WATCHLIST_PATH`: JSON file holding the watchlist
//! - `TICKERSCOPE_REFRESH_SECS`: auto-refresh period in seconds
//! - `TICKERSCOPE_LOG_FILE`: file receiving tracing output
//! - `TICKERSCOPE_SEED`: fixed seed for reproducible mock data
//! - `TICKERSCOPE_SIMULATE_LATENCY`: `false` disables mock network delays
//! - `TICKERSCOPE_FAILURE_RATE`: probability in `[0, 1]` that a mock fetch fails

use std::path::PathBuf;
use std::time::Duration;

/// Default watchlist location, relative to the working directory.
const DEFAULT_WATCHLIST_PATH: &str = "watchlist.json";

/// Default log file location, relative to the working directory.
const DEFAULT_LOG_FILE: &str = "tickerscope.log";

/// Default auto-refresh period.
const DEFAULT_REFRESH_SECS: u64 = 30;

/// Longest accepted auto-refresh period (one day).
pub const MAX_REFRESH_SECS: u64 = 86_400;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub feed: FeedConfig,
    pub refresh_interval: Duration,
    pub log_file: PathBuf,
}

/// Where persistent state lives.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub watchlist_path: PathBuf,
}

/// Behaviour of the mock market-data feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub seed: Option<u64>,
    pub simulate_latency: bool,
    pub failure_rate: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            seed: None,
            simulate_latency: true,
            failure_rate: 0.0,
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`ScopeError::Config`](crate::ScopeError::Config) if a numeric
/// or boolean variable cannot be parsed, the refresh period is zero or
/// above [`MAX_REFRESH_SECS`], or the failure rate falls outside `[0, 1]`.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let watchlist_path = non_empty_var("TICKERSCOPE_WATCHLIST_PATH")
        .unwrap_or_else(|| DEFAULT_WATCHLIST_PATH.to_string());
    let log_file =
        non_empty_var("TICKERSCOPE_LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let refresh_secs = match non_empty_var("TICKERSCOPE_REFRESH_SECS") {
        Some(raw) => parse_var::<u64>("TICKERSCOPE_REFRESH_SECS", &raw)?,
        None => DEFAULT_REFRESH_SECS,
    };
    if refresh_secs == 0 {
        return Err(crate::ScopeError::Config(
            "TICKERSCOPE_REFRESH_SECS must be greater than zero".to_string(),
        ));
    }
    if refresh_secs > MAX_REFRESH_SECS {
        return Err(crate::ScopeError::Config(format!(
            "TICKERSCOPE_REFRESH_SECS must be at most {MAX_REFRESH_SECS}, got {refresh_secs}"
        )));
    }

    let seed = non_empty_var("TICKERSCOPE_SEED")
        .map(|raw| parse_var::<u64>("TICKERSCOPE_SEED", &raw))
        .transpose()?;

    let simulate_latency = match non_empty_var("TICKERSCOPE_SIMULATE_LATENCY") {
        Some(raw) => parse_bool("TICKERSCOPE_SIMULATE_LATENCY", &raw)?,
        None => true,
    };

    let failure_rate = match non_empty_var("TICKERSCOPE_FAILURE_RATE") {
        Some(raw) => parse_var::<f64>("TICKERSCOPE_FAILURE_RATE", &raw)?,
        None => 0.0,
    };
    if !(0.0..=1.0).contains(&failure_rate) {
        return Err(crate::ScopeError::Config(format!(
            "TICKERSCOPE_FAILURE_RATE must be between 0 and 1, got {failure_rate}"
        )));
    }

    Ok(AppConfig {
        storage: StorageConfig {
            watchlist_path: PathBuf::from(watchlist_path),
        },
        feed: FeedConfig {
            seed,
            simulate_latency,
            failure_rate,
        },
        refresh_interval: Duration::from_secs(refresh_secs),
        log_file: PathBuf::from(log_file),
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> crate::Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| crate::ScopeError::Config(format!("{name} is not valid ({raw:?}): {e}")))
}

fn parse_bool(name: &str, raw: &str) -> crate::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(crate::ScopeError::Config(format!(
            "{name} must be true or false, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 6] = [
        "TICKERSCOPE_WATCHLIST_PATH",
        "TICKERSCOPE_REFRESH_SECS",
        "TICKERSCOPE_LOG_FILE",
        "TICKERSCOPE_SEED",
        "TICKERSCOPE_SIMULATE_LATENCY",
        "TICKERSCOPE_FAILURE_RATE",
    ];

    /// Serializes tests that touch the process environment.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    /// Clears all config vars, applies `vars`, runs `f`, then restores originals.
    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let originals: Vec<(&str, Option<String>)> = ALL_VARS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: ENV_LOCK keeps every env-mutating test in this module serialized.
        unsafe {
            for k in ALL_VARS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values under the same lock.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(&[], || {
            let config = fetch_config().unwrap();
            assert_eq!(
                config.storage.watchlist_path,
                PathBuf::from(DEFAULT_WATCHLIST_PATH)
            );
            assert_eq!(config.refresh_interval, Duration::from_secs(30));
            assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
            assert_eq!(config.feed, FeedConfig::default());
        });
    }

    #[test]
    fn loads_values_from_env() {
        with_env(
            &[
                ("TICKERSCOPE_WATCHLIST_PATH", "/tmp/wl.json"),
                ("TICKERSCOPE_REFRESH_SECS", "5"),
                ("TICKERSCOPE_SEED", "42"),
                ("TICKERSCOPE_SIMULATE_LATENCY", "off"),
                ("TICKERSCOPE_FAILURE_RATE", "0.25"),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.storage.watchlist_path, PathBuf::from("/tmp/wl.json"));
                assert_eq!(config.refresh_interval, Duration::from_secs(5));
                assert_eq!(config.feed.seed, Some(42));
                assert!(!config.feed.simulate_latency);
                assert_eq!(config.feed.failure_rate, 0.25);
            },
        );
    }

    #[test]
    fn rejects_zero_refresh_period() {
        with_env(&[("TICKERSCOPE_REFRESH_SECS", "0")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("greater than zero"));
        });
    }

    #[test]
    fn rejects_refresh_period_above_one_day() {
        with_env(&[("TICKERSCOPE_REFRESH_SECS", "86401")], || {
            let err = fetch_config().unwrap_err();
            assert!(matches!(err, crate::ScopeError::Config(_)));
            assert!(err.to_string().contains("at most 86400"));
        });
        with_env(&[("TICKERSCOPE_REFRESH_SECS", "18446744073709551615")], || {
            assert!(fetch_config().is_err());
        });
        with_env(&[("TICKERSCOPE_REFRESH_SECS", "86400")], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.refresh_interval, Duration::from_secs(MAX_REFRESH_SECS));
        });
    }

    #[test]
    fn rejects_unparseable_seed() {
        with_env(&[("TICKERSCOPE_SEED", "abc")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("TICKERSCOPE_SEED"));
        });
    }

    #[test]
    fn rejects_failure_rate_out_of_range() {
        with_env(&[("TICKERSCOPE_FAILURE_RATE", "1.5")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("between 0 and 1"));
        });
    }

    #[test]
    fn rejects_garbage_boolean() {
        with_env(&[("TICKERSCOPE_SIMULATE_LATENCY", "maybe")], || {
            assert!(fetch_config().is_err());
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("TICKERSCOPE_WATCHLIST_PATH", ""),
                ("TICKERSCOPE_REFRESH_SECS", "  "),
                ("TICKERSCOPE_SEED", ""),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(
                    config.storage.watchlist_path,
                    PathBuf::from(DEFAULT_WATCHLIST_PATH)
                );
                assert_eq!(config.refresh_interval, Duration::from_secs(30));
                assert!(config.feed.seed.is_none());
            },
        );
    }
}
