use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::warn;

use crate::audio::DEFAULT_AUTO_STOP;
use crate::catalog::DEFAULT_PAGE_SIZE;

const DEFAULT_CATALOG_PATH: &str = "data/animals.json";
const DEFAULT_ASSETS_DIR: &str = ".";

/// Runtime settings, read from the environment (and `.env` if present).
/// The bot token itself is picked up by `Bot::from_env` from `TELOXIDE_TOKEN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub page_size: usize,
    pub audio_auto_stop: Duration,
    /// Asset references in the catalog are resolved against this directory
    pub assets_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            page_size: DEFAULT_PAGE_SIZE,
            audio_auto_stop: DEFAULT_AUTO_STOP,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let page_size = parse_or(&lookup, "WILDLIFE_PAGE_SIZE", defaults.page_size);
        let page_size = if page_size == 0 {
            warn!("WILDLIFE_PAGE_SIZE must be at least 1, using {}", DEFAULT_PAGE_SIZE);
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        Self {
            catalog_path: lookup("WILDLIFE_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            page_size,
            audio_auto_stop: Duration::from_secs(parse_or(
                &lookup,
                "WILDLIFE_AUDIO_AUTO_STOP_SECS",
                defaults.audio_auto_stop.as_secs(),
            )),
            assets_dir: lookup("WILDLIFE_ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
        }
    }
}

fn parse_or<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), Config::default());
        assert_eq!(Config::default().page_size, 9);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("WILDLIFE_CATALOG_PATH", "/srv/animals.json"),
            ("WILDLIFE_PAGE_SIZE", "12"),
            ("WILDLIFE_AUDIO_AUTO_STOP_SECS", "10"),
        ]);
        assert_eq!(config.catalog_path, PathBuf::from("/srv/animals.json"));
        assert_eq!(config.page_size, 12);
        assert_eq!(config.audio_auto_stop, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config(&[("WILDLIFE_PAGE_SIZE", "0"), ("WILDLIFE_AUDIO_AUTO_STOP_SECS", "soon")]);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.audio_auto_stop, DEFAULT_AUTO_STOP);
    }
}
