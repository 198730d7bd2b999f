use std::{env, path::PathBuf, time::Duration};

use anyhow::Context as _;
use sitewatch_utils::{
    alerts::DEFAULT_ALERT_TTL, pagination::DEFAULT_PAGE_LIMIT, parse::parse_duration_seconds,
};

pub const DATA_VAR: &str = "SITEWATCH_DATA";
pub const PAGE_LIMIT_VAR: &str = "SITEWATCH_PAGE_LIMIT";
pub const ALERT_TTL_VAR: &str = "SITEWATCH_ALERT_TTL";

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Snapshot file backing the in-memory API.
    pub data_path: Option<PathBuf>,
    /// Page size used when a route does not specify one.
    pub page_limit: usize,
    /// How long an alert stays visible.
    pub alert_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            alert_ttl: DEFAULT_ALERT_TTL,
        }
    }
}

impl Config {
    /// Read settings from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (environment, tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let data_path = lookup(DATA_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let page_limit = match lookup(PAGE_LIMIT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit >= 1)
                .with_context(|| format!("{PAGE_LIMIT_VAR} must be a positive integer, got {raw:?}"))?,
            None => defaults.page_limit,
        };

        let alert_ttl = match lookup(ALERT_TTL_VAR) {
            Some(raw) => parse_duration_seconds(&raw)
                .map(Duration::from_secs)
                .with_context(|| format!("{ALERT_TTL_VAR} must look like `5s` or `2m`, got {raw:?}"))?,
            None => defaults.alert_ttl,
        };

        Ok(Self {
            data_path,
            page_limit,
            alert_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_limit, 20);
        assert_eq!(config.alert_ttl, Duration::from_secs(5));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            (DATA_VAR, "snapshot.json"),
            (PAGE_LIMIT_VAR, "50"),
            (ALERT_TTL_VAR, "1m"),
        ]))
        .unwrap();

        assert_eq!(config.data_path, Some(PathBuf::from("snapshot.json")));
        assert_eq!(config.page_limit, 50);
        assert_eq!(config.alert_ttl, Duration::from_secs(60));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[(PAGE_LIMIT_VAR, "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[(ALERT_TTL_VAR, "soon")])).is_err());
    }
}
