//! Runtime configuration from the environment
//!
//! Only tuning knobs and the sync endpoint live here; schedule and
//! monitoring state belongs to the cache.

use serde::{Deserialize, Serialize};

use crate::classify::ClassifyOptions;
use crate::monitoring::ProgressBasis;

pub const ENV_REQUIRE_DATE: &str = "ROSTERKIT_REQUIRE_DATE";
pub const ENV_PROGRESS_BASIS: &str = "ROSTERKIT_PROGRESS_BASIS";
pub const ENV_SYNC_URL: &str = "ROSTERKIT_SYNC_URL";
pub const ENV_SYNC_TOKEN: &str = "ROSTERKIT_SYNC_TOKEN";

/// Application configuration. Every field has a working default; the
/// tool runs with no environment at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Reject pasted rows without a usable date
    #[serde(default)]
    pub require_date: bool,
    /// Which monitoring mark feeds the progress percentage
    #[serde(default)]
    pub progress_basis: ProgressBasis,
    /// Shared monitoring document endpoint; sync is disabled when unset
    #[serde(default)]
    pub sync_endpoint: Option<String>,
    /// Bearer token for the sync endpoint
    #[serde(default)]
    pub sync_token: Option<String>,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a lookup function. Public for
    /// testability without mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let require_date = lookup(ENV_REQUIRE_DATE)
            .map(|value| parse_bool(&value))
            .unwrap_or(false);
        let progress_basis = lookup(ENV_PROGRESS_BASIS)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        let sync_endpoint = lookup(ENV_SYNC_URL).and_then(non_blank);
        let sync_token = lookup(ENV_SYNC_TOKEN).and_then(non_blank);

        Self {
            require_date,
            progress_basis,
            sync_endpoint,
            sync_token,
        }
    }

    /// Classifier options derived from this configuration.
    #[must_use]
    pub const fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            require_date: self.require_date,
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert!(!config.classify_options().require_date);
        assert_eq!(config.progress_basis, ProgressBasis::Uploaded);
    }

    #[test]
    fn boolean_values_parse_loosely() {
        for value in ["1", "true", "YES", "on"] {
            let config = AppConfig::from_lookup(env(&[(ENV_REQUIRE_DATE, value)]));
            assert!(config.require_date, "{value} should enable");
        }
        let config = AppConfig::from_lookup(env(&[(ENV_REQUIRE_DATE, "0")]));
        assert!(!config.require_date);
    }

    #[test]
    fn progress_basis_from_env() {
        let config = AppConfig::from_lookup(env(&[(ENV_PROGRESS_BASIS, "checked")]));
        assert_eq!(config.progress_basis, ProgressBasis::Checked);

        // Unparseable values keep the default.
        let config = AppConfig::from_lookup(env(&[(ENV_PROGRESS_BASIS, "sideways")]));
        assert_eq!(config.progress_basis, ProgressBasis::Uploaded);
    }

    #[test]
    fn blank_sync_settings_read_as_unset() {
        let config = AppConfig::from_lookup(env(&[(ENV_SYNC_URL, "  "), (ENV_SYNC_TOKEN, "")]));
        assert!(config.sync_endpoint.is_none());
        assert!(config.sync_token.is_none());

        let config = AppConfig::from_lookup(env(&[(
            ENV_SYNC_URL,
            " https://api.example.com/monitoring ",
        )]));
        assert_eq!(
            config.sync_endpoint.as_deref(),
            Some("https://api.example.com/monitoring")
        );
    }
}
