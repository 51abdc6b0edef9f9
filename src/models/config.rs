//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
///
/// Everything here has a sensible default, so a missing or partial
/// `config.toml` still yields a working watcher. SMTP credentials are not
/// part of this file; they are read from the environment (see
/// [`crate::services::MailConfig`]).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Page fetch behavior settings
    #[serde(default)]
    pub watcher: WatcherConfig,

    /// Fixture extraction heuristics
    #[serde(default)]
    pub heuristics: HeuristicsConfig,

    /// Mail delivery behavior
    #[serde(default)]
    pub mail: MailDeliveryConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.watcher.url)
            .map_err(|e| AppError::validation(format!("watcher.url is invalid: {e}")))?;
        if self.watcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("watcher.user_agent is empty"));
        }
        if self.watcher.timeout_secs == 0 {
            return Err(AppError::validation("watcher.timeout_secs must be > 0"));
        }
        if self.heuristics.marker_phrase.trim().is_empty() {
            return Err(AppError::validation("heuristics.marker_phrase is empty"));
        }
        if self.heuristics.lookbehind == 0 {
            return Err(AppError::validation("heuristics.lookbehind must be > 0"));
        }
        if self.heuristics.max_team_name_len == 0 {
            return Err(AppError::validation(
                "heuristics.max_team_name_len must be > 0",
            ));
        }
        if self.mail.timeout_secs == 0 {
            return Err(AppError::validation("mail.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Page fetch behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// URL of the ticket sales page
    #[serde(default = "defaults::url")]
    pub url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            url: defaults::url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Fixture extraction heuristics.
///
/// The extraction is layout-sensitive by design: it works on the rendered
/// text of the page, not on its markup. These knobs exist so the heuristic
/// can be retuned without a rebuild when the page layout shifts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicsConfig {
    /// Phrase that ends a candidate listing block (compared case-insensitively)
    #[serde(default = "defaults::marker_phrase")]
    pub marker_phrase: String,

    /// How many lines before the marker belong to the block
    #[serde(default = "defaults::lookbehind")]
    pub lookbehind: usize,

    /// Maximum length for a team-name-like line, in characters
    #[serde(default = "defaults::max_team_name_len")]
    pub max_team_name_len: usize,

    /// Substrings that identify a competition line
    #[serde(default = "defaults::competition_keywords")]
    pub competition_keywords: Vec<String>,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            marker_phrase: defaults::marker_phrase(),
            lookbehind: defaults::lookbehind(),
            max_team_name_len: defaults::max_team_name_len(),
            competition_keywords: defaults::competition_keywords(),
        }
    }
}

/// Mail delivery behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailDeliveryConfig {
    /// SMTP delivery timeout in seconds
    #[serde(default = "defaults::mail_timeout")]
    pub timeout_secs: u64,
}

impl Default for MailDeliveryConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::mail_timeout(),
        }
    }
}

mod defaults {
    // Watcher defaults
    pub fn url() -> String {
        "https://www.sporting.pt/pt/bilhetes-e-gamebox/bilhetes".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; bilheteira/1.0)".into()
    }
    pub fn timeout() -> u64 {
        20
    }

    // Heuristics defaults
    pub fn marker_phrase() -> String {
        "Comprar Bilhetes".into()
    }
    pub fn lookbehind() -> usize {
        8
    }
    pub fn max_team_name_len() -> usize {
        30
    }
    pub fn competition_keywords() -> Vec<String> {
        vec!["Liga".into(), "Taça".into()]
    }

    // Mail defaults
    pub fn mail_timeout() -> u64 {
        30
    }
}
