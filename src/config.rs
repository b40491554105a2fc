use crate::domain::tag::{ReleasePolicy, TagRules};
use crate::error::{ReleasePublishError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Represents the complete configuration for release-publish.
///
/// Controls environment-to-policy mapping, the initial version seed, and
/// pre-release lineage conventions.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub prerelease: PrereleaseConfig,
}

/// Release selection settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReleaseConfig {
    /// Seed used when no previous release tag exists. Unsetting this
    /// makes a first release a hard precondition failure.
    #[serde(default = "default_initial_version")]
    pub initial_version: Option<String>,

    /// Map of environment name to release policy.
    #[serde(default = "default_environments")]
    pub environments: HashMap<String, ReleasePolicy>,
}

fn default_initial_version() -> Option<String> {
    Some("0.1.0".to_string())
}

fn default_environments() -> HashMap<String, ReleasePolicy> {
    let mut environments = HashMap::new();
    environments.insert("dev".to_string(), ReleasePolicy::Stable);
    environments.insert("prod".to_string(), ReleasePolicy::Stable);
    environments.insert("test".to_string(), ReleasePolicy::Prerelease);
    environments
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            initial_version: default_initial_version(),
            environments: default_environments(),
        }
    }
}

/// Pre-release lineage settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PrereleaseConfig {
    /// Channel name seeded into pre-release identifiers (e.g. "beta.0").
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Identifier component marking a tag as pre-release lineage. An
    /// empty string means any pre-release identifier qualifies.
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Whether stable policy accepts tags with unrelated pre-release
    /// suffixes.
    #[serde(default = "default_true")]
    pub stable_accepts_suffixed: bool,
}

fn default_channel() -> String {
    "beta".to_string()
}

fn default_marker() -> String {
    "pre".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PrereleaseConfig {
    fn default() -> Self {
        PrereleaseConfig {
            channel: default_channel(),
            marker: default_marker(),
            stable_accepts_suffixed: default_true(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            release: ReleaseConfig::default(),
            prerelease: PrereleaseConfig::default(),
        }
    }
}

impl Config {
    /// Resolve the release policy for an environment selector.
    ///
    /// An unknown environment is a fatal configuration error; no partial
    /// output is produced downstream.
    pub fn policy_for(&self, environment: &str) -> Result<ReleasePolicy> {
        self.release
            .environments
            .get(environment)
            .copied()
            .ok_or_else(|| {
                ReleasePublishError::config(format!("Unknown environment: '{}'", environment))
            })
    }

    /// Tag admission rules derived from the pre-release settings.
    pub fn tag_rules(&self) -> TagRules {
        TagRules {
            marker: self.prerelease.marker.clone(),
            stable_accepts_suffixed: self.prerelease.stable_accepts_suffixed,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasepublish.toml` in current directory
/// 3. `.releasepublish.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasepublish.toml").exists() {
        fs::read_to_string("./releasepublish.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasepublish.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| ReleasePublishError::config(format!("Invalid configuration: {}", e)))
}
