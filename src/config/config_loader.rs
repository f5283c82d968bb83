use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::codemods::{api_client, cookie_helper};
use crate::diff::rewriter::MatchPolicy;
use crate::error::{CodemodError, CodemodResult};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "SETTINGS_CODEMOD_CONFIG";

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "settings-codemod.toml";

/// Default target, resolved against the working directory
pub const DEFAULT_TARGET: &str = "Settings.js";

/// Main configuration structure for settings-codemod
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CodemodConfig {
    /// File rewritten in place
    pub target: PathBuf,

    /// Whether a rule that matches nothing aborts the run
    pub strict: bool,

    /// Expression substituted for removed `getCookie(...)` calls
    pub cookie_fallback: String,

    /// Module path used in the added `import api from '...'` line
    pub api_import: String,

    /// Extra rule sets, runnable by name
    pub rule_sets: Vec<RuleSetConfig>,
}

impl Default for CodemodConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from(DEFAULT_TARGET),
            strict: false,
            cookie_fallback: cookie_helper::DEFAULT_FALLBACK.to_string(),
            api_import: api_client::DEFAULT_IMPORT.to_string(),
            rule_sets: Vec::new(),
        }
    }
}

impl CodemodConfig {
    pub fn match_policy(&self) -> MatchPolicy {
        if self.strict {
            MatchPolicy::Strict
        } else {
            MatchPolicy::Lenient
        }
    }
}

/// A user-defined rule set
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleSetConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// A user-defined rule
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleConfig {
    pub name: String,
    pub pattern: String,
    pub replacement: String,
    /// Insert the replacement verbatim instead of expanding `$1` captures
    #[serde(default)]
    pub literal: bool,
    /// Line printed after a write when the rule matched
    #[serde(default)]
    pub summary: Option<String>,
}

/// The configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    required: bool,
}

impl ConfigLoader {
    /// Locate the config from the environment or the working directory
    pub fn new() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self {
                config_path: Some(PathBuf::from(path)),
                required: true,
            };
        }

        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        Self {
            config_path: default_path.exists().then_some(default_path),
            required: false,
        }
    }

    /// Set a custom config path; a missing file is an error
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            required: true,
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load the configuration
    pub fn load(&self) -> CodemodResult<CodemodConfig> {
        let Some(path) = &self.config_path else {
            debug!("No config file, using defaults");
            return Ok(CodemodConfig::default());
        };

        if !path.exists() && !self.required {
            return Ok(CodemodConfig::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CodemodError::config_error(path, format!("failed to read: {}", e)))?;

        let config: CodemodConfig = toml::from_str(&content)
            .map_err(|e| CodemodError::config_error(path, e.to_string()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
