// Configuration module for settings-codemod
// Values come from an optional TOML file; CLI flags override them

pub mod config_loader;

pub use config_loader::{
    CodemodConfig, ConfigLoader, RuleConfig, RuleSetConfig, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE,
    DEFAULT_TARGET,
};
