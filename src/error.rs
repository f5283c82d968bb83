use std::path::PathBuf;
use thiserror::Error;

/// Main error type for settings-codemod
#[derive(Error, Debug)]
pub enum CodemodError {
    #[error("IO error: {source} (path: {})", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Invalid pattern for rule '{rule}': {source}")]
    InvalidPattern { rule: String, source: regex::Error },

    #[error("Rule '{rule}' of rule set '{rule_set}' did not match anything")]
    RuleNotMatched { rule_set: String, rule: String },

    #[error("Config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Unknown rule set: {0}")]
    UnknownRuleSet(String),
}

impl CodemodError {
    /// Create a new IO error with path context
    pub fn io_error(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source: err,
            path: path.into(),
        }
    }

    /// Create a new invalid pattern error
    pub fn invalid_pattern(rule: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            rule: rule.into(),
            source,
        }
    }

    /// Create a new unmatched rule error
    pub fn rule_not_matched(rule_set: impl Into<String>, rule: impl Into<String>) -> Self {
        Self::RuleNotMatched {
            rule_set: rule_set.into(),
            rule: rule.into(),
        }
    }

    /// Create a new config error
    pub fn config_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using CodemodError
pub type CodemodResult<T> = Result<T, CodemodError>;

/// Contextual error mapping function
pub fn map_io_err<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> CodemodError {
    let path = path.into();
    move |err| CodemodError::io_error(err, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = map_io_err("Settings.js")(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let msg = err.to_string();
        assert!(msg.contains("Settings.js"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_rule_not_matched_message() {
        let err = CodemodError::rule_not_matched("api-client", "fetchConfig");
        assert_eq!(
            err.to_string(),
            "Rule 'fetchConfig' of rule set 'api-client' did not match anything"
        );
    }
}
