use regex::{NoExpand, Regex};
use std::fmt;

use crate::error::{CodemodError, CodemodResult};

/// What a rule puts in place of each match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Inserted verbatim, `$` has no special meaning
    Literal(String),
    /// Capture groups are expanded (`$1`, `${name}`)
    Template(String),
}

/// A single find-pattern / replacement pair
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    pattern: Regex,
    replacement: Replacement,
    /// Line reported after a write when this rule matched
    summary: Option<String>,
}

impl Rule {
    /// Compile a rule from a pattern source
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        replacement: Replacement,
    ) -> CodemodResult<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|e| CodemodError::invalid_pattern(&name, e))?;
        Ok(Self {
            name,
            pattern,
            replacement,
            summary: None,
        })
    }

    /// Rule whose replacement is inserted verbatim
    pub fn literal(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> CodemodResult<Self> {
        Self::new(name, pattern, Replacement::Literal(replacement.into()))
    }

    /// Rule whose replacement expands capture groups
    pub fn template(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> CodemodResult<Self> {
        Self::new(name, pattern, Replacement::Template(replacement.into()))
    }

    pub fn with_summary(mut self, line: impl Into<String>) -> Self {
        self.summary = Some(line.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Replace every match in `text`, returning the new text and the match count
    ///
    /// Literal replacements follow the buffer's line endings: in a CRLF
    /// buffer their `\n` become `\r\n`.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let matches = self.pattern.find_iter(text).count();
        if matches == 0 {
            return (text.to_string(), 0);
        }

        let rewritten = match &self.replacement {
            Replacement::Literal(s) if text.contains("\r\n") => {
                let crlf = s.replace("\r\n", "\n").replace('\n', "\r\n");
                self.pattern.replace_all(text, NoExpand(&crlf)).into_owned()
            }
            Replacement::Literal(s) => self.pattern.replace_all(text, NoExpand(s)).into_owned(),
            Replacement::Template(s) => self.pattern.replace_all(text, s.as_str()).into_owned(),
        };
        (rewritten, matches)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: /{}/", self.name, self.pattern.as_str())
    }
}

/// A named, ordered list of rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub name: String,
    pub description: String,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}
