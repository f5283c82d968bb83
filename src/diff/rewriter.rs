use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::rules::RuleSet;
use crate::error::{CodemodError, CodemodResult};

/// How a rule that matches nothing is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Skip it, logging a warning and recording it in the report
    #[default]
    Lenient,
    /// Abort the whole rewrite
    Strict,
}

/// How many times one rule matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: String,
    pub matches: usize,
}

impl RuleOutcome {
    pub fn matched(&self) -> bool {
        self.matches > 0
    }
}

/// Result of running one rule set over a buffer
#[derive(Debug, Clone)]
pub struct RewriteReport {
    /// Rewritten content
    pub content: String,
    /// One entry per rule, in application order
    pub outcomes: Vec<RuleOutcome>,
    /// Warnings generated for skipped rules
    pub warnings: Vec<String>,
    /// Whether the content differs from the input
    pub changes_made: bool,
}

impl RewriteReport {
    pub fn applied(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| o.matched())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| !o.matched())
    }
}

/// Applies rule sets to a text buffer in order
#[derive(Debug, Clone, Copy, Default)]
pub struct Rewriter {
    policy: MatchPolicy,
}

impl Rewriter {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// Apply every rule of `rule_set` to `content`, each seeing the previous output
    pub fn apply(&self, rule_set: &RuleSet, content: &str) -> CodemodResult<RewriteReport> {
        let mut buffer = content.to_string();
        let mut outcomes = Vec::with_capacity(rule_set.rules.len());
        let mut warnings = Vec::new();

        for rule in &rule_set.rules {
            let (rewritten, matches) = rule.apply(&buffer);

            if matches == 0 {
                if self.policy == MatchPolicy::Strict {
                    return Err(CodemodError::rule_not_matched(&rule_set.name, rule.name()));
                }
                warn!(
                    "Rule '{}' of '{}' matched nothing, skipping",
                    rule.name(),
                    rule_set.name
                );
                warnings.push(format!("Rule '{}' did not match", rule.name()));
            } else {
                debug!("Rule '{}' matched {} time(s)", rule.name(), matches);
                buffer = rewritten;
            }

            outcomes.push(RuleOutcome {
                rule: rule.name().to_string(),
                matches,
            });
        }

        let changes_made = buffer != content;
        info!(
            "Applied rule set '{}': {}/{} rules matched",
            rule_set.name,
            outcomes.iter().filter(|o| o.matched()).count(),
            outcomes.len()
        );

        Ok(RewriteReport {
            content: buffer,
            outcomes,
            warnings,
            changes_made,
        })
    }
}
