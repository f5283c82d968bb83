pub mod operations;
pub mod rewriter;
pub mod rules;

pub use operations::{diff_stats, unified_diff, DiffStats};
pub use rewriter::{MatchPolicy, RewriteReport, Rewriter, RuleOutcome};
pub use rules::{Replacement, Rule, RuleSet};
