use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::diff::operations::{diff_stats, unified_diff};
use crate::diff::rewriter::{MatchPolicy, RewriteReport, Rewriter};
use crate::diff::rules::RuleSet;
use crate::utils::fs::{read_source, write_source};

/// Options for one invocation
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// File rewritten in place
    pub target: PathBuf,
    pub policy: MatchPolicy,
    /// Print a diff instead of writing
    pub dry_run: bool,
}

/// Run `rule_sets` in order against the target file
///
/// Each rule set behaves like its own script: it rewrites the current text
/// and writes it back before the next set runs, printing its success
/// message to `out`. In dry-run mode nothing is written and a single diff of
/// the combined change is printed instead.
pub fn execute(
    rule_sets: &[&RuleSet],
    options: &RunOptions,
    out: &mut dyn Write,
) -> Result<Vec<RewriteReport>> {
    let rewriter = Rewriter::new(options.policy);
    let original = read_source(&options.target)
        .with_context(|| format!("Failed to load {}", options.target.display()))?;

    let mut current = original.clone();
    let mut reports = Vec::with_capacity(rule_sets.len());

    for rule_set in rule_sets {
        info!(
            "Running rule set '{}' on {}",
            rule_set.name,
            options.target.display()
        );
        let report = rewriter
            .apply(rule_set, &current)
            .with_context(|| format!("Rule set '{}' failed", rule_set.name))?;

        if !options.dry_run {
            write_source(&options.target, &report.content)
                .with_context(|| format!("Failed to write {}", options.target.display()))?;
            print_success(out, &options.target, rule_set, &report)?;
        }

        current = report.content.clone();
        reports.push(report);
    }

    if options.dry_run {
        let label = display_name(&options.target);
        let diff = unified_diff(&label, &original, &current);
        if diff.is_empty() {
            writeln!(out, "{}: no changes", label)?;
        } else {
            write!(out, "{}", diff)?;
            writeln!(out, "{}: {}", label, diff_stats(&original, &current))?;
        }
    }

    Ok(reports)
}

fn print_success(
    out: &mut dyn Write,
    target: &Path,
    rule_set: &RuleSet,
    report: &RewriteReport,
) -> Result<()> {
    writeln!(
        out,
        "{} has been rewritten by {}!",
        display_name(target),
        rule_set.name
    )?;
    let mut reported: Vec<&str> = Vec::new();
    for (rule, outcome) in rule_set.rules.iter().zip(&report.outcomes) {
        if let Some(line) = rule.summary().filter(|_| outcome.matched()) {
            if !reported.contains(&line) {
                writeln!(out, "{}", line)?;
                reported.push(line);
            }
        }
    }
    for skipped in report.skipped() {
        writeln!(out, "- Skipped '{}' (no match)", skipped.rule)?;
    }
    Ok(())
}

fn display_name(target: &Path) -> String {
    target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.display().to_string())
}

/// Print every rule set with its rules
pub fn list(rule_sets: &[&RuleSet], out: &mut dyn Write) -> Result<()> {
    for rule_set in rule_sets {
        writeln!(out, "{} - {}", rule_set.name, rule_set.description)?;
        for rule in &rule_set.rules {
            writeln!(out, "  {}", rule)?;
        }
    }
    Ok(())
}
