// Built-in rule sets and the registry that resolves rule sets by name

pub mod api_client;
pub mod cookie_helper;

use crate::config::{CodemodConfig, RuleSetConfig};
use crate::diff::rules::{Replacement, Rule, RuleSet};
use crate::error::{CodemodError, CodemodResult};

/// Built-in rule sets in the order `all` runs them
pub const BUILTIN_ORDER: &[&str] = &[api_client::NAME, cookie_helper::NAME];

/// Every rule set known to one invocation, built-ins first
#[derive(Debug, Clone)]
pub struct Registry {
    rule_sets: Vec<RuleSet>,
}

impl Registry {
    /// Compile the built-in rule sets plus any defined in `config`
    pub fn from_config(config: &CodemodConfig) -> CodemodResult<Self> {
        let mut rule_sets = vec![
            api_client::rule_set(&config.api_import)?,
            cookie_helper::rule_set(&config.cookie_fallback)?,
        ];

        for set_config in &config.rule_sets {
            let compiled = compile_rule_set(set_config)?;
            // A configured set with a built-in name replaces the built-in
            rule_sets.retain(|existing| existing.name != compiled.name);
            rule_sets.push(compiled);
        }

        Ok(Self { rule_sets })
    }

    pub fn get(&self, name: &str) -> CodemodResult<&RuleSet> {
        self.rule_sets
            .iter()
            .find(|set| set.name == name)
            .ok_or_else(|| CodemodError::UnknownRuleSet(name.to_string()))
    }

    /// The built-in sequence run by `all`
    pub fn builtin_sequence(&self) -> CodemodResult<Vec<&RuleSet>> {
        BUILTIN_ORDER.iter().map(|name| self.get(name)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleSet> {
        self.rule_sets.iter()
    }
}

fn compile_rule_set(config: &RuleSetConfig) -> CodemodResult<RuleSet> {
    let mut set = RuleSet::new(&config.name, &config.description);

    for rule in &config.rules {
        let replacement = if rule.literal {
            Replacement::Literal(rule.replacement.clone())
        } else {
            Replacement::Template(rule.replacement.clone())
        };
        let mut compiled = Rule::new(&rule.name, &rule.pattern, replacement)?;
        if let Some(line) = &rule.summary {
            compiled = compiled.with_summary(line);
        }
        set = set.with_rule(compiled);
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;

    fn custom_set(name: &str, pattern: &str) -> RuleSetConfig {
        RuleSetConfig {
            name: name.to_string(),
            description: "custom".to_string(),
            rules: vec![RuleConfig {
                name: "rename".to_string(),
                pattern: pattern.to_string(),
                replacement: "/admin/configs".to_string(),
                literal: true,
                summary: Some("- Renamed endpoint".to_string()),
            }],
        }
    }

    #[test]
    fn test_builtins_are_registered_in_order() {
        let registry = Registry::from_config(&CodemodConfig::default()).unwrap();
        let sequence = registry.builtin_sequence().unwrap();
        let names: Vec<&str> = sequence.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["api-client", "cookie-helper"]);
    }

    #[test]
    fn test_unknown_rule_set() {
        let registry = Registry::from_config(&CodemodConfig::default()).unwrap();
        assert!(matches!(
            registry.get("nope"),
            Err(CodemodError::UnknownRuleSet(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_configured_rule_set_is_compiled() {
        let config = CodemodConfig {
            rule_sets: vec![custom_set("rename-endpoint", r"/admin/config\b")],
            ..CodemodConfig::default()
        };
        let registry = Registry::from_config(&config).unwrap();
        let set = registry.get("rename-endpoint").unwrap();

        assert_eq!(set.rules.len(), 1);
        assert_eq!(set.rules[0].summary(), Some("- Renamed endpoint"));
        let (out, n) = set.rules[0].apply("api.get('/admin/config')");
        assert_eq!(n, 1);
        assert_eq!(out, "api.get('/admin/configs')");
    }

    #[test]
    fn test_configured_invalid_pattern_fails() {
        let config = CodemodConfig {
            rule_sets: vec![custom_set("broken", "(")],
            ..CodemodConfig::default()
        };
        assert!(matches!(
            Registry::from_config(&config),
            Err(CodemodError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_fallback_from_config_reaches_cookie_rules() {
        let config = CodemodConfig {
            cookie_fallback: "undefined".to_string(),
            ..CodemodConfig::default()
        };
        let registry = Registry::from_config(&config).unwrap();
        let set = registry.get(cookie_helper::NAME).unwrap();
        let (out, _) = set.rules[1].apply("const t = getCookie('authToken');");
        assert_eq!(out, "const t = undefined;");
    }
}
