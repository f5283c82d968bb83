//! Removal of the `getCookie` helper.
//!
//! Auth now travels with the API client's cookies, so the helper's
//! definition is dropped and any leftover call is replaced by a fallback
//! literal (`null` unless configured otherwise).

use crate::diff::rules::{Rule, RuleSet};
use crate::error::CodemodResult;

pub const NAME: &str = "cookie-helper";

pub const DEFAULT_FALLBACK: &str = "null";

/// Indentation a definition may sit at
///
/// `regex` has no backreferences, so the closing line is tied to the header's
/// indentation by spelling out one branch per depth.
const DEPTHS: &[&str] = &["", "  ", "    ", "      ", "\t", "\t\t"];

const COMMENT_LINE: &str = r"(?:^[ \t]*// Helper function to get cookie value[ \t]*\r?\n)?";

/// Characters and keywords after which `getCookie(` is a call, not a declaration
const CALL_CONTEXT: &str = r"(^|[=(,:?!&|\[{};+\-*/<>]|\breturn|\bawait)";

/// Matches the definition in arrow or `function` form with any parameter
/// list, an optional leading comment line, and one blank line after it.
fn definition_pattern() -> String {
    let branches: Vec<String> = DEPTHS
        .iter()
        .map(|indent| {
            format!(
                concat!(
                    r"^{i}(?:",
                    r"(?:const|let|var) getCookie = (?:\([^)\n]*\)|\w+) => \{{(?s:.*?)\n{i}\}};",
                    r"|function getCookie\([^)\n]*\) \{{(?s:.*?)\n{i}\}};?",
                    r")[ \t]*(?:\r?\n|\z)",
                ),
                i = indent
            )
        })
        .collect();
    format!(
        r"(?m){}(?:{})(?:[ \t]*\r?\n)?",
        COMMENT_LINE,
        branches.join("|")
    )
}

/// Rule deleting the helper's definition
pub fn definition_rule() -> CodemodResult<Rule> {
    Rule::literal("remove getCookie definition", &definition_pattern(), "")
        .map(|rule| rule.with_summary("- Removed getCookie function"))
}

/// Rule replacing each `getCookie(...)` call with `fallback`
pub fn call_site_rule(fallback: &str) -> CodemodResult<Rule> {
    let pattern = format!(r"(?m){}([ \t]*)getCookie\([^()]*\)", CALL_CONTEXT);
    let replacement = format!("${{1}}${{2}}{}", fallback.replace('$', "$$"));
    Rule::template("replace getCookie calls", &pattern, replacement)
        .map(|rule| rule.with_summary(format!("- Replaced getCookie calls with {}", fallback)))
}

pub fn rule_set(fallback: &str) -> CodemodResult<RuleSet> {
    Ok(RuleSet::new(NAME, "Remove the cookie helper and its call sites")
        .with_rule(definition_rule()?)
        .with_rule(call_site_rule(fallback)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::rewriter::{MatchPolicy, Rewriter};

    const HELPER_AND_CALLS: &str = "  const [success, setSuccess] = useState('');

  // Helper function to get cookie value
  const getCookie = (name) => {
    const value = `; ${document.cookie}`;
    const parts = value.split(`; ${name}=`);
    if (parts.length === 2) return parts.pop().split(';').shift();
    return null;
  };

  // Fetch existing invitations
  const fetchInvitations = async () => {
    const token = getCookie('authToken');
    const other = getCookie(\"refresh\");
  };
";

    #[test]
    fn test_removes_definition_and_call_sites() {
        let set = rule_set(DEFAULT_FALLBACK).unwrap();
        let report = Rewriter::new(MatchPolicy::Strict)
            .apply(&set, HELPER_AND_CALLS)
            .unwrap();

        assert!(!report.content.contains("getCookie"));
        assert!(!report.content.contains("document.cookie"));
        assert!(report.content.contains("const token = null;"));
        assert!(report.content.contains("const other = null;"));
        assert_eq!(report.outcomes[1].matches, 2);
    }

    #[test]
    fn test_definition_removal_keeps_surrounding_layout() {
        let report = Rewriter::default()
            .apply(&rule_set(DEFAULT_FALLBACK).unwrap(), HELPER_AND_CALLS)
            .unwrap();

        assert!(report.content.starts_with(
            "  const [success, setSuccess] = useState('');\n\n  // Fetch existing invitations\n"
        ));
    }

    #[test]
    fn test_top_level_definition_is_removed() {
        let input = "import axios from 'axios';\n\nconst getCookie = (name) => {\n  const value = `; ${document.cookie}`;\n  return null;\n};\n\nconst api = axios.create({});\n";
        let (out, n) = definition_rule().unwrap().apply(input);

        assert_eq!(n, 1);
        assert_eq!(out, "import axios from 'axios';\n\nconst api = axios.create({});\n");
    }

    #[test]
    fn test_custom_fallback_literal() {
        let set = rule_set("localStorage.getItem('authToken')").unwrap();
        let report = Rewriter::default()
            .apply(&set, "const token = getCookie('authToken');\n")
            .unwrap();

        assert_eq!(
            report.content,
            "const token = localStorage.getItem('authToken');\n"
        );
    }

    #[test]
    fn test_function_form_definition_is_removed() {
        let input = "function getCookie(name) {\n  const value = `; ${document.cookie}`;\n  return null;\n}\n\nconst t = getCookie('t');\n";
        let report = Rewriter::new(MatchPolicy::Strict)
            .apply(&rule_set(DEFAULT_FALLBACK).unwrap(), input)
            .unwrap();

        assert_eq!(report.content, "const t = null;\n");
    }

    #[test]
    fn test_definition_with_other_parameters_is_removed() {
        let rule = definition_rule().unwrap();
        for header in ["const getCookie = (key) => {", "const getCookie = name => {"] {
            let input = format!("  {}\n    return read();\n  }};\n  const keep = 1;\n", header);
            let (out, n) = rule.apply(&input);
            assert_eq!(n, 1, "{}", header);
            assert_eq!(out, "  const keep = 1;\n");
        }
    }

    #[test]
    fn test_call_sites_leave_function_header_alone() {
        let input = "function getCookie(name) {\n  return read(name);\n}\nconst t = getCookie('t');\nif (!getCookie('a') || getCookie('b')) {}\n";
        let (out, n) = call_site_rule(DEFAULT_FALLBACK).unwrap().apply(input);

        assert_eq!(n, 3);
        assert!(out.starts_with("function getCookie(name) {\n"));
        assert!(out.contains("const t = null;\n"));
        assert!(out.contains("if (!null || null) {}"));
    }

    #[test]
    fn test_fallback_dollar_is_not_expanded() {
        let (out, _) = call_site_rule("window.$token").unwrap().apply("x = getCookie('t');");
        assert_eq!(out, "x = window.$token;");
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let set = rule_set(DEFAULT_FALLBACK).unwrap();
        let first = Rewriter::default().apply(&set, HELPER_AND_CALLS).unwrap();
        let second = Rewriter::default().apply(&set, &first.content).unwrap();

        assert_eq!(second.content, first.content);
        assert!(!second.changes_made);
    }
}
