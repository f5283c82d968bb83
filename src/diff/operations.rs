use similar::{ChangeTag, TextDiff};
use std::fmt;

/// Line counts of a change between two texts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffStats {
    pub inserted: usize,
    pub deleted: usize,
}

impl DiffStats {
    pub fn is_empty(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{}", self.inserted, self.deleted)
    }
}

/// Count inserted and deleted lines between `old` and `new`
pub fn diff_stats(old: &str, new: &str) -> DiffStats {
    let diff = TextDiff::from_lines(old, new);
    let mut stats = DiffStats::default();

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => stats.inserted += 1,
            ChangeTag::Delete => stats.deleted += 1,
            ChangeTag::Equal => {}
        }
    }

    stats
}

/// Render a unified diff of `old` → `new` labelled with `path`
///
/// Returns an empty string when the texts are identical.
pub fn unified_diff(path: &str, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }

    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{}", path), &format!("b/{}", path))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_count_changed_lines() {
        let old = "one\ntwo\nthree\n";
        let new = "one\n2\nthree\nfour\n";
        let stats = diff_stats(old, new);

        assert_eq!(stats.inserted, 2);
        assert_eq!(stats.deleted, 1);
        assert_eq!(stats.to_string(), "+2 -1");
    }

    #[test]
    fn test_identical_texts_have_no_diff() {
        assert!(diff_stats("same\n", "same\n").is_empty());
        assert_eq!(unified_diff("Settings.js", "same\n", "same\n"), "");
    }

    #[test]
    fn test_unified_diff_has_headers_and_hunks() {
        let diff = unified_diff(
            "Settings.js",
            "const token = getCookie('authToken');\n",
            "const token = null;\n",
        );

        assert!(diff.contains("--- a/Settings.js"));
        assert!(diff.contains("+++ b/Settings.js"));
        assert!(diff.contains("-const token = getCookie('authToken');"));
        assert!(diff.contains("+const token = null;"));
    }
}
