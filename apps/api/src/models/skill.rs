use std::collections::BTreeSet;

use serde::Serialize;

/// Fixed alias table applied after case-folding. Keys are the short or
/// alternate spellings, values the canonical skill name.
const SKILL_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("golang", "go"),
    ("postgres", "postgresql"),
    ("k8s", "kubernetes"),
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("nlp", "natural language processing"),
    ("ms excel", "excel"),
    ("microsoft excel", "excel"),
    ("c sharp", "c#"),
    ("cpp", "c++"),
    ("node", "node.js"),
    ("nodejs", "node.js"),
    ("react.js", "react"),
    ("reactjs", "react"),
    ("amazon web services", "aws"),
    ("gcp", "google cloud"),
    ("ux", "user experience"),
    ("ui", "user interface"),
];

/// Canonical form of a skill name: trimmed, lowercased, inner whitespace
/// collapsed, then mapped through the alias table. Returns `None` for blanks.
pub fn normalize_skill(raw: &str) -> Option<String> {
    let folded = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if folded.is_empty() {
        return None;
    }
    let canonical = SKILL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(folded);
    Some(canonical)
}

/// Deduplicated set of normalized skill names, iterated in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes every raw name; blanks are dropped and duplicates collapse.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            raw.into_iter()
                .filter_map(|s| normalize_skill(s.as_ref()))
                .collect(),
        )
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_skill("  Python "), Some("python".to_string()));
    }

    #[test]
    fn test_normalize_collapses_inner_whitespace() {
        assert_eq!(
            normalize_skill("Machine   Learning"),
            Some("machine learning".to_string())
        );
    }

    #[test]
    fn test_normalize_applies_alias() {
        assert_eq!(normalize_skill("JS"), Some("javascript".to_string()));
        assert_eq!(normalize_skill("Postgres"), Some("postgresql".to_string()));
        assert_eq!(normalize_skill("ML"), Some("machine learning".to_string()));
    }

    #[test]
    fn test_normalize_blank_is_none() {
        assert_eq!(normalize_skill("   "), None);
    }

    #[test]
    fn test_skill_set_deduplicates_after_normalization() {
        let set = SkillSet::from_raw(["js", "JavaScript", " javascript ", "SQL"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("javascript"));
        assert!(set.contains("sql"));
    }

    #[test]
    fn test_skill_set_iterates_sorted() {
        let set = SkillSet::from_raw(["sql", "excel", "python"]);
        let names: Vec<&str> = set.iter().collect();
        assert_eq!(names, vec!["excel", "python", "sql"]);
    }

    #[test]
    fn test_skill_set_serializes_normalized_names() {
        let set = SkillSet::from_raw(["SQL", "js", "JavaScript"]);
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"["javascript","sql"]"#
        );
    }
}
