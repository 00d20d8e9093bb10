//! Skill counting: case-insensitive substring occurrences per label.
//!
//! Matching is substring-based, not tokenised: `"sql"` also counts inside
//! `"mysql"`. Counts are non-overlapping, scanning left to right.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Skill list used when the user supplies none.
pub const DEFAULT_SKILLS: &str = "Python, Machine Learning, Data Analysis, SQL, Tableau";

/// The required skill labels for one run, lowercased, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    labels: Vec<String>,
}

impl SkillSet {
    /// Parse a comma-separated list. Entries are trimmed and lowercased;
    /// empty entries and repeats are dropped.
    pub fn parse(input: &str) -> Self {
        Self::from_labels(input.split(','))
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref().trim().to_lowercase();
            if !label.is_empty() && !out.contains(&label) {
                out.push(label);
            }
        }
        Self { labels: out }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Count per skill label for one document, ordered by label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillCounts(BTreeMap<String, usize>);

impl SkillCounts {
    /// Count for `label`; 0 when the label was not counted.
    pub fn get(&self, label: &str) -> usize {
        self.0.get(label).copied().unwrap_or(0)
    }

    /// `(label, count)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of labels with a non-zero count.
    pub fn matched(&self) -> usize {
        self.0.values().filter(|&&c| c > 0).count()
    }

    /// True if any of `required` has a non-zero count.
    pub fn matches_any(&self, required: &SkillSet) -> bool {
        required.iter().any(|label| self.get(label) > 0)
    }
}

impl FromIterator<(String, usize)> for SkillCounts {
    fn from_iter<T: IntoIterator<Item = (String, usize)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Count every label of `skills` in `text`, ignoring case.
pub fn count_skills(text: &str, skills: &SkillSet) -> SkillCounts {
    let haystack = text.to_lowercase();
    skills
        .iter()
        .map(|label| (label.to_string(), haystack.matches(label).count()))
        .collect()
}
