use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::MatcherFault;
use crate::patterns::Match;

/// Matches found for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatches {
    pub category: String,
    pub matches: Vec<Match>,
}

/// A category whose matcher faulted during `extract_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFailure {
    pub category: String,
    pub fault: MatcherFault,
}

/// Per-category results of one extraction call, in registration order.
///
/// Serializes as a JSON object of category name to an array of matched
/// strings. Use [`ExtractionReport::with_offsets`] to include byte offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    entries: Vec<CategoryMatches>,
    failures: Vec<CategoryFailure>,
}

impl ExtractionReport {
    pub(crate) fn push(&mut self, category: &str, matches: Vec<Match>) {
        self.entries.push(CategoryMatches {
            category: category.to_string(),
            matches,
        });
    }

    pub(crate) fn push_failure(&mut self, category: &str, fault: MatcherFault) {
        self.push(category, Vec::new());
        self.failures.push(CategoryFailure {
            category: category.to_string(),
            fault,
        });
    }

    pub fn get(&self, category: &str) -> Option<&[Match]> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.matches.as_slice())
    }

    /// Matched substrings for `category`, or `None` if it was not extracted.
    pub fn texts(&self, category: &str) -> Option<Vec<&str>> {
        self.get(category)
            .map(|matches| matches.iter().map(Match::as_str).collect())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.category.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryMatches> {
        self.entries.iter()
    }

    pub fn failures(&self) -> &[CategoryFailure] {
        &self.failures
    }

    pub fn failure_for(&self, category: &str) -> Option<&MatcherFault> {
        self.failures
            .iter()
            .find(|failure| failure.category == category)
            .map(|failure| &failure.fault)
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total_matches(&self) -> usize {
        self.entries.iter().map(|entry| entry.matches.len()).sum()
    }

    pub fn with_offsets(&self) -> WithOffsets<'_> {
        WithOffsets(self)
    }
}

impl Serialize for ExtractionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.category, &TextsOnly(&entry.matches))?;
        }
        map.end()
    }
}

struct TextsOnly<'a>(&'a [Match]);

impl Serialize for TextsOnly<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for m in self.0 {
            seq.serialize_element(&m.text)?;
        }
        seq.end()
    }
}

/// Serializes each match as `{ "text", "start", "end" }`.
pub struct WithOffsets<'a>(&'a ExtractionReport);

impl Serialize for WithOffsets<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.entries.len()))?;
        for entry in &self.0.entries {
            map.serialize_entry(&entry.category, &entry.matches)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_report() -> ExtractionReport {
        let mut report = ExtractionReport::default();
        report.push(
            "hashtag",
            vec![Match {
                text: "#rust".into(),
                start: 4,
                end: 9,
            }],
        );
        report.push_failure("email", MatcherFault::Internal("boom".into()));
        report
    }

    #[test]
    fn test_serializes_as_string_arrays_in_order() {
        let json = serde_json::to_string(&sample_report()).unwrap();
        assert_eq!(json, r##"{"hashtag":["#rust"],"email":[]}"##);
    }

    #[test]
    fn test_serializes_offsets() {
        let value = serde_json::to_value(sample_report().with_offsets()).unwrap();
        assert_eq!(
            value,
            json!({
                "hashtag": [{ "text": "#rust", "start": 4, "end": 9 }],
                "email": []
            })
        );
    }

    #[test]
    fn test_failure_is_recorded_with_empty_entry() {
        let report = sample_report();
        assert_eq!(report.texts("email"), Some(vec![]));
        assert_eq!(
            report.failure_for("email"),
            Some(&MatcherFault::Internal("boom".into()))
        );
        assert!(!report.is_clean());
        assert_eq!(report.total_matches(), 1);
        assert_eq!(report.texts("url"), None);
    }
}
