use super::{Category, Grammar, Match, PatternMatcher};
use crate::error::{MatcherFault, RegistryError};

// Either a parenthesised area code, or three bare digit groups delimited by
// word boundaries. Separators are `-`, `.` or whitespace and may be absent.
pub const PHONE_PATTERN: &str =
    r"(?:\(\d{3}\)\s*\d{3}[-.\s]*\d{4}|\b\d{3}[-.\s]*\d{3}[-.\s]*\d{4}\b)";

pub struct PhoneMatcher {
    grammar: Grammar,
}

impl PhoneMatcher {
    pub fn new() -> Result<Self, RegistryError> {
        Ok(PhoneMatcher {
            grammar: Grammar::compile(Category::Phone.as_str(), PHONE_PATTERN)?,
        })
    }
}

impl PatternMatcher for PhoneMatcher {
    fn category(&self) -> &str {
        self.grammar.category()
    }

    fn find_all(&self, text: &str) -> Result<Vec<Match>, MatcherFault> {
        Ok(self.grammar.scan(text))
    }
}
