use super::{Category, Grammar, Match, PatternMatcher};
use crate::error::{MatcherFault, RegistryError};

/// `#`, a letter, then letters, digits and underscores.
pub const HASHTAG_PATTERN: &str = r"#[a-zA-Z][a-zA-Z0-9_]*";

pub struct HashtagMatcher {
    grammar: Grammar,
}

impl HashtagMatcher {
    pub fn new() -> Result<Self, RegistryError> {
        Ok(HashtagMatcher {
            grammar: Grammar::compile(Category::Hashtag.as_str(), HASHTAG_PATTERN)?,
        })
    }
}

impl PatternMatcher for HashtagMatcher {
    fn category(&self) -> &str {
        self.grammar.category()
    }

    fn find_all(&self, text: &str) -> Result<Vec<Match>, MatcherFault> {
        Ok(self.grammar.scan(text))
    }
}
