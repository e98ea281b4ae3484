use super::{Category, Grammar, Match, PatternMatcher};
use crate::error::{MatcherFault, RegistryError};

pub const HTML_TAG_PATTERN: &str = r"</?[a-zA-Z][^<>]*/?>";

pub struct HtmlTagMatcher {
    grammar: Grammar,
}

impl HtmlTagMatcher {
    pub fn new() -> Result<Self, RegistryError> {
        Ok(HtmlTagMatcher {
            grammar: Grammar::compile(Category::HtmlTag.as_str(), HTML_TAG_PATTERN)?,
        })
    }
}

impl PatternMatcher for HtmlTagMatcher {
    fn category(&self) -> &str {
        self.grammar.category()
    }

    fn find_all(&self, text: &str) -> Result<Vec<Match>, MatcherFault> {
        Ok(self.grammar.scan(text))
    }
}
