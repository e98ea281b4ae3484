//! Dollar amounts.
//!
//! Either a comma-grouped integer (`$1,234`) or a plain digit run (`$1234`),
//! each with an optional two-digit fraction. A hit that is immediately
//! followed by `.` or `,` and another digit is malformed grouping and is
//! dropped, so `$1,23.456` yields nothing instead of a truncated `$1`.

use super::{Category, Grammar, Match, PatternMatcher};
use crate::error::{MatcherFault, RegistryError};

pub const CURRENCY_PATTERN: &str = r"\$(?:\d{1,3}(?:,\d{3})*(?:\.\d{2})?|\d+(?:\.\d{2})?)\b";

pub const DANGLING_GROUP_SUFFIX: &str = r"[.,]\d";

pub struct CurrencyMatcher {
    grammar: Grammar,
}

impl CurrencyMatcher {
    pub fn new() -> Result<Self, RegistryError> {
        let grammar = Grammar::compile(Category::Currency.as_str(), CURRENCY_PATTERN)?
            .reject_followed_by(DANGLING_GROUP_SUFFIX, None)?;
        Ok(CurrencyMatcher { grammar })
    }
}

impl PatternMatcher for CurrencyMatcher {
    fn category(&self) -> &str {
        self.grammar.category()
    }

    fn find_all(&self, text: &str) -> Result<Vec<Match>, MatcherFault> {
        Ok(self.grammar.scan(text))
    }
}
