//! Clock times in 12-hour and 24-hour notation.
//!
//! The 12-hour branch requires an `AM`/`PM` suffix (upper or lower case,
//! optionally preceded by one whitespace character). The 24-hour branch is
//! captured as `h24` and guarded so that it never fires when such a suffix
//! follows; `"13:30 PM"` therefore yields nothing rather than `"13:30"`.

use super::{Category, Grammar, Match, PatternMatcher};
use crate::error::{MatcherFault, RegistryError};

pub const TIME_PATTERN: &str = r"\b(?:1[0-2]|0?[1-9]):[0-5]\d\s?(?:AM|PM|am|pm)\b|\b(?P<h24>(?:[01]?\d|2[0-3]):[0-5]\d)\b";

/// Suffix that disqualifies a 24-hour hit.
pub const MERIDIEM_SUFFIX: &str = r"\s?(?:AM|PM|am|pm)";

const TWENTY_FOUR_HOUR_GROUP: &str = "h24";

pub struct TimeMatcher {
    grammar: Grammar,
}

impl TimeMatcher {
    pub fn new() -> Result<Self, RegistryError> {
        let grammar = Grammar::compile(Category::Time.as_str(), TIME_PATTERN)?
            .reject_followed_by(MERIDIEM_SUFFIX, Some(TWENTY_FOUR_HOUR_GROUP))?;
        Ok(TimeMatcher { grammar })
    }
}

impl PatternMatcher for TimeMatcher {
    fn category(&self) -> &str {
        self.grammar.category()
    }

    fn find_all(&self, text: &str) -> Result<Vec<Match>, MatcherFault> {
        Ok(self.grammar.scan(text))
    }
}
