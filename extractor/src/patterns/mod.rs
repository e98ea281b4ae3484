pub mod credit_card;
pub mod currency;
pub mod email;
pub mod hashtag;
pub mod html_tag;
pub mod phone;
pub mod time;
pub mod url;

use std::fmt;
use std::str::FromStr;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::error::{ExtractError, MatcherFault, RegistryError};

/// The built-in token categories, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Email,
    Url,
    Phone,
    CreditCard,
    Time,
    HtmlTag,
    Hashtag,
    Currency,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Email,
        Category::Url,
        Category::Phone,
        Category::CreditCard,
        Category::Time,
        Category::HtmlTag,
        Category::Hashtag,
        Category::Currency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Email => "email",
            Category::Url => "url",
            Category::Phone => "phone",
            Category::CreditCard => "credit_card",
            Category::Time => "time",
            Category::HtmlTag => "html_tag",
            Category::Hashtag => "hashtag",
            Category::Currency => "currency",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ExtractError::UnknownCategory(s.to_string()))
    }
}

/// One matched substring with its byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Match {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Match {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn overlaps(&self, other: &Match) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl From<regex::Match<'_>> for Match {
    fn from(m: regex::Match<'_>) -> Self {
        Match {
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        }
    }
}

/// A compiled grammar for one category.
///
/// Implementations must be immutable after construction; the registry shares
/// them across threads.
pub trait PatternMatcher: Send + Sync {
    fn category(&self) -> &str;

    /// Every non-overlapping match in `text`, ordered by start offset.
    fn find_all(&self, text: &str) -> Result<Vec<Match>, MatcherFault>;

    /// True when `value` as a whole is exactly one token of this category.
    fn matches(&self, value: &str) -> bool {
        match self.find_all(value) {
            Ok(found) => found.len() == 1 && found[0].start == 0 && found[0].end == value.len(),
            Err(_) => false,
        }
    }
}

/// Rejects a candidate hit when the text right after it matches `forbidden`.
///
/// This stands in for a negative lookahead, which the `regex` crate does not
/// support.
#[derive(Debug, Clone)]
struct SuffixGuard {
    forbidden: Regex,
    group: Option<&'static str>,
}

impl SuffixGuard {
    fn rejects(&self, caps: &Captures<'_>, text: &str) -> bool {
        let anchor = match self.group {
            Some(name) => match caps.name(name) {
                Some(m) => m.end(),
                // the guarded branch did not take part in this hit
                None => return false,
            },
            None => match caps.get(0) {
                Some(m) => m.end(),
                None => return false,
            },
        };
        self.forbidden.is_match(&text[anchor..])
    }
}

/// A regex plus an optional suffix guard, scanned left to right.
#[derive(Debug, Clone)]
pub struct Grammar {
    category: &'static str,
    regex: Regex,
    guard: Option<SuffixGuard>,
}

impl Grammar {
    pub fn compile(category: &'static str, pattern: &str) -> Result<Self, RegistryError> {
        let regex = Regex::new(pattern).map_err(|source| RegistryError::InvalidGrammar {
            category: category.to_string(),
            source,
        })?;
        Ok(Grammar {
            category,
            regex,
            guard: None,
        })
    }

    /// Reject hits followed by `suffix`. With `group` set, the guard only
    /// applies to hits where that named group matched, and is anchored at
    /// the group's end.
    pub fn reject_followed_by(
        mut self,
        suffix: &str,
        group: Option<&'static str>,
    ) -> Result<Self, RegistryError> {
        let forbidden = Regex::new(&format!(r"\A(?:{suffix})")).map_err(|source| {
            RegistryError::InvalidGrammar {
                category: self.category.to_string(),
                source,
            }
        })?;
        self.guard = Some(SuffixGuard { forbidden, group });
        Ok(self)
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn scan(&self, text: &str) -> Vec<Match> {
        let Some(guard) = &self.guard else {
            return self.regex.find_iter(text).map(Match::from).collect();
        };

        let mut results = Vec::new();
        let mut at = 0;
        while at <= text.len() {
            let Some(caps) = self.regex.captures_at(text, at) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            if guard.rejects(&caps, text) {
                // a rejected hit consumes nothing
                at = next_char_boundary(text, whole.start());
                continue;
            }

            results.push(Match::from(whole));
            at = if whole.end() > whole.start() {
                whole.end()
            } else {
                next_char_boundary(text, whole.end())
            };
        }
        results
    }
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    from + text[from..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_name() {
        let err = "zip_code".parse::<Category>().unwrap_err();
        assert!(matches!(err, ExtractError::UnknownCategory(name) if name == "zip_code"));
    }

    #[test]
    fn test_guard_rejection_resumes_after_start() {
        let grammar = Grammar::compile("test", r"\d+")
            .unwrap()
            .reject_followed_by("x", None)
            .unwrap();
        let found = grammar.scan("12x 34");
        // "12" is rejected, then "2" is found and also rejected, then "34"
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "34");
        assert_eq!((found[0].start, found[0].end), (4, 6));
    }

    #[test]
    fn test_guard_only_applies_to_named_group() {
        let grammar = Grammar::compile("test", r"a!|(?P<g>b)")
            .unwrap()
            .reject_followed_by("!", Some("g"))
            .unwrap();
        let found: Vec<String> = grammar.scan("a! b! b").into_iter().map(|m| m.text).collect();
        assert_eq!(found, vec!["a!", "b"]);
    }

    #[test]
    fn test_invalid_grammar_is_a_registry_error() {
        let err = Grammar::compile("broken", r"(unclosed").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidGrammar { ref category, .. } if category == "broken"));
    }

    #[test]
    fn test_scan_handles_multibyte_text() {
        let grammar = Grammar::compile("test", r"\d")
            .unwrap()
            .reject_followed_by("é", None)
            .unwrap();
        let found = grammar.scan("1é2ü3");
        let texts: Vec<&str> = found.iter().map(Match::as_str).collect();
        assert_eq!(texts, vec!["2", "3"]);
    }
}
