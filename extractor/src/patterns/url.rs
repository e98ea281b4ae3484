use super::{Category, Grammar, Match, PatternMatcher};
use crate::error::{MatcherFault, RegistryError};

/// `http://` or `https://`, a host with at least one alphabetic suffix label,
/// then an optional path running to the next whitespace.
pub const URL_PATTERN: &str = r"https?://(?:[-\w.])+(?:\.[a-zA-Z]{2,})+(?:/[^\s]*)?";

pub struct UrlMatcher {
    grammar: Grammar,
}

impl UrlMatcher {
    pub fn new() -> Result<Self, RegistryError> {
        Ok(UrlMatcher {
            grammar: Grammar::compile(Category::Url.as_str(), URL_PATTERN)?,
        })
    }
}

impl PatternMatcher for UrlMatcher {
    fn category(&self) -> &str {
        self.grammar.category()
    }

    fn find_all(&self, text: &str) -> Result<Vec<Match>, MatcherFault> {
        Ok(self.grammar.scan(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<String> {
        UrlMatcher::new()
            .unwrap()
            .find_all(text)
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect()
    }

    #[test]
    fn test_valid_urls() {
        let matcher = UrlMatcher::new().unwrap();
        let valid_urls = vec![
            "http://example.com",
            "https://example.com",
            "https://www.example.com",
            "https://subdomain.example.org/page",
            "http://example.com/path?query=value",
            "http://my-site.co.uk/a/b/c.html",
        ];

        for url in valid_urls {
            assert!(matcher.matches(url), "URL should be valid: {}", url);
        }
    }

    #[test]
    fn test_invalid_urls() {
        let invalid_urls = vec![
            "example.com",        // missing protocol
            "ftp://example.com",  // unsupported protocol
            "http://",            // missing host
            "http:/example.com",  // missing slash
            "http://localhost",   // no suffix label
            "http://192.168.1.1", // numeric suffix
            "http://example.c",   // suffix too short
        ];

        for url in invalid_urls {
            assert!(extract(url).is_empty(), "URL should be invalid: {}", url);
        }
    }

    #[test]
    fn test_extract_from_sentence() {
        assert_eq!(
            extract("Visit our website: https://www.example.com or https://subdomain.example.org/page"),
            vec!["https://www.example.com", "https://subdomain.example.org/page"]
        );
    }

    #[test]
    fn test_path_runs_to_whitespace() {
        assert_eq!(
            extract("see http://example.com/docs/index.html, then stop"),
            vec!["http://example.com/docs/index.html,"]
        );
    }
}
