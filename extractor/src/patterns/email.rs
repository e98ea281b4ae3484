use super::{Category, Grammar, Match, PatternMatcher};
use crate::error::{MatcherFault, RegistryError};

/// Local part, `@`, dotted domain, final label of at least two letters.
pub const EMAIL_PATTERN: &str = r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b";

pub struct EmailMatcher {
    grammar: Grammar,
}

impl EmailMatcher {
    pub fn new() -> Result<Self, RegistryError> {
        Ok(EmailMatcher {
            grammar: Grammar::compile(Category::Email.as_str(), EMAIL_PATTERN)?,
        })
    }
}

impl PatternMatcher for EmailMatcher {
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
        EmailMatcher::new()
            .unwrap()
            .find_all(text)
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect()
    }

    #[test]
    fn test_valid_emails() {
        let matcher = EmailMatcher::new().unwrap();
        let valid_emails = vec![
            "user@example.com",
            "user.name@example.com",
            "user+tag@example.com",
            "user123@example.co.uk",
            "user-name@example-domain.com",
            "a.b+c@sub.example.co",
        ];

        for email in valid_emails {
            assert!(matcher.matches(email), "Email should be valid: {}", email);
        }
    }

    #[test]
    fn test_invalid_emails() {
        let invalid_emails = vec![
            "user@",
            "@example.com",
            "user@example",
            "user@.com",
            "user@exam_ple.com",
            "user@example.c",
        ];

        for email in invalid_emails {
            assert!(extract(email).is_empty(), "Email should be invalid: {}", email);
        }
    }

    #[test]
    fn test_extract_from_sentence() {
        assert_eq!(
            extract("Email me at a.b+c@sub.example.co"),
            vec!["a.b+c@sub.example.co"]
        );
        assert_eq!(
            extract("Contact us at support@company.com or sales@subdomain.example.org"),
            vec!["support@company.com", "sales@subdomain.example.org"]
        );
    }

    #[test]
    fn test_trailing_punctuation_is_not_part_of_the_match() {
        assert_eq!(extract("write to john@mail.com."), vec!["john@mail.com"]);
    }

    #[test]
    fn test_space_splits_local_part() {
        assert_eq!(extract("user name@example.com"), vec!["name@example.com"]);
    }
}
