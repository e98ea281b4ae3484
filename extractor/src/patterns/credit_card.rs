use super::{Category, Grammar, Match, PatternMatcher};
use crate::error::{MatcherFault, RegistryError};

/// Four groups of four digits, each optionally followed by a space or `-`.
pub const CREDIT_CARD_PATTERN: &str = r"\b(?:\d{4}[\s-]?){3}\d{4}\b";

pub struct CreditCardMatcher {
    grammar: Grammar,
}

impl CreditCardMatcher {
    pub fn new() -> Result<Self, RegistryError> {
        Ok(CreditCardMatcher {
            grammar: Grammar::compile(Category::CreditCard.as_str(), CREDIT_CARD_PATTERN)?,
        })
    }
}

impl PatternMatcher for CreditCardMatcher {
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
        CreditCardMatcher::new()
            .unwrap()
            .find_all(text)
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect()
    }

    #[test]
    fn test_valid_card_numbers() {
        let matcher = CreditCardMatcher::new().unwrap();
        let valid_cards = vec![
            "1234 5678 9012 3456",
            "1234-5678-9012-3456",
            "1234567890123456",
            "1234-5678 9012-3456",
        ];

        for card in valid_cards {
            assert!(matcher.matches(card), "Should match: {}", card);
        }
    }

    #[test]
    fn test_invalid_card_numbers() {
        let invalid_cards = vec![
            "1234 5678 9012",      // three groups
            "12345678901234567",   // seventeen digits
            "1234  5678 9012 3456", // double separator
            "1234_5678_9012_3456",
        ];

        for card in invalid_cards {
            assert!(extract(card).is_empty(), "Should not match: {}", card);
        }
    }

    #[test]
    fn test_extract_from_sentence() {
        assert_eq!(
            extract("Payment options: 1234 5678 9012 3456 or 1234-5678-9012-3456"),
            vec!["1234 5678 9012 3456", "1234-5678-9012-3456"]
        );
    }
}
