use std::sync::Arc;

use lazy_static::lazy_static;

use crate::error::{ExtractError, RegistryError};
use crate::patterns::{
    credit_card::CreditCardMatcher, currency::CurrencyMatcher, email::EmailMatcher,
    hashtag::HashtagMatcher, html_tag::HtmlTagMatcher, phone::PhoneMatcher, time::TimeMatcher,
    url::UrlMatcher, PatternMatcher,
};

lazy_static! {
    // Compiled once per process and shared read-only by every extractor.
    static ref BUILTIN_REGISTRY: Result<Arc<Registry>, RegistryError> =
        Registry::builtin().map(Arc::new);
}

/// The process-wide registry holding the eight built-in grammars.
pub fn builtin_registry() -> Result<Arc<Registry>, RegistryError> {
    BUILTIN_REGISTRY.clone()
}

/// Category name to compiled matcher, in registration order.
#[derive(Default)]
pub struct Registry {
    matchers: Vec<Box<dyn PatternMatcher>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Registry::new();
        registry.register(Box::new(EmailMatcher::new()?))?;
        registry.register(Box::new(UrlMatcher::new()?))?;
        registry.register(Box::new(PhoneMatcher::new()?))?;
        registry.register(Box::new(CreditCardMatcher::new()?))?;
        registry.register(Box::new(TimeMatcher::new()?))?;
        registry.register(Box::new(HtmlTagMatcher::new()?))?;
        registry.register(Box::new(HashtagMatcher::new()?))?;
        registry.register(Box::new(CurrencyMatcher::new()?))?;
        Ok(registry)
    }

    pub fn register(&mut self, matcher: Box<dyn PatternMatcher>) -> Result<(), RegistryError> {
        if self.contains(matcher.category()) {
            return Err(RegistryError::Duplicate(matcher.category().to_string()));
        }
        self.matchers.push(matcher);
        Ok(())
    }

    pub fn matcher_for(&self, category: &str) -> Result<&dyn PatternMatcher, ExtractError> {
        self.matchers
            .iter()
            .find(|matcher| matcher.category() == category)
            .map(|matcher| matcher.as_ref())
            .ok_or_else(|| ExtractError::UnknownCategory(category.to_string()))
    }

    pub fn contains(&self, category: &str) -> bool {
        self.matchers.iter().any(|matcher| matcher.category() == category)
    }

    pub fn categories(&self) -> Vec<&str> {
        self.matchers.iter().map(|matcher| matcher.category()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn PatternMatcher> {
        self.matchers.iter().map(|matcher| matcher.as_ref())
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::Category;

    #[test]
    fn test_builtin_registration_order() {
        let registry = Registry::builtin().unwrap();
        let expected: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(registry.categories(), expected);
    }

    #[test]
    fn test_categories_are_stable_across_calls() {
        let registry = builtin_registry().unwrap();
        assert_eq!(registry.categories(), registry.categories());
    }

    #[test]
    fn test_matcher_for_unknown_category() {
        let registry = Registry::builtin().unwrap();
        let err = registry.matcher_for("zip_code").err().unwrap();
        assert!(matches!(err, ExtractError::UnknownCategory(ref name) if name == "zip_code"));
    }

    #[test]
    fn test_matcher_for_known_category() {
        let registry = Registry::builtin().unwrap();
        let matcher = registry.matcher_for("hashtag").unwrap();
        assert_eq!(matcher.category(), "hashtag");
        assert!(matcher.matches("#rust"));
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        registry.register(Box::new(EmailMatcher::new().unwrap())).unwrap();
        let err = registry
            .register(Box::new(EmailMatcher::new().unwrap()))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(ref name) if name == "email"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_shared_registry_is_built_once() {
        let first = builtin_registry().unwrap();
        let second = builtin_registry().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
