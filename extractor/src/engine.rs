use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::ExtractorConfig;
use crate::error::{ExtractError, MatcherFault, RegistryError, Result};
use crate::patterns::{Match, PatternMatcher};
use crate::registry::{builtin_registry, Registry};
use crate::report::ExtractionReport;

/// Runs registered matchers over text.
///
/// Cloning is cheap and clones share the same immutable registry, so one
/// extractor can serve any number of threads.
#[derive(Clone)]
pub struct Extractor {
    registry: Arc<Registry>,
    config: ExtractorConfig,
}

impl Extractor {
    /// An extractor over the built-in grammars with default configuration.
    pub fn new() -> std::result::Result<Self, RegistryError> {
        Self::with_config(ExtractorConfig::default())
    }

    pub fn with_config(config: ExtractorConfig) -> std::result::Result<Self, RegistryError> {
        Self::from_shared(builtin_registry()?, config)
    }

    /// An extractor over a caller-built registry. An empty registry is a
    /// configuration error.
    pub fn with_registry(
        registry: Registry,
        config: ExtractorConfig,
    ) -> std::result::Result<Self, RegistryError> {
        Self::from_shared(Arc::new(registry), config)
    }

    fn from_shared(
        registry: Arc<Registry>,
        config: ExtractorConfig,
    ) -> std::result::Result<Self, RegistryError> {
        if registry.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Extractor { registry, config })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Matches of a single category. Faults are returned to the caller.
    pub fn extract(&self, text: &str, category: &str) -> Result<Vec<Match>> {
        let matcher = self.registry.matcher_for(category)?;
        self.run(matcher, text)
            .map_err(|fault| ExtractError::MatcherFault {
                category: category.to_string(),
                fault,
            })
    }

    /// Matches of every registered category, in registration order.
    ///
    /// A category whose matcher faults gets an empty entry and a recorded
    /// failure; the remaining categories are still extracted.
    pub fn extract_all(&self, text: &str) -> ExtractionReport {
        let mut report = ExtractionReport::default();
        for matcher in self.registry.iter() {
            self.extract_isolated(matcher, text, &mut report);
        }
        report
    }

    /// Like [`extract_all`](Self::extract_all) but limited to `categories`.
    ///
    /// Every name is resolved before any matching happens, so an unknown
    /// name fails the whole call. Repeated names are extracted once.
    pub fn extract_selected<S: AsRef<str>>(
        &self,
        text: &str,
        categories: &[S],
    ) -> Result<ExtractionReport> {
        let mut matchers: Vec<&dyn PatternMatcher> = Vec::with_capacity(categories.len());
        for name in categories {
            let matcher = self.registry.matcher_for(name.as_ref())?;
            if !matchers.iter().any(|m| m.category() == matcher.category()) {
                matchers.push(matcher);
            }
        }

        let mut report = ExtractionReport::default();
        for matcher in matchers {
            self.extract_isolated(matcher, text, &mut report);
        }
        Ok(report)
    }

    /// Runs [`extract_all`](Self::extract_all) over independent texts in parallel.
    /// Reports come back in input order.
    pub fn extract_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<ExtractionReport> {
        texts
            .par_iter()
            .map(|text| self.extract_all(text.as_ref()))
            .collect()
    }

    /// For each expected category, whether the extracted set of substrings
    /// equals the expected set. Order and duplicates are ignored; categories
    /// this extractor does not know compare as `false`.
    pub fn compare(
        &self,
        text: &str,
        expected: &BTreeMap<String, BTreeSet<String>>,
    ) -> BTreeMap<String, bool> {
        let report = self.extract_all(text);
        expected
            .iter()
            .map(|(category, want)| {
                let equal = report.get(category).is_some_and(|matches| {
                    let got: BTreeSet<&str> = matches.iter().map(Match::as_str).collect();
                    got.len() == want.len() && want.iter().all(|w| got.contains(w.as_str()))
                });
                (category.clone(), equal)
            })
            .collect()
    }

    /// Categories whose grammar accepts `value` as exactly one token.
    pub fn classify(&self, value: &str) -> Vec<String> {
        if value.is_empty() {
            return vec![];
        }

        self.registry
            .iter()
            .filter(|matcher| matcher.matches(value))
            .map(|matcher| matcher.category().to_string())
            .collect()
    }

    fn extract_isolated(
        &self,
        matcher: &dyn PatternMatcher,
        text: &str,
        report: &mut ExtractionReport,
    ) {
        let category = matcher.category();
        match self.run(matcher, text) {
            Ok(matches) => {
                debug!(category, count = matches.len(), "extracted");
                report.push(category, matches);
            }
            Err(fault) => {
                warn!(category, error = %fault, "extraction failed, reporting no matches");
                report.push_failure(category, fault);
            }
        }
    }

    fn run(
        &self,
        matcher: &dyn PatternMatcher,
        text: &str,
    ) -> std::result::Result<Vec<Match>, MatcherFault> {
        if let Some(limit) = self.config.max_input_bytes {
            if text.len() > limit {
                return Err(MatcherFault::InputTooLarge {
                    len: text.len(),
                    limit,
                });
            }
        }

        // registered matchers are not trusted to be panic-free
        panic::catch_unwind(AssertUnwindSafe(|| matcher.find_all(text)))
            .unwrap_or_else(|payload| Err(MatcherFault::Panicked(panic_message(payload.as_ref()))))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
