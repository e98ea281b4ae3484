use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("extraction of `{category}` failed: {fault}")]
    MatcherFault {
        category: String,
        #[source]
        fault: MatcherFault,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// A failure while applying one category's grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatcherFault {
    #[error("input of {len} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { len: usize, limit: usize },

    #[error("internal matcher error: {0}")]
    Internal(String),

    #[error("matcher panicked: {0}")]
    Panicked(String),
}

/// Configuration errors, raised while building a registry.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("grammar for `{category}` failed to compile: {source}")]
    InvalidGrammar {
        category: String,
        #[source]
        source: regex::Error,
    },

    #[error("category `{0}` is registered twice")]
    Duplicate(String),

    #[error("registry has no categories")]
    Empty,
}
