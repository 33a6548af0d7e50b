//! error handling stuff
use thiserror::Error;

#[derive(Debug, Error)]
/// An error
pub enum DeliciousError {
    /// a post was built from fields that don't describe a valid post
    #[error("validation error: {0}")]
    Validation(String),

    /// a position outside of a post list was accessed
    #[error("index out of bounds: {index} (len is {len})")]
    Index {
        /// the requested position
        index: usize,
        /// the length of the list at the time of access
        len: usize,
    },

    /// something tried to write to a read-only post list
    #[error("post lists are immutable, elements can't be set or removed")]
    ImmutableCollection,

    /// a url filter pattern failed to compile
    #[error("invalid url pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// a json error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeliciousError {
    /// make a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// A result using [`DeliciousError`] as the `Err` variant
pub type Result<T, U = DeliciousError> = miette::Result<T, U>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err = DeliciousError::validation("'url' and 'title' are required");
        assert_eq!(
            err.to_string(),
            "validation error: 'url' and 'title' are required"
        );
    }

    #[test]
    fn test_index_message() {
        let err = DeliciousError::Index { index: 4, len: 4 };
        assert!(err.to_string().contains("index out of bounds"));
    }

    #[test]
    fn test_pattern_from_regex() {
        let regex_err = regex::Regex::new("(").unwrap_err();
        let err: DeliciousError = regex_err.into();
        assert!(matches!(err, DeliciousError::Pattern(_)));
    }
}
