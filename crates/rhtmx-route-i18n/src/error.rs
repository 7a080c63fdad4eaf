//! Fatal localization errors
//!
//! A missing catalog is not an error; see [`crate::Diagnostic`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalizeError {
    /// A leaf route carries a verb outside [`crate::SUPPORTED_VERBS`]
    #[error("cannot localize `{verb} {path:?}`: unsupported verb `{verb}`, expected one of: {supported}")]
    UnsupportedVerb {
        verb: String,
        path: String,
        supported: String,
    },

    /// The metadata field already exists but is not a key/value record
    #[error("cannot add locale to option `{field}` of route {path:?}: expected a map, found {found}")]
    MalformedOptions {
        field: String,
        path: String,
        found: &'static str,
    },
}

pub type Result<T, E = LocalizeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Verb;

    #[test]
    fn test_unsupported_verb_message() {
        let err = LocalizeError::UnsupportedVerb {
            verb: "forward".to_string(),
            path: "/admin".to_string(),
            supported: Verb::supported_list(),
        };
        let message = err.to_string();

        assert!(message.contains("unsupported verb `forward`"));
        assert!(message.contains("\"/admin\""));
        assert!(message.ends_with("connect, live"));
    }
}
