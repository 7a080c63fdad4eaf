//! Route verbs understood by the localizer
//!
//! The host DSL can hand us any verb name (`scope`, `forward`, `pipe_through`, ...),
//! so unknown names are kept in [`Verb::Other`] and rejected only when a leaf
//! route carrying them is localized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Verb of a route declaration
///
/// # Examples
///
/// ```
/// use rhtmx_route_i18n::Verb;
///
/// let verb: Verb = "get".parse().unwrap();
/// assert_eq!(verb, Verb::Get);
/// assert!(verb.is_supported());
///
/// let verb: Verb = "forward".parse().unwrap();
/// assert!(!verb.is_supported());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verb {
    Resources,
    Get,
    Put,
    Patch,
    Post,
    Delete,
    Options,
    Head,
    Connect,
    Live,
    /// Any verb the localizer does not know how to translate
    Other(String),
}

/// Every verb a leaf route may carry, in the order reported by errors
pub const SUPPORTED_VERBS: [Verb; 10] = [
    Verb::Resources,
    Verb::Get,
    Verb::Put,
    Verb::Patch,
    Verb::Post,
    Verb::Delete,
    Verb::Options,
    Verb::Head,
    Verb::Connect,
    Verb::Live,
];

impl Verb {
    pub fn as_str(&self) -> &str {
        match self {
            Verb::Resources => "resources",
            Verb::Get => "get",
            Verb::Put => "put",
            Verb::Patch => "patch",
            Verb::Post => "post",
            Verb::Delete => "delete",
            Verb::Options => "options",
            Verb::Head => "head",
            Verb::Connect => "connect",
            Verb::Live => "live",
            Verb::Other(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Verb::Other(_))
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Verb::Live)
    }

    pub fn is_resources(&self) -> bool {
        matches!(self, Verb::Resources)
    }

    /// Comma-separated list of supported verbs, used in error messages
    pub fn supported_list() -> String {
        SUPPORTED_VERBS
            .iter()
            .map(Verb::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<&str> for Verb {
    fn from(name: &str) -> Self {
        match name {
            "resources" => Verb::Resources,
            "get" => Verb::Get,
            "put" => Verb::Put,
            "patch" => Verb::Patch,
            "post" => Verb::Post,
            "delete" => Verb::Delete,
            "options" => Verb::Options,
            "head" => Verb::Head,
            "connect" => Verb::Connect,
            "live" => Verb::Live,
            other => Verb::Other(other.to_string()),
        }
    }
}

impl From<String> for Verb {
    fn from(name: String) -> Self {
        Verb::from(name.as_str())
    }
}

impl From<Verb> for String {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Verb {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Verb::from(s))
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_verbs() {
        for verb in SUPPORTED_VERBS.iter() {
            assert_eq!(&Verb::from(verb.as_str()), verb);
        }
    }

    #[test]
    fn test_unknown_verb_is_kept() {
        let verb = Verb::from("forward");
        assert_eq!(verb, Verb::Other("forward".to_string()));
        assert_eq!(verb.as_str(), "forward");
        assert!(!verb.is_supported());
    }

    #[test]
    fn test_supported_list() {
        assert_eq!(
            Verb::supported_list(),
            "resources, get, put, patch, post, delete, options, head, connect, live"
        );
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Verb::Live).unwrap();
        assert_eq!(json, "\"live\"");

        let verb: Verb = serde_json::from_str("\"trace\"").unwrap();
        assert_eq!(verb, Verb::Other("trace".to_string()));
    }
}
