//! Non-fatal diagnostics emitted while localizing
//!
//! Every diagnostic is logged through `tracing` when recorded and kept so
//! build tooling can inspect it afterwards.

use std::fmt;

use serde::Serialize;

use crate::locale::LocaleId;
use crate::route::Verb;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The locale has no catalog; its route was left out
    MissingCatalog {
        locale: LocaleId,
        verb: Verb,
        path: String,
    },
    /// A route collapsed into an earlier one with the same canonical key
    DuplicateDropped {
        locale: Option<LocaleId>,
        kept_locale: Option<LocaleId>,
        verb: Verb,
        path: String,
    },
}

impl Diagnostic {
    /// Whether this diagnostic should be surfaced to the user as a warning
    pub fn is_warning(&self) -> bool {
        matches!(self, Diagnostic::MissingCatalog { .. })
    }
}

fn locale_or_dash(locale: &Option<LocaleId>) -> &str {
    locale.as_ref().map(LocaleId::as_str).unwrap_or("-")
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingCatalog { locale, verb, path } => write!(
                f,
                "no translation catalog for locale {locale:?}, skipping `{verb} {path:?}`",
                locale = locale.as_str(),
            ),
            Diagnostic::DuplicateDropped {
                locale,
                kept_locale,
                verb,
                path,
            } => write!(
                f,
                "`{verb} {path:?}` for locale {} duplicates the route already generated for {}",
                locale_or_dash(locale),
                locale_or_dash(kept_locale),
            ),
        }
    }
}

/// Collected diagnostics of one localization run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic and logs it
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::MissingCatalog { locale, verb, path } => {
                tracing::warn!(locale = %locale, verb = %verb, path = %path, "{}", diagnostic);
            }
            Diagnostic::DuplicateDropped { verb, path, .. } => {
                tracing::debug!(verb = %verb, path = %path, "{}", diagnostic);
            }
        }
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.is_warning())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
