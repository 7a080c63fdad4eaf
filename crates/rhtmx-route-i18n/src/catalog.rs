//! Translation catalog collaborator and segment translation
//!
//! Every lookup names its catalog explicitly. There is no "current catalog"
//! that survives between calls.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::locale::CatalogId;
use crate::route::segment::{classify_segment, SegmentKind};

/// Domain every route segment is looked up in
pub const ROUTES_DOMAIN: &str = "routes";

/// Read-only translation capability
///
/// Implementations return `text` unchanged when the catalog holds no entry
/// for it.
pub trait TranslationCatalog {
    fn translate(&self, catalog: &CatalogId, domain: &str, text: &str) -> String;
}

impl<T: TranslationCatalog + ?Sized> TranslationCatalog for &T {
    fn translate(&self, catalog: &CatalogId, domain: &str, text: &str) -> String {
        (**self).translate(catalog, domain, text)
    }
}

/// Catalog that translates nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityCatalog;

impl TranslationCatalog for IdentityCatalog {
    fn translate(&self, _catalog: &CatalogId, _domain: &str, text: &str) -> String {
        text.to_string()
    }
}

/// In-memory catalog keyed by catalog, domain and message id
///
/// # Examples
///
/// ```
/// use rhtmx_route_i18n::{CatalogId, MemoryCatalog, TranslationCatalog, ROUTES_DOMAIN};
///
/// let catalog = MemoryCatalog::new().with_translation("fr", "pages", "pages_fr");
/// let fr = CatalogId::from("fr");
///
/// assert_eq!(catalog.translate(&fr, ROUTES_DOMAIN, "pages"), "pages_fr");
/// assert_eq!(catalog.translate(&fr, ROUTES_DOMAIN, "users"), "users");
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    entries: HashMap<(CatalogId, String, String), String>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a translation in the routes domain
    pub fn with_translation(
        self,
        catalog: impl Into<CatalogId>,
        msgid: impl Into<String>,
        msgstr: impl Into<String>,
    ) -> Self {
        self.with_domain_translation(catalog, ROUTES_DOMAIN, msgid, msgstr)
    }

    pub fn with_domain_translation(
        mut self,
        catalog: impl Into<CatalogId>,
        domain: impl Into<String>,
        msgid: impl Into<String>,
        msgstr: impl Into<String>,
    ) -> Self {
        self.insert(catalog, domain, msgid, msgstr);
        self
    }

    pub fn insert(
        &mut self,
        catalog: impl Into<CatalogId>,
        domain: impl Into<String>,
        msgid: impl Into<String>,
        msgstr: impl Into<String>,
    ) {
        self.entries
            .insert((catalog.into(), domain.into(), msgid.into()), msgstr.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TranslationCatalog for MemoryCatalog {
    fn translate(&self, catalog: &CatalogId, domain: &str, text: &str) -> String {
        self.entries
            .get(&(catalog.clone(), domain.to_string(), text.to_string()))
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}

// ============================================================================
// Segment Translation
// ============================================================================

/// Translates one path segment at a time
///
/// Empty and dynamic segments are returned as-is (`Cow::Borrowed`); only
/// literal segments reach the catalog.
#[derive(Clone, Copy)]
pub struct SegmentTranslator<'a> {
    catalog: &'a dyn TranslationCatalog,
    dynamic_prefixes: &'a [String],
}

impl<'a> SegmentTranslator<'a> {
    pub fn new(catalog: &'a dyn TranslationCatalog, dynamic_prefixes: &'a [String]) -> Self {
        Self {
            catalog,
            dynamic_prefixes,
        }
    }

    pub fn translate<'s>(&self, catalog: &CatalogId, segment: &'s str) -> Cow<'s, str> {
        match classify_segment(segment, self.dynamic_prefixes) {
            SegmentKind::Empty | SegmentKind::Dynamic(_) => Cow::Borrowed(segment),
            SegmentKind::Literal(text) => {
                Cow::Owned(self.catalog.translate(catalog, ROUTES_DOMAIN, text))
            }
        }
    }
}
