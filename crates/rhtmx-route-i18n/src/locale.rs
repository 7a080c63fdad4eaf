//! Locale identifiers and the locale lookup collaborator
//!
//! The localizer never decides on its own which locales exist. It asks a
//! [`LocaleRegistry`] for the known locales, the default locale, and the
//! catalog backing each locale.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Locale identifier such as `en` or `fr-CA`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleId(String);

impl LocaleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocaleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LocaleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a translation catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(String);

impl CatalogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CatalogId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Descriptors and Selection
// ============================================================================

/// A locale and the catalog that translates it, if any
///
/// A descriptor without a catalog never produces a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleDescriptor {
    pub id: LocaleId,
    #[serde(default)]
    pub catalog: Option<CatalogId>,
}

impl LocaleDescriptor {
    pub fn new(id: impl Into<LocaleId>, catalog: impl Into<CatalogId>) -> Self {
        Self {
            id: id.into(),
            catalog: Some(catalog.into()),
        }
    }

    pub fn without_catalog(id: impl Into<LocaleId>) -> Self {
        Self {
            id: id.into(),
            catalog: None,
        }
    }
}

/// Which locales a route tree should be expanded for
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "locales")]
pub enum LocaleSelection {
    /// Every known locale, default locale first
    #[default]
    All,
    /// An explicit ordered list
    Many(Vec<LocaleId>),
    /// A single locale, used for nested resource blocks
    One(LocaleId),
}

impl LocaleSelection {
    pub fn many<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LocaleId>,
    {
        LocaleSelection::Many(ids.into_iter().map(Into::into).collect())
    }

    pub fn one(id: impl Into<LocaleId>) -> Self {
        LocaleSelection::One(id.into())
    }
}

// ============================================================================
// Registry Collaborator
// ============================================================================

/// Source of truth for which locales exist and which catalogs back them
///
/// Implemented by the host application. [`StaticLocales`] is a ready-made
/// in-memory implementation.
pub trait LocaleRegistry {
    /// All known locales in their natural order
    fn known_locales(&self) -> Vec<LocaleDescriptor>;

    /// The default locale
    fn default_locale(&self) -> LocaleDescriptor;

    /// Catalog for a locale, `None` when the locale has no catalog or is unknown
    fn resolve(&self, id: &LocaleId) -> Option<CatalogId> {
        self.known_locales()
            .into_iter()
            .find(|descriptor| &descriptor.id == id)
            .and_then(|descriptor| descriptor.catalog)
    }
}

/// In-memory locale registry
///
/// # Examples
///
/// ```
/// use rhtmx_route_i18n::{LocaleDescriptor, LocaleId, LocaleRegistry, StaticLocales};
///
/// let locales = StaticLocales::new(LocaleDescriptor::new("en", "en"))
///     .with_locale(LocaleDescriptor::new("fr", "fr"))
///     .with_locale(LocaleDescriptor::without_catalog("de"));
///
/// assert_eq!(locales.resolve(&LocaleId::from("fr")).unwrap().as_str(), "fr");
/// assert!(locales.resolve(&LocaleId::from("de")).is_none());
/// assert!(locales.resolve(&LocaleId::from("it")).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StaticLocales {
    default: LocaleDescriptor,
    locales: Vec<LocaleDescriptor>,
}

impl StaticLocales {
    /// Creates a registry whose only locale is the default one
    pub fn new(default: LocaleDescriptor) -> Self {
        Self {
            locales: vec![default.clone()],
            default,
        }
    }

    /// Adds (or replaces) a locale, keeping insertion order
    pub fn with_locale(mut self, descriptor: LocaleDescriptor) -> Self {
        match self.locales.iter_mut().find(|d| d.id == descriptor.id) {
            Some(existing) => *existing = descriptor.clone(),
            None => self.locales.push(descriptor.clone()),
        }
        if self.default.id == descriptor.id {
            self.default = descriptor;
        }
        self
    }
}

impl LocaleRegistry for StaticLocales {
    fn known_locales(&self) -> Vec<LocaleDescriptor> {
        self.locales.clone()
    }

    fn default_locale(&self) -> LocaleDescriptor {
        self.default.clone()
    }

    fn resolve(&self, id: &LocaleId) -> Option<CatalogId> {
        self.locales
            .iter()
            .find(|descriptor| &descriptor.id == id)
            .and_then(|descriptor| descriptor.catalog.clone())
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Thin adapter over a [`LocaleRegistry`] used by the expander
#[derive(Clone, Copy)]
pub struct LocaleResolver<'a> {
    registry: &'a dyn LocaleRegistry,
}

impl<'a> LocaleResolver<'a> {
    pub fn new(registry: &'a dyn LocaleRegistry) -> Self {
        Self { registry }
    }

    pub fn resolve(&self, id: &LocaleId) -> Option<CatalogId> {
        self.registry.resolve(id)
    }

    /// All known locales, default first, the rest in natural order
    pub fn default_locale_set(&self) -> Vec<LocaleId> {
        let default = self.registry.default_locale().id;
        let rest = self
            .registry
            .known_locales()
            .into_iter()
            .map(|descriptor| descriptor.id)
            .filter(|id| id != &default);

        std::iter::once(default.clone()).chain(rest).collect()
    }

    /// Expands a selection into the ordered list of locales it names
    pub fn locales_for(&self, selection: &LocaleSelection) -> Vec<LocaleId> {
        match selection {
            LocaleSelection::All => self.default_locale_set(),
            LocaleSelection::Many(ids) => ids.clone(),
            LocaleSelection::One(id) => vec![id.clone()],
        }
    }
}
