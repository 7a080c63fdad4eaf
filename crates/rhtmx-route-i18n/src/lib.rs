//! # RHTMX Route i18n
//!
//! Build-time route localization. A tree of route declarations is expanded
//! into one copy per locale with:
//! - Literal path segments translated (`/pages/:id` → `/pages_fr/:id`)
//! - Dynamic segments left alone (`:id`, `*path`)
//! - The producing locale recorded in `assigns` (or `private` for `live`)
//! - Nested `resources` blocks translated with the same locale as their parent
//! - Routes that came out identical across locales collapsed into one
//!
//! Translation catalogs and the list of known locales are supplied by the
//! host through the [`TranslationCatalog`] and [`LocaleRegistry`] traits.
//! [`MemoryCatalog`] and [`StaticLocales`] are in-memory implementations.
//!
//! ## Example
//!
//! ```
//! use rhtmx_route_i18n::{
//!     localize_routes, LocaleDescriptor, MemoryCatalog, RouteDeclaration, RouteNode,
//!     StaticLocales,
//! };
//!
//! let catalog = MemoryCatalog::new()
//!     .with_translation("fr", "users", "utilisateurs")
//!     .with_translation("fr", "faces", "visages");
//! let locales = StaticLocales::new(LocaleDescriptor::new("en", "en"))
//!     .with_locale(LocaleDescriptor::new("fr", "fr"))
//!     .with_locale(LocaleDescriptor::without_catalog("de"));
//!
//! let tree = RouteNode::from(
//!     RouteDeclaration::resources("/users", "UserController")
//!         .with_nested([RouteDeclaration::resources("/faces", "FaceController")]),
//! );
//!
//! let localized = localize_routes(&tree, &catalog, &locales).unwrap();
//!
//! assert_eq!(localized.routes[0].path, "/users");
//! assert_eq!(localized.routes[1].path, "/utilisateurs");
//! assert_eq!(localized.routes[1].nested().unwrap().declarations()[0].path, "/visages");
//!
//! // "de" has no catalog: skipped with one warning
//! assert_eq!(localized.routes.len(), 2);
//! assert_eq!(localized.warnings().count(), 1);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod catalog;
pub mod config;
pub mod dedupe;
mod diagnostic;
mod error;
mod expand;
pub mod locale;
pub mod metadata;
pub mod path;
pub mod route;

pub use catalog::{
    IdentityCatalog, MemoryCatalog, SegmentTranslator, TranslationCatalog, ROUTES_DOMAIN,
};
pub use config::LocalizerConfig;
pub use dedupe::{dedupe, CanonicalKey};
pub use diagnostic::{Diagnostic, Diagnostics};
pub use error::{LocalizeError, Result};
pub use expand::{Localized, Localizer};
pub use locale::{
    CatalogId, LocaleDescriptor, LocaleId, LocaleRegistry, LocaleResolver, LocaleSelection,
    StaticLocales,
};
pub use metadata::{put_locale, MetadataInjector};
pub use path::{translatable_segments, PathTranslator};
pub use route::{
    KeywordList, NestedBlock, OptionValue, RouteDeclaration, RouteNode, RouteOptions,
    SourcePosition, Target, Verb, SUPPORTED_VERBS,
};

// ============================================================================
// Entry Points
// ============================================================================

/// Localizes a tree for every known locale with the default configuration
///
/// Shorthand for [`Localizer::localize_all`] with [`LocalizerConfig::default`].
pub fn localize_routes(
    tree: &RouteNode,
    catalog: &dyn TranslationCatalog,
    locales: &dyn LocaleRegistry,
) -> Result<Localized> {
    let config = LocalizerConfig::default();
    Localizer::new(&config, catalog, locales).localize_all(tree)
}
