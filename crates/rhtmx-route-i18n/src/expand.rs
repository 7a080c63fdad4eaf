//! Route tree expansion
//!
//! The recursive core of the crate. The shape of each node decides what
//! happens to it:
//!
//! - `Block` → every child is expanded with the same locale selection
//! - `Localize` → the body is expanded with the scope's own selection
//! - `Route` → one copy per resolvable locale, then deduplicated
//!
//! A `resources` route with a nested block has its children expanded for the
//! single locale of the copy being built, using the same catalog, and the
//! block is marked `already_localized` so it is never expanded twice.

use serde::Serialize;

use crate::catalog::TranslationCatalog;
use crate::config::LocalizerConfig;
use crate::dedupe;
use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::error::{LocalizeError, Result};
use crate::locale::{CatalogId, LocaleId, LocaleRegistry, LocaleResolver, LocaleSelection};
use crate::metadata::MetadataInjector;
use crate::path::PathTranslator;
use crate::route::{NestedBlock, RouteDeclaration, RouteNode, RouteOptions, Verb};

/// Output of a localization run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Localized {
    /// Localized routes, declaration order first, locale order within a declaration
    pub routes: Vec<RouteDeclaration>,
    pub diagnostics: Diagnostics,
}

impl Localized {
    /// Routes generated for one locale
    pub fn for_locale<'r>(
        &'r self,
        locale: &LocaleId,
        config: &LocalizerConfig,
    ) -> Vec<&'r RouteDeclaration> {
        self.routes
            .iter()
            .filter(|route| route.locale(config).as_ref() == Some(locale))
            .collect()
    }

    /// Warnings only (missing catalogs)
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.warnings()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Expands route trees into per-locale routes
///
/// # Examples
///
/// ```
/// use rhtmx_route_i18n::{
///     LocaleDescriptor, LocaleSelection, Localizer, LocalizerConfig, MemoryCatalog,
///     RouteDeclaration, RouteNode, StaticLocales,
/// };
///
/// let config = LocalizerConfig::default();
/// let catalog = MemoryCatalog::new().with_translation("fr", "pages", "pages_fr");
/// let locales = StaticLocales::new(LocaleDescriptor::new("en", "en"))
///     .with_locale(LocaleDescriptor::new("fr", "fr"));
///
/// let localizer = Localizer::new(&config, &catalog, &locales);
/// let tree = RouteNode::from(RouteDeclaration::get("/pages/:id", "PageController", "show"));
/// let localized = localizer.localize(&tree, &LocaleSelection::All).unwrap();
///
/// let paths: Vec<&str> = localized.routes.iter().map(|r| r.path.as_str()).collect();
/// assert_eq!(paths, vec!["/pages/:id", "/pages_fr/:id"]);
/// ```
#[derive(Clone, Copy)]
pub struct Localizer<'a> {
    config: &'a LocalizerConfig,
    paths: PathTranslator<'a>,
    resolver: LocaleResolver<'a>,
    injector: MetadataInjector<'a>,
}

impl<'a> Localizer<'a> {
    pub fn new(
        config: &'a LocalizerConfig,
        catalog: &'a dyn TranslationCatalog,
        locales: &'a dyn LocaleRegistry,
    ) -> Self {
        Self {
            config,
            paths: PathTranslator::new(catalog, &config.dynamic_prefixes),
            resolver: LocaleResolver::new(locales),
            injector: MetadataInjector::new(config),
        }
    }

    /// Localizes a tree for the given selection
    ///
    /// Fails on the first unsupported verb; nothing is returned in that case.
    pub fn localize(&self, tree: &RouteNode, selection: &LocaleSelection) -> Result<Localized> {
        let selection = match selection {
            LocaleSelection::All => LocaleSelection::Many(self.resolver.default_locale_set()),
            explicit => explicit.clone(),
        };

        let mut localized = Localized::default();
        self.expand_node(
            tree,
            &selection,
            &mut localized.routes,
            &mut localized.diagnostics,
        )?;

        tracing::debug!(
            routes = localized.routes.len(),
            warnings = localized.diagnostics.warnings().count(),
            "localized route tree"
        );
        Ok(localized)
    }

    /// Localizes a tree for every known locale, default locale first
    pub fn localize_all(&self, tree: &RouteNode) -> Result<Localized> {
        self.localize(tree, &LocaleSelection::All)
    }

    // ========================================================================
    // Node Expansion
    // ========================================================================

    fn expand_node(
        &self,
        node: &RouteNode,
        selection: &LocaleSelection,
        routes: &mut Vec<RouteDeclaration>,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        match node {
            RouteNode::Block(nodes) => nodes
                .iter()
                .try_for_each(|child| self.expand_node(child, selection, routes, diagnostics)),
            RouteNode::Localize { locales, body } => {
                self.expand_node(body, locales, routes, diagnostics)
            }
            RouteNode::Route(route) => {
                let expanded = self.expand_route(route, selection, diagnostics)?;
                routes.extend(expanded);
                Ok(())
            }
        }
    }

    /// One route for every locale of the selection that has a catalog
    fn expand_route(
        &self,
        route: &RouteDeclaration,
        selection: &LocaleSelection,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<RouteDeclaration>> {
        ensure_supported(route)?;

        let mut expanded = Vec::new();
        for locale in self.resolver.locales_for(selection) {
            match self.resolver.resolve(&locale) {
                Some(catalog) => {
                    expanded.push(self.localize_leaf(route, &locale, &catalog, diagnostics)?);
                }
                None => diagnostics.push(Diagnostic::MissingCatalog {
                    locale,
                    verb: route.verb.clone(),
                    path: route.path.clone(),
                }),
            }
        }

        if !self.config.dedupe {
            return Ok(expanded);
        }

        let (kept, dropped) = dedupe::partition(expanded);
        for (original, duplicate) in dropped {
            diagnostics.push(Diagnostic::DuplicateDropped {
                locale: duplicate.locale(self.config),
                kept_locale: kept.get(original).and_then(|r| r.locale(self.config)),
                verb: duplicate.verb,
                path: duplicate.path,
            });
        }
        Ok(kept)
    }

    /// Rewrites one route for one resolved locale
    fn localize_leaf(
        &self,
        route: &RouteDeclaration,
        locale: &LocaleId,
        catalog: &CatalogId,
        diagnostics: &mut Diagnostics,
    ) -> Result<RouteDeclaration> {
        let options = self.localize_nested(route, locale, diagnostics)?;
        let path = self.paths.translate_path(catalog, &route.path);
        let options = self.injector.inject(&route.verb, &route.path, &options, locale)?;

        tracing::trace!(locale = %locale, verb = %route.verb, from = %route.path, to = %path, "translated route");

        Ok(RouteDeclaration {
            verb: route.verb.clone(),
            path,
            target: route.target.clone(),
            options,
            position: route.position.clone(),
        })
    }

    /// Expands the children of a `resources` block under a single locale
    fn localize_nested(
        &self,
        route: &RouteDeclaration,
        locale: &LocaleId,
        diagnostics: &mut Diagnostics,
    ) -> Result<RouteOptions> {
        let nested = match &route.options.nested {
            Some(nested) if route.verb.is_resources() && !nested.already_localized => nested,
            _ => return Ok(route.options.clone()),
        };

        tracing::debug!(locale = %locale, path = %route.path, "localizing nested resources");

        let mut children = Vec::new();
        self.expand_node(
            &RouteNode::Block(nested.routes.clone()),
            &LocaleSelection::One(locale.clone()),
            &mut children,
            diagnostics,
        )?;

        Ok(RouteOptions {
            extra: route.options.extra.clone(),
            nested: Some(NestedBlock {
                routes: children.into_iter().map(RouteNode::Route).collect(),
                already_localized: true,
            }),
        })
    }
}

/// Rejects unsupported verbs on the route and on every child of a nested
/// block that will be expanded with it
fn ensure_supported(route: &RouteDeclaration) -> Result<()> {
    if let Verb::Other(verb) = &route.verb {
        return Err(LocalizeError::UnsupportedVerb {
            verb: verb.clone(),
            path: route.path.clone(),
            supported: Verb::supported_list(),
        });
    }

    match route.nested() {
        Some(nested) if route.verb.is_resources() && !nested.already_localized => nested
            .declarations()
            .into_iter()
            .try_for_each(ensure_supported),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::locale::{LocaleDescriptor, StaticLocales};
    use crate::route::OptionValue;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_translation("fr", "pages", "pages_fr")
            .with_translation("fr", "users", "utilisateurs")
            .with_translation("fr", "faces", "visages")
    }

    fn locales() -> StaticLocales {
        StaticLocales::new(LocaleDescriptor::new("en", "en"))
            .with_locale(LocaleDescriptor::new("fr", "fr"))
    }

    fn paths(localized: &Localized) -> Vec<&str> {
        localized.routes.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_single_route_all_locales() {
        let (config, catalog, locales) = (LocalizerConfig::default(), catalog(), locales());
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::from(RouteDeclaration::get("/pages/:id", "PageController", "show"));

        let localized = localizer.localize_all(&tree).unwrap();

        assert_eq!(paths(&localized), vec!["/pages/:id", "/pages_fr/:id"]);
        assert_eq!(
            localized.routes[0].locale(&config),
            Some(LocaleId::from("en"))
        );
        assert_eq!(
            localized.routes[1].locale(&config),
            Some(LocaleId::from("fr"))
        );
        assert!(localized.diagnostics.is_empty());
    }

    #[test]
    fn test_block_keeps_declaration_order() {
        let (config, catalog, locales) = (LocalizerConfig::default(), catalog(), locales());
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::block([
            RouteDeclaration::get("/pages", "PageController", "index"),
            RouteDeclaration::get("/users", "UserController", "index"),
        ]);

        let localized = localizer
            .localize(&tree, &LocaleSelection::many(["fr", "en"]))
            .unwrap();

        assert_eq!(
            paths(&localized),
            vec!["/pages_fr", "/pages", "/utilisateurs", "/users"]
        );
    }

    #[test]
    fn test_identity_locale_collapses_with_dedupe() {
        let config = LocalizerConfig::default();
        let catalog = catalog();
        let locales = locales().with_locale(LocaleDescriptor::new("de", "de"));
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::from(RouteDeclaration::get("/pages", "PageController", "index"));

        let localized = localizer.localize_all(&tree).unwrap();

        assert_eq!(paths(&localized), vec!["/pages", "/pages_fr"]);
        let dropped: Vec<&Diagnostic> = localized.diagnostics.iter().collect();
        assert_eq!(
            dropped,
            vec![&Diagnostic::DuplicateDropped {
                locale: Some(LocaleId::from("de")),
                kept_locale: Some(LocaleId::from("en")),
                verb: Verb::Get,
                path: "/pages".to_string(),
            }]
        );
        assert_eq!(localized.warnings().count(), 0);
    }

    #[test]
    fn test_dedupe_disabled() {
        let config = LocalizerConfig {
            dedupe: false,
            ..LocalizerConfig::default()
        };
        let catalog = catalog();
        let locales = locales().with_locale(LocaleDescriptor::new("de", "de"));
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::from(RouteDeclaration::get("/pages", "PageController", "index"));

        let localized = localizer.localize_all(&tree).unwrap();
        assert_eq!(paths(&localized), vec!["/pages", "/pages_fr", "/pages"]);
    }

    #[test]
    fn test_localize_scope_overrides_selection() {
        let (config, catalog, locales) = (LocalizerConfig::default(), catalog(), locales());
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::block([
            RouteNode::from(RouteDeclaration::get("/pages", "PageController", "index")),
            RouteNode::localize(
                LocaleSelection::one("fr"),
                RouteDeclaration::get("/users", "UserController", "index"),
            ),
        ]);

        let localized = localizer.localize_all(&tree).unwrap();
        assert_eq!(paths(&localized), vec!["/pages", "/pages_fr", "/utilisateurs"]);
    }

    #[test]
    fn test_nested_resources_marked_localized() {
        let (config, catalog, locales) = (LocalizerConfig::default(), catalog(), locales());
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::from(
            RouteDeclaration::resources("/users", "UserController")
                .with_nested([RouteDeclaration::resources("/faces", "FaceController")]),
        );

        let localized = localizer
            .localize(&tree, &LocaleSelection::one("fr"))
            .unwrap();

        assert_eq!(localized.routes.len(), 1);
        let outer = &localized.routes[0];
        assert_eq!(outer.path, "/utilisateurs");

        let nested = outer.nested().unwrap();
        assert!(nested.already_localized);
        let inner = nested.declarations()[0];
        assert_eq!(inner.path, "/visages");
        assert_eq!(inner.locale(&config), Some(LocaleId::from("fr")));
    }

    #[test]
    fn test_already_localized_block_not_expanded_again() {
        let (config, catalog, locales) = (LocalizerConfig::default(), catalog(), locales());
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::from(
            RouteDeclaration::resources("/users", "UserController")
                .with_nested([RouteDeclaration::resources("/faces", "FaceController")]),
        );

        let once = localizer
            .localize(&tree, &LocaleSelection::one("fr"))
            .unwrap();
        let again = localizer
            .localize(&RouteNode::block(once.routes.clone()), &LocaleSelection::one("fr"))
            .unwrap();

        let nested = again.routes[0].nested().unwrap();
        assert_eq!(nested.routes.len(), 1);
        // Children were left as they were, still translated exactly once
        assert_eq!(nested.declarations()[0].path, "/visages");
    }

    #[test]
    fn test_nested_block_on_other_verb_untouched() {
        let (config, catalog, locales) = (LocalizerConfig::default(), catalog(), locales());
        let localizer = Localizer::new(&config, &catalog, &locales);
        let route = RouteDeclaration::get("/pages", "PageController", "index")
            .with_nested([RouteDeclaration::get("/users", "UserController", "index")]);

        let localized = localizer
            .localize(&RouteNode::from(route.clone()), &LocaleSelection::one("fr"))
            .unwrap();

        assert_eq!(localized.routes[0].options.nested, route.options.nested);
    }

    #[test]
    fn test_unsupported_verb_in_nested_block_is_fatal() {
        let (config, catalog, locales) = (LocalizerConfig::default(), catalog(), locales());
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::from(
            RouteDeclaration::resources("/users", "UserController").with_nested([
                RouteDeclaration::new(Verb::from("forward"), "/jobs", "JobRouter"),
            ]),
        );

        let err = localizer.localize_all(&tree).unwrap_err();
        assert!(matches!(err, LocalizeError::UnsupportedVerb { ref verb, .. } if verb == "forward"));
    }

    #[test]
    fn test_unsupported_nested_verb_fatal_without_catalogs() {
        let config = LocalizerConfig::default();
        let catalog = catalog();
        let locales = StaticLocales::new(LocaleDescriptor::without_catalog("en"))
            .with_locale(LocaleDescriptor::without_catalog("it"));
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::from(
            RouteDeclaration::resources("/users", "UserController").with_nested([
                RouteDeclaration::new(Verb::from("forward"), "/jobs", "JobRouter"),
            ]),
        );

        let err = localizer.localize_all(&tree).unwrap_err();
        assert!(matches!(err, LocalizeError::UnsupportedVerb { ref path, .. } if path == "/jobs"));
    }

    #[test]
    fn test_nested_missing_catalog_logged_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;
        use tracing_subscriber::layer::{Context, SubscriberExt};
        use tracing_subscriber::Layer;

        struct CountWarnings(Arc<AtomicUsize>);

        impl<S: tracing::Subscriber> Layer<S> for CountWarnings {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                if *event.metadata().level() == tracing::Level::WARN {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        let (config, catalog, locales) = (LocalizerConfig::default(), catalog(), locales());
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::from(
            RouteDeclaration::resources("/users", "UserController").with_nested([RouteNode::localize(
                LocaleSelection::one("it"),
                RouteDeclaration::get("/x", "XController", "index"),
            )]),
        );

        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber =
            tracing_subscriber::registry().with(CountWarnings(Arc::clone(&warnings)));
        let localized = tracing::subscriber::with_default(subscriber, || {
            localizer
                .localize(&tree, &LocaleSelection::one("en"))
                .unwrap()
        });

        assert_eq!(localized.warnings().count(), 1);
        assert_eq!(warnings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_existing_options_kept() {
        let (config, catalog, locales) = (LocalizerConfig::default(), catalog(), locales());
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::from(
            RouteDeclaration::get("/pages", "PageController", "index")
                .with_option("as", OptionValue::atom("pages")),
        );

        let localized = localizer
            .localize(&tree, &LocaleSelection::one("fr"))
            .unwrap();

        let route = &localized.routes[0];
        assert_eq!(route.options.get("as"), Some(&OptionValue::atom("pages")));
    }

    #[test]
    fn test_for_locale_and_json() {
        let (config, catalog, locales) = (LocalizerConfig::default(), catalog(), locales());
        let localizer = Localizer::new(&config, &catalog, &locales);
        let tree = RouteNode::block([
            RouteDeclaration::get("/pages", "PageController", "index"),
            RouteDeclaration::live("/users", "UserLive"),
        ]);

        let localized = localizer.localize_all(&tree).unwrap();
        let fr: Vec<&str> = localized
            .for_locale(&LocaleId::from("fr"), &config)
            .iter()
            .map(|r| r.path.as_str())
            .collect();
        assert_eq!(fr, vec!["/pages_fr", "/utilisateurs"]);

        let json = localized.to_json().unwrap();
        assert!(json.contains("\"/pages_fr\""));
        assert!(json.contains("\"private\""));
    }
}
