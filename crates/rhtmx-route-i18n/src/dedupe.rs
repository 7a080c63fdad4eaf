//! Cross-locale deduplication
//!
//! A locale whose catalog has no entry for any segment of a path regenerates
//! the original path. Those copies are dropped here, keeping the first one.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::route::{RouteDeclaration, Verb};

/// Identity of a route for deduplication purposes
///
/// Built from verb, path, target module and action. Options, locale metadata,
/// nested blocks and source positions are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    verb: Verb,
    path: String,
    module: String,
    action: Option<String>,
}

impl CanonicalKey {
    pub fn of(route: &RouteDeclaration) -> Self {
        Self {
            verb: route.verb.clone(),
            path: route.path.clone(),
            module: route.target.module.clone(),
            action: route.target.action.clone(),
        }
    }
}

/// Splits routes into the first occurrence of every key and the later copies
///
/// Each dropped route is paired with the index (into the kept list) of the
/// route it duplicates.
pub fn partition(
    routes: Vec<RouteDeclaration>,
) -> (Vec<RouteDeclaration>, Vec<(usize, RouteDeclaration)>) {
    let mut seen: HashMap<CanonicalKey, usize> = HashMap::new();
    let mut kept = Vec::with_capacity(routes.len());
    let mut dropped = Vec::new();

    for route in routes {
        match seen.entry(CanonicalKey::of(&route)) {
            Entry::Occupied(original) => dropped.push((*original.get(), route)),
            Entry::Vacant(slot) => {
                slot.insert(kept.len());
                kept.push(route);
            }
        }
    }

    (kept, dropped)
}

/// Removes later duplicates, preserving first-seen order (pure function)
///
/// # Examples
///
/// ```
/// use rhtmx_route_i18n::dedupe::dedupe;
/// use rhtmx_route_i18n::RouteDeclaration;
///
/// let routes = vec![
///     RouteDeclaration::get("/pages", "PageController", "index"),
///     RouteDeclaration::get("/pages", "PageController", "index").at("router.rs", 4),
///     RouteDeclaration::get("/pages", "PageController", "new"),
/// ];
///
/// let unique = dedupe(routes);
/// assert_eq!(unique.len(), 2);
/// assert_eq!(unique[1].target.action.as_deref(), Some("new"));
/// ```
pub fn dedupe(routes: Vec<RouteDeclaration>) -> Vec<RouteDeclaration> {
    partition(routes).0
}
