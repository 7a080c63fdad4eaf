//! Path template translation
//!
//! A path is split on `/`, every segment goes through the
//! [`SegmentTranslator`], and the pieces are joined back with `/`. Empty
//! segments are kept, so leading, trailing and doubled separators survive.

use std::collections::BTreeSet;

use crate::catalog::{SegmentTranslator, TranslationCatalog};
use crate::locale::CatalogId;
use crate::route::segment::literal_segments;
use crate::route::RouteNode;

/// Path separator for route templates
pub const SEPARATOR: char = '/';

/// Translates whole path templates
///
/// # Examples
///
/// ```
/// use rhtmx_route_i18n::{CatalogId, MemoryCatalog, PathTranslator};
///
/// let catalog = MemoryCatalog::new().with_translation("fr", "pages", "pages_fr");
/// let prefixes = vec![":".to_string()];
/// let translator = PathTranslator::new(&catalog, &prefixes);
///
/// assert_eq!(
///     translator.translate_path(&CatalogId::from("fr"), "/pages/:id"),
///     "/pages_fr/:id"
/// );
/// ```
#[derive(Clone, Copy)]
pub struct PathTranslator<'a> {
    segments: SegmentTranslator<'a>,
}

impl<'a> PathTranslator<'a> {
    pub fn new(catalog: &'a dyn TranslationCatalog, dynamic_prefixes: &'a [String]) -> Self {
        Self {
            segments: SegmentTranslator::new(catalog, dynamic_prefixes),
        }
    }

    pub fn translate_path(&self, catalog: &CatalogId, path: &str) -> String {
        path.split(SEPARATOR)
            .map(|segment| self.segments.translate(catalog, segment))
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Literal segments across a whole tree, including nested blocks
///
/// This is the set of message ids a catalog needs in the routes domain.
pub fn translatable_segments(tree: &RouteNode, dynamic_prefixes: &[String]) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    collect_segments(tree, dynamic_prefixes, &mut found);
    found
}

fn collect_segments(node: &RouteNode, dynamic_prefixes: &[String], found: &mut BTreeSet<String>) {
    for route in node.declarations() {
        found.extend(literal_segments(&route.path, dynamic_prefixes).map(str::to_string));

        if let Some(nested) = route.nested() {
            for child in &nested.routes {
                collect_segments(child, dynamic_prefixes, found);
            }
        }
    }
}
