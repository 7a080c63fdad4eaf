//! Route declaration tree
//!
//! In-memory form of what the host routing DSL declares. The localizer reads
//! these trees and produces new ones; it never mutates its input.

use serde::{Deserialize, Serialize};

use crate::config::LocalizerConfig;
use crate::locale::{LocaleId, LocaleSelection};

pub mod segment;
pub mod verb;

pub use segment::{classify_segment, literal_segments, SegmentKind};
pub use verb::{Verb, SUPPORTED_VERBS};

// ============================================================================
// Option Values
// ============================================================================

/// Ordered key/value list, the shape of route options and metadata records
pub type KeywordList = Vec<(String, OptionValue)>;

/// Value stored under a route option key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Atom(String),
    List(Vec<OptionValue>),
    /// Ordered record, e.g. the `assigns` map
    Map(KeywordList),
}

impl OptionValue {
    pub fn str(value: impl Into<String>) -> Self {
        OptionValue::Str(value.into())
    }

    pub fn atom(value: impl Into<String>) -> Self {
        OptionValue::Atom(value.into())
    }

    /// Looks up a key when this value is a record
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        match self {
            OptionValue::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) | OptionValue::Atom(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the value's shape, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "bool",
            OptionValue::Int(_) => "int",
            OptionValue::Str(_) => "string",
            OptionValue::Atom(_) => "atom",
            OptionValue::List(_) => "list",
            OptionValue::Map(_) => "map",
        }
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// Where a declaration appeared in the host's routing source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    #[serde(default)]
    pub file: Option<String>,
    pub line: u32,
}

/// Handler a route dispatches to
///
/// For `live` routes `module` is the live-view module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub module: String,
    /// Positional action name such as `show`
    #[serde(default)]
    pub action: Option<String>,
}

impl Target {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Child routes declared inside a declaration's block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NestedBlock {
    pub routes: Vec<RouteNode>,
    /// Set once the block has been expanded for a single locale
    #[serde(default)]
    pub already_localized: bool,
}

impl NestedBlock {
    pub fn new(routes: Vec<RouteNode>) -> Self {
        Self {
            routes,
            already_localized: false,
        }
    }

    /// Declarations in this block, with sub-blocks flattened
    pub fn declarations(&self) -> Vec<&RouteDeclaration> {
        self.routes.iter().flat_map(RouteNode::declarations).collect()
    }
}

/// Options of a declaration
///
/// `extra` is `None` for a positional-only call (no keyword list at all),
/// which is different from an empty keyword list. The nested block is kept in
/// its own field and always comes after every other option.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteOptions {
    #[serde(default)]
    pub extra: Option<KeywordList>,
    #[serde(default)]
    pub nested: Option<NestedBlock>,
}

impl RouteOptions {
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.extra
            .as_ref()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// A single route declaration
///
/// # Examples
///
/// ```
/// use rhtmx_route_i18n::{OptionValue, RouteDeclaration, Verb};
///
/// let route = RouteDeclaration::new(Verb::Get, "/pages/:id", "PageController")
///     .with_action("show")
///     .with_option("as", OptionValue::atom("page"));
///
/// assert_eq!(route.path, "/pages/:id");
/// assert_eq!(route.target.action.as_deref(), Some("show"));
/// assert_eq!(route.options.get("as"), Some(&OptionValue::atom("page")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDeclaration {
    pub verb: Verb,
    pub path: String,
    pub target: Target,
    #[serde(default)]
    pub options: RouteOptions,
    #[serde(default)]
    pub position: Option<SourcePosition>,
}

impl RouteDeclaration {
    pub fn new(verb: Verb, path: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            target: Target::new(module),
            options: RouteOptions::default(),
            position: None,
        }
    }

    pub fn get(path: impl Into<String>, module: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(Verb::Get, path, module).with_action(action)
    }

    pub fn post(path: impl Into<String>, module: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(Verb::Post, path, module).with_action(action)
    }

    pub fn live(path: impl Into<String>, module: impl Into<String>) -> Self {
        Self::new(Verb::Live, path, module)
    }

    pub fn resources(path: impl Into<String>, module: impl Into<String>) -> Self {
        Self::new(Verb::Resources, path, module)
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.target.action = Some(action.into());
        self
    }

    /// Appends a keyword option, creating the keyword list if needed
    pub fn with_option(mut self, key: impl Into<String>, value: OptionValue) -> Self {
        self.options
            .extra
            .get_or_insert_with(Vec::new)
            .push((key.into(), value));
        self
    }

    /// Sets the nested block of child routes
    pub fn with_nested<I>(mut self, routes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RouteNode>,
    {
        self.options.nested = Some(NestedBlock::new(routes.into_iter().map(Into::into).collect()));
        self
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.position = Some(SourcePosition {
            file: Some(file.into()),
            line,
        });
        self
    }

    pub fn nested(&self) -> Option<&NestedBlock> {
        self.options.nested.as_ref()
    }

    /// Locale recorded by the localizer, read from the verb's metadata field
    pub fn locale(&self, config: &LocalizerConfig) -> Option<LocaleId> {
        let field = config.metadata_field(&self.verb);
        self.options
            .get(field)?
            .get(&config.locale_key)?
            .as_str()
            .map(LocaleId::from)
    }
}

// ============================================================================
// Tree Nodes
// ============================================================================

/// Node of a route declaration tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteNode {
    Route(RouteDeclaration),
    /// Sequence of sibling nodes
    Block(Vec<RouteNode>),
    /// Explicit localization scope; overrides the enclosing selection
    Localize {
        locales: LocaleSelection,
        body: Box<RouteNode>,
    },
}

impl RouteNode {
    pub fn block<I>(nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RouteNode>,
    {
        RouteNode::Block(nodes.into_iter().map(Into::into).collect())
    }

    pub fn localize(locales: LocaleSelection, body: impl Into<RouteNode>) -> Self {
        RouteNode::Localize {
            locales,
            body: Box::new(body.into()),
        }
    }

    /// Every declaration in source order, descending into blocks and scopes
    /// but not into nested resource blocks
    pub fn declarations(&self) -> Vec<&RouteDeclaration> {
        match self {
            RouteNode::Route(route) => vec![route],
            RouteNode::Block(nodes) => nodes.iter().flat_map(RouteNode::declarations).collect(),
            RouteNode::Localize { body, .. } => body.declarations(),
        }
    }
}

impl From<RouteDeclaration> for RouteNode {
    fn from(route: RouteDeclaration) -> Self {
        RouteNode::Route(route)
    }
}
