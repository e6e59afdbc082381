//! Node type catalog
//!
//! Maps each [`NodeKind`] to its connection rules and display metadata.
//! The built-in table is fixed; [`NodeCatalog::register`] is the explicit
//! registration interface for overriding entries of the closed set.

use indexmap::IndexMap;
use sceneweave_graph::NodeKind;
use serde::{Deserialize, Serialize};

/// Default size a node of some type renders at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub width: f32,
    pub height: f32,
}

impl Default for NodeSize {
    fn default() -> Self {
        Self {
            width: 140.0,
            height: 70.0,
        }
    }
}

/// Display metadata consumed by the node factory and the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplay {
    pub name: String,
    pub icon: String,
    pub category: String,
    pub default_size: NodeSize,
    /// Whether the palette offers this type for manual placement.
    /// Description nodes are only ever created by the lifecycle manager.
    pub in_palette: bool,
}

impl NodeDisplay {
    fn new(name: &str, icon: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            category: category.to_string(),
            default_size: NodeSize::default(),
            in_palette: true,
        }
    }
}

/// How the duplicate-edge check scopes "identical".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateScope {
    /// Same source, target, and both handles.
    #[default]
    ExactHandles,
    /// Same ordered node pair, handles ignored (one edge per pair).
    NodePair,
}

/// Connection rules for one node type.
///
/// `None` means unrestricted/unbounded for the optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRules {
    /// Target kinds this type may connect to. `None` = unrestricted.
    pub allowed_targets: Option<Vec<NodeKind>>,
    /// Cap on edges per exact `(source, source_handle)` pair.
    pub max_outgoing: Option<u32>,
    /// Cap on edges per exact `(target, target_handle)` pair.
    pub max_incoming: Option<u32>,
    pub allow_cycle: bool,
    pub allow_self_connection: bool,
    pub allow_duplicate_connection: bool,
    pub duplicate_scope: DuplicateScope,
}

impl Default for TypeRules {
    fn default() -> Self {
        Self {
            allowed_targets: None,
            max_outgoing: None,
            max_incoming: None,
            allow_cycle: false,
            allow_self_connection: false,
            allow_duplicate_connection: false,
            duplicate_scope: DuplicateScope::default(),
        }
    }
}

impl TypeRules {
    /// Restrict targets to the given kinds.
    #[must_use]
    pub fn targets(mut self, kinds: &[NodeKind]) -> Self {
        self.allowed_targets = Some(kinds.to_vec());
        self
    }

    /// Cap outgoing edges per handle.
    #[must_use]
    pub const fn max_out(mut self, limit: u32) -> Self {
        self.max_outgoing = Some(limit);
        self
    }

    /// Cap incoming edges per handle.
    #[must_use]
    pub const fn max_in(mut self, limit: u32) -> Self {
        self.max_incoming = Some(limit);
        self
    }

    /// Widen the duplicate check to the ordered node pair.
    #[must_use]
    pub const fn one_edge_per_pair(mut self) -> Self {
        self.duplicate_scope = DuplicateScope::NodePair;
        self
    }
}

/// One catalog entry: rules plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub rules: TypeRules,
    pub display: NodeDisplay,
}

/// Read-only lookup service mapping node kinds to their catalog entries.
#[derive(Debug, Clone, Default)]
pub struct NodeCatalog {
    entries: IndexMap<NodeKind, CatalogEntry>,
}

impl NodeCatalog {
    /// An empty catalog. Most callers want [`Self::with_defaults`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rule table.
    #[must_use]
    pub fn with_defaults() -> Self {
        use NodeKind::{BigScene, Description, End, EnterGuide, ExitGuide, Start};

        let mut catalog = Self::new();

        catalog.register(
            Start,
            CatalogEntry {
                rules: TypeRules::default()
                    .targets(&[BigScene, EnterGuide])
                    .max_out(1)
                    .max_in(0),
                display: NodeDisplay::new("Start", "\u{25b6}", "control"),
            },
        );

        // Terminals list no targets at all; the outgoing cap of zero is
        // what turns connection attempts away.
        catalog.register(
            End,
            CatalogEntry {
                rules: TypeRules::default().max_out(0),
                display: NodeDisplay::new("End", "\u{25a0}", "control"),
            },
        );

        // One edge per directed pair on scenes; every other type keeps the
        // exact-handle duplicate scope.
        catalog.register(
            BigScene,
            CatalogEntry {
                rules: TypeRules::default()
                    .targets(&[BigScene, EnterGuide, ExitGuide, End])
                    .one_edge_per_pair(),
                display: NodeDisplay {
                    default_size: NodeSize {
                        width: 160.0,
                        height: 80.0,
                    },
                    ..NodeDisplay::new("Big Scene", "\u{1f3ac}", "business")
                },
            },
        );

        catalog.register(
            EnterGuide,
            CatalogEntry {
                rules: TypeRules::default().targets(&[BigScene]).max_out(1),
                display: NodeDisplay::new("Enter Guide", "\u{2192}", "business"),
            },
        );

        catalog.register(
            ExitGuide,
            CatalogEntry {
                rules: TypeRules::default().targets(&[BigScene, End]).max_out(1),
                display: NodeDisplay::new("Exit Guide", "\u{2190}", "business"),
            },
        );

        catalog.register(
            Description,
            CatalogEntry {
                rules: TypeRules::default().max_out(0),
                display: NodeDisplay {
                    in_palette: false,
                    ..NodeDisplay::new("Description", "\u{1f4dd}", "auxiliary")
                },
            },
        );

        catalog
    }

    /// Register or replace the entry for a kind.
    pub fn register(&mut self, kind: NodeKind, entry: CatalogEntry) {
        self.entries.insert(kind, entry);
    }

    /// Remove a kind from the catalog. Returns the previous entry.
    pub fn unregister(&mut self, kind: NodeKind) -> Option<CatalogEntry> {
        self.entries.shift_remove(&kind)
    }

    /// Look up a kind's entry.
    #[must_use]
    pub fn lookup(&self, kind: NodeKind) -> Option<&CatalogEntry> {
        self.entries.get(&kind)
    }

    /// Connection rules for a kind.
    #[must_use]
    pub fn rules(&self, kind: NodeKind) -> Option<&TypeRules> {
        self.entries.get(&kind).map(|e| &e.rules)
    }

    /// Whether a kind is registered.
    #[must_use]
    pub fn contains(&self, kind: NodeKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Kinds offered in the palette, catalog order.
    #[must_use]
    pub fn palette(&self) -> Vec<NodeKind> {
        self.entries
            .iter()
            .filter(|(_, e)| e.display.in_palette)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Kinds a node of `kind` may connect to, per its allow-list.
    ///
    /// `None` means unrestricted.
    #[must_use]
    pub fn allowed_targets(&self, kind: NodeKind) -> Option<&[NodeKind]> {
        self.entries
            .get(&kind)
            .and_then(|e| e.rules.allowed_targets.as_deref())
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
