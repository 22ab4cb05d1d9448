//! Materialize the loaded walkthrough into render nodes.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use config::{Configuration, Decoration, Item, ItemPath, ResolvedItem, resolve_tree};
use tracing::debug;

use crate::{ActionDescriptor, action_for};

/// Label of the node shown before any walkthrough is loaded.
pub const BOOTSTRAP_LABEL: &str = "Load configuration";
/// Context value of the bootstrap node.
pub const BOOTSTRAP_CONTEXT: &str = "load";
/// Icon of the bootstrap node.
const BOOTSTRAP_ICON: &str = "folder-opened";

/// Expansion affordance of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collapsible {
    /// Leaf; cannot expand.
    None,
    /// Folder currently collapsed.
    Collapsed,
    /// Folder currently expanded.
    Expanded,
}

/// Which entry a render node stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// The "load walkthrough" placeholder.
    Bootstrap,
    /// The item at this path.
    Item(ItemPath),
}

/// Display-ready projection of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderNode {
    /// Identity of the node.
    pub id: NodeId,
    /// Text shown in the tree.
    pub label: String,
    /// Context value for host menus (the item type tag).
    pub context: &'static str,
    /// Effective icon and colors.
    pub decoration: Decoration,
    /// Expansion affordance.
    pub collapsible: Collapsible,
    /// Effect run on activation.
    pub action: Option<ActionDescriptor>,
}

impl RenderNode {
    /// Path of the item, `None` for the bootstrap node.
    pub fn path(&self) -> Option<&ItemPath> {
        match &self.id {
            NodeId::Item(p) => Some(p),
            NodeId::Bootstrap => None,
        }
    }

    /// The node shown when nothing is loaded.
    fn bootstrap() -> Self {
        Self {
            id: NodeId::Bootstrap,
            label: BOOTSTRAP_LABEL.to_string(),
            context: BOOTSTRAP_CONTEXT,
            decoration: Decoration {
                icon: BOOTSTRAP_ICON.to_string(),
                icon_color: None,
                label_color: None,
            },
            collapsible: Collapsible::None,
            action: Some(ActionDescriptor::LoadConfiguration),
        }
    }
}

/// The currently loaded walkthrough plus folder expansion state.
#[derive(Debug, Default)]
pub struct Outline {
    /// Loaded document; `None` until a load succeeds or after a reset.
    config: Option<Arc<Configuration>>,
    /// Effective decoration of every item, resolved once per load.
    decorations: HashMap<ItemPath, Decoration>,
    /// Folder paths the host reported as expanded.
    expanded: HashSet<ItemPath>,
}

/// Flatten a resolved tree into a path-keyed decoration table.
fn index_decorations(nodes: Vec<ResolvedItem<'_>>, out: &mut HashMap<ItemPath, Decoration>) {
    for node in nodes {
        index_decorations(node.children, out);
        out.insert(node.path, node.decoration);
    }
}

impl Outline {
    /// An outline with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is loaded with `cfg`, resolving every decoration up
    /// front. Expansion state is cleared.
    pub fn load(&mut self, cfg: Configuration) {
        let mut decorations = HashMap::with_capacity(cfg.len());
        index_decorations(resolve_tree(&cfg), &mut decorations);
        debug!(title = %cfg.title, items = decorations.len(), "outline loaded");
        self.decorations = decorations;
        self.config = Some(Arc::new(cfg));
        self.expanded.clear();
    }

    /// Drop the loaded walkthrough.
    pub fn reset(&mut self) {
        debug!("outline reset");
        self.config = None;
        self.decorations.clear();
        self.expanded.clear();
    }

    /// The loaded walkthrough, if any.
    pub fn config(&self) -> Option<&Arc<Configuration>> {
        self.config.as_ref()
    }

    /// True when a walkthrough is loaded.
    pub fn is_loaded(&self) -> bool {
        self.config.is_some()
    }

    /// Record a host expand/collapse signal. Returns false (and records
    /// nothing) when `path` is not a folder.
    pub fn set_expanded(&mut self, path: &ItemPath, expanded: bool) -> bool {
        let is_folder = self
            .config
            .as_ref()
            .and_then(|c| c.get(path))
            .is_some_and(Item::is_folder);
        if !is_folder {
            return false;
        }
        if expanded {
            self.expanded.insert(path.clone());
        } else {
            self.expanded.remove(path);
        }
        true
    }

    /// True when the folder at `path` is expanded.
    pub fn is_expanded(&self, path: &ItemPath) -> bool {
        self.expanded.contains(path)
    }

    /// Children of `node`: the bootstrap node or root items for `None`, the
    /// resolved children for a folder, and nothing for anything else.
    pub fn children_of(&self, node: Option<&RenderNode>) -> Vec<RenderNode> {
        match node {
            None if self.config.is_none() => vec![RenderNode::bootstrap()],
            None => self.children_at(&ItemPath::root()),
            Some(n) => match &n.id {
                NodeId::Bootstrap => Vec::new(),
                NodeId::Item(path) => self.children_at(path),
            },
        }
    }

    /// Resolved children of the folder at `path` (root items for the root path).
    /// Paths that do not name a folder yield nothing.
    pub fn children_at(&self, path: &ItemPath) -> Vec<RenderNode> {
        let Some(cfg) = &self.config else {
            return Vec::new();
        };
        let items: &[Item] = if path.is_root() {
            &cfg.items
        } else {
            match cfg.get(path).and_then(Item::children) {
                Some(c) => c,
                None => return Vec::new(),
            }
        };
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.make_node(item, path.child(i as u32)))
            .collect()
    }

    /// Render node for the item at `path`, if it exists.
    pub fn node_at(&self, path: &ItemPath) -> Option<RenderNode> {
        let item = self.config.as_ref()?.get(path)?;
        self.make_node(item, path.clone())
    }

    /// Attach the cached decoration, label, context, expansion state, and
    /// action to `item`.
    fn make_node(&self, item: &Item, path: ItemPath) -> Option<RenderNode> {
        let decoration = self.decorations.get(&path)?.clone();
        let collapsible = if !item.is_folder() {
            Collapsible::None
        } else if self.expanded.contains(&path) {
            Collapsible::Expanded
        } else {
            Collapsible::Collapsed
        };
        Some(RenderNode {
            label: item.label().to_string(),
            context: item.context_value(),
            decoration,
            collapsible,
            action: action_for(item),
            id: NodeId::Item(path),
        })
    }
}
