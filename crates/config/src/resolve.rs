//! Effective icon and color resolution.
//!
//! Colors flow down the tree: an item's own color wins, then (for folders) the
//! folder-level override, then whatever the nearest ancestor resolved to. The
//! icon never inherits; it falls back to a per-type default.

use serde::Serialize;

use crate::{Configuration, Item, ItemKind, ItemPath};

/// Colors handed from a folder to its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inherited {
    /// Effective icon color of the nearest ancestor, if any.
    pub icon_color: Option<String>,
    /// Effective label color of the nearest ancestor, if any.
    pub label_color: Option<String>,
}

impl From<&Decoration> for Inherited {
    fn from(d: &Decoration) -> Self {
        Self {
            icon_color: d.icon_color.clone(),
            label_color: d.label_color.clone(),
        }
    }
}

/// The icon and colors an item is actually drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    /// Icon name.
    pub icon: String,
    /// Icon color, when any applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    /// Label color, when any applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
}

/// Compute the decoration for `item` given what its parent passes down.
pub fn resolve(item: &Item, inherited: &Inherited) -> Decoration {
    let (folder_icon, folder_label) = match &item.kind {
        ItemKind::Folder(f) => (f.folder_icon_color.as_ref(), f.folder_label_color.as_ref()),
        _ => (None, None),
    };
    Decoration {
        icon: item
            .base
            .icon
            .clone()
            .unwrap_or_else(|| item.kind.default_icon().to_string()),
        icon_color: item
            .base
            .icon_color
            .as_ref()
            .or(folder_icon)
            .or(inherited.icon_color.as_ref())
            .cloned(),
        label_color: item
            .base
            .label_color
            .as_ref()
            .or(folder_label)
            .or(inherited.label_color.as_ref())
            .cloned(),
    }
}

/// An item paired with its decoration and position, with resolved children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem<'a> {
    /// Source item.
    pub item: &'a Item,
    /// Position in the tree.
    pub path: ItemPath,
    /// Effective icon and colors.
    pub decoration: Decoration,
    /// Resolved children; empty for leaves.
    pub children: Vec<ResolvedItem<'a>>,
}

/// Resolve a list of sibling items below `parent`.
fn resolve_all<'a>(
    items: &'a [Item],
    parent: &ItemPath,
    inherited: &Inherited,
) -> Vec<ResolvedItem<'a>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = parent.child(i as u32);
            let decoration = resolve(item, inherited);
            let children = item
                .children()
                .map(|c| resolve_all(c, &path, &Inherited::from(&decoration)))
                .unwrap_or_default();
            ResolvedItem {
                item,
                path,
                decoration,
                children,
            }
        })
        .collect()
}

/// Resolve every item of `cfg` in one recursive pass.
pub fn resolve_tree(cfg: &Configuration) -> Vec<ResolvedItem<'_>> {
    resolve_all(&cfg.items, &ItemPath::root(), &Inherited::default())
}
