//! Assembled menu tree structure.

use serde::{Deserialize, Serialize};

use super::link::MenuLink;

/// A node in an assembled menu tree: one link plus its descendants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuTreeElement {
    /// The link at this position in the tree.
    pub link: MenuLink,

    /// Child elements, in load order.
    #[serde(default)]
    pub subtree: Vec<MenuTreeElement>,
}

impl MenuTreeElement {
    /// Create a leaf element.
    pub fn new(link: MenuLink) -> Self {
        Self {
            link,
            subtree: Vec::new(),
        }
    }
}

/// Parameters controlling how a menu tree is loaded.
#[derive(Debug, Clone, Default)]
pub struct MenuTreeParameters {
    /// Maximum depth to assemble; `None` means unlimited.
    pub max_depth: Option<usize>,
}
