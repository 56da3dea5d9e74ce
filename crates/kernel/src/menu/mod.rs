//! Menu system: link records, tree assembly, manipulation, and export.
//!
//! A request flows through the module in order:
//! - [`MenuLinkTree`] loads the raw tree for a named menu
//! - manipulators filter by access and sort by weight
//! - [`export`] reshapes the tree into its serializable nested form

mod export;
mod link;
mod manipulators;
mod service;
mod tree;

pub use export::{MenuTreeEntry, export};
pub use link::{MenuLink, MenuUrl};
pub use manipulators::{CheckAccess, SortByWeight, TreeManipulator, Viewer};
pub use service::{MenuLinkTree, SeededMenuTree};
pub use tree::{MenuTreeElement, MenuTreeParameters};
