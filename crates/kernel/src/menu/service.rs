//! Menu tree service.
//!
//! The three-call contract the HTTP boundary drives, in order: parameters,
//! load, transform. Implementations own where links come from;
//! [`SeededMenuTree`] keeps them in memory, seeded from JSON link records.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use super::link::MenuLink;
use super::manipulators::TreeManipulator;
use super::tree::{MenuTreeElement, MenuTreeParameters};

/// Source of assembled menu trees.
///
/// The boundary calls the three methods in order before exporting; the
/// exporter itself never touches this service.
#[async_trait]
pub trait MenuLinkTree: Send + Sync {
    /// Parameters for loading `menu` in the context of the current request.
    fn current_route_parameters(&self, menu: &str) -> MenuTreeParameters;

    /// Load the raw (unfiltered, unsorted) tree for `menu`.
    ///
    /// An unknown menu yields an empty tree, not an error.
    async fn load(
        &self,
        menu: &str,
        parameters: &MenuTreeParameters,
    ) -> Result<Vec<MenuTreeElement>>;

    /// Apply manipulators to a loaded tree, in order.
    fn transform(
        &self,
        tree: Vec<MenuTreeElement>,
        manipulators: &[&dyn TreeManipulator],
    ) -> Vec<MenuTreeElement> {
        manipulators
            .iter()
            .fold(tree, |tree, manipulator| manipulator.apply(tree))
    }
}

/// In-memory menu tree service seeded from flat link records.
///
/// Read-only after construction, so it is freely shared across request
/// handlers without coordination.
pub struct SeededMenuTree {
    /// Links grouped by menu name, in seed order.
    menus: HashMap<String, Vec<MenuLink>>,
}

impl SeededMenuTree {
    /// Create a service from flat link records.
    pub fn new(links: Vec<MenuLink>) -> Self {
        let mut menus: HashMap<String, Vec<MenuLink>> = HashMap::new();
        for link in links {
            menus.entry(link.menu_name.clone()).or_default().push(link);
        }
        Self { menus }
    }

    /// Create a service from a JSON array of link records.
    pub fn from_json(json: &str) -> Result<Self> {
        let links: Vec<MenuLink> =
            serde_json::from_str(json).context("failed to parse menu link records")?;
        Ok(Self::new(links))
    }

    /// Total number of seeded links across all menus.
    pub fn link_count(&self) -> usize {
        self.menus.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl MenuLinkTree for SeededMenuTree {
    fn current_route_parameters(&self, _menu: &str) -> MenuTreeParameters {
        // No route context in the seeded service: unlimited depth.
        MenuTreeParameters::default()
    }

    async fn load(
        &self,
        menu: &str,
        parameters: &MenuTreeParameters,
    ) -> Result<Vec<MenuTreeElement>> {
        let Some(links) = self.menus.get(menu) else {
            debug!(menu = %menu, "no links registered for menu");
            return Ok(Vec::new());
        };

        Ok(assemble(links, parameters))
    }
}

/// Assemble flat links into a nested tree by `parent_id`.
///
/// Seed order is preserved within every level. Links whose parent cannot be
/// found (or that parent themselves) are kept as roots rather than dropped.
/// Links only reachable through a parent cycle cannot be placed; they are
/// skipped with a warning.
fn assemble(links: &[MenuLink], parameters: &MenuTreeParameters) -> Vec<MenuTreeElement> {
    let ids: HashSet<Uuid> = links.iter().map(|link| link.id).collect();

    let mut children: HashMap<Uuid, Vec<&MenuLink>> = HashMap::new();
    let mut roots: Vec<&MenuLink> = Vec::new();
    for link in links {
        match link.parent_id {
            Some(parent) if parent != link.id && ids.contains(&parent) => {
                children.entry(parent).or_default().push(link);
            }
            Some(parent) => {
                warn!(
                    title = %link.title,
                    parent = %parent,
                    "menu link parent not found, treating link as root"
                );
                roots.push(link);
            }
            None => roots.push(link),
        }
    }

    struct Frame<'l> {
        level: &'l [&'l MenuLink],
        next: usize,
        out: Vec<MenuTreeElement>,
    }

    impl<'l> Frame<'l> {
        fn new(level: &'l [&'l MenuLink]) -> Self {
            Self {
                level,
                next: 0,
                out: Vec::with_capacity(level.len()),
            }
        }
    }

    let max_depth = parameters.max_depth;
    let mut placed = 0usize;
    let mut tree = Vec::new();
    let mut stack = vec![Frame::new(&roots)];

    while let Some(frame) = stack.last_mut() {
        if let Some(&link) = frame.level.get(frame.next) {
            frame.next += 1;
            placed += 1;
            frame.out.push(MenuTreeElement::new(link.clone()));
            if max_depth.is_none_or(|depth| stack.len() < depth)
                && let Some(kids) = children.get(&link.id)
            {
                stack.push(Frame::new(kids));
            }
        } else if let Some(finished) = stack.pop() {
            match stack.last_mut() {
                Some(parent) => {
                    if let Some(element) = parent.out.last_mut() {
                        element.subtree = finished.out;
                    }
                }
                None => tree = finished.out,
            }
        }
    }

    if max_depth.is_none() && placed < links.len() {
        warn!(
            skipped = links.len() - placed,
            "menu links unreachable through parent chain, skipped"
        );
    }

    tree
}
