//! Tree manipulators.
//!
//! Transformations applied to a loaded tree before export. The boundary
//! passes them to [`MenuLinkTree::transform`] in order: access filtering
//! first, then ordering.
//!
//! [`MenuLinkTree::transform`]: super::MenuLinkTree::transform

use std::collections::HashSet;

use crate::menu::link::MenuLink;
use crate::menu::tree::MenuTreeElement;

/// A transformation over an assembled menu tree.
pub trait TreeManipulator: Send + Sync {
    /// Apply the transformation, returning the reshaped tree.
    fn apply(&self, tree: Vec<MenuTreeElement>) -> Vec<MenuTreeElement>;
}

/// The viewer a tree is being prepared for.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    permissions: HashSet<String>,
}

impl Viewer {
    /// Viewer holding no permissions; sees only public links.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Viewer holding the given permissions.
    pub fn with_permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the viewer holds a permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Removes links the viewer is not allowed to see.
///
/// Hidden links and links guarded by a permission the viewer does not hold
/// are pruned together with their entire subtree: a child is never reachable
/// through an invisible parent.
pub struct CheckAccess {
    viewer: Viewer,
}

impl CheckAccess {
    /// Filter for a specific viewer.
    pub fn new(viewer: Viewer) -> Self {
        Self { viewer }
    }

    /// Filter for the anonymous viewer.
    pub fn anonymous() -> Self {
        Self::new(Viewer::anonymous())
    }

    fn allows(&self, link: &MenuLink) -> bool {
        !link.hidden
            && (link.permission.is_empty() || self.viewer.has_permission(&link.permission))
    }
}

impl TreeManipulator for CheckAccess {
    fn apply(&self, mut tree: Vec<MenuTreeElement>) -> Vec<MenuTreeElement> {
        tree.retain(|element| self.allows(&element.link));

        // Worklist instead of recursion so adversarially deep trees cannot
        // exhaust the call stack.
        let mut stack: Vec<&mut MenuTreeElement> = tree.iter_mut().collect();
        while let Some(element) = stack.pop() {
            element.subtree.retain(|child| self.allows(&child.link));
            stack.extend(element.subtree.iter_mut());
        }

        tree
    }
}

/// Stable sort by `(weight, title)` at every level of the tree.
pub struct SortByWeight;

impl TreeManipulator for SortByWeight {
    fn apply(&self, mut tree: Vec<MenuTreeElement>) -> Vec<MenuTreeElement> {
        sort_level(&mut tree);

        let mut stack: Vec<&mut MenuTreeElement> = tree.iter_mut().collect();
        while let Some(element) = stack.pop() {
            sort_level(&mut element.subtree);
            stack.extend(element.subtree.iter_mut());
        }

        tree
    }
}

fn sort_level(level: &mut [MenuTreeElement]) {
    level.sort_by(|a, b| {
        a.link
            .weight
            .cmp(&b.link.weight)
            .then_with(|| a.link.title.cmp(&b.link.title))
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::menu::link::MenuUrl;

    fn link(title: &str, weight: i32) -> MenuLink {
        MenuLink {
            id: Uuid::now_v7(),
            menu_name: "main".to_string(),
            title: title.to_string(),
            url: MenuUrl::routed(format!("/{title}")),
            parent_id: None,
            weight,
            hidden: false,
            permission: String::new(),
            plugin: String::new(),
        }
    }

    fn element(title: &str, weight: i32) -> MenuTreeElement {
        MenuTreeElement::new(link(title, weight))
    }

    fn titles(tree: &[MenuTreeElement]) -> Vec<&str> {
        tree.iter().map(|e| e.link.title.as_str()).collect()
    }

    #[test]
    fn anonymous_sees_only_public_links() {
        let mut gated = element("Admin", 0);
        gated.link.permission = "administer site".to_string();

        let tree = vec![element("Home", 0), gated];
        let filtered = CheckAccess::anonymous().apply(tree);

        assert_eq!(titles(&filtered), vec!["Home"]);
    }

    #[test]
    fn permission_holder_sees_gated_links() {
        let mut gated = element("Admin", 0);
        gated.link.permission = "administer site".to_string();

        let tree = vec![element("Home", 0), gated];
        let viewer = Viewer::with_permissions(["administer site"]);
        let filtered = CheckAccess::new(viewer).apply(tree);

        assert_eq!(titles(&filtered), vec!["Home", "Admin"]);
    }

    #[test]
    fn hidden_link_pruned_with_subtree() {
        let mut hidden = element("Archive", 0);
        hidden.link.hidden = true;
        hidden.subtree.push(element("Old Posts", 0));

        let tree = vec![element("Home", 0), hidden];
        let filtered = CheckAccess::anonymous().apply(tree);

        assert_eq!(titles(&filtered), vec!["Home"]);
    }

    #[test]
    fn nested_gated_link_pruned() {
        let mut parent = element("Products", 0);
        let mut gated = element("Pricing", 0);
        gated.link.permission = "view pricing".to_string();
        parent.subtree.push(element("Widgets", 0));
        parent.subtree.push(gated);

        let filtered = CheckAccess::anonymous().apply(vec![parent]);

        assert_eq!(titles(&filtered[0].subtree), vec!["Widgets"]);
    }

    #[test]
    fn sorts_by_weight_then_title() {
        let tree = vec![
            element("Zebra", 1),
            element("Apple", 1),
            element("Last", 5),
            element("First", -2),
        ];
        let sorted = SortByWeight.apply(tree);

        assert_eq!(titles(&sorted), vec!["First", "Apple", "Zebra", "Last"]);
    }

    #[test]
    fn sort_recurses_into_subtrees() {
        let mut parent = element("Products", 0);
        parent.subtree.push(element("Gadgets", 1));
        parent.subtree.push(element("Widgets", 0));

        let sorted = SortByWeight.apply(vec![parent]);

        assert_eq!(titles(&sorted[0].subtree), vec!["Widgets", "Gadgets"]);
    }
}
