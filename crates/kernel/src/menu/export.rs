//! Menu tree exporter.
//!
//! Reshapes an assembled menu tree into the nested structure serialized for
//! consumers. The input tree is expected to be access-filtered and sorted
//! already; the exporter never drops or reorders entries.

use serde::Serialize;

use super::tree::MenuTreeElement;

/// A single exported menu entry.
#[derive(Debug, Clone, Serialize)]
pub struct MenuTreeEntry {
    /// Display name, taken from the link title.
    pub name: String,

    /// Resolved URL string: the internal path for routed links, the literal
    /// URI otherwise.
    pub url: String,

    /// Sort weight, carried through unchanged. Ordering already reflects it.
    pub weight: i32,

    /// Exported subtree; `None` for leaf entries, serialized as JSON null.
    pub sub: Option<Vec<MenuTreeEntry>>,
}

/// Export a menu tree into its serializable nested form.
///
/// Every element yields exactly one entry, in input order, at every level.
/// Traversal uses an explicit frame stack rather than recursion so that
/// arbitrarily deep trees cannot overflow the call stack.
pub fn export(tree: &[MenuTreeElement]) -> Vec<MenuTreeEntry> {
    struct Frame<'t> {
        nodes: &'t [MenuTreeElement],
        next: usize,
        out: Vec<MenuTreeEntry>,
    }

    impl<'t> Frame<'t> {
        fn new(nodes: &'t [MenuTreeElement]) -> Self {
            Self {
                nodes,
                next: 0,
                out: Vec::with_capacity(nodes.len()),
            }
        }
    }

    let mut stack = vec![Frame::new(tree)];

    while let Some(frame) = stack.last_mut() {
        if let Some(element) = frame.nodes.get(frame.next) {
            frame.next += 1;
            frame.out.push(MenuTreeEntry {
                name: element.link.title.clone(),
                url: element.link.url.resolve().to_string(),
                weight: element.link.weight,
                sub: None,
            });
            if !element.subtree.is_empty() {
                stack.push(Frame::new(&element.subtree));
            }
        } else if let Some(finished) = stack.pop() {
            match stack.last_mut() {
                // The frame was pushed right after its parent entry, so the
                // parent entry is always the last one exported at that level.
                Some(parent) => {
                    if let Some(entry) = parent.out.last_mut() {
                        entry.sub = Some(finished.out);
                    }
                }
                None => return finished.out,
            }
        }
    }

    Vec::new()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::menu::link::{MenuLink, MenuUrl};

    fn link(title: &str, weight: i32, url: MenuUrl) -> MenuLink {
        MenuLink {
            id: Uuid::now_v7(),
            menu_name: "main".to_string(),
            title: title.to_string(),
            url,
            parent_id: None,
            weight,
            hidden: false,
            permission: String::new(),
            plugin: String::new(),
        }
    }

    fn element(title: &str, weight: i32, url: MenuUrl) -> MenuTreeElement {
        MenuTreeElement::new(link(title, weight, url))
    }

    #[test]
    fn empty_tree_exports_empty() {
        assert!(export(&[]).is_empty());
    }

    #[test]
    fn single_leaf_entry() {
        let tree = vec![element("Home", 0, MenuUrl::routed("/node/1"))];
        let entries = export(&tree);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Home");
        assert_eq!(entries[0].url, "/node/1");
        assert_eq!(entries[0].weight, 0);
        assert!(entries[0].sub.is_none());
    }

    #[test]
    fn preserves_input_order_without_resorting() {
        // Weights deliberately out of order; ordering is upstream's job.
        let tree = vec![
            element("Third", 5, MenuUrl::routed("/3")),
            element("First", 0, MenuUrl::routed("/1")),
            element("Second", 3, MenuUrl::routed("/2")),
        ];
        let entries = export(&tree);

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Third", "First", "Second"]);
    }

    #[test]
    fn length_preserved_at_every_level() {
        let mut parent = element("Products", 1, MenuUrl::routed("/products"));
        parent
            .subtree
            .push(element("Widgets", 0, MenuUrl::routed("/products/widgets")));
        parent
            .subtree
            .push(element("Gadgets", 1, MenuUrl::routed("/products/gadgets")));
        let tree = vec![element("Home", 0, MenuUrl::routed("/")), parent];

        let entries = export(&tree);

        assert_eq!(entries.len(), 2);
        let sub = entries[1].sub.as_ref().unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub[0].name, "Widgets");
        assert_eq!(sub[1].name, "Gadgets");
        assert!(sub[0].sub.is_none());
    }

    #[test]
    fn external_url_passed_through_verbatim() {
        let tree = vec![element(
            "Docs",
            0,
            MenuUrl::external("https://example.com"),
        )];
        let entries = export(&tree);

        assert_eq!(entries[0].url, "https://example.com");
    }

    #[test]
    fn unrouted_url_keeps_literal_uri() {
        let tree = vec![element("Front", 0, MenuUrl::unrouted("internal:<front>"))];
        let entries = export(&tree);

        assert_eq!(entries[0].url, "internal:<front>");
    }

    #[test]
    fn malformed_routed_url_falls_back_to_uri() {
        let url = MenuUrl::Routed {
            uri: "internal:/broken".to_string(),
            path: String::new(),
        };
        let tree = vec![element("Broken", 0, url)];
        let entries = export(&tree);

        assert_eq!(entries[0].url, "internal:/broken");
    }

    #[test]
    fn deep_chain_exports_completely() {
        // A 1000-deep chain would overflow a recursive exporter.
        let mut node = element("level-0", 0, MenuUrl::routed("/0"));
        for depth in 1..1000 {
            let mut parent = element(&format!("level-{depth}"), 0, MenuUrl::routed("/d"));
            parent.subtree.push(node);
            node = parent;
        }

        let entries = export(&[node]);

        let mut depth = 0;
        let mut current = &entries;
        loop {
            assert_eq!(current.len(), 1);
            depth += 1;
            match &current[0].sub {
                Some(sub) => current = sub,
                None => break,
            }
        }
        assert_eq!(depth, 1000);
    }

    #[test]
    fn leaf_serializes_sub_as_null() {
        let tree = vec![element("Home", 0, MenuUrl::routed("/node/1"))];
        let json = serde_json::to_value(export(&tree)).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"name": "Home", "url": "/node/1", "weight": 0, "sub": null}
            ])
        );
    }
}
