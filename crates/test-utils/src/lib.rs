//! Segnavia test utilities.
//!
//! Helpers for integration testing: menu link fixture builders producing
//! the JSON records the seeded menu service ingests.

use serde_json::{Value as JsonValue, json};
use uuid::Uuid;

/// Create a test link with default values: routed internal URL, weight 0,
/// visible, public.
pub fn test_link(menu: &str, title: &str, path: &str) -> TestLink {
    TestLink {
        id: Uuid::now_v7(),
        menu_name: menu.to_string(),
        title: title.to_string(),
        url: json!({
            "type": "routed",
            "uri": format!("internal:{path}"),
            "path": path,
        }),
        parent_id: None,
        weight: 0,
        hidden: false,
        permission: String::new(),
        plugin: "test".to_string(),
    }
}

/// A test menu link builder for creating fixtures.
#[derive(Debug, Clone)]
pub struct TestLink {
    pub id: Uuid,
    pub menu_name: String,
    pub title: String,
    pub url: JsonValue,
    pub parent_id: Option<Uuid>,
    pub weight: i32,
    pub hidden: bool,
    pub permission: String,
    pub plugin: String,
}

impl TestLink {
    /// Set a custom ID.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Nest under a parent link.
    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the sort weight.
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    /// Hide from rendering.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Guard behind a permission.
    pub fn with_permission(mut self, permission: &str) -> Self {
        self.permission = permission.to_string();
        self
    }

    /// Point at an external absolute URI.
    pub fn external(mut self, uri: &str) -> Self {
        self.url = json!({"type": "external", "uri": uri});
        self
    }

    /// Point at an internal URI the router cannot resolve.
    pub fn unrouted(mut self, uri: &str) -> Self {
        self.url = json!({"type": "unrouted", "uri": uri});
        self
    }

    /// The JSON record the menu service ingests.
    pub fn to_value(&self) -> JsonValue {
        json!({
            "id": self.id,
            "menu_name": self.menu_name,
            "title": self.title,
            "url": self.url,
            "parent_id": self.parent_id,
            "weight": self.weight,
            "hidden": self.hidden,
            "permission": self.permission,
            "plugin": self.plugin,
        })
    }
}

/// Serialize a set of links into a menu seed document.
pub fn seed(links: &[TestLink]) -> String {
    JsonValue::Array(links.iter().map(TestLink::to_value).collect()).to_string()
}
