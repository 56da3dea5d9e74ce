//! Menu link definitions.
//!
//! Flat navigational link records organized into named menus (e.g., "main",
//! "footer"). Hierarchy is expressed through `parent_id` and assembled into
//! a tree by the menu service.

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// A single navigational link within a named menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuLink {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    /// Menu machine name (e.g., "main", "footer").
    pub menu_name: String,

    /// Display title.
    pub title: String,

    /// Link destination.
    pub url: MenuUrl,

    /// Optional parent link for hierarchy.
    #[serde(default)]
    pub parent_id: Option<Uuid>,

    /// Sort weight (lower = higher priority).
    #[serde(default)]
    pub weight: i32,

    /// Whether the link is hidden from rendering.
    #[serde(default)]
    pub hidden: bool,

    /// Permission required to see the link (empty = public).
    #[serde(default)]
    pub permission: String,

    /// Plugin that owns this link.
    #[serde(default)]
    pub plugin: String,
}

/// Link destination, polymorphic over where the URL points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuUrl {
    /// Absolute URI pointing outside the site.
    External { uri: String },

    /// Internal destination registered with the site router. `uri` is the
    /// literal form, `path` the resolved internal path.
    Routed { uri: String, path: String },

    /// Internal destination the router cannot resolve (placeholders,
    /// fragment-only links).
    Unrouted { uri: String },
}

impl MenuUrl {
    /// Create an external URL reference.
    pub fn external(uri: impl Into<String>) -> Self {
        Self::External { uri: uri.into() }
    }

    /// Create a routed internal URL reference.
    pub fn routed(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::Routed {
            uri: format!("internal:{path}"),
            path,
        }
    }

    /// Create an unrouted internal URL reference.
    pub fn unrouted(uri: impl Into<String>) -> Self {
        Self::Unrouted { uri: uri.into() }
    }

    /// The literal URI form of the reference.
    pub fn uri(&self) -> &str {
        match self {
            Self::External { uri } | Self::Routed { uri, .. } | Self::Unrouted { uri } => uri,
        }
    }

    /// Whether the reference points outside the site.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External { .. })
    }

    /// Whether the reference resolves through the site router.
    pub fn is_routed(&self) -> bool {
        matches!(self, Self::Routed { .. })
    }

    /// Resolve the reference to the single string rendered for consumers.
    ///
    /// External and unrouted references keep their literal URI verbatim;
    /// routed references yield the internal path. A routed reference with an
    /// empty path falls back to the literal URI instead of failing the
    /// request.
    pub fn resolve(&self) -> &str {
        match self {
            Self::External { uri } | Self::Unrouted { uri } => uri,
            Self::Routed { uri, path } => {
                if path.is_empty() {
                    warn!(uri = %uri, "routed menu link has no internal path, using literal uri");
                    uri
                } else {
                    path
                }
            }
        }
    }
}
