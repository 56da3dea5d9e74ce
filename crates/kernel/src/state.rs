//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::menu::{MenuLinkTree, SeededMenuTree};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Menu tree service the resource handlers consult.
    menu_tree: Arc<dyn MenuLinkTree>,
}

impl AppState {
    /// Initialize state from configuration, seeding the menu service from
    /// the configured JSON file.
    ///
    /// A missing or unreadable seed file leaves the service empty; every
    /// menu then resolves to 404.
    pub fn new(config: &Config) -> Result<Self> {
        let service = match std::fs::read_to_string(&config.menus_file) {
            Ok(json) => SeededMenuTree::from_json(&json)
                .with_context(|| format!("invalid menu seed {}", config.menus_file.display()))?,
            Err(e) => {
                warn!(
                    file = %config.menus_file.display(),
                    error = %e,
                    "menu seed file not readable, starting with no menus"
                );
                SeededMenuTree::new(Vec::new())
            }
        };

        info!(links = service.link_count(), "menu links loaded");

        Ok(Self::with_service(Arc::new(service)))
    }

    /// Build state around an existing menu tree service.
    pub fn with_service(menu_tree: Arc<dyn MenuLinkTree>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { menu_tree }),
        }
    }

    /// Menu tree service.
    pub fn menu_tree(&self) -> &Arc<dyn MenuLinkTree> {
        &self.inner.menu_tree
    }
}
