//! Menu tree resource.
//!
//! Exposes a named navigation menu as a nested JSON array:
//! `GET /entity/menu_tree/{menu}`.

use axum::Router;
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::get;

use crate::error::{AppError, AppResult};
use crate::menu::{CheckAccess, MenuTreeEntry, SortByWeight, TreeManipulator, export};
use crate::state::AppState;

/// Create the menu tree router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/entity/menu_tree", get(menu_name_missing))
        .route("/entity/menu_tree/", get(menu_name_missing))
        .route("/entity/menu_tree/{menu}", get(menu_tree))
}

/// `GET /entity/menu_tree/{menu}` — export the named menu.
///
/// Returns 400 when the menu name is blank, 404 when the menu resolves to
/// an empty tree for the current viewer.
async fn menu_tree(
    State(state): State<AppState>,
    Path(menu): Path<String>,
) -> AppResult<Json<Vec<MenuTreeEntry>>> {
    let menu = menu.trim();
    if menu.is_empty() {
        return Err(AppError::BadRequest(
            "menu name was not provided".to_string(),
        ));
    }

    let service = state.menu_tree();
    let parameters = service.current_route_parameters(menu);
    let tree = service.load(menu, &parameters).await?;

    // Only show links accessible to the current viewer, in weight order.
    let check_access = CheckAccess::anonymous();
    let manipulators: [&dyn TreeManipulator; 2] = [&check_access, &SortByWeight];
    let tree = service.transform(tree, &manipulators);

    let entries = export(&tree);
    if entries.is_empty() {
        return Err(AppError::NotFound(format!(
            "links for menu '{menu}' were not found"
        )));
    }

    Ok(Json(entries))
}

/// Reject requests that omit the menu name entirely.
async fn menu_name_missing() -> AppError {
    AppError::BadRequest("menu name was not provided".to_string())
}
