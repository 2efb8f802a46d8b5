//! Route definitions for the `/templates` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::template;
use crate::state::AppState;

/// Routes mounted at `/templates`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update (reconciles attributes)
/// DELETE /{id}          -> delete
/// PUT    /{id}/default  -> set_default
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(template::list).post(template::create))
        .route(
            "/{id}",
            get(template::get_by_id)
                .put(template::update)
                .delete(template::delete),
        )
        .route("/{id}/default", put(template::set_default))
}
