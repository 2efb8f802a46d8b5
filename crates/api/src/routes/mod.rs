pub mod health;
pub mod project;
pub mod template;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                      list, create
/// /projects/{id}                 get, update, delete
///
/// /templates                     list (?status=&no_body=), create
/// /templates/{id}                get (?no_body=), update, delete
/// /templates/{id}/default        set default (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/templates", template::router())
}
