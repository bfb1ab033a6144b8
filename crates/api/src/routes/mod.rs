pub mod auth;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                       register (public)
/// /auth/login                                          login (public)
/// /auth/me                                             current user
///
/// /projects                                            list, create
/// /projects/{id}                                       get
/// /projects/{id}/collaborators                         list, add (owner)
/// /projects/{id}/activity                              activity feed
/// /projects/{id}/chapters                              list, create
/// /projects/{id}/chapters/{chapter_id}                 get
/// /projects/{id}/chapters/{chapter_id}/progress        get, save
/// /projects/{id}/editor-changes                        list own, submit
/// /projects/{id}/editor-changes/{change_id}/review     approve/reject (owner)
/// /projects/{id}/world?category=                       list by category, create
/// /projects/{id}/world/{element_id}                    get, update, delete
/// /projects/{id}/world/{element_id}/children           research content
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
}
