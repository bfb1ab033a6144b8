//! Route definitions for the `/projects` resource and everything scoped to a
//! project: collaborators, chapters, reading progress, editor changes and
//! world elements.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{activity, chapter, editor_change, project, reading_progress, world};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                          -> list_projects
/// POST   /                                          -> create_project
/// GET    /{id}                                      -> get_project
/// GET    /{id}/collaborators                        -> list_collaborators
/// POST   /{id}/collaborators                        -> add_collaborator
/// GET    /{id}/activity                             -> list_activity
///
/// GET    /{id}/chapters                             -> list_chapters
/// POST   /{id}/chapters                             -> create_chapter
/// GET    /{id}/chapters/{chapter_id}                -> get_chapter
/// GET    /{id}/chapters/{chapter_id}/progress       -> get_progress
/// PUT    /{id}/chapters/{chapter_id}/progress       -> save_progress
///
/// GET    /{id}/editor-changes                       -> list_changes
/// POST   /{id}/editor-changes                       -> submit_change
/// POST   /{id}/editor-changes/{change_id}/review    -> review_change
///
/// GET    /{id}/world?category=                      -> list_elements
/// POST   /{id}/world                                -> create_element
/// GET    /{id}/world/{element_id}                   -> get_element
/// PUT    /{id}/world/{element_id}                   -> update_element
/// DELETE /{id}/world/{element_id}                   -> delete_element
/// GET    /{id}/world/{element_id}/children          -> list_children
/// ```
pub fn router() -> Router<AppState> {
    let chapter_routes = Router::new()
        .route(
            "/",
            get(chapter::list_chapters).post(chapter::create_chapter),
        )
        .route("/{chapter_id}", get(chapter::get_chapter))
        .route(
            "/{chapter_id}/progress",
            get(reading_progress::get_progress).put(reading_progress::save_progress),
        );

    let editor_change_routes = Router::new()
        .route(
            "/",
            get(editor_change::list_changes).post(editor_change::submit_change),
        )
        .route("/{change_id}/review", post(editor_change::review_change));

    let world_routes = Router::new()
        .route("/", get(world::list_elements).post(world::create_element))
        .route(
            "/{element_id}",
            get(world::get_element)
                .put(world::update_element)
                .delete(world::delete_element),
        )
        .route("/{element_id}/children", get(world::list_children));

    Router::new()
        .route(
            "/",
            get(project::list_projects).post(project::create_project),
        )
        .route("/{id}", get(project::get_project))
        .route(
            "/{id}/collaborators",
            get(project::list_collaborators).post(project::add_collaborator),
        )
        .route("/{id}/activity", get(activity::list_activity))
        .nest("/{id}/chapters", chapter_routes)
        .nest("/{id}/editor-changes", editor_change_routes)
        .nest("/{id}/world", world_routes)
}
