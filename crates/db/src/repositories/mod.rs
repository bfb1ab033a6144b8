//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod chapter_repo;
pub mod collaborator_repo;
pub mod editor_change_repo;
pub mod project_repo;
pub mod reading_progress_repo;
pub mod user_repo;
pub mod world_element_repo;

pub use activity_repo::ActivityRepo;
pub use chapter_repo::ChapterRepo;
pub use collaborator_repo::CollaboratorRepo;
pub use editor_change_repo::EditorChangeRepo;
pub use project_repo::ProjectRepo;
pub use reading_progress_repo::ReadingProgressRepo;
pub use user_repo::UserRepo;
pub use world_element_repo::WorldElementRepo;
