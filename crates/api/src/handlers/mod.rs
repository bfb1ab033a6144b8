pub mod activity;
pub mod auth;
pub mod chapter;
pub mod editor_change;
pub mod project;
pub mod reading_progress;
pub mod world;
