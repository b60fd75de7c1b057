pub mod auth;
pub mod autosave;
pub mod canvas_store;
