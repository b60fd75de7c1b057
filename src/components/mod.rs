pub mod auth_callback;
pub mod canvas;
pub mod dashboard;
pub mod landing;
pub mod login;
