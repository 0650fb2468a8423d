pub mod auth;
pub mod comment;
pub mod file;
pub mod pin;
pub mod user;
