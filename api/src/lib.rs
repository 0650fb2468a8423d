pub mod auth;
pub mod config;
pub mod db;
pub mod draft;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod rest;
pub mod services;
pub mod state;

pub use state::AppState;
