pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

pub use app::{build_router, AppState};
