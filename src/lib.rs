pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;
pub mod testing;
pub mod types;
pub mod unflatten;

pub use server::{app, AppState};
