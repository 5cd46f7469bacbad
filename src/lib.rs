pub mod app;
pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod middleware;
pub mod session;
pub mod state;
pub mod users;
