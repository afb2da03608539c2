//! Core: configuration, shared state, server lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{router, Server};
pub use state::ServerState;
