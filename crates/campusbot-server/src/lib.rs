//! Campusbot HTTP API
//!
//! Axum server exposing the chat turn, the embedding and generation
//! collaborators, text ingestion and domain table population.

mod handlers;
mod routes;
mod server;
mod types;

pub use handlers::AppState;
pub use routes::{create_app, create_router};
pub use server::{start_server, HttpServer};
pub use types::*;
