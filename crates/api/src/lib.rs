//! HTTP API layer for the newswire engine.

pub mod export;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
