pub mod app;
pub mod error;
pub mod routes;
pub mod server;

pub use app::{build_router, SharedScorer};
pub use error::ApiError;
