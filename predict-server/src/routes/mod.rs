pub mod health;
pub mod predict;

pub use health::{status, StatusResponse, SERVICE_STATUS};
pub use predict::predict;
