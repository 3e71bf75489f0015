pub mod types;
pub mod error;
pub mod validation;
pub mod config;

pub use types::{SensorReading, RiskAssessment, RiskLevel};
pub use error::{FieldError, ValidationError};
