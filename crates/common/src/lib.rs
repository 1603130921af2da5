pub mod api;
pub mod config;
pub mod error;
pub mod ids;
pub mod types;

pub use error::{LexRiskError, Result};
pub use ids::*;
