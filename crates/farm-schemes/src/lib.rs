pub mod config;
pub mod error;
pub mod schemes;
pub mod telemetry;
