pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod telemetry;
pub mod workflows;
