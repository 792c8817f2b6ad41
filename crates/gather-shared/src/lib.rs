//! # Gather Shared
//!
//! Shared configuration, constants, and telemetry for the Gather client.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
