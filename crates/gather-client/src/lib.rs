//! # Gather Client
//!
//! HTTP client, REST API surface, session context, and page controllers
//! for the Gather events/groups platform.

pub mod api;
pub mod controllers;
pub mod error;
pub mod http;
pub mod session;

pub use error::ClientError;
pub use http::ApiClient;
pub use session::{SessionContext, TokenStatus};
