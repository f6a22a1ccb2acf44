//! Error responses shared by every service.
//!
//! Errors are reported as a single `{ "msg": ... }` object.

pub mod handlers;

use serde::Serialize;
use utoipa::ToSchema;

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessage {
    pub msg: &'static str,
}

pub use handlers::not_found;
