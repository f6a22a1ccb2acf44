use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::{MessageResponse, MSG_MISSING_DATA, MSG_SERVER_ERROR};

#[derive(Debug, Error)]
pub enum ProductError {
    /// `name` or `price` absent or falsy
    #[error("Missing Data")]
    MissingData,

    /// Any failure reported by storage, including schema cast failures
    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProductError::MissingData => StatusCode::BAD_REQUEST,
            ProductError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message; never carries storage details
    pub fn public_message(&self) -> &'static str {
        match self {
            ProductError::MissingData => MSG_MISSING_DATA,
            ProductError::Database(_) => MSG_SERVER_ERROR,
        }
    }
}

/// Storage failures are logged here, at the handler boundary.
impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match &self {
            ProductError::MissingData => {
                tracing::debug!("Rejected product without name or price");
            }
            ProductError::Database(details) => {
                tracing::error!(error = %details, "Product storage operation failed");
            }
        }

        let body = Json(MessageResponse::new(self.public_message()));
        (self.status_code(), body).into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_maps_to_bad_request() {
        let err = ProductError::MissingData;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Missing Data");
    }

    #[test]
    fn test_database_error_hides_details() {
        let err = ProductError::Database("connection refused on 10.0.0.4".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Server Error");
    }
}
