//! Products API routes

use axum::Router;
use domain_products::{handlers, MongoProductRepository, ProductRepository, ProductService};

use crate::state::AppState;

/// `POST /products` and `GET /products/all` backed by the shared database
pub fn router(state: &AppState) -> Router {
    with_repository(MongoProductRepository::new(&state.db))
}

pub fn with_repository<R: ProductRepository + 'static>(repository: R) -> Router {
    handlers::router(ProductService::new(repository))
}
