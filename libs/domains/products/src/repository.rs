use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{Limit, NewProduct, Product};

/// Storage collaborator for products
///
/// Handlers receive an implementation at construction time; tests swap in
/// doubles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist `input` and return the stored record with its assigned id
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Fetch products in storage order, bounded by `limit` as storage interprets it
    async fn list(&self, limit: Limit) -> ProductResult<Vec<Product>>;
}
