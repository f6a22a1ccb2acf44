//! Product Service - validation and delegation to storage

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProductRequest, Limit, Product};
use crate::repository::ProductRepository;

/// Stateless product operations over an injected repository
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate and persist a product.
    ///
    /// Storage is not touched when validation fails.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProductRequest) -> ProductResult<Product> {
        let new_product = input.into_new_product().ok_or(ProductError::MissingData)?;
        self.repository.create(new_product).await
    }

    /// List products, defaulting the limit to `"10"` when none or an empty one was supplied
    #[instrument(skip(self))]
    pub async fn get_all_products(&self, limit: Option<Limit>) -> ProductResult<Vec<Product>> {
        let limit = limit.filter(|l| !l.is_blank()).unwrap_or_default();
        self.repository.list(limit).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewProduct;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;
    use serde_json::json;

    fn request(body: serde_json::Value) -> CreateProductRequest {
        CreateProductRequest::from(body)
    }

    fn item() -> Product {
        Product {
            id: "1".to_string(),
            name: "Item".to_string(),
            price: 50.into(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_missing_name_without_touching_storage() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .create_product(request(json!({ "price": 100 })))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::MissingData));
    }

    #[tokio::test]
    async fn test_create_rejects_missing_price_without_touching_storage() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .create_product(request(json!({ "name": "Item" })))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::MissingData));
    }

    #[tokio::test]
    async fn test_create_rejects_falsy_values() {
        for body in [
            json!({ "name": "", "price": 5 }),
            json!({ "name": "Item", "price": 0 }),
            json!({ "name": null, "price": 5 }),
            json!({ "name": "Item", "price": false }),
        ] {
            let mut mock_repo = MockProductRepository::new();
            mock_repo.expect_create().never();

            let service = ProductService::new(mock_repo);
            let result = service.create_product(request(body.clone())).await;
            assert!(
                matches!(result, Err(ProductError::MissingData)),
                "{body} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_create_forwards_exactly_name_and_price() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .with(eq(NewProduct {
                name: json!("Item"),
                price: json!(50),
            }))
            .times(1)
            .returning(|_| Ok(item()));

        let service = ProductService::new(mock_repo);
        let created = service
            .create_product(request(json!({ "name": "Item", "price": 50, "color": "red" })))
            .await
            .unwrap();

        assert_eq!(created, item());
    }

    #[tokio::test]
    async fn test_create_propagates_storage_failure() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(ProductError::Database("db down".to_string())));

        let service = ProductService::new(mock_repo);
        let err = service
            .create_product(request(json!({ "name": "Item", "price": 50 })))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::Database(ref msg) if msg == "db down"));
    }

    #[tokio::test]
    async fn test_list_defaults_limit_to_text_ten() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .with(eq(Limit::Text("10".to_string())))
            .times(1)
            .returning(|_| Ok(vec![item()]));

        let service = ProductService::new(mock_repo);
        let products = service.get_all_products(None).await.unwrap();

        assert_eq!(products, vec![item()]);
    }

    #[tokio::test]
    async fn test_list_empty_limit_falls_back_to_default() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .with(eq(Limit::default()))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = ProductService::new(mock_repo);
        service.get_all_products(Some(Limit::from(""))).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_passes_numeric_limit_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .with(eq(Limit::from(5)))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = ProductService::new(mock_repo);
        service.get_all_products(Some(Limit::from(5))).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_passes_zero_limit_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .with(eq(Limit::from(0)))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = ProductService::new(mock_repo);
        let products = service.get_all_products(Some(Limit::from(0))).await.unwrap();

        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_list_passes_text_limit_through_uncoerced() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .with(eq(Limit::from("7")))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = ProductService::new(mock_repo);
        service.get_all_products(Some(Limit::from("7"))).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_propagates_storage_failure() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .times(1)
            .returning(|_| Err(ProductError::Database("boom".to_string())));

        let service = ProductService::new(mock_repo);
        assert!(service.get_all_products(Some(Limit::from(3))).await.is_err());
    }
}
