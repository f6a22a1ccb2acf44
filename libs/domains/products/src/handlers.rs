//! HTTP handlers for Products API

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProductRequest, ListProductsQuery, MessageResponse, Product, ProductCreatedResponse,
    ProductListResponse,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(create_product, get_all_products),
    components(schemas(
        Product,
        CreateProductRequest,
        MessageResponse,
        ProductCreatedResponse,
        ProductListResponse
    )),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router
///
/// Paths are relative to wherever the caller nests the router.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", post(create_product::<R>))
        .route("/products/all", get(get_all_products::<R>))
        .with_state(shared_service)
}

/// Create a product
///
/// A body that cannot be read as JSON is handled like an empty object.
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductCreatedResponse),
        (status = 400, description = "Name or price missing", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ProductResult<impl IntoResponse> {
    let input = match body {
        Ok(Json(value)) => CreateProductRequest::from(value),
        Err(rejection) => {
            tracing::debug!(%rejection, "Unreadable product body");
            CreateProductRequest::default()
        }
    };

    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(ProductCreatedResponse::new(product))))
}

/// List products
///
/// A query string that cannot be read fails like a storage error.
#[utoipa::path(
    get,
    path = "/products/all",
    tag = "Products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Products fetched", body = ProductListResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
async fn get_all_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> ProductResult<Json<ProductListResponse>> {
    let Query(query) = query.map_err(|rejection| ProductError::Database(rejection.body_text()))?;

    let products = service.get_all_products(query.limit).await?;
    Ok(Json(ProductListResponse::new(products)))
}
