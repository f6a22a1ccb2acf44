//! MongoDB implementation of ProductRepository
//!
//! Incoming values are cast to the stored schema (`name: string`,
//! `price: number`) before insertion. Values that cannot be cast are
//! reported as storage errors.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson},
    options::FindOptions,
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Limit, NewProduct, Product};
use crate::repository::ProductRepository;

const COLLECTION_NAME: &str = "products";

/// Stored shape of a product
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    price: Bson,
}

impl ProductDocument {
    fn into_product(self) -> ProductResult<Product> {
        Ok(Product {
            id: self.id.to_hex(),
            name: self.name,
            price: bson_to_number(&self.price)?,
        })
    }
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    /// Use a custom collection name, mostly for isolated tests
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input))]
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let document = ProductDocument {
            id: ObjectId::new(),
            name: cast_name(&input.name)?,
            price: cast_price(&input.price)?,
        };

        self.collection.insert_one(&document).await?;

        tracing::info!(product_id = %document.id, "Product created");
        document.into_product()
    }

    #[instrument(skip(self, limit), fields(limit = %limit))]
    async fn list(&self, limit: Limit) -> ProductResult<Vec<Product>> {
        let options = FindOptions::builder().limit(cast_limit(&limit)?).build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        documents
            .into_iter()
            .map(ProductDocument::into_product)
            .collect()
    }
}

fn cast_error(value: &Value, kind: &str, path: &str) -> ProductError {
    ProductError::Database(format!(
        "Cast to {kind} failed for value {value} at path \"{path}\""
    ))
}

/// Strings are kept, numbers and booleans are stringified.
fn cast_name(value: &Value) -> ProductResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(cast_error(value, "string", "name")),
    }
}

/// Integral prices are stored as Int64, everything else as Double.
fn cast_price(value: &Value) -> ProductResult<Bson> {
    match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(Bson::Int64(i)),
            (None, Some(f)) => Ok(Bson::Double(f)),
            _ => Err(cast_error(value, "number", "price")),
        },
        Value::String(s) => parse_number(s)
            .map(|(int, float)| int.map(Bson::Int64).unwrap_or(Bson::Double(float)))
            .ok_or_else(|| cast_error(value, "number", "price")),
        Value::Bool(b) => Ok(Bson::Int64(i64::from(*b))),
        _ => Err(cast_error(value, "number", "price")),
    }
}

/// `0` means no limit; negative values are handed to the server unchanged.
fn cast_limit(limit: &Limit) -> ProductResult<i64> {
    match limit {
        Limit::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| ProductError::Database(format!("Invalid limit: {n}"))),
        Limit::Text(s) => parse_number(s)
            .map(|(int, float)| int.unwrap_or(float.trunc() as i64))
            .ok_or_else(|| ProductError::Database(format!("Invalid limit: {s:?}"))),
    }
}

/// Parse numeric text. Blank text reads as zero.
fn parse_number(text: &str) -> Option<(Option<i64>, f64)> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some((Some(0), 0.0));
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some((Some(int), int as f64));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| (None, f))
}

fn bson_to_number(value: &Bson) -> ProductResult<Number> {
    match value {
        Bson::Int32(i) => Ok(Number::from(*i)),
        Bson::Int64(i) => Ok(Number::from(*i)),
        Bson::Double(f) => Number::from_f64(*f)
            .ok_or_else(|| ProductError::Database(format!("Stored price is not finite: {f}"))),
        other => Err(ProductError::Database(format!(
            "Stored price is not a number: {other}"
        ))),
    }
}
