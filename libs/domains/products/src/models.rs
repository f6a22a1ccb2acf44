use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use utoipa::{IntoParams, ToSchema};

/// Limit applied when the caller does not supply one
pub const DEFAULT_LIMIT: &str = "10";

pub const MSG_MISSING_DATA: &str = "Missing Data";
pub const MSG_PRODUCT_CREATED: &str = "Product Created";
pub const MSG_PRODUCTS_FETCHED: &str = "Products fetched";
pub const MSG_SERVER_ERROR: &str = "Server Error";

/// Product record as returned by storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Identifier assigned by storage
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Numeric price, serialized in the representation storage returned
    #[schema(value_type = f64)]
    pub price: Number,
}

/// Exactly the fields forwarded to storage on creation
///
/// Values are passed through untyped; storage decides how to cast them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: Value,
    pub price: Value,
}

/// Body of `POST /products`
///
/// Fields stay untyped so that validation can apply the same truthiness
/// rules regardless of what the client sent.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Item")]
    pub name: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 50)]
    pub price: Option<Value>,
}

impl CreateProductRequest {
    /// Returns `None` unless both `name` and `price` are truthy.
    ///
    /// A `price` of `0` counts as missing.
    pub fn into_new_product(self) -> Option<NewProduct> {
        match (self.name, self.price) {
            (Some(name), Some(price)) if is_truthy(&name) && is_truthy(&price) => {
                Some(NewProduct { name, price })
            }
            _ => None,
        }
    }
}

/// Non-object bodies carry no fields.
impl From<Value> for CreateProductRequest {
    fn from(body: Value) -> Self {
        match body {
            Value::Object(mut fields) => Self {
                name: fields.remove("name"),
                price: fields.remove("price"),
            },
            _ => Self::default(),
        }
    }
}

/// Falsy: `null`, `false`, zero, and the empty string
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Untyped result-count limit, forwarded to storage as supplied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Limit {
    Number(Number),
    Text(String),
}

impl Limit {
    /// An empty query value carries no limit
    pub fn is_blank(&self) -> bool {
        matches!(self, Limit::Text(s) if s.is_empty())
    }
}

impl Default for Limit {
    fn default() -> Self {
        Limit::Text(DEFAULT_LIMIT.to_string())
    }
}

impl From<&str> for Limit {
    fn from(value: &str) -> Self {
        Limit::Text(value.to_string())
    }
}

impl From<i64> for Limit {
    fn from(value: i64) -> Self {
        Limit::Number(value.into())
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Number(n) => write!(f, "{}", n),
            Limit::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// Query parameters of `GET /products/all`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    /// Maximum number of products to return (defaults to 10)
    #[param(value_type = Option<String>)]
    pub limit: Option<Limit>,
}

/// `{ "msg": ... }` envelope used for every error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductCreatedResponse {
    pub msg: String,
    pub data: Product,
}

impl ProductCreatedResponse {
    pub fn new(product: Product) -> Self {
        Self {
            msg: MSG_PRODUCT_CREATED.to_string(),
            data: product,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub msg: String,
    pub data: Vec<Product>,
}

impl ProductListResponse {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            msg: MSG_PRODUCTS_FETCHED.to_string(),
            data: products,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness_matches_loose_falsy_rules() {
        for falsy in [json!(null), json!(false), json!(0), json!(-0.0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-3), json!(0.5), json!("0"), json!(" "), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_request_from_object_body() {
        let request = CreateProductRequest::from(json!({ "name": "Item", "price": 50, "stock": 3 }));
        assert_eq!(request.name, Some(json!("Item")));
        assert_eq!(request.price, Some(json!(50)));
    }

    #[test]
    fn test_request_from_non_object_body_is_empty() {
        let request = CreateProductRequest::from(json!(["Item", 50]));
        assert!(request.name.is_none());
        assert!(request.price.is_none());
        assert!(request.into_new_product().is_none());
    }

    #[test]
    fn test_into_new_product_keeps_only_name_and_price() {
        let request = CreateProductRequest::from(json!({ "name": "Item", "price": "50", "extra": true }));
        let new_product = request.into_new_product().unwrap();
        assert_eq!(
            serde_json::to_value(&new_product).unwrap(),
            json!({ "name": "Item", "price": "50" })
        );
    }

    #[test]
    fn test_zero_price_is_treated_as_missing() {
        let request = CreateProductRequest::from(json!({ "name": "Freebie", "price": 0 }));
        assert!(request.into_new_product().is_none());
    }

    #[test]
    fn test_limit_defaults_to_text_ten() {
        assert_eq!(Limit::default(), Limit::Text("10".to_string()));
    }

    #[test]
    fn test_only_empty_text_limit_is_blank() {
        assert!(Limit::from("").is_blank());
        assert!(!Limit::from(" ").is_blank());
        assert!(!Limit::from("0").is_blank());
        assert!(!Limit::from(0).is_blank());
    }

    #[test]
    fn test_limit_deserializes_without_coercion() {
        assert_eq!(serde_json::from_value::<Limit>(json!(5)).unwrap(), Limit::from(5));
        assert_eq!(serde_json::from_value::<Limit>(json!("5")).unwrap(), Limit::from("5"));
    }

    #[test]
    fn test_product_serializes_storage_id_as_underscore_id() {
        let product = Product {
            id: "1".to_string(),
            name: "Item".to_string(),
            price: 50.into(),
        };
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({ "_id": "1", "name": "Item", "price": 50 })
        );
    }
}
