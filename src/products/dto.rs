use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::products::repo::Product;

/// Request body for product creation; both fields required.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl CreateProductRequest {
    pub fn into_fields(self) -> Result<(String, f64), ApiError> {
        match (self.name, self.price) {
            (Some(name), Some(price)) if !name.trim().is_empty() => Ok((name, price)),
            _ => Err(ApiError::validation("name and price are required")),
        }
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl UpdateProductRequest {
    /// Resolve the patch against the stored row (read-modify-write).
    pub fn resolve(self, current: &Product) -> (String, f64) {
        (
            self.name.unwrap_or_else(|| current.name.clone()),
            self.price.unwrap_or(current.price),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            user_id: p.user_id,
            created_at: p.created_at,
        }
    }
}
