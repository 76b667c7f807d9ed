use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::{dto::MessageResponse, extractors::AuthUser};
use crate::errors::ApiError;
use crate::products::{
    dto::{CreateProductRequest, ProductResponse, UpdateProductRequest},
    repo::Product,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = Product::list_by_owner(&state.db, user_id).await?;
    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = Product::find_owned(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("product"))?;
    Ok(Json(product.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let (name, price) = payload.into_fields()?;

    let product = Product::insert(&state.db, user_id, &name, price).await?;

    info!(product_id = %product.id, %user_id, "product created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "product created".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    // Read-modify-write: absent patch fields are filled from the stored row,
    // then the full row is written back. Two autocommitted statements, so a
    // concurrent update landing in between is overwritten (last write wins).
    let current = Product::find_owned(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("product"))?;

    let (name, price) = payload.resolve(&current);
    Product::update_owned(&state.db, user_id, id, &name, price).await?;

    info!(product_id = %id, %user_id, "product updated");
    Ok(Json(MessageResponse {
        message: "product updated".into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let deleted = Product::delete_owned(&state.db, user_id, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("product"));
    }

    info!(product_id = %id, %user_id, "product deleted");
    // The published API answers 201 on delete, not 200.
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "product deleted".into(),
        }),
    ))
}
