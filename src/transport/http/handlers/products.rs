use crate::domain::model::{validate_product, Product, ProductDraft, ProductPatch};
use crate::domain::validator::Validator;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{created, ensure_valid, parse_list_request, read_id};
use crate::transport::http::types::{
    AppState, MessageEnvelope, ProductEnvelope, ProductList,
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use std::collections::HashMap;

#[utoipa::path(
    post,
    path = "/v1/products",
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Product created", body = ProductEnvelope),
        (status = 400, description = "Malformed JSON body", body = ErrorEnvelope),
        (status = 422, description = "Field validation failed", body = ErrorEnvelope)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = body?;

    let mut v = Validator::new();
    validate_product(&mut v, &draft);
    ensure_valid(v)?;

    let product = state.db.insert_product(&draft).await?;
    Ok(created(
        format!("/v1/products/{}", product.product_id),
        Json(ProductEnvelope { product }),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/products/{product_id}",
    params(("product_id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ProductEnvelope),
        (status = 404, description = "No such product", body = ErrorEnvelope)
    )
)]
pub async fn show_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let id = read_id(id)?;
    let product = state.db.get_product(id).await?;
    Ok(Json(ProductEnvelope { product }))
}

#[utoipa::path(
    patch,
    path = "/v1/products/{product_id}",
    params(("product_id" = i64, Path, description = "Product id")),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Product updated", body = ProductEnvelope),
        (status = 400, description = "Malformed JSON body", body = ErrorEnvelope),
        (status = 404, description = "No such product", body = ErrorEnvelope),
        (status = 422, description = "Field validation failed", body = ErrorEnvelope)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let id = read_id(id)?;
    let current = state.db.get_product(id).await?;
    let Json(patch) = body?;

    let draft = current.draft().apply(patch);
    let mut v = Validator::new();
    validate_product(&mut v, &draft);
    ensure_valid(v)?;

    let product = state.db.update_product(id, &draft).await?;
    Ok(Json(ProductEnvelope { product }))
}

#[utoipa::path(
    delete,
    path = "/v1/products/{product_id}",
    params(("product_id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product and its reviews deleted", body = MessageEnvelope),
        (status = 404, description = "No such product", body = ErrorEnvelope)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let id = read_id(id)?;
    state.db.delete_product(id).await?;
    Ok(Json(MessageEnvelope::deleted("product")))
}

#[utoipa::path(
    get,
    path = "/v1/products",
    params(
        ("name" = Option<String>, Query, description = "Full-text search over the name"),
        ("category" = Option<String>, Query, description = "Full-text search over the category"),
        ("page" = Option<u32>, Query, description = "1-based page number, default 1"),
        ("page_size" = Option<u32>, Query, description = "Records per page, default 10, max 100"),
        ("sort" = Option<String>, Query, description = "product_id or name; prefix with - for descending")
    ),
    responses(
        (status = 200, description = "One page of products", body = ProductList),
        (status = 422, description = "Invalid pagination or sort", body = ErrorEnvelope)
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ProductList>, ApiError> {
    let request = parse_list_request::<Product>(&params)?;
    let (products, metadata) = state
        .db
        .list::<Product>(&request.filters, &request.search, None)
        .await?;
    Ok(Json(ProductList { products, metadata }))
}
