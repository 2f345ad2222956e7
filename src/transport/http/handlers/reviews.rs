use crate::app::database_service::Scope;
use crate::domain::model::{validate_review, Review, ReviewDraft, ReviewPatch};
use crate::domain::validator::Validator;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{
    created, ensure_valid, parse_list_request, read_id, read_id_pair,
};
use crate::transport::http::types::{
    AppState, MessageEnvelope, ReviewEnvelope, ReviewList,
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use std::collections::HashMap;

#[utoipa::path(
    post,
    path = "/v1/products/{product_id}/reviews",
    params(("product_id" = i64, Path, description = "Reviewed product")),
    request_body = ReviewDraft,
    responses(
        (status = 201, description = "Review created", body = ReviewEnvelope),
        (status = 400, description = "Malformed JSON body", body = ErrorEnvelope),
        (status = 404, description = "No such product", body = ErrorEnvelope),
        (status = 422, description = "Field validation failed", body = ErrorEnvelope)
    )
)]
pub async fn create_review_handler(
    State(state): State<AppState>,
    product_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ReviewDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let product_id = read_id(product_id)?;
    let Json(draft) = body?;

    let mut v = Validator::new();
    validate_review(&mut v, &draft);
    ensure_valid(v)?;

    let review = state.db.insert_review(product_id, &draft).await?;
    Ok(created(
        format!("/v1/products/{}/reviews/{}", product_id, review.review_id),
        Json(ReviewEnvelope { review }),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/products/{product_id}/reviews/{review_id}",
    params(
        ("product_id" = i64, Path, description = "Reviewed product"),
        ("review_id" = i64, Path, description = "Review id")
    ),
    responses(
        (status = 200, description = "The review", body = ReviewEnvelope),
        (status = 404, description = "No such review for this product", body = ErrorEnvelope)
    )
)]
pub async fn show_review_handler(
    State(state): State<AppState>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<ReviewEnvelope>, ApiError> {
    let (product_id, review_id) = read_id_pair(ids)?;
    let review = state.db.get_review(product_id, review_id).await?;
    Ok(Json(ReviewEnvelope { review }))
}

#[utoipa::path(
    patch,
    path = "/v1/products/{product_id}/reviews/{review_id}",
    params(
        ("product_id" = i64, Path, description = "Reviewed product"),
        ("review_id" = i64, Path, description = "Review id")
    ),
    request_body = ReviewPatch,
    responses(
        (status = 200, description = "Review updated", body = ReviewEnvelope),
        (status = 400, description = "Malformed JSON body", body = ErrorEnvelope),
        (status = 404, description = "No such review for this product", body = ErrorEnvelope),
        (status = 422, description = "Field validation failed", body = ErrorEnvelope)
    )
)]
pub async fn update_review_handler(
    State(state): State<AppState>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
    body: Result<Json<ReviewPatch>, JsonRejection>,
) -> Result<Json<ReviewEnvelope>, ApiError> {
    let (product_id, review_id) = read_id_pair(ids)?;
    let current = state.db.get_review(product_id, review_id).await?;
    let Json(patch) = body?;

    let draft = current.draft().apply(patch);
    let mut v = Validator::new();
    validate_review(&mut v, &draft);
    ensure_valid(v)?;

    let review = state.db.update_review(product_id, review_id, &draft).await?;
    Ok(Json(ReviewEnvelope { review }))
}

#[utoipa::path(
    delete,
    path = "/v1/products/{product_id}/reviews/{review_id}",
    params(
        ("product_id" = i64, Path, description = "Reviewed product"),
        ("review_id" = i64, Path, description = "Review id")
    ),
    responses(
        (status = 200, description = "Review deleted", body = MessageEnvelope),
        (status = 404, description = "No such review for this product", body = ErrorEnvelope)
    )
)]
pub async fn delete_review_handler(
    State(state): State<AppState>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let (product_id, review_id) = read_id_pair(ids)?;
    state.db.delete_review(product_id, review_id).await?;
    Ok(Json(MessageEnvelope::deleted("review")))
}

#[utoipa::path(
    get,
    path = "/v1/products/{product_id}/reviews",
    params(
        ("product_id" = i64, Path, description = "Reviewed product"),
        ("author" = Option<String>, Query, description = "Full-text search over the author"),
        ("comment" = Option<String>, Query, description = "Full-text search over the comment"),
        ("page" = Option<u32>, Query, description = "1-based page number, default 1"),
        ("page_size" = Option<u32>, Query, description = "Records per page, default 10, max 100"),
        ("sort" = Option<String>, Query, description = "review_id, rating, helpful_count, created_at; prefix with - for descending")
    ),
    responses(
        (status = 200, description = "One page of the product's reviews", body = ReviewList),
        (status = 404, description = "No such product", body = ErrorEnvelope),
        (status = 422, description = "Invalid pagination or sort", body = ErrorEnvelope)
    )
)]
pub async fn list_product_reviews_handler(
    State(state): State<AppState>,
    product_id: Result<Path<i64>, PathRejection>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ReviewList>, ApiError> {
    let product_id = read_id(product_id)?;
    let request = parse_list_request::<Review>(&params)?;
    state.db.get_product(product_id).await?;

    let scope = Scope {
        column: "product_id",
        value: product_id,
    };
    let (reviews, metadata) = state
        .db
        .list::<Review>(&request.filters, &request.search, Some(scope))
        .await?;
    Ok(Json(ReviewList { reviews, metadata }))
}

#[utoipa::path(
    get,
    path = "/v1/reviews",
    params(
        ("author" = Option<String>, Query, description = "Full-text search over the author"),
        ("comment" = Option<String>, Query, description = "Full-text search over the comment"),
        ("page" = Option<u32>, Query, description = "1-based page number, default 1"),
        ("page_size" = Option<u32>, Query, description = "Records per page, default 10, max 100"),
        ("sort" = Option<String>, Query, description = "review_id, rating, helpful_count, created_at; prefix with - for descending")
    ),
    responses(
        (status = 200, description = "One page of reviews across all products", body = ReviewList),
        (status = 422, description = "Invalid pagination or sort", body = ErrorEnvelope)
    )
)]
pub async fn list_reviews_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ReviewList>, ApiError> {
    let request = parse_list_request::<Review>(&params)?;
    let (reviews, metadata) = state
        .db
        .list::<Review>(&request.filters, &request.search, None)
        .await?;
    Ok(Json(ReviewList { reviews, metadata }))
}
