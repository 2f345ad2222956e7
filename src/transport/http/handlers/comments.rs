use crate::domain::model::{validate_comment, Comment, CommentDraft, CommentPatch};
use crate::domain::validator::Validator;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{created, ensure_valid, parse_list_request, read_id};
use crate::transport::http::types::{
    AppState, CommentEnvelope, CommentList, MessageEnvelope,
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use std::collections::HashMap;

#[utoipa::path(
    post,
    path = "/v1/comments",
    request_body = CommentDraft,
    responses(
        (status = 201, description = "Comment created", body = CommentEnvelope),
        (status = 400, description = "Malformed JSON body", body = ErrorEnvelope),
        (status = 422, description = "Field validation failed", body = ErrorEnvelope)
    )
)]
pub async fn create_comment_handler(
    State(state): State<AppState>,
    body: Result<Json<CommentDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = body?;

    let mut v = Validator::new();
    validate_comment(&mut v, &draft);
    ensure_valid(v)?;

    let comment = state.db.insert_comment(&draft).await?;
    Ok(created(
        format!("/v1/comments/{}", comment.id),
        Json(CommentEnvelope { comment }),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "The comment", body = CommentEnvelope),
        (status = 404, description = "No such comment", body = ErrorEnvelope)
    )
)]
pub async fn show_comment_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CommentEnvelope>, ApiError> {
    let id = read_id(id)?;
    let comment = state.db.get_comment(id).await?;
    Ok(Json(CommentEnvelope { comment }))
}

#[utoipa::path(
    patch,
    path = "/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = CommentPatch,
    responses(
        (status = 200, description = "Comment updated", body = CommentEnvelope),
        (status = 400, description = "Malformed JSON body", body = ErrorEnvelope),
        (status = 404, description = "No such comment", body = ErrorEnvelope),
        (status = 422, description = "Field validation failed", body = ErrorEnvelope)
    )
)]
pub async fn update_comment_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CommentPatch>, JsonRejection>,
) -> Result<Json<CommentEnvelope>, ApiError> {
    let id = read_id(id)?;
    let current = state.db.get_comment(id).await?;
    let Json(patch) = body?;

    let draft = current.draft().apply(patch);
    let mut v = Validator::new();
    validate_comment(&mut v, &draft);
    ensure_valid(v)?;

    let comment = state.db.update_comment(id, &draft).await?;
    Ok(Json(CommentEnvelope { comment }))
}

#[utoipa::path(
    delete,
    path = "/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment deleted", body = MessageEnvelope),
        (status = 404, description = "No such comment", body = ErrorEnvelope)
    )
)]
pub async fn delete_comment_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let id = read_id(id)?;
    state.db.delete_comment(id).await?;
    Ok(Json(MessageEnvelope::deleted("comment")))
}

#[utoipa::path(
    get,
    path = "/v1/comments",
    params(
        ("content" = Option<String>, Query, description = "Full-text search over the content"),
        ("author" = Option<String>, Query, description = "Full-text search over the author"),
        ("page" = Option<u32>, Query, description = "1-based page number, default 1"),
        ("page_size" = Option<u32>, Query, description = "Records per page, default 10, max 100"),
        ("sort" = Option<String>, Query, description = "id, author, created_at; prefix with - for descending")
    ),
    responses(
        (status = 200, description = "One page of comments", body = CommentList),
        (status = 422, description = "Invalid pagination or sort", body = ErrorEnvelope)
    )
)]
pub async fn list_comments_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<CommentList>, ApiError> {
    let request = parse_list_request::<Comment>(&params)?;
    let (comments, metadata) = state
        .db
        .list::<Comment>(&request.filters, &request.search, None)
        .await?;
    Ok(Json(CommentList { comments, metadata }))
}
