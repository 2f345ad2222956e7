use crate::domain::metadata::Metadata;
use crate::domain::model::{
    Comment, CommentDraft, CommentPatch, Product, ProductDraft, ProductPatch, Review, ReviewDraft,
    ReviewPatch,
};
use crate::transport::http::handlers::{comments, common, health, products, reviews};
use crate::transport::http::types::{
    AppState, CommentEnvelope, CommentList, ErrorEnvelope, HealthResponse, MessageEnvelope,
    ProductEnvelope, ProductList, ReviewEnvelope, ReviewList, SystemInfo, MAX_BODY_BYTES,
};
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        products::create_product_handler,
        products::list_products_handler,
        products::show_product_handler,
        products::update_product_handler,
        products::delete_product_handler,
        reviews::create_review_handler,
        reviews::list_product_reviews_handler,
        reviews::list_reviews_handler,
        reviews::show_review_handler,
        reviews::update_review_handler,
        reviews::delete_review_handler,
        comments::create_comment_handler,
        comments::list_comments_handler,
        comments::show_comment_handler,
        comments::update_comment_handler,
        comments::delete_comment_handler
    ),
    components(schemas(
        Product,
        ProductDraft,
        ProductPatch,
        ProductEnvelope,
        ProductList,
        Review,
        ReviewDraft,
        ReviewPatch,
        ReviewEnvelope,
        ReviewList,
        Comment,
        CommentDraft,
        CommentPatch,
        CommentEnvelope,
        CommentList,
        Metadata,
        MessageEnvelope,
        ErrorEnvelope,
        HealthResponse,
        SystemInfo
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/v1/healthcheck", get(health::healthcheck_handler))
        .route(
            "/v1/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route(
            "/v1/products/:product_id",
            get(products::show_product_handler)
                .patch(products::update_product_handler)
                .delete(products::delete_product_handler),
        )
        .route(
            "/v1/products/:product_id/reviews",
            get(reviews::list_product_reviews_handler).post(reviews::create_review_handler),
        )
        .route(
            "/v1/products/:product_id/reviews/:review_id",
            get(reviews::show_review_handler)
                .patch(reviews::update_review_handler)
                .delete(reviews::delete_review_handler),
        )
        .route("/v1/reviews", get(reviews::list_reviews_handler))
        .route(
            "/v1/comments",
            get(comments::list_comments_handler).post(comments::create_comment_handler),
        )
        .route(
            "/v1/comments/:id",
            get(comments::show_comment_handler)
                .patch(comments::update_comment_handler)
                .delete(comments::delete_comment_handler),
        )
        .fallback(common::not_found_handler)
        .layer(middleware::map_response(common::method_not_allowed_json))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
