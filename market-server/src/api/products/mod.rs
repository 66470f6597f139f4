//! Product API 模块

mod handler;

use axum::{Router, extract::DefaultBodyLimit, routing::get};

use crate::core::ServerState;

/// Body cap for multipart requests: 5 images x 5MB plus form fields
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/products", get(handler::list).post(handler::create))
        .route(
            "/api/products/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
