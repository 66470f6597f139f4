//! Review API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        // Nested under the owning product
        .route(
            "/api/products/{id}/reviews",
            get(handler::list).post(handler::create),
        )
        // Direct review access
        .route(
            "/api/reviews/{id}",
            put(handler::update).delete(handler::delete),
        )
}
