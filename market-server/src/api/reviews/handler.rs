//! Review API Handlers
//!
//! Every mutation ends with a synchronous recompute of the owning product's
//! average rating.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use surrealdb::sql::Thing;

use crate::auth::{CurrentUser, ensure_owner_or_admin};
use crate::core::ServerState;
use crate::db::models::{ReviewCreate, ReviewResponse, ReviewUpdate, ReviewWithUser};
use crate::db::repository::{ProductRepository, ReviewRepository, UserRepository, make_thing};
use crate::utils::validation::{MAX_TEXT_LEN, validate_rating, validate_required_text};
use shared::{ApiResponse, AppError, AppResult, response};

const PRODUCT_TABLE: &str = "product";
const USER_TABLE: &str = "user";

/// GET /api/products/:productId/reviews - 某商品的全部评论
///
/// 未知商品返回空列表而不是 404。
pub async fn list(
    State(state): State<ServerState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<ReviewWithUser>>>> {
    let product_thing = make_thing(PRODUCT_TABLE, &product_id);

    let review_repo = ReviewRepository::new(state.db.clone());
    let reviews = review_repo.find_by_product(&product_thing).await?;

    let user_repo = UserRepository::new(state.db.clone());
    let reviewer_ids: Vec<Thing> = reviews.iter().map(|r| r.user.clone()).collect();
    let reviewers = user_repo.find_briefs(&reviewer_ids).await?;

    let data: Vec<ReviewWithUser> = reviews
        .into_iter()
        .map(|review| {
            let user = reviewers.get(&review.user.to_string()).cloned();
            ReviewWithUser::assemble(review, user)
        })
        .collect();

    let count = data.len();
    Ok(Json(ApiResponse::ok_with_count(data, count)))
}

/// POST /api/products/:productId/reviews - 新增评论 (登录用户)
///
/// 每个用户对同一商品至多一条评论。
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(product_id): Path<String>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<ReviewResponse>>)> {
    validate_rating(payload.rating)?;
    validate_required_text(&payload.review, "review", MAX_TEXT_LEN)?;

    let product_repo = ProductRepository::new(state.db.clone());
    let product = product_repo
        .find_by_id(&product_id)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    let product_thing = product
        .id
        .ok_or_else(|| AppError::internal("stored product without id"))?;
    let user_thing = make_thing(USER_TABLE, &user.id);

    let review_repo = ReviewRepository::new(state.db.clone());
    if review_repo
        .find_by_user_and_product(&user_thing, &product_thing)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("Already reviewed this product"));
    }

    let review = review_repo
        .create(product_thing.clone(), user_thing, payload)
        .await?;

    state.ratings.recompute(&product_thing).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(review.into()))))
}

/// PUT /api/reviews/:id - 更新评论 (仅作者或管理员)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ReviewUpdate>,
) -> AppResult<Json<ApiResponse<ReviewResponse>>> {
    if let Some(rating) = payload.rating {
        validate_rating(rating)?;
    }
    if let Some(ref text) = payload.review {
        validate_required_text(text, "review", MAX_TEXT_LEN)?;
    }

    let review_repo = ReviewRepository::new(state.db.clone());
    let existing = review_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Review"))?;
    ensure_owner_or_admin(&user, &existing.user.to_string())?;

    let review = review_repo.update(&id, payload).await?;

    state.ratings.recompute(&review.product).await?;

    Ok(Json(ApiResponse::ok(review.into())))
}

/// DELETE /api/reviews/:id - 删除评论 (仅作者或管理员)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let review_repo = ReviewRepository::new(state.db.clone());
    let existing = review_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Review"))?;
    ensure_owner_or_admin(&user, &existing.user.to_string())?;

    // Capture the product reference before the row disappears
    let product = existing.product.clone();

    review_repo.delete(&id).await?;

    state.ratings.recompute(&product).await?;

    Ok(Json(ApiResponse::ok(response::empty())))
}
