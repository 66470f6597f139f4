//! Review Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::user::UserBrief;

pub type ReviewId = Thing;

/// Review document, at most one per (user, product) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ReviewId>,
    /// Record link to the reviewed product
    pub product: Thing,
    /// Record link to the author
    pub user: Thing,
    /// Whole stars, 1..=5
    pub rating: i64,
    /// Review body
    pub review: String,
    /// Unix millis
    pub created_at: i64,
}

/// Create payload (body of POST /api/products/:productId/reviews)
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCreate {
    pub rating: i64,
    pub review: String,
}

/// Partial update payload (body of PUT /api/reviews/:id)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

/// Review in API responses (references as id strings)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub product: String,
    pub user: String,
    pub rating: i64,
    pub review: String,
    pub created_at: i64,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.map(|t| t.to_string()).unwrap_or_default(),
            product: review.product.to_string(),
            user: review.user.to_string(),
            rating: review.rating,
            review: review.review,
            created_at: review.created_at,
        }
    }
}

/// Review with populated reviewer (review list and product detail)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithUser {
    pub id: String,
    pub product: String,
    pub user: Option<UserBrief>,
    pub rating: i64,
    pub review: String,
    pub created_at: i64,
}

impl ReviewWithUser {
    pub fn assemble(review: Review, user: Option<UserBrief>) -> Self {
        Self {
            id: review.id.map(|t| t.to_string()).unwrap_or_default(),
            product: review.product.to_string(),
            user,
            rating: review.rating,
            review: review.review,
            created_at: review.created_at,
        }
    }
}
