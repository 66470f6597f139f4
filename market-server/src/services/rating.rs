//! Average rating maintenance
//!
//! 评分重算 - 评论每次变更后全量重算商品的平均评分

use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use tokio::sync::Mutex;

use crate::db::models::Review;
use shared::{AppError, AppResult};

/// Recomputes a product's `averageRating` from its current reviews.
///
/// This is the single trigger point: review handlers (and the product
/// cascade delete) call it explicitly, there is no persistence-layer hook.
///
/// Recomputation is serialized per product id: concurrent review writes on
/// the same product queue behind one async mutex instead of racing their
/// read-then-write cycles. Different products never contend.
pub struct RatingService {
    db: Surreal<Db>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl RatingService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            db,
            locks: DashMap::new(),
        }
    }

    /// Full recompute, O(reviews of the product).
    ///
    /// The mean is an IEEE f64 with no rounding; 0 when the product has no
    /// reviews. The `ratings` reference list is refreshed in the same UPDATE.
    pub async fn recompute(&self, product: &Thing) -> AppResult<f64> {
        let lock = self.locks.entry(product.to_string()).or_default().clone();
        let _guard = lock.lock().await;

        let mut result = self
            .db
            .query("SELECT * FROM review WHERE product = $product")
            .bind(("product", product.clone()))
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        let reviews: Vec<Review> = result
            .take(0)
            .map_err(|e| AppError::database(e.to_string()))?;

        let average = if reviews.is_empty() {
            0.0
        } else {
            reviews.iter().map(|r| r.rating as f64).sum::<f64>() / reviews.len() as f64
        };
        let refs: Vec<Thing> = reviews.into_iter().filter_map(|r| r.id).collect();

        self.db
            .query("UPDATE $product SET averageRating = $average, ratings = $ratings")
            .bind(("product", product.clone()))
            .bind(("average", average))
            .bind(("ratings", refs))
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::debug!(product = %product, average, "Average rating recomputed");

        Ok(average)
    }
}
