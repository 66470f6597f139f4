//! Review Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Review, ReviewCreate, ReviewUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const REVIEW_TABLE: &str = "review";

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All reviews of one product
    pub async fn find_by_product(&self, product: &Thing) -> RepoResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review WHERE product = $product ORDER BY createdAt DESC")
            .bind(("product", product.clone()))
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// All reviews of a set of products (one round-trip for a list page)
    pub async fn find_by_products(&self, products: &[Thing]) -> RepoResult<Vec<Review>> {
        if products.is_empty() {
            return Ok(Vec::new());
        }
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review WHERE product IN $products")
            .bind(("products", products.to_vec()))
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// The caller's existing review of a product, if any (duplicate check)
    pub async fn find_by_user_and_product(
        &self,
        user: &Thing,
        product: &Thing,
    ) -> RepoResult<Option<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review WHERE user = $user AND product = $product")
            .bind(("user", user.clone()))
            .bind(("product", product.clone()))
            .await?
            .take(0)?;
        Ok(reviews.into_iter().next())
    }

    /// Find review by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Review>> {
        let pure_id = strip_table_prefix(REVIEW_TABLE, id);
        let review: Option<Review> = self.base.db().select((REVIEW_TABLE, pure_id)).await?;
        Ok(review)
    }

    /// Create a review for (user, product)
    pub async fn create(
        &self,
        product: Thing,
        user: Thing,
        data: ReviewCreate,
    ) -> RepoResult<Review> {
        let review = Review {
            id: None,
            product,
            user,
            rating: data.rating,
            review: data.review,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let created: Option<Review> = self.base.db().create(REVIEW_TABLE).content(review).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }

    /// Update a review (partial merge, schema validation re-runs)
    pub async fn update(&self, id: &str, data: ReviewUpdate) -> RepoResult<Review> {
        let pure_id = strip_table_prefix(REVIEW_TABLE, id);
        let thing = Thing::from((REVIEW_TABLE, pure_id));

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing MERGE $data RETURN AFTER")
            .bind(("thing", thing))
            .bind(("data", data))
            .await?;
        let reviews: Vec<Review> = result.take(0)?;

        reviews
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound("Review".to_string()))
    }

    /// Hard delete a review
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(REVIEW_TABLE, id);
        let deleted: Option<Review> = self.base.db().delete((REVIEW_TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound("Review".to_string()));
        }
        Ok(())
    }
}
