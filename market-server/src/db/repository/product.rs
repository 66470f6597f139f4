//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

/// Fields the list endpoint accepts in `sort=field:dir`; anything else falls
/// back to the default ordering (newest first).
const SORTABLE_FIELDS: &[&str] = &["name", "price", "createdAt", "averageRating", "stock"];

/// Filter options of the product list endpoint
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive substring match on the name
    pub search: Option<String>,
    /// "field:dir" sort spec
    pub sort: Option<String>,
}

/// Resolve a "field:dir" spec against the whitelist
fn parse_sort(spec: Option<&str>) -> (&'static str, &'static str) {
    if let Some(spec) = spec {
        let (field_raw, dir_raw) = spec.split_once(':').unwrap_or((spec, ""));
        if let Some(field) = SORTABLE_FIELDS.iter().copied().find(|f| *f == field_raw) {
            let dir = if dir_raw == "desc" { "DESC" } else { "ASC" };
            return (field, dir);
        }
    }
    ("createdAt", "DESC")
}

// =============================================================================
// Product Repository
// =============================================================================

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find one page of matching products plus the total match count.
    ///
    /// The page slice happens in memory: the embedded engine drops rows when
    /// WHERE, ORDER BY and LIMIT are combined (known upstream bug), and the
    /// single query also spares a separate count round-trip.
    pub async fn find_page(
        &self,
        filter: &ProductFilter,
        page: u32,
        limit: u32,
    ) -> RepoResult<(Vec<Product>, usize)> {
        let mut sql = String::from("SELECT * FROM product");

        let mut conditions: Vec<&str> = Vec::new();
        if filter.category.is_some() {
            conditions.push("category = $category");
        }
        if filter.search.is_some() {
            conditions.push("string::contains(string::lowercase(name), string::lowercase($search))");
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        let (field, dir) = parse_sort(filter.sort.as_deref());
        sql.push_str(&format!(" ORDER BY {field} {dir}"));

        let mut query = self.base.db().query(sql);
        if let Some(category) = filter.category.clone() {
            query = query.bind(("category", category));
        }
        if let Some(search) = filter.search.clone() {
            query = query.bind(("search", search));
        }

        let matching: Vec<Product> = query.await?.take(0)?;
        let total = matching.len();

        let skip = page.saturating_sub(1) as usize * limit as usize;
        let items = matching
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .collect();

        Ok((items, total))
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            materials_used: data.materials_used,
            colors: data.colors,
            images: data.images,
            sustainability_info: data.sustainability_info,
            seller: data.seller,
            stock: data.stock.unwrap_or(1),
            ratings: Vec::new(),
            average_rating: 0.0,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product (partial merge, schema validation re-runs)
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let thing = make_thing(PRODUCT_TABLE, pure_id);

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing MERGE $data RETURN AFTER")
            .bind(("thing", thing))
            .bind(("data", data))
            .await?;
        let products: Vec<Product> = result.take(0)?;

        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound("Product".to_string()))
    }

    /// Hard delete a product together with its reviews.
    ///
    /// Without the cascade, the one-review-per-user check would keep matching
    /// orphaned reviews against a recreated product id.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let thing = make_thing(PRODUCT_TABLE, pure_id);

        self.base
            .db()
            .query("DELETE review WHERE product = $product")
            .bind(("product", thing))
            .await?;

        let deleted: Option<Product> = self.base.db().delete((PRODUCT_TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound("Product".to_string()));
        }
        Ok(())
    }
}
