//! Database Module
//!
//! Embedded SurrealDB (RocksDB storage) connection and schema definition.

pub mod models;
pub mod repository;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "marketplace";
const DATABASE: &str = "marketplace";

/// Schema definition, applied on every startup.
///
/// `OVERWRITE` keeps the statements idempotent across restarts. Field-level
/// ASSERTs carry the document constraints: non-negative price/stock, the
/// fixed category set, star ratings between 1 and 5, averageRating in 0..5.
const SCHEMA: &str = r#"
DEFINE TABLE OVERWRITE product SCHEMAFULL;
DEFINE FIELD OVERWRITE name ON product TYPE string ASSERT string::len($value) > 0;
DEFINE FIELD OVERWRITE description ON product TYPE string ASSERT string::len($value) > 0;
DEFINE FIELD OVERWRITE price ON product TYPE float ASSERT $value >= 0;
DEFINE FIELD OVERWRITE category ON product TYPE string
    ASSERT $value INSIDE ['home-decor', 'jewelry', 'furniture', 'art', 'fashion', 'other'];
DEFINE FIELD OVERWRITE materialsUsed ON product TYPE array<string> DEFAULT [];
DEFINE FIELD OVERWRITE materialsUsed.* ON product TYPE string ASSERT string::len($value) > 0;
DEFINE FIELD OVERWRITE colors ON product TYPE array<string> DEFAULT [];
DEFINE FIELD OVERWRITE images ON product TYPE array DEFAULT [];
DEFINE FIELD OVERWRITE images.* ON product TYPE object;
DEFINE FIELD OVERWRITE images.*.url ON product TYPE string;
DEFINE FIELD OVERWRITE images.*.public_id ON product TYPE string;
DEFINE FIELD OVERWRITE sustainabilityInfo ON product TYPE object DEFAULT {};
DEFINE FIELD OVERWRITE sustainabilityInfo.wasteDiverted ON product TYPE option<string>;
DEFINE FIELD OVERWRITE sustainabilityInfo.co2Reduction ON product TYPE option<string>;
DEFINE FIELD OVERWRITE seller ON product TYPE record<user>;
DEFINE FIELD OVERWRITE stock ON product TYPE int DEFAULT 1 ASSERT $value >= 0;
DEFINE FIELD OVERWRITE ratings ON product TYPE array<record<review>> DEFAULT [];
DEFINE FIELD OVERWRITE averageRating ON product TYPE float DEFAULT 0 ASSERT $value >= 0 AND $value <= 5;
DEFINE FIELD OVERWRITE createdAt ON product TYPE int;

DEFINE TABLE OVERWRITE review SCHEMAFULL;
DEFINE FIELD OVERWRITE product ON review TYPE record<product>;
DEFINE FIELD OVERWRITE user ON review TYPE record<user>;
DEFINE FIELD OVERWRITE rating ON review TYPE int ASSERT $value >= 1 AND $value <= 5;
DEFINE FIELD OVERWRITE review ON review TYPE string ASSERT string::len($value) > 0;
DEFINE FIELD OVERWRITE createdAt ON review TYPE int;

DEFINE TABLE OVERWRITE user SCHEMALESS;
"#;

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!("Database ready (embedded SurrealDB at {db_path})");

        Ok(Self { db })
    }
}
