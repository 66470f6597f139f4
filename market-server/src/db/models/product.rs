//! Product Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::review::{ReviewResponse, ReviewWithUser};
use super::user::{UserBrief, UserProfile};

pub type ProductId = Thing;

/// Product category (fixed marketplace taxonomy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    HomeDecor,
    Jewelry,
    Furniture,
    Art,
    Fashion,
    Other,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::HomeDecor => "home-decor",
            ProductCategory::Jewelry => "jewelry",
            ProductCategory::Furniture => "furniture",
            ProductCategory::Art => "art",
            ProductCategory::Fashion => "fashion",
            ProductCategory::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "home-decor" => Some(ProductCategory::HomeDecor),
            "jewelry" => Some(ProductCategory::Jewelry),
            "furniture" => Some(ProductCategory::Furniture),
            "art" => Some(ProductCategory::Art),
            "fashion" => Some(ProductCategory::Fashion),
            "other" => Some(ProductCategory::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Uploaded image reference: remote URL + storage identifier
///
/// `public_id` is the collaborator's naming, kept as-is on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub public_id: String,
}

/// Free-text sustainability metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_diverted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_reduction: Option<String>,
}

/// Product document
///
/// `averageRating` always equals the mean of the linked reviews' ratings
/// (0 when there are none); both it and `ratings` are maintained by the
/// rating recompute, never written by handlers directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    #[serde(default)]
    pub materials_used: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub sustainability_info: SustainabilityInfo,
    /// Record link to the owning seller
    pub seller: Thing,
    #[serde(default = "default_stock")]
    pub stock: i64,
    /// Review record links
    #[serde(default)]
    pub ratings: Vec<Thing>,
    #[serde(default)]
    pub average_rating: f64,
    /// Unix millis
    pub created_at: i64,
}

fn default_stock() -> i64 {
    1
}

/// Create payload, assembled by the handler (seller comes from the caller,
/// images from the media collaborator)
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    pub materials_used: Vec<String>,
    pub colors: Vec<String>,
    pub sustainability_info: SustainabilityInfo,
    pub seller: Thing,
    pub stock: Option<i64>,
    pub images: Vec<ProductImage>,
}

/// Partial update payload, merged into the stored document
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials_used: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sustainability_info: Option<SustainabilityInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    /// Full image list (existing + appended uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ProductImage>>,
}

// =============================================================================
// Response views
// =============================================================================

/// Product as returned by create/update/delete (references as id strings,
/// nothing populated)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    pub materials_used: Vec<String>,
    pub colors: Vec<String>,
    pub images: Vec<ProductImage>,
    pub sustainability_info: SustainabilityInfo,
    pub seller: String,
    pub stock: i64,
    pub ratings: Vec<String>,
    pub average_rating: f64,
    pub created_at: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|t| t.to_string()).unwrap_or_default(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            materials_used: product.materials_used,
            colors: product.colors,
            images: product.images,
            sustainability_info: product.sustainability_info,
            seller: product.seller.to_string(),
            stock: product.stock,
            ratings: product.ratings.iter().map(|t| t.to_string()).collect(),
            average_rating: product.average_rating,
            created_at: product.created_at,
        }
    }
}

/// Product with populated seller summary and review documents (list view)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    pub materials_used: Vec<String>,
    pub colors: Vec<String>,
    pub images: Vec<ProductImage>,
    pub sustainability_info: SustainabilityInfo,
    pub seller: Option<UserBrief>,
    pub stock: i64,
    pub ratings: Vec<ReviewResponse>,
    pub average_rating: f64,
    pub created_at: i64,
}

impl ProductSummary {
    pub fn assemble(
        product: Product,
        seller: Option<UserBrief>,
        ratings: Vec<ReviewResponse>,
    ) -> Self {
        Self {
            id: product.id.map(|t| t.to_string()).unwrap_or_default(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            materials_used: product.materials_used,
            colors: product.colors,
            images: product.images,
            sustainability_info: product.sustainability_info,
            seller,
            stock: product.stock,
            ratings,
            average_rating: product.average_rating,
            created_at: product.created_at,
        }
    }
}

/// Product with full seller profile and reviewer-populated reviews (detail view)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
    pub materials_used: Vec<String>,
    pub colors: Vec<String>,
    pub images: Vec<ProductImage>,
    pub sustainability_info: SustainabilityInfo,
    pub seller: Option<UserProfile>,
    pub stock: i64,
    pub ratings: Vec<ReviewWithUser>,
    pub average_rating: f64,
    pub created_at: i64,
}

impl ProductDetail {
    pub fn assemble(
        product: Product,
        seller: Option<UserProfile>,
        ratings: Vec<ReviewWithUser>,
    ) -> Self {
        Self {
            id: product.id.map(|t| t.to_string()).unwrap_or_default(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            materials_used: product.materials_used,
            colors: product.colors,
            images: product.images,
            sustainability_info: product.sustainability_info,
            seller,
            stock: product.stock,
            ratings,
            average_rating: product.average_rating,
            created_at: product.created_at,
        }
    }
}
