//! Database Models

// Marketplace catalog
pub mod product;
pub mod review;

// External entities (owned by the auth collaborator)
pub mod user;

// Re-exports
pub use product::{
    Product, ProductCategory, ProductCreate, ProductDetail, ProductImage, ProductResponse,
    ProductSummary, ProductUpdate, SustainabilityInfo,
};
pub use review::{Review, ReviewCreate, ReviewResponse, ReviewUpdate, ReviewWithUser};
pub use user::{User, UserBrief, UserProfile};
