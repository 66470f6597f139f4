//! User Model
//!
//! User documents are owned by the external auth service; this server only
//! reads them to populate seller and reviewer fields in responses.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type UserId = Thing;

/// User document (read-only here)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Seller/reviewer summary embedded in list responses
#[derive(Debug, Clone, Serialize)]
pub struct UserBrief {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Seller profile embedded in the product detail response
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl From<User> for UserBrief {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|t| t.to_string()).unwrap_or_default(),
            name: user.name,
            avatar: user.avatar,
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|t| t.to_string()).unwrap_or_default(),
            name: user.name,
            avatar: user.avatar,
            bio: user.bio,
        }
    }
}
