//! API Response types
//!
//! Standardized API response structures for the entire framework.
//!
//! All endpoints answer with the same envelope:
//!
//! ```json
//! {
//!     "success": true,
//!     "data": { ... },
//!     "count": 12,
//!     "page": 1,
//!     "pages": 3,
//!     "message": "..."
//! }
//! ```
//!
//! `count`/`page`/`pages` only appear on list responses, `message` only on
//! errors (or informational successes).

use serde::{Deserialize, Serialize};

/// Unified API response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response payload (absent on errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Number of items in `data` (list responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Current page, 1-based (paginated responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Total page count (paginated responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Human-readable message (errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            page: None,
            pages: None,
            message: None,
        }
    }

    /// Create a successful list response with an item count
    pub fn ok_with_count(data: T, count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::ok(data)
        }
    }

    /// Create a successful paginated response
    pub fn paginated(data: T, count: usize, page: u32, pages: u32) -> Self {
        Self {
            count: Some(count),
            page: Some(page),
            pages: Some(pages),
            ..Self::ok(data)
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            page: None,
            pages: None,
            message: Some(message.into()),
        }
    }
}

/// Empty-object payload for mutations that return no resource
/// (`"data": {}` in the wire format)
pub fn empty() -> serde_json::Value {
    serde_json::json!({})
}

/// Total page count for a result set: `ceil(total / limit)`
///
/// A `limit` of 0 is treated as "no pages" rather than a division error.
pub fn pages_for(total: usize, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    ((total as u64).div_ceil(limit as u64)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_math_rounds_up() {
        assert_eq!(pages_for(25, 12), 3);
        assert_eq!(pages_for(24, 12), 2);
        assert_eq!(pages_for(0, 12), 0);
        assert_eq!(pages_for(1, 12), 1);
        assert_eq!(pages_for(7, 0), 0);
    }

    #[test]
    fn success_envelope_omits_empty_fields() {
        let resp = ApiResponse::ok(serde_json::json!({"name": "vase"}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("message").is_none());
        assert!(json.get("count").is_none());
    }

    #[test]
    fn paginated_envelope_carries_counters() {
        let resp = ApiResponse::paginated(vec![1, 2, 3], 3, 2, 5);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["page"], 2);
        assert_eq!(json["pages"], 5);
    }

    #[test]
    fn error_envelope_has_message_only() {
        let resp = ApiResponse::<()>::error("Product not found");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Product not found");
        assert!(json.get("data").is_none());
    }
}
