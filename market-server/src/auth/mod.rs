//! 认证授权模块
//!
//! 提供 JWT 验证、当前用户上下文和授权谓词：
//! - [`JwtService`] - JWT 令牌服务 (仅验证，签发属于外部认证服务)
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证中间件
//! - [`require_seller`] / [`ensure_owner_or_admin`] - 授权谓词

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use permissions::{ensure_owner_or_admin, require_seller};
