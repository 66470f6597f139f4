//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResult`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::response)
//! - 日志、输入校验等工具

pub mod logger;
pub mod validation;

// Re-export error and response types from the shared crate
pub use shared::{ApiResponse, AppError, AppResult};
