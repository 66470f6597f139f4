//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查接口
//! - [`products`] - 商品管理接口
//! - [`reviews`] - 评论管理接口
//!
//! `/api/auth`、`/api/users`、`/api/orders` 由外部协作服务提供，不在本模块。

pub mod health;
pub mod products;
pub mod reviews;
