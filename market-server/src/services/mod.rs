//! 服务模块 - 外部协作方与后台例程
//!
//! - [`media`] - 媒体存储协作方 (图片上传)
//! - [`rating`] - 商品平均评分重算

pub mod media;
pub mod rating;

pub use media::{CloudMediaStorage, MediaStorage, UploadFile};
pub use rating::RatingService;
