use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::services::{CloudMediaStorage, MediaStorage, RatingService};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是整个服务的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 验证服务 |
/// | media | Arc<dyn MediaStorage> | 媒体存储协作方 |
/// | ratings | Arc<RatingService> | 平均评分重算 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 媒体存储协作方
    pub media: Arc<dyn MediaStorage>,
    /// 平均评分重算服务
    pub ratings: Arc<RatingService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/market.db)
    /// 3. 媒体存储、JWT、评分服务
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        let media: Arc<dyn MediaStorage> = Arc::new(CloudMediaStorage::new(config));
        Self::initialize_with_media(config, media).await
    }

    /// 初始化服务器状态，注入指定的媒体存储实现 (测试用)
    pub async fn initialize_with_media(
        config: &Config,
        media: Arc<dyn MediaStorage>,
    ) -> Result<Self, ServerError> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("market.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        let db = db_service.db;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let ratings = Arc::new(RatingService::new(db.clone()));

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            media,
            ratings,
        })
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
