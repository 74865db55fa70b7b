// ==========================================
// 教学工作量分配系统 - 应用状态
// ==========================================
// 职责: 打开数据库, 装配配置/持久化/目录, 构建 PlanningApi
// ==========================================

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::api::{ApiError, ApiResult, PlanningApi};
use crate::config::ConfigManager;
use crate::db::open_sqlite_connection;
use crate::importer::CatalogImporter;
use crate::repository::{Catalog, PlanStateRepository};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "TEACHING_LOAD_DB_PATH";

/// 应用状态
///
/// 共享同一 SQLite 连接的配置管理器与分配状态仓储, 加上已载入分配的 PlanningApi
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 分配规划API
    pub planning_api: PlanningApi,
}

impl AppState {
    /// 以给定目录创建 AppState, 并载入已保存的分配
    pub fn new(db_path: String, catalog: Catalog) -> ApiResult<Self> {
        let (config_manager, plan_state_repo) = open_stores(&db_path)?;
        Self::assemble(db_path, catalog, config_manager, plan_state_repo)
    }

    /// 从文件导入目录后创建 AppState
    ///
    /// 教师未填 Max_Hours 时使用配置 default_max_hours
    pub fn from_catalog_path(db_path: String, catalog_path: &Path) -> ApiResult<Self> {
        let (config_manager, plan_state_repo) = open_stores(&db_path)?;
        let importer = CatalogImporter::new(config_manager.get_default_max_hours()?);
        let catalog = importer.import(catalog_path)?;
        Self::assemble(db_path, catalog, config_manager, plan_state_repo)
    }

    fn assemble(
        db_path: String,
        catalog: Catalog,
        config_manager: Arc<ConfigManager>,
        plan_state_repo: Arc<PlanStateRepository>,
    ) -> ApiResult<Self> {
        let planning_api =
            PlanningApi::open(Arc::new(catalog), config_manager.clone(), plan_state_repo)?;

        tracing::info!(
            db_path = %db_path,
            teachers = planning_api.catalog().teachers().len(),
            subjects = planning_api.catalog().subjects().len(),
            "AppState 初始化完成"
        );

        Ok(Self {
            db_path,
            config_manager,
            planning_api,
        })
    }
}

fn open_stores(db_path: &str) -> ApiResult<(Arc<ConfigManager>, Arc<PlanStateRepository>)> {
    tracing::info!("初始化AppState，数据库路径: {}", db_path);

    let conn = open_sqlite_connection(db_path)
        .map_err(|e| ApiError::DatabaseError(format!("无法打开数据库: {}", e)))?;
    let conn = Arc::new(Mutex::new(conn));

    Ok((
        Arc::new(ConfigManager::from_connection(conn.clone())),
        Arc::new(PlanStateRepository::from_connection(conn)),
    ))
}

/// 默认数据库路径
///
/// 优先级: 环境变量 TEACHING_LOAD_DB_PATH → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./teaching_load.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染正式数据
        #[cfg(debug_assertions)]
        let dir = data_dir.join("teaching-load-planner-dev");

        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("teaching-load-planner");

        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("teaching_load.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }
}
