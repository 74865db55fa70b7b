// ==========================================
// API集成测试环境
// ==========================================
// 职责: 临时 SQLite 文件 + 共享连接 + PlanningApi
// ==========================================

use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

use teaching_load_planner::api::PlanningApi;
use teaching_load_planner::config::ConfigManager;
use teaching_load_planner::db::open_sqlite_connection;
use teaching_load_planner::repository::{Catalog, PlanStateRepository};

/// 创建临时测试数据库（已建表）
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> (NamedTempFile, String) {
    let temp_file = NamedTempFile::new().expect("无法创建临时文件");
    let db_path = temp_file
        .path()
        .to_str()
        .expect("临时路径非 UTF-8")
        .to_string();
    open_sqlite_connection(&db_path).expect("无法初始化数据库");
    (temp_file, db_path)
}

/// API测试环境
pub struct PlanningTestEnv {
    pub _temp_file: NamedTempFile,
    pub db_path: String,
    pub config_manager: Arc<ConfigManager>,
    pub plan_state_repo: Arc<PlanStateRepository>,
    pub api: PlanningApi,
}

impl PlanningTestEnv {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let (temp_file, db_path) = create_test_db();
        let conn = Arc::new(Mutex::new(
            open_sqlite_connection(&db_path).expect("无法打开数据库"),
        ));

        let config_manager = Arc::new(ConfigManager::from_connection(conn.clone()));
        let plan_state_repo = Arc::new(PlanStateRepository::from_connection(conn));
        let api = PlanningApi::new(catalog, config_manager.clone(), plan_state_repo.clone());

        Self {
            _temp_file: temp_file,
            db_path,
            config_manager,
            plan_state_repo,
            api,
        }
    }

    /// 以同一数据库重新打开 API (模拟进程重启)
    pub fn reopen(&self, catalog: Arc<Catalog>) -> PlanningApi {
        PlanningApi::open(catalog, self.config_manager.clone(), self.plan_state_repo.clone())
            .expect("重新打开失败")
    }
}
