// ==========================================
// 教学工作量分配系统 - 应用层
// ==========================================
// 职责: 装配各层, 供命令行入口使用
// ==========================================

pub mod commands;
pub mod state;

// 重导出
pub use commands::{confirmation_hint, run_command, Command, CONFIRM_FLAG, USAGE};
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
