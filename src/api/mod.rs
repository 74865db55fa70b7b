// ==========================================
// 教学工作量分配系统 - API 层
// ==========================================
// 职责: 对外业务接口, 调用方确认把关, 错误转换
// ==========================================

pub mod error;
pub mod planning_api;

pub use error::{ApiError, ApiResult};
pub use planning_api::{PlanningApi, ACTION_REMOVE_LOCKED_MAIN, ACTION_RESET_UNLOCKED};
