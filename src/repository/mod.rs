// ==========================================
// 教学工作量分配系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 目录查找、分配状态存储与持久化
// 约束: 所有查询使用参数化
// ==========================================

pub mod assignment_store;
pub mod catalog;
pub mod error;
pub mod plan_state_repo;

// 重导出核心仓储
pub use assignment_store::{AssignOutcome, AssignmentStore, MemberOutcome};
pub use catalog::Catalog;
pub use error::{RepositoryError, RepositoryResult};
pub use plan_state_repo::PlanStateRepository;
