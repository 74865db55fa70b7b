// ==========================================
// 教学工作量分配系统 - 引擎层
// ==========================================
// 职责: 从分配存储派生工作量、助教建议、诊断
// 红线: 引擎不持有派生状态, 每次查询全量重算
// ==========================================

pub mod catalog_check;
pub mod lab_allocation;
pub mod validator;
pub mod workload;

// 重导出核心引擎
pub use catalog_check::{CatalogChecker, CatalogIssue, CatalogIssueKind};
pub use lab_allocation::{
    assistants_needed, AssistantCandidate, AssistantSuggestion, LabAllocationAdvisor,
};
pub use validator::{classify_load, LoadBand, PlanValidator};
pub use workload::WorkloadCalculator;
