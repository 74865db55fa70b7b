// ==========================================
// 教学工作量分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod assignment;
pub mod report;
pub mod subject;
pub mod teacher;
pub mod types;
pub mod workload;

// 重导出核心类型
pub use assignment::{Assignment, MemberList, PlanState, TeacherPreference};
pub use report::{format_hours, Diagnostic, DiagnosticCode, ValidationReport};
pub use subject::Subject;
pub use teacher::Teacher;
pub use types::{Role, SemesterType, SubjectType, Weekday};
pub use workload::{Workload, WorkloadDetail};
