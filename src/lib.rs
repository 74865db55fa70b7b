// ==========================================
// 教学工作量分配系统 - 核心库
// ==========================================
// 职责: 教师任课分配、工作量计算、实验助教建议、分配校验
// 技术栈: Rust + SQLite
// 系统定位: 决策支持 (人工拖拽分配, 系统只给出诊断与建议)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 目录 / 分配存储 / 持久化
pub mod repository;

// 引擎层 - 工作量 / 助教建议 / 校验
pub mod engine;

// 导入层 - 目录文件
pub mod importer;

// 导出层 - 分配结果
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{Role, SemesterType, SubjectType, Weekday};

// 领域实体
pub use domain::{
    Assignment, Diagnostic, DiagnosticCode, PlanState, Subject, Teacher, ValidationReport,
    Workload, WorkloadDetail,
};

// 仓储
pub use repository::{AssignmentStore, Catalog, PlanStateRepository};

// 引擎
pub use engine::{CatalogChecker, LabAllocationAdvisor, PlanValidator, WorkloadCalculator};

// API
pub use api::{ApiError, ApiResult, PlanningApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "教学工作量分配系统";
