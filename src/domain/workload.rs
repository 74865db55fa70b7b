// ==========================================
// 教学工作量分配系统 - 工作量领域模型
// ==========================================

use crate::domain::types::Role;
use serde::{Deserialize, Serialize};

// ==========================================
// Workload - 教师工作量
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    pub teacher_id: String,
    pub total_hours: f64,            // 计入总课时 (助教半课时可为小数)
    pub subject_count: u32,          // 主讲+合讲课程数 (助教不计)
    pub details: Vec<WorkloadDetail>, // 逐课程明细
}

/// 单门课程计入明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadDetail {
    pub subject_id: String,
    pub subject_name: String,
    pub role: Role,
    pub hours: f64,
}

impl Workload {
    /// 相对上限的负载率
    pub fn load_ratio(&self, max_hours: u32) -> f64 {
        if max_hours == 0 {
            return 0.0;
        }
        self.total_hours / f64::from(max_hours)
    }
}
