// ==========================================
// 教学工作量分配系统 - 课程领域模型
// ==========================================
// 静态目录条目, 运行期不可变
// ==========================================

use crate::domain::types::SubjectType;
use serde::{Deserialize, Serialize};

// ==========================================
// Subject - 课程
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    // ===== 主键 =====
    pub subject_id: String, // 课程ID

    // ===== 基本信息 =====
    pub name: String,            // 课程名
    pub course: String,          // 所属专业 (GE/SEC/VAC/AEC 可为空)
    pub semester: u8,            // 学期
    pub section: Option<String>, // 班级标签
    pub subject_type: SubjectType,
    pub department: String,

    // ===== 周课时 =====
    pub le: u32, // 讲授
    pub tu: u32, // 辅导
    pub pr: u32, // 实验

    // ===== 实验 =====
    pub has_lab: bool,
    pub students: u32, // 选课人数

    #[serde(default)]
    pub is_merged: bool, // 多专业合班
}

impl Subject {
    /// 周总课时 le+tu+pr
    pub fn total_hours(&self) -> u32 {
        self.le.saturating_add(self.tu).saturating_add(self.pr)
    }

    /// 是否需要实验助教
    pub fn needs_lab_staff(&self) -> bool {
        self.has_lab && self.pr > 0
    }

    /// 所属学年 (学期 1/2 → 第 1 学年)
    pub fn year(&self) -> u8 {
        self.semester.div_ceil(2)
    }
}
