// ==========================================
// 教学工作量分配系统 - 教师领域模型
// ==========================================
// 静态目录条目, 运行期不可变
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Teacher - 教师
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub teacher_id: String, // 教师ID (唯一, 稳定)
    pub name: String,       // 显示名
    pub initials: String,   // 姓名缩写 (导出备注使用)
    pub max_hours: u32,     // 周课时上限
    pub department: String, // 所属系部
}

impl Teacher {
    pub fn new(
        teacher_id: impl Into<String>,
        name: impl Into<String>,
        initials: impl Into<String>,
        max_hours: u32,
        department: impl Into<String>,
    ) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            name: name.into(),
            initials: initials.into(),
            max_hours,
            department: department.into(),
        }
    }

    /// 周课时上限 (浮点, 便于与助教半课时比较)
    pub fn max_hours_f64(&self) -> f64 {
        f64::from(self.max_hours)
    }
}
