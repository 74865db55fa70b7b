// ==========================================
// 教学工作量分配系统 - 诊断报告领域模型
// ==========================================
// 诊断是提示性数据, 不是失败; 由 Validator 每次全量重算
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// DiagnosticCode - 诊断类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    TeacherOverloaded,     // 超负荷
    TeacherOptimal,        // 负载适中
    TeacherUnderutilized,  // 负载不足
    SubjectUnassigned,     // 未分配
    SubjectHoursShort,     // 计入课时不足
    LabAssistantShortfall, // 助教不足
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCode::TeacherOverloaded => write!(f, "TEACHER_OVERLOADED"),
            DiagnosticCode::TeacherOptimal => write!(f, "TEACHER_OPTIMAL"),
            DiagnosticCode::TeacherUnderutilized => write!(f, "TEACHER_UNDERUTILIZED"),
            DiagnosticCode::SubjectUnassigned => write!(f, "SUBJECT_UNASSIGNED"),
            DiagnosticCode::SubjectHoursShort => write!(f, "SUBJECT_HOURS_SHORT"),
            DiagnosticCode::LabAssistantShortfall => write!(f, "LAB_ASSISTANT_SHORTFALL"),
        }
    }
}

// ==========================================
// Diagnostic - 单条诊断
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub target_id: String, // 教师ID 或 课程ID
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, target_id: &str, message: String) -> Self {
        Self {
            code,
            target_id: target_id.to_string(),
            message,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// ==========================================
// ValidationReport - 校验报告
// ==========================================
// 顺序: 先教师 (目录顺序), 后课程 (目录顺序)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub success: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|d| d.message.as_str()).collect()
    }

    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|d| d.message.as_str()).collect()
    }

    pub fn success_messages(&self) -> Vec<&str> {
        self.success.iter().map(|d| d.message.as_str()).collect()
    }
}

/// 课时格式化: 整数不带小数位, 助教半课时保留一位
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{:.1}", hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(5.0), "5");
        assert_eq!(format_hours(0.0), "0");
        assert_eq!(format_hours(7.5), "7.5");
    }
}
