// ==========================================
// 教学工作量分配系统 - 目录一致性检查
// ==========================================
// 输入: 目录 + 当前学期类型
// 输出: 提示性问题列表 (不阻断加载)
// ==========================================

use crate::domain::{SemesterType, SubjectType};
use crate::repository::Catalog;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogIssueKind {
    SemesterParity,       // 学期与当前学期类型不符
    SubjectTypeNotOffered, // 该学年不开设此类课程
    LabWithoutPractical,  // 标记有实验但实验课时为 0
    PracticalWithoutLab,  // 有实验课时但未标记实验
    HoursMismatch,        // 课时与课程类型标准不符
    ZeroMaxHours,         // 教师课时上限为 0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogIssue {
    pub kind: CatalogIssueKind,
    pub target_id: String,
    pub message: String,
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// ==========================================
// CatalogChecker - 目录一致性检查
// ==========================================
pub struct CatalogChecker {
    semester_type: SemesterType,
}

impl CatalogChecker {
    pub fn new(semester_type: SemesterType) -> Self {
        Self { semester_type }
    }

    /// 检查顺序: 先教师后课程, 均按目录顺序
    pub fn check(&self, catalog: &Catalog) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for teacher in catalog.teachers() {
            if teacher.max_hours == 0 {
                issues.push(CatalogIssue {
                    kind: CatalogIssueKind::ZeroMaxHours,
                    target_id: teacher.teacher_id.clone(),
                    message: format!("{}: max hours is 0", teacher.name),
                });
            }
        }

        for subject in catalog.subjects() {
            let mut push = |kind, message: String| {
                issues.push(CatalogIssue {
                    kind,
                    target_id: subject.subject_id.clone(),
                    message,
                })
            };

            if !self.semester_type.matches(subject.semester) {
                push(
                    CatalogIssueKind::SemesterParity,
                    format!(
                        "{}: Sem{} is not an {} semester",
                        subject.name, subject.semester, self.semester_type
                    ),
                );
            }

            if !SubjectType::allowed_for_year(subject.year()).contains(&subject.subject_type) {
                push(
                    CatalogIssueKind::SubjectTypeNotOffered,
                    format!(
                        "{}: {} is not offered in Sem{}",
                        subject.name, subject.subject_type, subject.semester
                    ),
                );
            }

            // 实验标记本身有误时不再比对标准课时
            let hours = (subject.le, subject.tu, subject.pr);
            let expected = subject.subject_type.requirement(subject.has_lab);
            if subject.has_lab && subject.pr == 0 {
                push(
                    CatalogIssueKind::LabWithoutPractical,
                    format!("{}: Has_Lab is Yes but no practical hours", subject.name),
                );
            } else if !subject.has_lab && subject.pr > 0 {
                push(
                    CatalogIssueKind::PracticalWithoutLab,
                    format!(
                        "{}: Has_Lab is No but {} practical hours",
                        subject.name, subject.pr
                    ),
                );
            } else if hours != expected {
                push(
                    CatalogIssueKind::HoursMismatch,
                    format!(
                        "{}: hours {},{},{} do not match {} {} ({},{},{})",
                        subject.name,
                        hours.0,
                        hours.1,
                        hours.2,
                        subject.subject_type,
                        if subject.has_lab { "with lab" } else { "theory" },
                        expected.0,
                        expected.1,
                        expected.2
                    ),
                );
            }
        }

        issues
    }
}
