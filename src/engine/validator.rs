// ==========================================
// 教学工作量分配系统 - 分配校验引擎
// ==========================================
// 输入: 目录 + AssignmentStore + 工作量 + 助教配比
// 输出: errors / warnings / success 三类诊断
// 红线: 每次全量重算; 诊断是提示数据, 不是失败
// ==========================================

use crate::config::LabRatio;
use crate::domain::{
    format_hours, Diagnostic, DiagnosticCode, Subject, Teacher, ValidationReport,
};
use crate::engine::lab_allocation::assistants_needed;
use crate::engine::workload::WorkloadCalculator;
use crate::repository::AssignmentStore;
use tracing::instrument;

/// 超过该负载率视为负载适中
pub const OPTIMAL_LOAD_RATIO: f64 = 0.8;
/// 低于该负载率 (且非零) 视为负载不足
pub const UNDERUTILIZED_LOAD_RATIO: f64 = 0.5;

/// 教师负载分档
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBand {
    Overloaded,
    Optimal,
    Underutilized,
    Neutral, // 不产生诊断 (含 0 课时)
}

/// 负载分档, 依次判断: 超负荷 → 适中 → 不足
pub fn classify_load(total_hours: f64, max_hours: u32) -> LoadBand {
    let max = f64::from(max_hours);
    if total_hours > max {
        LoadBand::Overloaded
    } else if total_hours >= OPTIMAL_LOAD_RATIO * max {
        LoadBand::Optimal
    } else if total_hours < UNDERUTILIZED_LOAD_RATIO * max && total_hours > 0.0 {
        LoadBand::Underutilized
    } else {
        LoadBand::Neutral
    }
}

// ==========================================
// PlanValidator - 分配校验引擎
// ==========================================
pub struct PlanValidator<'a> {
    store: &'a AssignmentStore,
    ratio: LabRatio,
}

impl<'a> PlanValidator<'a> {
    pub fn new(store: &'a AssignmentStore, ratio: LabRatio) -> Self {
        Self { store, ratio }
    }

    /// 全量校验: 先教师后课程, 均按目录顺序
    #[instrument(skip(self), fields(lab_ratio = self.ratio.get()))]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        let catalog = self.store.catalog();

        let calculator = WorkloadCalculator::new(self.store);
        for teacher in catalog.teachers() {
            let total = calculator.compute_workload(&teacher.teacher_id).total_hours;
            self.check_teacher(teacher, total, &mut report);
        }

        for subject in catalog.subjects() {
            self.check_subject(subject, &mut report);
        }

        tracing::debug!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            success = report.success.len(),
            "校验完成"
        );
        report
    }

    fn check_teacher(&self, teacher: &Teacher, total_hours: f64, report: &mut ValidationReport) {
        let hours = format!("{}h/{}h", format_hours(total_hours), teacher.max_hours);
        let id = teacher.teacher_id.as_str();
        match classify_load(total_hours, teacher.max_hours) {
            LoadBand::Overloaded => report.errors.push(Diagnostic::new(
                DiagnosticCode::TeacherOverloaded,
                id,
                format!("{} overloaded: {}", teacher.name, hours),
            )),
            LoadBand::Optimal => report.success.push(Diagnostic::new(
                DiagnosticCode::TeacherOptimal,
                id,
                format!("{}: {} (optimal)", teacher.name, hours),
            )),
            LoadBand::Underutilized => report.warnings.push(Diagnostic::new(
                DiagnosticCode::TeacherUnderutilized,
                id,
                format!("{} underutilized: {}", teacher.name, hours),
            )),
            LoadBand::Neutral => {}
        }
    }

    fn check_subject(&self, subject: &Subject, report: &mut ValidationReport) {
        let id = subject.subject_id.as_str();
        let Some(assignment) = self.store.assignment(id) else {
            report.errors.push(Diagnostic::new(
                DiagnosticCode::SubjectUnassigned,
                id,
                format!(
                    "{} ({} Sem{}): No teacher assigned",
                    subject.name, subject.course, subject.semester
                ),
            ));
            return;
        };

        // 创建时课时全额复制, 正常路径下不会触发
        if assignment.assigned_total() < subject.total_hours() {
            report.warnings.push(Diagnostic::new(
                DiagnosticCode::SubjectHoursShort,
                id,
                format!(
                    "{}: {}h/{}h assigned",
                    subject.name,
                    assignment.assigned_total(),
                    subject.total_hours()
                ),
            ));
        }

        if subject.needs_lab_staff() {
            let needed = assistants_needed(subject, self.ratio);
            let has = assignment.assistants.len();
            if needed as usize > has {
                report.warnings.push(Diagnostic::new(
                    DiagnosticCode::LabAssistantShortfall,
                    id,
                    format!(
                        "{}: Needs {} lab assistants, has {}",
                        subject.name, needed, has
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_load_bands() {
        assert_eq!(classify_load(17.0, 16), LoadBand::Overloaded);
        assert_eq!(classify_load(16.0, 16), LoadBand::Optimal);
        assert_eq!(classify_load(14.0, 16), LoadBand::Optimal);
        assert_eq!(classify_load(12.8, 16), LoadBand::Optimal);
        assert_eq!(classify_load(12.0, 16), LoadBand::Neutral);
        assert_eq!(classify_load(8.0, 16), LoadBand::Neutral);
        assert_eq!(classify_load(5.0, 16), LoadBand::Underutilized);
        assert_eq!(classify_load(0.5, 16), LoadBand::Underutilized);
        assert_eq!(classify_load(0.0, 16), LoadBand::Neutral);
    }
}
