// ==========================================
// 教学工作量分配系统 - 工作量计算引擎
// ==========================================
// 输入: AssignmentStore 当前快照 (+ 目录)
// 输出: 每位教师的计入课时、课程数、逐课程明细
// 红线: 纯读取计算, 无缓存
// ==========================================

use crate::domain::{Role, Workload, WorkloadDetail};
use crate::repository::AssignmentStore;

// ==========================================
// WorkloadCalculator - 工作量计算引擎
// ==========================================
pub struct WorkloadCalculator<'a> {
    store: &'a AssignmentStore,
}

impl<'a> WorkloadCalculator<'a> {
    pub fn new(store: &'a AssignmentStore) -> Self {
        Self { store }
    }

    /// 计算单个教师的工作量
    ///
    /// 规则:
    /// 1) 主讲: 计 le+tu+pr 全额, 课程数 +1
    /// 2) 合讲: 同样计全额, 课程数 +1 (不与主讲拆分)
    /// 3) 助教: 计 pr/2, 课程数不变
    pub fn compute_workload(&self, teacher_id: &str) -> Workload {
        let mut workload = Workload {
            teacher_id: teacher_id.to_string(),
            ..Workload::default()
        };

        for (subject_id, assignment) in self.store.assignments() {
            let Some(role) = assignment.role_of(teacher_id) else {
                continue;
            };

            let hours = assignment.credited_hours(role);
            workload.total_hours += hours;
            if role != Role::LabAssistant {
                workload.subject_count += 1;
            }

            let subject_name = self
                .store
                .catalog()
                .subject(subject_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| subject_id.clone());

            workload.details.push(WorkloadDetail {
                subject_id: subject_id.clone(),
                subject_name,
                role,
                hours,
            });
        }

        workload
    }

    /// 目录中全部教师的工作量 (目录顺序)
    pub fn compute_all(&self) -> Vec<Workload> {
        self.store
            .catalog()
            .teachers()
            .iter()
            .map(|t| self.compute_workload(&t.teacher_id))
            .collect()
    }
}
