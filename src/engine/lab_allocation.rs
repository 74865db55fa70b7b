// ==========================================
// 教学工作量分配系统 - 实验助教配置建议引擎
// ==========================================
// 输入: 课程 + 工作量 + 助教配比
// 输出: 所需助教人数; 候选教师 (按当前负载升序)
// 红线: 只排序不落库, 提交由调用方逐个 add_assistant
// ==========================================

use crate::config::LabRatio;
use crate::domain::{Subject, Teacher};
use crate::engine::workload::WorkloadCalculator;
use crate::repository::{AssignmentStore, RepositoryResult};

/// 候选教师需保留的最小余量 (小时)
pub const CANDIDATE_HEADROOM_HOURS: f64 = 1.0;

/// 候选助教
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantCandidate<'a> {
    pub teacher: &'a Teacher,
    pub total_hours: f64, // 当前计入课时
}

/// 助教补缺建议
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantSuggestion<'a> {
    pub subject_id: String,
    pub needed: u32,
    pub assigned: u32,
    pub candidates: Vec<AssistantCandidate<'a>>, // 前 needed-assigned 名候选
}

impl AssistantSuggestion<'_> {
    pub fn shortfall(&self) -> u32 {
        self.needed.saturating_sub(self.assigned)
    }
}

/// 所需助教人数: 无实验或实验课时为 0 时为 0, 否则 ceil(选课人数 / 配比)
pub fn assistants_needed(subject: &Subject, ratio: LabRatio) -> u32 {
    if !subject.needs_lab_staff() {
        return 0;
    }
    subject.students.div_ceil(ratio.get())
}

// ==========================================
// LabAllocationAdvisor - 实验助教配置建议
// ==========================================
pub struct LabAllocationAdvisor<'a> {
    store: &'a AssignmentStore,
    ratio: LabRatio,
}

impl<'a> LabAllocationAdvisor<'a> {
    pub fn new(store: &'a AssignmentStore, ratio: LabRatio) -> Self {
        Self { store, ratio }
    }

    pub fn ratio(&self) -> LabRatio {
        self.ratio
    }

    pub fn assistants_needed(&self, subject: &Subject) -> u32 {
        assistants_needed(subject, self.ratio)
    }

    /// 可选助教候选
    ///
    /// 过滤:
    /// 1) 在该课程上未持有任何角色
    /// 2) 当前课时 < 上限 - 1 (保留 1 小时余量)
    ///
    /// 排序: 当前课时升序, 相同者保持目录顺序
    ///
    /// # 返回
    /// - Err(NotFound): 课程不在目录中
    pub fn available_candidates(
        &self,
        subject_id: &str,
    ) -> RepositoryResult<Vec<AssistantCandidate<'a>>> {
        let store: &'a AssignmentStore = self.store;
        let catalog = store.catalog();
        catalog.require_subject(subject_id)?;

        let calculator = WorkloadCalculator::new(store);
        let mut candidates: Vec<AssistantCandidate<'a>> = catalog
            .teachers()
            .iter()
            .filter(|t| store.role_of(subject_id, &t.teacher_id).is_none())
            .map(|t| AssistantCandidate {
                teacher: t,
                total_hours: calculator.compute_workload(&t.teacher_id).total_hours,
            })
            .filter(|c| c.total_hours < c.teacher.max_hours_f64() - CANDIDATE_HEADROOM_HOURS)
            .collect();

        // sort_by 为稳定排序, 平局保持目录顺序
        candidates.sort_by(|a, b| a.total_hours.total_cmp(&b.total_hours));
        Ok(candidates)
    }

    /// 补缺建议: 取候选列表前 (needed - assigned) 名
    pub fn suggest(&self, subject_id: &str) -> RepositoryResult<AssistantSuggestion<'a>> {
        let subject = self.store.catalog().require_subject(subject_id)?;
        let needed = self.assistants_needed(subject);
        let assigned = self
            .store
            .assignment(subject_id)
            .map(|a| a.assistants.len() as u32)
            .unwrap_or(0);

        let shortfall = needed.saturating_sub(assigned) as usize;
        let candidates = if shortfall == 0 {
            Vec::new()
        } else {
            let mut all = self.available_candidates(subject_id)?;
            all.truncate(shortfall);
            all
        };

        Ok(AssistantSuggestion {
            subject_id: subject_id.to_string(),
            needed,
            assigned,
            candidates,
        })
    }
}
