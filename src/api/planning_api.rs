// ==========================================
// 教学工作量分配系统 - 分配规划 API
// ==========================================
// 职责: 对外门面, 串联 分配存储 / 引擎 / 配置 / 持久化 / 导出
// 红线: 破坏性操作在此确认 (锁定课程移除主讲 / 清空未锁定分配)
// 红线: 每次派生查询读取最新配比, 不缓存派生结果
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, LabRatio};
use crate::domain::{Assignment, ValidationReport, Weekday, Workload};
use crate::engine::{
    AssistantCandidate, AssistantSuggestion, CatalogChecker, CatalogIssue, LabAllocationAdvisor,
    PlanValidator, WorkloadCalculator,
};
use crate::exporter::CsvExporter;
use crate::repository::{
    AssignOutcome, AssignmentStore, Catalog, MemberOutcome, PlanStateRepository, RepositoryError,
};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub const ACTION_REMOVE_LOCKED_MAIN: &str = "remove_main_teacher";
pub const ACTION_RESET_UNLOCKED: &str = "reset_unlocked";

// ==========================================
// PlanningApi - 分配规划 API
// ==========================================

/// 分配规划API
///
/// 职责：
/// 1. 任课分配变更 (主讲/合讲/助教/锁定/休息日)
/// 2. 工作量、助教建议、校验报告查询
/// 3. 分配状态保存与重新加载
/// 4. 分配结果导出
pub struct PlanningApi {
    store: AssignmentStore,
    config_manager: Arc<ConfigManager>,
    plan_state_repo: Arc<PlanStateRepository>,
}

impl PlanningApi {
    /// 以空分配状态创建
    pub fn new(
        catalog: Arc<Catalog>,
        config_manager: Arc<ConfigManager>,
        plan_state_repo: Arc<PlanStateRepository>,
    ) -> Self {
        Self {
            store: AssignmentStore::new(catalog),
            config_manager,
            plan_state_repo,
        }
    }

    /// 创建并载入已保存的分配状态
    pub fn open(
        catalog: Arc<Catalog>,
        config_manager: Arc<ConfigManager>,
        plan_state_repo: Arc<PlanStateRepository>,
    ) -> ApiResult<Self> {
        let mut api = Self::new(catalog, config_manager, plan_state_repo);
        api.reload()?;
        Ok(api)
    }

    pub fn catalog(&self) -> &Catalog {
        self.store.catalog()
    }

    pub fn store(&self) -> &AssignmentStore {
        &self.store
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    fn lab_ratio(&self) -> ApiResult<LabRatio> {
        Ok(self.config_manager.get_lab_ratio()?)
    }

    // ==========================================
    // 分配变更
    // ==========================================

    pub fn assign(&mut self, subject_id: &str, teacher_id: &str) -> ApiResult<AssignOutcome> {
        Ok(self.store.assign(subject_id, teacher_id)?)
    }

    pub fn add_assistant(&mut self, subject_id: &str, teacher_id: &str) -> ApiResult<MemberOutcome> {
        Ok(self.store.add_assistant(subject_id, teacher_id)?)
    }

    /// 移除主讲 (删除整条分配)
    ///
    /// # 参数
    /// - confirmed: 调用方是否已确认; 课程锁定且未确认时拒绝
    ///
    /// # 返回
    /// - Err(ConfirmationRequired): 课程已锁定且未确认
    /// - Ok(None): 该课程本无分配
    pub fn remove_main_teacher(
        &mut self,
        subject_id: &str,
        confirmed: bool,
    ) -> ApiResult<Option<Assignment>> {
        self.store.catalog().require_subject(subject_id)?;
        if self.store.is_locked(subject_id) && !confirmed {
            warn!(subject_id, "锁定课程移除主讲, 等待确认");
            return Err(ApiError::ConfirmationRequired {
                action: ACTION_REMOVE_LOCKED_MAIN.to_string(),
                target: subject_id.to_string(),
            });
        }
        Ok(self.store.remove_main(subject_id))
    }

    pub fn remove_co_teacher(&mut self, subject_id: &str, teacher_id: &str) -> ApiResult<bool> {
        Ok(self.store.remove_co_teacher(subject_id, teacher_id)?)
    }

    pub fn remove_assistant(&mut self, subject_id: &str, teacher_id: &str) -> ApiResult<bool> {
        Ok(self.store.remove_assistant(subject_id, teacher_id)?)
    }

    pub fn toggle_lock(&mut self, subject_id: &str) -> ApiResult<bool> {
        Ok(self.store.toggle_lock(subject_id)?)
    }

    /// 清空未锁定分配
    ///
    /// # 返回
    /// - Err(ConfirmationRequired): 未确认
    /// - Ok(n): 被丢弃的分配数量
    pub fn reset_unlocked(&mut self, confirmed: bool) -> ApiResult<usize> {
        if !confirmed {
            let pending = self
                .store
                .assignments()
                .filter(|(subject_id, _)| !self.store.is_locked(subject_id))
                .count();
            return Err(ApiError::ConfirmationRequired {
                action: ACTION_RESET_UNLOCKED.to_string(),
                target: format!("{} unlocked assignments", pending),
            });
        }
        Ok(self.store.reset_unlocked())
    }

    /// 切换教师休息日 (星期名如 "Mon" / "monday")
    pub fn set_off_day(&mut self, teacher_id: &str, day: &str) -> ApiResult<bool> {
        let day = day.parse::<Weekday>().map_err(ApiError::InvalidInput)?;
        Ok(self.store.set_off_day(teacher_id, day)?)
    }

    pub fn off_days(&self, teacher_id: &str) -> ApiResult<BTreeSet<Weekday>> {
        self.store.catalog().require_teacher(teacher_id)?;
        Ok(self.store.off_days(teacher_id))
    }

    // ==========================================
    // 派生查询
    // ==========================================

    pub fn workload(&self, teacher_id: &str) -> ApiResult<Workload> {
        self.store.catalog().require_teacher(teacher_id)?;
        Ok(WorkloadCalculator::new(&self.store).compute_workload(teacher_id))
    }

    /// 全部教师工作量 (目录顺序)
    pub fn workloads(&self) -> Vec<Workload> {
        WorkloadCalculator::new(&self.store).compute_all()
    }

    pub fn validate(&self) -> ApiResult<ValidationReport> {
        Ok(PlanValidator::new(&self.store, self.lab_ratio()?).validate())
    }

    pub fn assistants_needed(&self, subject_id: &str) -> ApiResult<u32> {
        let subject = self.store.catalog().require_subject(subject_id)?;
        Ok(LabAllocationAdvisor::new(&self.store, self.lab_ratio()?).assistants_needed(subject))
    }

    pub fn available_candidates(&self, subject_id: &str) -> ApiResult<Vec<AssistantCandidate<'_>>> {
        let advisor = LabAllocationAdvisor::new(&self.store, self.lab_ratio()?);
        Ok(advisor.available_candidates(subject_id)?)
    }

    pub fn suggest(&self, subject_id: &str) -> ApiResult<AssistantSuggestion<'_>> {
        let advisor = LabAllocationAdvisor::new(&self.store, self.lab_ratio()?);
        Ok(advisor.suggest(subject_id)?)
    }

    /// 按建议补足助教缺口
    ///
    /// # 返回
    /// - Ok(ids): 本次新增的助教教师ID (按建议顺序)
    /// - Err(NotFound): 课程尚无分配
    pub fn fill_assistant_shortfall(&mut self, subject_id: &str) -> ApiResult<Vec<String>> {
        if self.store.assignment(subject_id).is_none() {
            return Err(RepositoryError::assignment_not_found(subject_id).into());
        }

        let picked: Vec<String> = self
            .suggest(subject_id)?
            .candidates
            .iter()
            .map(|c| c.teacher.teacher_id.clone())
            .collect();

        let mut added = Vec::with_capacity(picked.len());
        for teacher_id in picked {
            if self.store.add_assistant(subject_id, &teacher_id)? == MemberOutcome::Added {
                added.push(teacher_id);
            }
        }

        info!(subject_id, added = added.len(), "助教缺口已补足");
        Ok(added)
    }

    /// 目录一致性提示 (按当前学期类型)
    pub fn catalog_issues(&self) -> ApiResult<Vec<CatalogIssue>> {
        let semester_type = self.config_manager.get_semester_type()?;
        Ok(CatalogChecker::new(semester_type).check(self.store.catalog()))
    }

    // ==========================================
    // 持久化 / 导出
    // ==========================================

    pub fn save(&self) -> ApiResult<()> {
        Ok(self.plan_state_repo.save(&self.store.snapshot())?)
    }

    /// 丢弃内存状态, 从数据库重新载入
    pub fn reload(&mut self) -> ApiResult<()> {
        let state = self.plan_state_repo.load()?;
        self.store = AssignmentStore::restore(self.store.catalog_arc(), state);
        info!(assignments = self.store.assignment_count(), "分配状态已载入");
        Ok(())
    }

    pub fn export_csv(&self, path: &Path) -> ApiResult<usize> {
        Ok(CsvExporter::new(&self.store).export_to_path(path)?)
    }
}
