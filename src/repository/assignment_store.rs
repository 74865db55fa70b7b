// ==========================================
// 教学工作量分配系统 - 任课分配存储
// ==========================================
// 职责: 独占持有 分配记录 / 锁定集合 / 教师休息日偏好
// 红线: 所有变更必须经由本组件; 不做 I/O; 不缓存派生数据
// 红线: 破坏性操作 (remove_main / reset_unlocked) 不在此处确认, 由调用方把关
// ==========================================

use crate::domain::{Assignment, PlanState, Role, TeacherPreference, Weekday};
use crate::repository::catalog::Catalog;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// assign 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    CreatedMain,     // 新建分配, 该教师为主讲
    AddedCoTeacher,  // 已有分配, 追加为合讲
    Unchanged(Role), // 该教师已持有角色, 忽略
}

/// add_assistant 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberOutcome {
    Added,
    Unchanged(Role),
}

// ==========================================
// AssignmentStore - 任课分配存储
// ==========================================
#[derive(Debug, Clone)]
pub struct AssignmentStore {
    catalog: Arc<Catalog>,
    assignments: BTreeMap<String, Assignment>,
    locked: BTreeSet<String>,
    preferences: BTreeMap<String, BTreeSet<Weekday>>,
}

impl AssignmentStore {
    /// 创建空存储
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            assignments: BTreeMap::new(),
            locked: BTreeSet::new(),
            preferences: BTreeMap::new(),
        }
    }

    /// 从持久化记录恢复
    ///
    /// 记录原样载入 (包括目录中已不存在的课程), 仅修正角色重叠
    pub fn restore(catalog: Arc<Catalog>, state: PlanState) -> Self {
        let mut assignments = state.assignments;
        for (subject_id, assignment) in assignments.iter_mut() {
            let dropped = assignment.normalize_roles();
            if dropped > 0 {
                warn!(subject_id = %subject_id, dropped, "加载记录存在角色重叠, 已丢弃重复项");
            }
            if catalog.subject(subject_id).is_none() {
                warn!(subject_id = %subject_id, "加载记录引用了目录中不存在的课程");
            }
        }

        let preferences = state
            .preferences
            .into_iter()
            .filter(|(_, pref)| !pref.off_days.is_empty())
            .map(|(teacher_id, pref)| (teacher_id, pref.off_days))
            .collect();

        info!(
            assignments = assignments.len(),
            locked = state.locked.len(),
            "任课分配状态已恢复"
        );

        Self {
            catalog,
            assignments,
            locked: state.locked,
            preferences,
        }
    }

    /// 导出持久化记录
    pub fn snapshot(&self) -> PlanState {
        PlanState {
            assignments: self.assignments.clone(),
            locked: self.locked.clone(),
            preferences: self
                .preferences
                .iter()
                .map(|(teacher_id, days)| {
                    (
                        teacher_id.clone(),
                        TeacherPreference {
                            off_days: days.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_arc(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn assignment(&self, subject_id: &str) -> Option<&Assignment> {
        self.assignments.get(subject_id)
    }

    /// 全部分配 (按课程ID排序)
    pub fn assignments(&self) -> impl Iterator<Item = (&String, &Assignment)> {
        self.assignments.iter()
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn role_of(&self, subject_id: &str, teacher_id: &str) -> Option<Role> {
        self.assignments
            .get(subject_id)
            .and_then(|a| a.role_of(teacher_id))
    }

    pub fn is_locked(&self, subject_id: &str) -> bool {
        self.locked.contains(subject_id)
    }

    pub fn locked_subjects(&self) -> &BTreeSet<String> {
        &self.locked
    }

    pub fn off_days(&self, teacher_id: &str) -> BTreeSet<Weekday> {
        self.preferences
            .get(teacher_id)
            .cloned()
            .unwrap_or_default()
    }

    // ==========================================
    // 变更
    // ==========================================

    /// 拖入教师
    ///
    /// - 无分配: 新建, 该教师为主讲, 课时从课程全额复制
    /// - 有分配且该教师无角色: 追加为合讲
    /// - 该教师已持有任一角色: 忽略
    ///
    /// # 返回
    /// - Err(NotFound): 课程或教师不在目录中
    pub fn assign(&mut self, subject_id: &str, teacher_id: &str) -> RepositoryResult<AssignOutcome> {
        let subject = self.catalog.require_subject(subject_id)?;
        self.catalog.require_teacher(teacher_id)?;

        let outcome = match self.assignments.get_mut(subject_id) {
            None => {
                self.assignments
                    .insert(subject_id.to_string(), Assignment::create(subject, teacher_id));
                AssignOutcome::CreatedMain
            }
            Some(assignment) => match assignment.role_of(teacher_id) {
                Some(role) => AssignOutcome::Unchanged(role),
                None => {
                    assignment.co_teachers.insert(teacher_id.to_string());
                    AssignOutcome::AddedCoTeacher
                }
            },
        };

        debug!(subject_id, teacher_id, ?outcome, "assign");
        Ok(outcome)
    }

    /// 添加实验助教
    ///
    /// # 返回
    /// - Err(NotFound): 课程尚无分配, 或教师不在目录中
    pub fn add_assistant(
        &mut self,
        subject_id: &str,
        teacher_id: &str,
    ) -> RepositoryResult<MemberOutcome> {
        self.catalog.require_teacher(teacher_id)?;
        let assignment = self
            .assignments
            .get_mut(subject_id)
            .ok_or_else(|| RepositoryError::assignment_not_found(subject_id))?;

        let outcome = match assignment.role_of(teacher_id) {
            Some(role) => MemberOutcome::Unchanged(role),
            None => {
                assignment.assistants.insert(teacher_id.to_string());
                MemberOutcome::Added
            }
        };

        debug!(subject_id, teacher_id, ?outcome, "add_assistant");
        Ok(outcome)
    }

    /// 移除主讲: 删除整条分配 (合讲/助教一并丢弃), 同时解除锁定
    ///
    /// # 返回
    /// 被删除的分配 (无分配时为 None)
    pub fn remove_main(&mut self, subject_id: &str) -> Option<Assignment> {
        let removed = self.assignments.remove(subject_id);
        let was_locked = self.locked.remove(subject_id);
        info!(
            subject_id,
            removed = removed.is_some(),
            was_locked,
            "移除主讲, 分配记录已删除"
        );
        removed
    }

    /// 移除合讲
    ///
    /// # 返回
    /// - Ok(true): 已移除; Ok(false): 该教师不是合讲
    /// - Err(NotFound): 课程尚无分配
    pub fn remove_co_teacher(&mut self, subject_id: &str, teacher_id: &str) -> RepositoryResult<bool> {
        let assignment = self
            .assignments
            .get_mut(subject_id)
            .ok_or_else(|| RepositoryError::assignment_not_found(subject_id))?;
        let removed = assignment.co_teachers.remove(teacher_id);
        debug!(subject_id, teacher_id, removed, "remove_co_teacher");
        Ok(removed)
    }

    /// 移除助教
    pub fn remove_assistant(&mut self, subject_id: &str, teacher_id: &str) -> RepositoryResult<bool> {
        let assignment = self
            .assignments
            .get_mut(subject_id)
            .ok_or_else(|| RepositoryError::assignment_not_found(subject_id))?;
        let removed = assignment.assistants.remove(teacher_id);
        debug!(subject_id, teacher_id, removed, "remove_assistant");
        Ok(removed)
    }

    /// 切换锁定 (与是否已分配无关)
    ///
    /// # 返回
    /// 切换后的锁定状态
    pub fn toggle_lock(&mut self, subject_id: &str) -> RepositoryResult<bool> {
        self.catalog.require_subject(subject_id)?;
        let locked = if self.locked.remove(subject_id) {
            false
        } else {
            self.locked.insert(subject_id.to_string());
            true
        };
        debug!(subject_id, locked, "toggle_lock");
        Ok(locked)
    }

    /// 清空未锁定课程的分配, 仅保留锁定课程
    ///
    /// # 返回
    /// 被丢弃的分配数量
    pub fn reset_unlocked(&mut self) -> usize {
        let before = self.assignments.len();
        let locked = &self.locked;
        self.assignments
            .retain(|subject_id, _| locked.contains(subject_id));
        let discarded = before - self.assignments.len();
        info!(discarded, kept = self.assignments.len(), "已清空未锁定分配");
        discarded
    }

    /// 切换教师休息日
    ///
    /// # 返回
    /// 切换后该日是否为休息日
    pub fn set_off_day(&mut self, teacher_id: &str, day: Weekday) -> RepositoryResult<bool> {
        self.catalog.require_teacher(teacher_id)?;
        let days = self.preferences.entry(teacher_id.to_string()).or_default();
        let off = if days.remove(&day) {
            false
        } else {
            days.insert(day);
            true
        };
        if days.is_empty() {
            self.preferences.remove(teacher_id);
        }
        debug!(teacher_id, %day, off, "set_off_day");
        Ok(off)
    }
}
