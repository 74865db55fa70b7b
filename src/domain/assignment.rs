// ==========================================
// 教学工作量分配系统 - 任课分配领域模型
// ==========================================
// Assignment: 课程 → 主讲/合讲/助教 (每门课至多一条)
// PlanState: 持久化记录 (分配 + 锁定集合 + 教师休息日偏好)
// ==========================================

use crate::domain::subject::Subject;
use crate::domain::types::{Role, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// MemberList - 合讲/助教名单
// ==========================================
// 按加入顺序保存, 不含重复ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct MemberList(Vec<String>);

impl MemberList {
    pub fn contains(&self, teacher_id: &str) -> bool {
        self.0.iter().any(|id| id == teacher_id)
    }

    /// 追加到末尾; 已存在时返回 false
    pub fn insert(&mut self, teacher_id: impl Into<String>) -> bool {
        let teacher_id = teacher_id.into();
        if self.contains(&teacher_id) {
            return false;
        }
        self.0.push(teacher_id);
        true
    }

    pub fn remove(&mut self, teacher_id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|id| id != teacher_id);
        self.0.len() != before
    }

    pub fn retain(&mut self, keep: impl FnMut(&String) -> bool) {
        self.0.retain(keep);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for MemberList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut list = MemberList::default();
        for teacher_id in iter {
            list.insert(teacher_id);
        }
        list
    }
}

// 外部记录中的重复ID在此去除
impl From<Vec<String>> for MemberList {
    fn from(ids: Vec<String>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<MemberList> for Vec<String> {
    fn from(list: MemberList) -> Self {
        list.0
    }
}

impl<'a> IntoIterator for &'a MemberList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ==========================================
// Assignment - 任课分配
// ==========================================
// 红线: 同一教师在一门课上至多持有一种角色
// 红线: assigned_le+assigned_tu+assigned_pr <= 课程 le+tu+pr
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub main_teacher: String,
    #[serde(default)]
    pub co_teachers: MemberList,
    #[serde(default)]
    pub assistants: MemberList,

    // ===== 计入课时 (创建时从课程复制) =====
    pub assigned_le: u32,
    pub assigned_tu: u32,
    pub assigned_pr: u32,
}

impl Assignment {
    /// 首次拖入教师时创建: 课时全额复制自课程
    pub fn create(subject: &Subject, main_teacher: impl Into<String>) -> Self {
        Self {
            main_teacher: main_teacher.into(),
            co_teachers: MemberList::default(),
            assistants: MemberList::default(),
            assigned_le: subject.le,
            assigned_tu: subject.tu,
            assigned_pr: subject.pr,
        }
    }

    /// 查询教师在本课程上的角色
    pub fn role_of(&self, teacher_id: &str) -> Option<Role> {
        if self.main_teacher == teacher_id {
            Some(Role::Main)
        } else if self.co_teachers.contains(teacher_id) {
            Some(Role::CoTeacher)
        } else if self.assistants.contains(teacher_id) {
            Some(Role::LabAssistant)
        } else {
            None
        }
    }

    pub fn assigned_total(&self) -> u32 {
        self.assigned_le
            .saturating_add(self.assigned_tu)
            .saturating_add(self.assigned_pr)
    }

    /// 按角色计入的课时
    ///
    /// - 主讲/合讲: 全额 (合讲不拆分课时, 双方均须到堂)
    /// - 助教: 实验课时的一半, 可为小数
    pub fn credited_hours(&self, role: Role) -> f64 {
        match role {
            Role::Main | Role::CoTeacher => f64::from(self.assigned_total()),
            Role::LabAssistant => f64::from(self.assigned_pr) / 2.0,
        }
    }

    /// 修正角色重叠 (用于加载外部记录)
    ///
    /// 返回被丢弃的重复项数量
    pub fn normalize_roles(&mut self) -> usize {
        let before = self.co_teachers.len() + self.assistants.len();
        self.co_teachers.remove(&self.main_teacher);
        let main = self.main_teacher.clone();
        let co_teachers = &self.co_teachers;
        self.assistants
            .retain(|id| *id != main && !co_teachers.contains(id.as_str()));
        before - (self.co_teachers.len() + self.assistants.len())
    }
}

// ==========================================
// TeacherPreference - 教师偏好
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherPreference {
    pub off_days: BTreeSet<Weekday>,
}

// ==========================================
// PlanState - 持久化记录
// ==========================================
// 缺失字段一律按空处理, 空记录即"无历史状态"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanState {
    pub assignments: BTreeMap<String, Assignment>,
    pub locked: BTreeSet<String>,
    pub preferences: BTreeMap<String, TeacherPreference>,
}

impl PlanState {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.locked.is_empty() && self.preferences.is_empty()
    }

    /// 从 JSON 文本解析; 空文本或 null 视为空记录
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let parsed: Option<PlanState> = serde_json::from_str(raw)?;
        Ok(parsed.unwrap_or_default())
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
