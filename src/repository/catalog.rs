// ==========================================
// 教学工作量分配系统 - 静态目录
// ==========================================
// 教师/课程只读注册表, 进程启动时一次性构造
// 其他组件按 ID 查找, 只借用不复制
// ==========================================

use crate::domain::{Subject, Teacher};
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::collections::HashMap;

// ==========================================
// Catalog - 教师与课程目录
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    teachers: Vec<Teacher>,
    subjects: Vec<Subject>,
    teacher_index: HashMap<String, usize>,
    subject_index: HashMap<String, usize>,
}

impl Catalog {
    /// 构造目录
    ///
    /// # 返回
    /// - Err(UniqueConstraintViolation): 存在重复的教师ID或课程ID
    pub fn new(teachers: Vec<Teacher>, subjects: Vec<Subject>) -> RepositoryResult<Self> {
        let mut teacher_index = HashMap::with_capacity(teachers.len());
        for (idx, teacher) in teachers.iter().enumerate() {
            if teacher_index.insert(teacher.teacher_id.clone(), idx).is_some() {
                return Err(RepositoryError::UniqueConstraintViolation(format!(
                    "重复的教师ID: {}",
                    teacher.teacher_id
                )));
            }
        }

        let mut subject_index = HashMap::with_capacity(subjects.len());
        for (idx, subject) in subjects.iter().enumerate() {
            if subject_index.insert(subject.subject_id.clone(), idx).is_some() {
                return Err(RepositoryError::UniqueConstraintViolation(format!(
                    "重复的课程ID: {}",
                    subject.subject_id
                )));
            }
        }

        Ok(Self {
            teachers,
            subjects,
            teacher_index,
            subject_index,
        })
    }

    /// 教师列表 (声明顺序)
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// 课程列表 (声明顺序)
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn teacher(&self, teacher_id: &str) -> Option<&Teacher> {
        self.teacher_index
            .get(teacher_id)
            .map(|&idx| &self.teachers[idx])
    }

    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subject_index
            .get(subject_id)
            .map(|&idx| &self.subjects[idx])
    }

    pub fn require_teacher(&self, teacher_id: &str) -> RepositoryResult<&Teacher> {
        self.teacher(teacher_id)
            .ok_or_else(|| RepositoryError::teacher_not_found(teacher_id))
    }

    pub fn require_subject(&self, subject_id: &str) -> RepositoryResult<&Subject> {
        self.subject(subject_id)
            .ok_or_else(|| RepositoryError::subject_not_found(subject_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubjectType;

    fn teacher(id: &str) -> Teacher {
        Teacher::new(id, format!("Teacher {}", id), id, 16, "Physics")
    }

    fn subject(id: &str) -> Subject {
        Subject {
            subject_id: id.to_string(),
            name: format!("Subject {}", id),
            course: "B.Sc. Physics".to_string(),
            semester: 1,
            section: None,
            subject_type: SubjectType::Dsc,
            department: "Physics".to_string(),
            le: 3,
            tu: 0,
            pr: 2,
            has_lab: true,
            students: 30,
            is_merged: false,
        }
    }

    #[test]
    fn test_lookup_by_id_keeps_declared_order() {
        let catalog = Catalog::new(
            vec![teacher("T2"), teacher("T1")],
            vec![subject("S1")],
        )
        .unwrap();

        assert_eq!(catalog.teachers()[0].teacher_id, "T2");
        assert_eq!(catalog.teacher("T1").unwrap().name, "Teacher T1");
        assert!(catalog.subject("S9").is_none());
        assert!(catalog.require_subject("S9").unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![teacher("T1"), teacher("T1")], vec![]);
        assert!(matches!(
            result,
            Err(RepositoryError::UniqueConstraintViolation(_))
        ));

        let result = Catalog::new(vec![], vec![subject("S1"), subject("S1")]);
        assert!(matches!(
            result,
            Err(RepositoryError::UniqueConstraintViolation(_))
        ));
    }
}
