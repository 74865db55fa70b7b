// ==========================================
// 测试数据构建器 - 教师 / 课程 / 目录
// ==========================================

use std::sync::Arc;
use teaching_load_planner::domain::{Subject, SubjectType, Teacher};
use teaching_load_planner::repository::{AssignmentStore, Catalog};

// ==========================================
// Teacher 构建器
// ==========================================

pub struct TeacherBuilder {
    teacher_id: String,
    name: Option<String>,
    initials: Option<String>,
    max_hours: u32,
    department: String,
}

impl TeacherBuilder {
    pub fn new(teacher_id: &str) -> Self {
        Self {
            teacher_id: teacher_id.to_string(),
            name: None,
            initials: None,
            max_hours: 16,
            department: "Physics".to_string(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn initials(mut self, initials: &str) -> Self {
        self.initials = Some(initials.to_string());
        self
    }

    pub fn max_hours(mut self, max_hours: u32) -> Self {
        self.max_hours = max_hours;
        self
    }

    pub fn department(mut self, department: &str) -> Self {
        self.department = department.to_string();
        self
    }

    pub fn build(self) -> Teacher {
        let name = self
            .name
            .unwrap_or_else(|| format!("Teacher {}", self.teacher_id));
        let initials = self.initials.unwrap_or_else(|| self.teacher_id.clone());
        Teacher::new(
            self.teacher_id,
            name,
            initials,
            self.max_hours,
            self.department,
        )
    }
}

// ==========================================
// Subject 构建器
// ==========================================

pub struct SubjectBuilder {
    subject: Subject,
}

impl SubjectBuilder {
    /// 默认: B.Sc. Physics 第 1 学期 DSC, 3-0-0, 无实验, 40 人
    pub fn new(subject_id: &str) -> Self {
        Self {
            subject: Subject {
                subject_id: subject_id.to_string(),
                name: format!("Subject {}", subject_id),
                course: "B.Sc. Physics".to_string(),
                semester: 1,
                section: None,
                subject_type: SubjectType::Dsc,
                department: "Physics".to_string(),
                le: 3,
                tu: 0,
                pr: 0,
                has_lab: false,
                students: 40,
                is_merged: false,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.subject.name = name.to_string();
        self
    }

    pub fn course(mut self, course: &str) -> Self {
        self.subject.course = course.to_string();
        self
    }

    pub fn semester(mut self, semester: u8) -> Self {
        self.subject.semester = semester;
        self
    }

    pub fn section(mut self, section: &str) -> Self {
        self.subject.section = Some(section.to_string());
        self
    }

    pub fn subject_type(mut self, subject_type: SubjectType) -> Self {
        self.subject.subject_type = subject_type;
        self
    }

    pub fn hours(mut self, le: u32, tu: u32, pr: u32) -> Self {
        self.subject.le = le;
        self.subject.tu = tu;
        self.subject.pr = pr;
        self
    }

    /// 设置实验课时并标记 Has_Lab
    pub fn lab(mut self, pr: u32, students: u32) -> Self {
        self.subject.pr = pr;
        self.subject.has_lab = true;
        self.subject.students = students;
        self
    }

    pub fn students(mut self, students: u32) -> Self {
        self.subject.students = students;
        self
    }

    pub fn build(self) -> Subject {
        self.subject
    }
}

// ==========================================
// 目录 / 存储 快捷构建
// ==========================================

pub fn catalog(teachers: Vec<Teacher>, subjects: Vec<Subject>) -> Arc<Catalog> {
    Arc::new(Catalog::new(teachers, subjects).expect("测试目录构建失败"))
}

pub fn store(teachers: Vec<Teacher>, subjects: Vec<Subject>) -> AssignmentStore {
    AssignmentStore::new(catalog(teachers, subjects))
}

/// 标准小目录
///
/// 教师: X (16h), Y (16h), Z (12h), W (20h)
/// 课程:
/// - OPT  Optics       3-0-2 实验, 70 人
/// - MECH Mechanics    3-1-0
/// - ELEC Electronics  2-0-4 实验, 45 人
pub fn sample_catalog() -> Arc<Catalog> {
    catalog(
        vec![
            TeacherBuilder::new("X").name("Xavier Roy").initials("XR").build(),
            TeacherBuilder::new("Y").name("Yamini Iyer").initials("YI").build(),
            TeacherBuilder::new("Z")
                .name("Zoya Khan")
                .initials("ZK")
                .max_hours(12)
                .build(),
            TeacherBuilder::new("W")
                .name("Wasim Ali")
                .initials("WA")
                .max_hours(20)
                .build(),
        ],
        vec![
            SubjectBuilder::new("OPT")
                .name("Optics")
                .hours(3, 0, 2)
                .lab(2, 70)
                .build(),
            SubjectBuilder::new("MECH")
                .name("Mechanics")
                .hours(3, 1, 0)
                .build(),
            SubjectBuilder::new("ELEC")
                .name("Electronics")
                .semester(3)
                .hours(2, 0, 4)
                .lab(4, 45)
                .build(),
        ],
    )
}
