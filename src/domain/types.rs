// ==========================================
// 教学工作量分配系统 - 领域类型定义
// ==========================================
// 课程类型 / 星期 / 任课角色 / 学期类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 课程类型 (Subject Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectType {
    Dsc, // 专业核心课
    Dse, // 专业选修课
    Ge,  // 通识选修课
    Sec, // 技能提升课
    Vac, // 增值课程
    Aec, // 能力提升课
}

impl SubjectType {
    pub const ALL: [SubjectType; 6] = [
        SubjectType::Dsc,
        SubjectType::Dse,
        SubjectType::Ge,
        SubjectType::Sec,
        SubjectType::Vac,
        SubjectType::Aec,
    ];

    /// 该学年开设的课程类型
    ///
    /// 第 1 学年无 DSE，第 3 学年起停开 VAC/AEC，第 4 学年仅保留 DSC/DSE/GE
    pub fn allowed_for_year(year: u8) -> &'static [SubjectType] {
        match year {
            1 => &[
                SubjectType::Dsc,
                SubjectType::Ge,
                SubjectType::Sec,
                SubjectType::Vac,
                SubjectType::Aec,
            ],
            2 => &SubjectType::ALL,
            3 => &[
                SubjectType::Dsc,
                SubjectType::Dse,
                SubjectType::Ge,
                SubjectType::Sec,
            ],
            4 => &[SubjectType::Dsc, SubjectType::Dse, SubjectType::Ge],
            _ => &[],
        }
    }

    /// 该类型课程的标准周课时 (le, tu, pr)
    ///
    /// DSC/DSE/GE 为 4 学分课, SEC/VAC/AEC 为 2 学分课; 实验 2 课时折 1 学分
    pub fn requirement(&self, has_lab: bool) -> (u32, u32, u32) {
        match (self, has_lab) {
            (SubjectType::Dsc | SubjectType::Dse | SubjectType::Ge, false) => (3, 1, 0),
            (SubjectType::Dsc | SubjectType::Dse | SubjectType::Ge, true) => (3, 0, 2),
            (SubjectType::Sec | SubjectType::Vac | SubjectType::Aec, false) => (2, 0, 0),
            (SubjectType::Sec | SubjectType::Vac | SubjectType::Aec, true) => (0, 0, 4),
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectType::Dsc => write!(f, "DSC"),
            SubjectType::Dse => write!(f, "DSE"),
            SubjectType::Ge => write!(f, "GE"),
            SubjectType::Sec => write!(f, "SEC"),
            SubjectType::Vac => write!(f, "VAC"),
            SubjectType::Aec => write!(f, "AEC"),
        }
    }
}

impl FromStr for SubjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DSC" => Ok(SubjectType::Dsc),
            "DSE" => Ok(SubjectType::Dse),
            "GE" => Ok(SubjectType::Ge),
            "SEC" => Ok(SubjectType::Sec),
            "VAC" => Ok(SubjectType::Vac),
            "AEC" => Ok(SubjectType::Aec),
            other => Err(format!("未知课程类型: {}", other)),
        }
    }
}

// ==========================================
// 星期 (Weekday)
// ==========================================
// 教师休息日偏好的取值域, 仅作展示, 不参与校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
        }
    }

    fn full_name(&self) -> &'static str {
        match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    /// 接受缩写或全称, 不区分大小写 ("Mon" / "monday")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Weekday::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s) || d.full_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("未知星期: {}", s))
    }
}

// ==========================================
// 任课角色 (Role)
// ==========================================
// 同一课程上, 一名教师至多持有一种角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Main,         // 主讲
    CoTeacher,    // 合讲 (全额计课时)
    LabAssistant, // 实验助教 (计实验课时的一半)
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Main => write!(f, "Main"),
            Role::CoTeacher => write!(f, "Co-teacher"),
            Role::LabAssistant => write!(f, "Lab Assistant"),
        }
    }
}

// ==========================================
// 学期类型 (Semester Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemesterType {
    Odd,  // 1/3/5/7
    Even, // 2/4/6/8
}

impl SemesterType {
    pub fn matches(&self, semester: u8) -> bool {
        match self {
            SemesterType::Odd => semester % 2 == 1,
            SemesterType::Even => semester > 0 && semester % 2 == 0,
        }
    }
}

impl fmt::Display for SemesterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemesterType::Odd => write!(f, "odd"),
            SemesterType::Even => write!(f, "even"),
        }
    }
}

impl FromStr for SemesterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "odd" => Ok(SemesterType::Odd),
            "even" => Ok(SemesterType::Even),
            other => Err(format!("未知学期类型: {}", other)),
        }
    }
}
