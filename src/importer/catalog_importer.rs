// ==========================================
// 教学工作量分配系统 - 目录导入器
// ==========================================
// 输入: 目录 (teachers.csv + subjects.csv) 或 .xlsx 工作簿 (Teachers / Subjects 工作表)
// 输出: Catalog
// 流程: 文件解析 → 字段映射 → 类型转换 → Catalog::new 去重校验
// ==========================================

use crate::domain::{Subject, SubjectType, Teacher};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, RawRow};
use crate::repository::Catalog;
use std::path::Path;
use tracing::{info, warn};

pub const TEACHERS_FILE: &str = "teachers.csv";
pub const SUBJECTS_FILE: &str = "subjects.csv";
pub const TEACHERS_SHEET: &str = "Teachers";
pub const SUBJECTS_SHEET: &str = "Subjects";

// ==========================================
// CatalogImporter - 目录导入器
// ==========================================
pub struct CatalogImporter {
    default_max_hours: u32, // Max_Hours 为空时使用
}

impl CatalogImporter {
    pub fn new(default_max_hours: u32) -> Self {
        Self { default_max_hours }
    }

    /// 按路径类型分派: 目录 → CSV 对, .xlsx → 工作簿
    pub fn import(&self, path: &Path) -> ImportResult<Catalog> {
        if path.is_dir() {
            return self.import_from_dir(path);
        }
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("xlsx") => self.import_from_workbook(path),
            Some(other) => Err(ImportError::UnsupportedFormat(other.to_string())),
            None => Err(ImportError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn import_from_dir(&self, dir: &Path) -> ImportResult<Catalog> {
        let teacher_rows = CsvParser.parse_to_raw_records(&dir.join(TEACHERS_FILE))?;
        let subject_rows = CsvParser.parse_to_raw_records(&dir.join(SUBJECTS_FILE))?;
        self.build_catalog(teacher_rows, subject_rows, dir)
    }

    pub fn import_from_workbook(&self, path: &Path) -> ImportResult<Catalog> {
        let teacher_rows = ExcelParser::new(TEACHERS_SHEET).parse_to_raw_records(path)?;
        let subject_rows = ExcelParser::new(SUBJECTS_SHEET).parse_to_raw_records(path)?;
        self.build_catalog(teacher_rows, subject_rows, path)
    }

    fn build_catalog(
        &self,
        teacher_rows: Vec<RawRow>,
        subject_rows: Vec<RawRow>,
        source: &Path,
    ) -> ImportResult<Catalog> {
        let teachers = self.map_teachers(&teacher_rows)?;
        let subjects = self.map_subjects(&subject_rows)?;
        let catalog = Catalog::new(teachers, subjects)?;
        info!(
            source = %source.display(),
            teachers = catalog.teachers().len(),
            subjects = catalog.subjects().len(),
            "目录导入完成"
        );
        Ok(catalog)
    }

    // ===== 字段映射 =====

    /// 错误中的行号取自解析器记录的源文件行号
    pub fn map_teachers(&self, rows: &[RawRow]) -> ImportResult<Vec<Teacher>> {
        rows.iter()
            .map(|row| self.map_teacher(&row.fields, row.row_number))
            .collect()
    }

    pub fn map_subjects(&self, rows: &[RawRow]) -> ImportResult<Vec<Subject>> {
        rows.iter()
            .map(|row| map_subject(&row.fields, row.row_number))
            .collect()
    }

    fn map_teacher(&self, row: &RawRecord, row_number: usize) -> ImportResult<Teacher> {
        let teacher_id = required(row, "Id", row_number)?;
        let name = required(row, "Full Name", row_number)?;

        let initials = match get_string(row, "Initials") {
            Some(v) => v.to_string(),
            None => derive_initials(name),
        };

        let max_hours = match get_string(row, "Max_Hours") {
            Some(raw) => parse_u32(raw, "Max_Hours", row_number)?,
            None => self.default_max_hours,
        };

        Ok(Teacher::new(
            teacher_id,
            name,
            initials,
            max_hours,
            get_string(row, "Department").unwrap_or_default(),
        ))
    }
}

fn map_subject(row: &RawRecord, row_number: usize) -> ImportResult<Subject> {
    let name = required(row, "Subject", row_number)?.to_string();
    let course = get_string(row, "Course").unwrap_or_default().to_string();

    let semester_raw = required(row, "Semester", row_number)?;
    let semester = u8::try_from(parse_u32(semester_raw, "Semester", row_number)?)
        .ok()
        .filter(|s| *s >= 1)
        .ok_or_else(|| ImportError::TypeConversionError {
            row: row_number,
            field: "Semester".to_string(),
            message: format!("学期超出范围: {}", semester_raw),
        })?;

    let section = get_string(row, "Section").map(str::to_string);

    let subject_type = required(row, "Subject_type", row_number)?
        .parse::<SubjectType>()
        .map_err(|message| ImportError::TypeConversionError {
            row: row_number,
            field: "Subject_type".to_string(),
            message,
        })?;

    let (le, tu, pr) = parse_hours(required(row, "Hours(Le,Tu,Pr)", row_number)?, row_number)?;

    let students = match get_string(row, "Students") {
        Some(raw) => parse_u32(raw, "Students", row_number)?,
        None => 0,
    };

    let subject_id = match get_string(row, "Id") {
        Some(id) => id.to_string(),
        None => derive_subject_id(&course, semester, &name, section.as_deref()),
    };

    Ok(Subject {
        subject_id,
        name,
        course,
        semester,
        section,
        subject_type,
        department: get_string(row, "Department").unwrap_or_default().to_string(),
        le,
        tu,
        pr,
        has_lab: parse_yes_no(row, "Has_Lab", row_number)?,
        students,
        is_merged: parse_yes_no(row, "Is_Merged", row_number)?,
    })
}

/// 未提供 Id 时按 `<专业>/S<学期>/<课程名>[/<班级>]` 生成
pub fn derive_subject_id(course: &str, semester: u8, name: &str, section: Option<&str>) -> String {
    match section {
        Some(section) => format!("{}/S{}/{}/{}", course, semester, name, section),
        None => format!("{}/S{}/{}", course, semester, name),
    }
}

fn derive_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

// ==========================================
// 字段提取与类型转换
// ==========================================

/// 列名别名 (未列出的列只认标准名)
fn aliases(key: &str) -> &'static [&'static str] {
    match key {
        "Id" => &["ID"],
        "Full Name" => &["Name", "Teacher"],
        "Max_Hours" => &["Max Hours", "MaxHours"],
        "Subject_type" => &["Subject Type", "Type"],
        "Hours(Le,Tu,Pr)" => &["Hours (Le,Tu,Pr)", "Hours"],
        "Has_Lab" => &["Has Lab", "Lab"],
        "Is_Merged" => &["Is Merged", "Merged"],
        _ => &[],
    }
}

/// 非空字段值 (已去空白)
fn get_string<'r>(row: &'r RawRecord, key: &str) -> Option<&'r str> {
    std::iter::once(key)
        .chain(aliases(key).iter().copied())
        .filter_map(|name| row.get(name))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

fn required<'r>(row: &'r RawRecord, key: &str, row_number: usize) -> ImportResult<&'r str> {
    get_string(row, key).ok_or_else(|| ImportError::FieldMappingError {
        row: row_number,
        message: format!("缺少必填字段: {}", key),
    })
}

/// 整数字段; 兼容 Excel 数值单元格的 "16.0" 形式
fn parse_u32(raw: &str, field: &str, row_number: usize) -> ImportResult<u32> {
    let conversion_error = || ImportError::TypeConversionError {
        row: row_number,
        field: field.to_string(),
        message: format!("无法解析为非负整数: {}", raw),
    };

    if let Ok(v) = raw.parse::<u32>() {
        return Ok(v);
    }
    let v = raw.parse::<f64>().map_err(|_| conversion_error())?;
    if v.fract() != 0.0 || v < 0.0 || v > f64::from(u32::MAX) {
        return Err(conversion_error());
    }
    Ok(v as u32)
}

/// 课时字段 "le,tu,pr", 允许外层括号与空白
fn parse_hours(raw: &str, row_number: usize) -> ImportResult<(u32, u32, u32)> {
    let field = "Hours(Le,Tu,Pr)";
    let inner = raw.trim().trim_start_matches('(').trim_end_matches(')');
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();

    let [le, tu, pr] = parts.as_slice() else {
        return Err(ImportError::TypeConversionError {
            row: row_number,
            field: field.to_string(),
            message: format!("应为 3 段课时 le,tu,pr: {}", raw),
        });
    };

    Ok((
        parse_u32(le, field, row_number)?,
        parse_u32(tu, field, row_number)?,
        parse_u32(pr, field, row_number)?,
    ))
}

/// Yes/No 字段; 空值视为 No
fn parse_yes_no(row: &RawRecord, key: &str, row_number: usize) -> ImportResult<bool> {
    let Some(raw) = get_string(row, key) else {
        return Ok(false);
    };
    match raw.to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        _ => {
            warn!(row = row_number, field = key, value = raw, "无法识别的 Yes/No 取值");
            Err(ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("应为 Yes/No: {}", raw),
            })
        }
    }
}
