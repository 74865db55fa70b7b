// ==========================================
// 教学工作量分配系统 - 分配结果 CSV 导出
// ==========================================
// 输入: Catalog + AssignmentStore (只读)
// 输出: 每门已分配课程一行, 未分配课程不输出
// 红线: 字段按 RFC 4180 在必要时加引号, 含逗号的姓名不破坏行结构
// ==========================================

use crate::domain::{Assignment, Subject};
use crate::exporter::error::ExportResult;
use crate::repository::{AssignmentStore, Catalog};
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const EXPORT_HEADER: [&str; 10] = [
    "Course",
    "Semester",
    "Subject",
    "Section",
    "Teacher",
    "Hours Taught(Le,Tu,Pr)",
    "Department",
    "Subject_type",
    "Has_Lab",
    "Notes",
];

// ==========================================
// CsvExporter
// ==========================================
pub struct CsvExporter<'a> {
    store: &'a AssignmentStore,
}

impl<'a> CsvExporter<'a> {
    pub fn new(store: &'a AssignmentStore) -> Self {
        Self { store }
    }

    /// 写出表头与全部行, 返回数据行数
    pub fn write_to<W: Write>(&self, writer: W) -> ExportResult<usize> {
        let mut csv_writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .from_writer(writer);

        csv_writer.write_record(EXPORT_HEADER)?;

        let rows = self.rows();
        for row in &rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;

        Ok(rows.len())
    }

    pub fn export_to_path(&self, path: &Path) -> ExportResult<usize> {
        let file = File::create(path)?;
        let count = self.write_to(file)?;
        info!(path = %path.display(), rows = count, "分配结果已导出");
        Ok(count)
    }

    /// 按目录顺序生成导出行
    pub fn rows(&self) -> Vec<[String; 10]> {
        let catalog = self.store.catalog();
        catalog
            .subjects()
            .iter()
            .filter_map(|subject| {
                self.store
                    .assignment(&subject.subject_id)
                    .map(|assignment| export_row(catalog, subject, assignment))
            })
            .collect()
    }
}

fn export_row(catalog: &Catalog, subject: &Subject, assignment: &Assignment) -> [String; 10] {
    let teacher_name = |id: &str| {
        catalog
            .teacher(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let teachers: Vec<String> = std::iter::once(assignment.main_teacher.as_str())
        .chain(assignment.co_teachers.iter().map(String::as_str))
        .map(teacher_name)
        .collect();

    let notes = if assignment.assistants.is_empty() {
        String::new()
    } else {
        let initials: Vec<String> = assignment
            .assistants
            .iter()
            .map(|id| {
                catalog
                    .teacher(id)
                    .map(|t| t.initials.clone())
                    .unwrap_or_else(|| id.clone())
            })
            .collect();
        format!("Lab Assistants: {}", initials.join(", "))
    };

    [
        subject.course.clone(),
        subject.semester.to_string(),
        subject.name.clone(),
        subject.section.clone().unwrap_or_default(),
        teachers.join(", "),
        format!(
            "{},{},{}",
            assignment.assigned_le, assignment.assigned_tu, assignment.assigned_pr
        ),
        subject.department.clone(),
        subject.subject_type.to_string(),
        if subject.has_lab { "Yes" } else { "No" }.to_string(),
        notes,
    ]
}
