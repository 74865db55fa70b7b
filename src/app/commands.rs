// ==========================================
// 教学工作量分配系统 - 命令行命令
// ==========================================
// 职责: 命令解析 → PlanningApi 调用 → 输出行
// 红线: 改变分配的命令执行成功后立即保存
// 红线: 破坏性命令未带 --yes 时返回 ConfirmationRequired, 不改动状态
// ==========================================

use std::path::PathBuf;

use crate::api::{ApiError, ApiResult, PlanningApi};
use crate::domain::format_hours;
use crate::repository::{AssignOutcome, MemberOutcome};

/// 确认参数
pub const CONFIRM_FLAG: &str = "--yes";

pub const USAGE: &str = "\
用法: teaching-load-planner <catalog> <command>
  report                      校验报告与工作量
  export <out.csv>            导出分配结果
  suggest <subjectId>         助教候选
  assign <subjectId> <teacherId>
  assist <subjectId> <teacherId>
  remove-main <subjectId> [--yes]
  lock <subjectId>            切换锁定
  reset [--yes]               清空未锁定分配
  off-day <teacherId> <day>   切换休息日
  fill <subjectId>            按建议补足助教";

// ==========================================
// Command - 命令
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Report,
    Export(PathBuf),
    Suggest(String),
    Assign { subject_id: String, teacher_id: String },
    Assist { subject_id: String, teacher_id: String },
    RemoveMain { subject_id: String, confirmed: bool },
    Lock(String),
    Reset { confirmed: bool },
    OffDay { teacher_id: String, day: String },
    Fill(String),
}

impl Command {
    /// 解析 <command> 及其参数; 无法识别时返回 None
    pub fn parse(command: &str, args: &[String]) -> Option<Self> {
        let parsed = match (command, args) {
            ("report", []) => Command::Report,
            ("export", [out]) => Command::Export(PathBuf::from(out)),
            ("suggest", [subject_id]) => Command::Suggest(subject_id.clone()),
            ("assign", [subject_id, teacher_id]) => Command::Assign {
                subject_id: subject_id.clone(),
                teacher_id: teacher_id.clone(),
            },
            ("assist", [subject_id, teacher_id]) => Command::Assist {
                subject_id: subject_id.clone(),
                teacher_id: teacher_id.clone(),
            },
            ("remove-main", [subject_id]) => Command::RemoveMain {
                subject_id: subject_id.clone(),
                confirmed: false,
            },
            ("remove-main", [subject_id, flag]) if flag == CONFIRM_FLAG => Command::RemoveMain {
                subject_id: subject_id.clone(),
                confirmed: true,
            },
            ("lock", [subject_id]) => Command::Lock(subject_id.clone()),
            ("reset", []) => Command::Reset { confirmed: false },
            ("reset", [flag]) if flag == CONFIRM_FLAG => Command::Reset { confirmed: true },
            ("off-day", [teacher_id, day]) => Command::OffDay {
                teacher_id: teacher_id.clone(),
                day: day.clone(),
            },
            ("fill", [subject_id]) => Command::Fill(subject_id.clone()),
            _ => return None,
        };
        Some(parsed)
    }

    /// 是否改变分配状态 (需保存)
    pub fn mutates_plan(&self) -> bool {
        !matches!(
            self,
            Command::Report | Command::Export(_) | Command::Suggest(_)
        )
    }
}

/// 执行命令, 返回输出行
///
/// # 返回
/// - Err(ConfirmationRequired): 破坏性命令未确认, 状态未改动也未保存
pub fn run_command(api: &mut PlanningApi, command: &Command) -> ApiResult<Vec<String>> {
    let lines = match command {
        Command::Report => report_lines(api)?,
        Command::Export(out) => {
            let rows = api.export_csv(out)?;
            vec![format!("exported {} rows to {}", rows, out.display())]
        }
        Command::Suggest(subject_id) => suggestion_lines(api, subject_id)?,
        Command::Assign {
            subject_id,
            teacher_id,
        } => {
            let line = match api.assign(subject_id, teacher_id)? {
                AssignOutcome::CreatedMain => {
                    format!("{}: {} is now main teacher", subject_id, teacher_id)
                }
                AssignOutcome::AddedCoTeacher => {
                    format!("{}: {} added as co-teacher", subject_id, teacher_id)
                }
                AssignOutcome::Unchanged(role) => {
                    format!("{}: {} already holds {}", subject_id, teacher_id, role)
                }
            };
            vec![line]
        }
        Command::Assist {
            subject_id,
            teacher_id,
        } => {
            let line = match api.add_assistant(subject_id, teacher_id)? {
                MemberOutcome::Added => {
                    format!("{}: {} added as lab assistant", subject_id, teacher_id)
                }
                MemberOutcome::Unchanged(role) => {
                    format!("{}: {} already holds {}", subject_id, teacher_id, role)
                }
            };
            vec![line]
        }
        Command::RemoveMain {
            subject_id,
            confirmed,
        } => match api.remove_main_teacher(subject_id, *confirmed)? {
            Some(removed) => vec![format!(
                "{}: removed main teacher {} and the whole assignment",
                subject_id, removed.main_teacher
            )],
            None => vec![format!("{}: not assigned", subject_id)],
        },
        Command::Lock(subject_id) => {
            let locked = api.toggle_lock(subject_id)?;
            vec![format!(
                "{}: {}",
                subject_id,
                if locked { "locked" } else { "unlocked" }
            )]
        }
        Command::Reset { confirmed } => {
            let dropped = api.reset_unlocked(*confirmed)?;
            vec![format!("dropped {} unlocked assignments", dropped)]
        }
        Command::OffDay { teacher_id, day } => {
            let on = api.set_off_day(teacher_id, day)?;
            vec![format!(
                "{}: {} {}",
                teacher_id,
                day,
                if on { "marked off" } else { "cleared" }
            )]
        }
        Command::Fill(subject_id) => {
            let added = api.fill_assistant_shortfall(subject_id)?;
            if added.is_empty() {
                vec![format!("{}: no assistants added", subject_id)]
            } else {
                vec![format!("{}: added {}", subject_id, added.join(", "))]
            }
        }
    };

    if command.mutates_plan() {
        api.save()?;
    }
    Ok(lines)
}

/// 需确认错误的提示文本; 其他错误返回 None
pub fn confirmation_hint(err: &ApiError) -> Option<String> {
    match err {
        ApiError::ConfirmationRequired { action, target } => Some(format!(
            "{} on {} needs confirmation, rerun with {}",
            action, target, CONFIRM_FLAG
        )),
        _ => None,
    }
}

// ==========================================
// 查询输出
// ==========================================

fn report_lines(api: &PlanningApi) -> ApiResult<Vec<String>> {
    let report = api.validate()?;
    let mut lines = Vec::new();

    lines.push(format!("== Errors ({}) ==", report.errors.len()));
    lines.extend(report.error_messages().into_iter().map(|m| format!("  {}", m)));
    lines.push(format!("== Warnings ({}) ==", report.warnings.len()));
    lines.extend(report.warning_messages().into_iter().map(|m| format!("  {}", m)));
    lines.push(format!("== Success ({}) ==", report.success.len()));
    lines.extend(report.success_messages().into_iter().map(|m| format!("  {}", m)));

    lines.push("== Workloads ==".to_string());
    for workload in api.workloads() {
        let max_hours = api
            .catalog()
            .teacher(&workload.teacher_id)
            .map(|t| t.max_hours)
            .unwrap_or_default();
        lines.push(format!(
            "  {:<12} {:>5}h/{}h  {} subjects",
            workload.teacher_id,
            format_hours(workload.total_hours),
            max_hours,
            workload.subject_count
        ));
    }

    let issues = api.catalog_issues()?;
    if !issues.is_empty() {
        lines.push(format!("== Catalog notes ({}) ==", issues.len()));
        lines.extend(issues.iter().map(|issue| format!("  {}", issue)));
    }

    Ok(lines)
}

fn suggestion_lines(api: &PlanningApi, subject_id: &str) -> ApiResult<Vec<String>> {
    let suggestion = api.suggest(subject_id)?;
    let mut lines = vec![format!(
        "{}: needs {} lab assistants, has {}",
        suggestion.subject_id, suggestion.needed, suggestion.assigned
    )];
    for candidate in &suggestion.candidates {
        lines.push(format!(
            "  {} ({}) {}h/{}h",
            candidate.teacher.name,
            candidate.teacher.initials,
            format_hours(candidate.total_hours),
            candidate.teacher.max_hours
        ));
    }
    Ok(lines)
}
