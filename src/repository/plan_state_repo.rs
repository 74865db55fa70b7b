// ==========================================
// 教学工作量分配系统 - 分配状态持久化仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: PlanState <-> plan_assignment / plan_assignment_member /
//       plan_locked_subject / teacher_off_day
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{Assignment, MemberList, PlanState, Weekday};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

const ROLE_CO_TEACHER: &str = "CO_TEACHER";
const ROLE_LAB_ASSISTANT: &str = "LAB_ASSISTANT";
const META_SAVED_AT: &str = "saved_at";
const SAVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// PlanStateRepository - 分配状态仓储
// ==========================================
pub struct PlanStateRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PlanStateRepository {
    /// 创建新的仓储实例 (自动建表)
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 整体保存 (先清空后写入, 单事务)
    pub fn save(&self, state: &PlanState) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute_batch(
            r#"
            DELETE FROM plan_assignment_member;
            DELETE FROM plan_assignment;
            DELETE FROM plan_locked_subject;
            DELETE FROM teacher_off_day;
            "#,
        )?;

        {
            let mut insert_assignment = tx.prepare(
                r#"
                INSERT INTO plan_assignment (
                    subject_id, main_teacher_id, assigned_le, assigned_tu, assigned_pr
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            let mut insert_member = tx.prepare(
                r#"
                INSERT INTO plan_assignment_member (subject_id, teacher_id, role, position)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )?;

            for (subject_id, assignment) in &state.assignments {
                insert_assignment.execute(params![
                    subject_id,
                    assignment.main_teacher,
                    assignment.assigned_le,
                    assignment.assigned_tu,
                    assignment.assigned_pr,
                ])?;
                for (position, teacher_id) in assignment.co_teachers.iter().enumerate() {
                    insert_member.execute(params![
                        subject_id,
                        teacher_id,
                        ROLE_CO_TEACHER,
                        position as i64
                    ])?;
                }
                for (position, teacher_id) in assignment.assistants.iter().enumerate() {
                    insert_member.execute(params![
                        subject_id,
                        teacher_id,
                        ROLE_LAB_ASSISTANT,
                        position as i64
                    ])?;
                }
            }

            let mut insert_locked =
                tx.prepare("INSERT INTO plan_locked_subject (subject_id) VALUES (?1)")?;
            for subject_id in &state.locked {
                insert_locked.execute(params![subject_id])?;
            }

            let mut insert_off_day =
                tx.prepare("INSERT INTO teacher_off_day (teacher_id, day) VALUES (?1, ?2)")?;
            for (teacher_id, pref) in &state.preferences {
                for day in &pref.off_days {
                    insert_off_day.execute(params![teacher_id, day.as_str()])?;
                }
            }
        }

        let saved_at = chrono::Local::now().naive_local().format(SAVED_AT_FORMAT).to_string();
        tx.execute(
            "INSERT INTO plan_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![META_SAVED_AT, saved_at],
        )?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        info!(
            assignments = state.assignments.len(),
            locked = state.locked.len(),
            preferences = state.preferences.len(),
            "分配状态已保存"
        );
        Ok(())
    }

    /// 整体加载; 空库返回空记录
    pub fn load(&self) -> RepositoryResult<PlanState> {
        let conn = self.get_conn()?;
        let mut state = PlanState::default();

        let mut stmt = conn.prepare(
            r#"
            SELECT subject_id, main_teacher_id, assigned_le, assigned_tu, assigned_pr
            FROM plan_assignment
            ORDER BY subject_id
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                Assignment {
                    main_teacher: row.get(1)?,
                    co_teachers: MemberList::default(),
                    assistants: MemberList::default(),
                    assigned_le: row.get(2)?,
                    assigned_tu: row.get(3)?,
                    assigned_pr: row.get(4)?,
                },
            ))
        })?;
        for row in rows {
            let (subject_id, assignment) = row?;
            state.assignments.insert(subject_id, assignment);
        }

        let mut stmt = conn.prepare(
            r#"
            SELECT subject_id, teacher_id, role
            FROM plan_assignment_member
            ORDER BY subject_id, role, position
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        for row in rows {
            let (subject_id, teacher_id, role) = row?;
            let assignment = state.assignments.get_mut(&subject_id).ok_or_else(|| {
                RepositoryError::ValidationError(format!(
                    "成员记录引用了不存在的分配: subject_id={}",
                    subject_id
                ))
            })?;
            match role.as_str() {
                ROLE_CO_TEACHER => {
                    assignment.co_teachers.insert(teacher_id);
                }
                ROLE_LAB_ASSISTANT => {
                    assignment.assistants.insert(teacher_id);
                }
                other => {
                    return Err(RepositoryError::ValidationError(format!(
                        "未知成员角色: {}",
                        other
                    )))
                }
            }
        }

        let mut stmt = conn.prepare("SELECT subject_id FROM plan_locked_subject")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        for row in rows {
            state.locked.insert(row?);
        }

        let mut stmt = conn.prepare("SELECT teacher_id, day FROM teacher_off_day")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (teacher_id, day) = row?;
            match day.parse::<Weekday>() {
                Ok(day) => {
                    state
                        .preferences
                        .entry(teacher_id)
                        .or_default()
                        .off_days
                        .insert(day);
                }
                Err(e) => warn!(teacher_id = %teacher_id, error = %e, "跳过无法识别的休息日"),
            }
        }

        info!(
            assignments = state.assignments.len(),
            locked = state.locked.len(),
            "分配状态已加载"
        );
        Ok(state)
    }

    /// 最近一次保存时间
    pub fn last_saved_at(&self) -> RepositoryResult<Option<NaiveDateTime>> {
        let conn = self.get_conn()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM plan_meta WHERE key = ?1",
                params![META_SAVED_AT],
                |row| row.get(0),
            )
            .optional()?;

        raw.map(|v| {
            NaiveDateTime::parse_from_str(&v, SAVED_AT_FORMAT)
                .map_err(|e| RepositoryError::ValidationError(format!("保存时间格式错误: {}", e)))
        })
        .transpose()
    }
}
