// ==========================================
// 教学工作量分配系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一建表语句, 新库打开即可用
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id   TEXT NOT NULL,
    key        TEXT NOT NULL,
    value      TEXT NOT NULL,
    updated_at TEXT,
    PRIMARY KEY (scope_id, key)
);

CREATE TABLE IF NOT EXISTS plan_assignment (
    subject_id      TEXT PRIMARY KEY,
    main_teacher_id TEXT NOT NULL,
    assigned_le     INTEGER NOT NULL,
    assigned_tu     INTEGER NOT NULL,
    assigned_pr     INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS plan_assignment_member (
    subject_id TEXT NOT NULL REFERENCES plan_assignment(subject_id) ON DELETE CASCADE,
    teacher_id TEXT NOT NULL,
    role       TEXT NOT NULL CHECK (role IN ('CO_TEACHER', 'LAB_ASSISTANT')),
    position   INTEGER NOT NULL DEFAULT 0, -- 加入顺序
    PRIMARY KEY (subject_id, teacher_id)
);

CREATE TABLE IF NOT EXISTS plan_locked_subject (
    subject_id TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS teacher_off_day (
    teacher_id TEXT NOT NULL,
    day        TEXT NOT NULL,
    PRIMARY KEY (teacher_id, day)
);

CREATE TABLE IF NOT EXISTS plan_meta (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 建表（幂等）并写入 schema_version
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    if read_schema_version(conn)?.is_none() {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_SCHEMA_VERSION],
        )?;
    }
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置与建表
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// 打开内存库 (测试/临时计算)
pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_sqlite_connection(&conn)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// 读取 schema_version（若表不存在或为空则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}
