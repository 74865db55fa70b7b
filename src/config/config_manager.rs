// ==========================================
// 教学工作量分配系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::SemesterType;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{info, warn};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// 实验助教配比 (每名助教负责的学生数)
    pub const LAB_ASSISTANT_RATIO: &str = "lab_assistant_ratio";
    /// 当前学期类型 odd/even
    pub const SEMESTER_TYPE: &str = "semester_type";
    /// 教师未填上限时的默认周课时
    pub const DEFAULT_MAX_HOURS: &str = "default_max_hours";
}

const GLOBAL_SCOPE: &str = "global";
const DEFAULT_MAX_HOURS: u32 = 16;
const MAX_HOURS_RANGE: (u32, u32) = (1, 40);

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置值超出范围: {key}={value}, 允许 [{min}, {max}]")]
    OutOfRange {
        key: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("配置值无效: {key}={value}")]
    InvalidValue { key: String, value: String },

    #[error("配置存储失败: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for ConfigError {
    fn from(err: rusqlite::Error) -> Self {
        ConfigError::Storage(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// LabRatio - 实验助教配比
// ==========================================
// 取值 [15, 30], 默认 20; 同一计算轮次内对所有课程一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LabRatio(u32);

impl LabRatio {
    pub const MIN: u32 = 15;
    pub const MAX: u32 = 30;
    pub const DEFAULT: u32 = 20;

    pub fn new(value: u32) -> ConfigResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::OutOfRange {
                key: config_keys::LAB_ASSISTANT_RATIO.to_string(),
                value: i64::from(value),
                min: i64::from(Self::MIN),
                max: i64::from(Self::MAX),
            })
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for LabRatio {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u32> for LabRatio {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        LabRatio::new(value)
    }
}

impl From<LabRatio> for u32 {
    fn from(ratio: LabRatio) -> Self {
        ratio.0
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> ConfigResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::Storage(format!("锁获取失败: {}", e)))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.get_conn()?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.get_conn()?;
        let now = chrono::Local::now().naive_local().to_string();
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = ?4",
            params![GLOBAL_SCOPE, key, value, now],
        )?;
        info!(key, value, "配置已更新");
        Ok(())
    }

    /// 读取配置并解析; 缺失取默认值, 无法解析时告警并取默认值
    fn get_parsed_or_default<T, F>(&self, key: &str, default: T, parse: F) -> ConfigResult<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        match self.get_config_value(key)? {
            None => Ok(default),
            Some(raw) => match parse(&raw) {
                Some(v) => Ok(v),
                None => {
                    warn!(key, value = %raw, "配置值无效, 使用默认值");
                    Ok(default)
                }
            },
        }
    }

    // ===== 实验助教配比 =====

    pub fn get_lab_ratio(&self) -> ConfigResult<LabRatio> {
        self.get_parsed_or_default(config_keys::LAB_ASSISTANT_RATIO, LabRatio::default(), |raw| {
            raw.trim()
                .parse::<u32>()
                .ok()
                .and_then(|v| LabRatio::new(v).ok())
        })
    }

    pub fn set_lab_ratio(&self, value: u32) -> ConfigResult<LabRatio> {
        let ratio = LabRatio::new(value)?;
        self.set_config_value(config_keys::LAB_ASSISTANT_RATIO, &ratio.get().to_string())?;
        Ok(ratio)
    }

    // ===== 学期类型 =====

    pub fn get_semester_type(&self) -> ConfigResult<SemesterType> {
        self.get_parsed_or_default(config_keys::SEMESTER_TYPE, SemesterType::Odd, |raw| {
            raw.parse::<SemesterType>().ok()
        })
    }

    pub fn set_semester_type(&self, semester_type: SemesterType) -> ConfigResult<()> {
        self.set_config_value(config_keys::SEMESTER_TYPE, &semester_type.to_string())
    }

    // ===== 默认周课时上限 =====

    pub fn get_default_max_hours(&self) -> ConfigResult<u32> {
        self.get_parsed_or_default(config_keys::DEFAULT_MAX_HOURS, DEFAULT_MAX_HOURS, |raw| {
            raw.trim()
                .parse::<u32>()
                .ok()
                .filter(|v| (MAX_HOURS_RANGE.0..=MAX_HOURS_RANGE.1).contains(v))
        })
    }

    pub fn set_default_max_hours(&self, value: u32) -> ConfigResult<()> {
        let (min, max) = MAX_HOURS_RANGE;
        if !(min..=max).contains(&value) {
            return Err(ConfigError::OutOfRange {
                key: config_keys::DEFAULT_MAX_HOURS.to_string(),
                value: i64::from(value),
                min: i64::from(min),
                max: i64::from(max),
            });
        }
        self.set_config_value(config_keys::DEFAULT_MAX_HOURS, &value.to_string())
    }

    /// 按键名写入 (供命令行/外部调用, 带校验)
    pub fn set_by_key(&self, key: &str, value: &str) -> ConfigResult<()> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            config_keys::LAB_ASSISTANT_RATIO => {
                let v = value.trim().parse::<u32>().map_err(|_| invalid())?;
                self.set_lab_ratio(v).map(|_| ())
            }
            config_keys::SEMESTER_TYPE => {
                let v = value.parse::<SemesterType>().map_err(|_| invalid())?;
                self.set_semester_type(v)
            }
            config_keys::DEFAULT_MAX_HOURS => {
                let v = value.trim().parse::<u32>().map_err(|_| invalid())?;
                self.set_default_max_hours(v)
            }
            _ => Err(invalid()),
        }
    }

    /// 获取所有配置的快照（JSON格式, 含默认值）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let mut config_map: BTreeMap<&str, serde_json::Value> = BTreeMap::new();
        config_map.insert(config_keys::LAB_ASSISTANT_RATIO, json!(self.get_lab_ratio()?.get()));
        config_map.insert(
            config_keys::SEMESTER_TYPE,
            json!(self.get_semester_type()?.to_string()),
        );
        config_map.insert(config_keys::DEFAULT_MAX_HOURS, json!(self.get_default_max_hours()?));

        serde_json::to_string(&config_map).map_err(|e| ConfigError::Storage(e.to_string()))
    }
}
