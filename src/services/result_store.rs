//! 成绩保存服务 - 业务能力层
//!
//! 只负责"把最新成绩写进 JSON 文件"，每次覆盖，不追加

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{AppError, AppResult, FileError};
use crate::models::score::ScoreResult;

/// 成绩持久化能力
pub trait ResultStore {
    /// 保存成绩，覆盖之前的结果
    fn save(&self, result: &ScoreResult) -> AppResult<()>;

    /// 读取最近一次保存的成绩，不存在时返回 None
    fn load_latest(&self) -> AppResult<Option<ScoreResult>>;
}

/// JSON 文件实现
///
/// UTF-8 编码，4 空格缩进；没有文件锁，后写入者覆盖先写入者
#[derive(Debug, Clone)]
pub struct JsonResultStore {
    path: PathBuf,
}

impl JsonResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

impl ResultStore for JsonResultStore {
    fn save(&self, result: &ScoreResult) -> AppResult<()> {
        let json = to_json_4_spaces(result).map_err(|source| FileError::JsonFailed {
            path: self.display_path(),
            source,
        })?;

        std::fs::write(&self.path, json)
            .map_err(|e| AppError::file_write_failed(self.display_path(), e))?;

        info!("💾 成绩已保存至: {}", self.path.display());
        Ok(())
    }

    fn load_latest(&self) -> AppResult<Option<ScoreResult>> {
        if !self.path.exists() {
            debug!("结果文件不存在: {}", self.path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| AppError::file_read_failed(self.display_path(), e))?;
        let result = serde_json::from_str(&content).map_err(|source| FileError::JsonFailed {
            path: self.display_path(),
            source,
        })?;

        Ok(Some(result))
    }
}

fn to_json_4_spaces<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
