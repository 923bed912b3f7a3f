//! 令牌存储 - 基础设施层
//!
//! 在两次命令之间保存登录令牌（相当于浏览器的 localStorage）

use crate::error::FileError;
use std::path::PathBuf;
use tracing::debug;

/// 令牌文件
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 读取令牌，文件不存在或为空时返回 `None`
    pub fn load(&self) -> Result<Option<String>, FileError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| FileError::read_failed(self.display(), e))?;
        let token = content.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    pub fn save(&self, token: &str) -> Result<(), FileError> {
        debug!("保存令牌到 {}", self.display());
        std::fs::write(&self.path, token).map_err(|e| FileError::write_failed(self.display(), e))
    }

    /// 删除令牌文件；文件不存在视为成功
    pub fn clear(&self) -> Result<(), FileError> {
        if !self.path.exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path).map_err(|source| FileError::DeleteFailed {
            path: self.display(),
            source,
        })
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}
