use crate::error::{AppResult, ConfigError, FileError};
use serde::Deserialize;
use std::path::Path;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "EXAM_CLIENT_CONFIG";
/// 默认配置文件
pub const DEFAULT_CONFIG_PATH: &str = "exam_client.toml";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端地址（不含 `/api` 前缀）
    pub api_base_url: String,
    /// 登录令牌保存位置
    pub token_file: String,
    /// 单个 HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 考试记录日志文件
    pub output_log_file: String,
    /// 剩余时间低于该秒数时提醒
    pub low_time_warning_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            token_file: ".exam_client_token".to_string(),
            request_timeout_secs: 30,
            verbose_logging: false,
            output_log_file: "exam_sessions.txt".to_string(),
            low_time_warning_secs: 300,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（如存在）→ 环境变量
    pub fn load() -> AppResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载，缺失字段使用默认值
    pub fn from_file(path: &str) -> Result<Self, FileError> {
        let content = std::fs::read_to_string(path).map_err(|e| FileError::read_failed(path, e))?;
        toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: path.to_string(),
            source,
        })
    }

    /// 使用 `lookup` 提供的变量覆盖配置项
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("EXAM_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("EXAM_TOKEN_FILE") {
            self.token_file = v;
        }
        if let Some(v) = lookup("EXAM_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_var("EXAM_REQUEST_TIMEOUT_SECS", &v, "u64")?;
        }
        if let Some(v) = lookup("VERBOSE_LOGGING") {
            self.verbose_logging = parse_var("VERBOSE_LOGGING", &v, "bool")?;
        }
        if let Some(v) = lookup("OUTPUT_LOG_FILE") {
            self.output_log_file = v;
        }
        if let Some(v) = lookup("LOW_TIME_WARNING_SECS") {
            self.low_time_warning_secs = parse_var("LOW_TIME_WARNING_SECS", &v, "u64")?;
        }
        Ok(self)
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url".to_string(),
                reason: format!("必须以 http:// 或 https:// 开头: {}", self.api_base_url),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(var_name: &str, value: &str, expected_type: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::EnvVarParseFailed {
        var_name: var_name.to_string(),
        value: value.to_string(),
        expected_type: expected_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let config = Config::default()
            .with_overrides(lookup_from(&[
                ("EXAM_API_BASE_URL", "https://ujian.example.org"),
                ("EXAM_REQUEST_TIMEOUT_SECS", "5"),
                ("VERBOSE_LOGGING", "true"),
            ]))
            .unwrap();

        assert_eq!(config.api_base_url, "https://ujian.example.org");
        assert_eq!(config.request_timeout_secs, 5);
        assert!(config.verbose_logging);
        assert_eq!(config.token_file, ".exam_client_token");
    }

    #[test]
    fn test_bad_number_is_reported() {
        let err = Config::default()
            .with_overrides(lookup_from(&[("EXAM_REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();

        match err {
            ConfigError::EnvVarParseFailed { var_name, value, .. } => {
                assert_eq!(var_name, "EXAM_REQUEST_TIMEOUT_SECS");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_toml_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            api_base_url = "https://exam.school.test"
            low_time_warning_secs = 120
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://exam.school.test");
        assert_eq!(config.low_time_warning_secs, 120);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config {
            api_base_url: "localhost:8000".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
