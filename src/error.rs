use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 考试会话错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 表单 / 数据校验错误
    #[error("校验失败: {0}")]
    Validation(#[from] ValidationError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 客户端构建失败
    #[error("无法创建 HTTP 客户端: {source}")]
    ClientBuildFailed {
        #[source]
        source: reqwest::Error,
    },
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 未登录、令牌失效或权限不足
    #[error("身份验证失败 ({endpoint}): status={status}, detail={detail:?}")]
    Unauthorized {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, detail={detail:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// 后端返回的 `detail` 字段（如果有）
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail, .. } | ApiError::BadResponse { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    /// 是否属于身份验证失败，由外层 shell 处理
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// 面向用户的提示文本：优先使用后端 detail，否则使用兜底文案
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// 考试会话错误
#[derive(Debug, Error)]
pub enum SessionError {
    /// 试卷或题目加载失败
    #[error("加载考试 {exam_id} 失败: {source}")]
    FetchFailure {
        exam_id: String,
        #[source]
        source: ApiError,
    },
    /// 交卷请求失败
    #[error("提交考试 {exam_id} 失败: {source}")]
    SubmitFailure {
        exam_id: String,
        #[source]
        source: ApiError,
    },
    /// 题目不属于本场考试
    #[error("题目 {question_id} 不属于本场考试")]
    UnknownQuestion { question_id: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 删除文件失败
    #[error("删除文件失败 ({path}): {source}")]
    DeleteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置项取值非法
    #[error("配置项 {field} 非法: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 数据校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必填字段为空
    #[error("字段 {field} 不能为空")]
    EmptyField { field: &'static str },
    /// 邮箱格式不正确
    #[error("邮箱格式不正确: {email}")]
    InvalidEmail { email: String },
    /// 未知角色
    #[error("未知角色: {value}")]
    UnknownRole { value: String },
    /// 考试时长非法
    #[error("考试时长必须大于 0 分钟 (当前: {minutes})")]
    InvalidDuration { minutes: i64 },
    /// 单选题没有选项
    #[error("单选题至少需要一个选项")]
    NoOptions,
    /// 选项内容为空
    #[error("第 {index} 个选项内容为空")]
    BlankOption { index: usize },
    /// 正确答案下标越界
    #[error("正确答案 {answer} 超出选项范围 [0, {len})")]
    CorrectAnswerOutOfRange { answer: String, len: usize },
    /// 题目数据不合法
    #[error("题目 {id} 数据不合法: {reason}")]
    InvalidQuestion { id: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl ApiError {
    /// 创建API请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 根据 HTTP 状态码创建错误响应
    pub fn from_status(endpoint: impl Into<String>, status: u16, detail: Option<String>) -> Self {
        let endpoint = endpoint.into();
        if status == 401 || status == 403 {
            ApiError::Unauthorized {
                endpoint,
                status,
                detail,
            }
        } else {
            ApiError::BadResponse {
                endpoint,
                status,
                detail,
            }
        }
    }
}

impl FileError {
    /// 创建文件读取错误
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
