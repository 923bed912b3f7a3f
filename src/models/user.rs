use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 管理员（教师）
    Admin,
    /// 学生
    Student,
}

impl Role {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Role::Admin => "管理员",
            Role::Student => "学生",
        }
    }

    /// 后端使用的角色代码
    pub fn code(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "管理员" => Ok(Role::Admin),
            "student" | "学生" => Ok(Role::Student),
            other => Err(ValidationError::UnknownRole {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::deserialize_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl RegisterRequest {
    /// 注册表单校验；班级只对学生有意义，管理员的班级会被清空
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::EmptyField { field: "password" });
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        self.class_name = match self.role {
            Role::Student => self.class_name.filter(|c| !c.trim().is_empty()),
            Role::Admin => None,
        };
        Ok(self)
    }
}

/// 登录 / 注册的返回结果
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// 校验邮箱格式
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    });
    if re.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail {
            email: email.to_string(),
        })
    }
}
