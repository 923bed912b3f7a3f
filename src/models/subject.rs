use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 科目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 图标（通常是一个 emoji）
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::deserialize_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.icon {
            Some(icon) => write!(f, "{} {}", icon, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// 新建科目表单
#[derive(Debug, Clone, Serialize)]
pub struct NewSubject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NewSubject {
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        Ok(Self {
            name: self.name.trim().to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            icon: self.icon.filter(|i| !i.trim().is_empty()),
        })
    }
}
