use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_duration() -> i64 {
    60
}

fn default_total_points() -> i64 {
    100
}

/// 试卷元数据，一场会话内不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub title: String,
    pub subject_id: String,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_duration")]
    pub duration_minutes: i64,
    #[serde(default = "default_total_points")]
    pub total_points: i64,
    /// 限定班级，`None` 表示所有班级可见
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_optional_datetime")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::deserialize_optional_datetime")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Exam {
    /// 倒计时总秒数；负数时长按 0 处理
    pub fn duration_secs(&self) -> u64 {
        (self.duration_minutes.max(0) as u64).saturating_mul(60)
    }

    /// 科目名称，缺失时返回空串
    pub fn subject_label(&self) -> &str {
        self.subject_name.as_deref().unwrap_or("")
    }
}

/// 新建考试表单
#[derive(Debug, Clone, Serialize)]
pub struct NewExam {
    pub title: String,
    pub subject_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl NewExam {
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }
        if self.subject_id.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "subject_id" });
        }
        if self.duration_minutes <= 0 {
            return Err(ValidationError::InvalidDuration {
                minutes: self.duration_minutes,
            });
        }
        Ok(Self {
            description: self.description.filter(|d| !d.trim().is_empty()),
            class_name: self.class_name.filter(|c| !c.trim().is_empty()),
            ..self
        })
    }
}
