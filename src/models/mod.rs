//! 数据模型
//!
//! 与后端 JSON 结构一一对应，字段名保持 snake_case

pub mod dashboard;
pub mod exam;
pub mod history;
pub mod question;
pub mod subject;
pub mod submission;
pub mod user;

pub use dashboard::{AdminStats, StudentStats};
pub use exam::{Exam, NewExam};
pub use history::{ExamStatus, StudentExam};
pub use question::{NewQuestion, Question, QuestionKind, QuestionType};
pub use subject::{NewSubject, Subject};
pub use submission::{AnswerEntry, ExamResult, Grade, Submission};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, Role, User};

use chrono::{DateTime, NaiveDateTime, Utc};

/// 反序列化可选的时间字段
///
/// 后端既可能返回带时区的 RFC 3339 字符串，也可能返回不带时区的
/// `isoformat()` 结果（按 UTC 处理），还可能是 `null`
pub(crate) fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct DateTimeVisitor;

    impl<'de> Visitor<'de> for DateTimeVisitor {
        type Value = Option<DateTime<Utc>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an ISO 8601 datetime string or null")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_str(self)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_datetime(value).map(Some).ok_or_else(|| {
                E::custom(format!("invalid datetime: {}", value))
            })
        }
    }

    deserializer.deserialize_option(DateTimeVisitor)
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|naive| naive.and_utc())
}
