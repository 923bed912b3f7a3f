use super::submission::{percentage, AnswerEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 考试记录状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    InProgress,
    Submitted,
    Graded,
}

impl ExamStatus {
    pub fn label(self) -> &'static str {
        match self {
            ExamStatus::InProgress => "进行中",
            ExamStatus::Submitted => "已提交",
            ExamStatus::Graded => "已完成",
        }
    }

    /// 是否已经交卷（已提交或已评分）
    pub fn is_finished(self) -> bool {
        matches!(self, ExamStatus::Submitted | ExamStatus::Graded)
    }
}

fn default_total_points() -> i64 {
    100
}

/// 学生的一次考试记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentExam {
    pub id: String,
    pub exam_id: String,
    pub student_id: String,
    pub student_name: String,
    pub exam_title: String,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub answers: Vec<AnswerEntry>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default = "default_total_points")]
    pub total_points: i64,
    #[serde(default, deserialize_with = "super::deserialize_optional_datetime")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::deserialize_optional_datetime")]
    pub submitted_at: Option<DateTime<Utc>>,
    pub status: ExamStatus,
}

impl StudentExam {
    /// 已评分记录的得分率
    pub fn percentage(&self) -> Option<f64> {
        match (self.status, self.score) {
            (ExamStatus::Graded, Some(score)) => Some(percentage(score, self.total_points)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_record() {
        let record: StudentExam = serde_json::from_str(
            r#"{
                "id":"se1","exam_id":"e1","student_id":"u1","student_name":"Budi",
                "exam_title":"IPA Kelas 5","subject_name":"IPA","answers":[],
                "score":15,"total_points":20,"started_at":"2025-02-01T07:00:00+00:00",
                "submitted_at":null,"status":"graded"
            }"#,
        )
        .unwrap();

        assert_eq!(record.status, ExamStatus::Graded);
        assert_eq!(record.percentage(), Some(75.0));
        assert!(record.status.is_finished());
    }

    #[test]
    fn test_in_progress_has_no_percentage() {
        let record: StudentExam = serde_json::from_str(
            r#"{"id":"se2","exam_id":"e1","student_id":"u1","student_name":"Budi","exam_title":"IPA","status":"in_progress"}"#,
        )
        .unwrap();
        assert_eq!(record.percentage(), None);
        assert_eq!(record.status.label(), "进行中");
    }
}
