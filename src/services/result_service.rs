//! 成绩与统计服务 - 业务能力层

use crate::error::ApiError;
use crate::infrastructure::ApiClient;
use crate::models::{AdminStats, ExamStatus, StudentExam, StudentStats};

/// 一组考试记录的汇总
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSummary {
    pub total: usize,
    pub graded: usize,
    /// 已评分记录的平均得分率，保留两位小数
    pub average_percentage: f64,
}

impl ResultSummary {
    pub fn from_records(records: &[StudentExam]) -> Self {
        let percentages: Vec<f64> = records.iter().filter_map(StudentExam::percentage).collect();
        let average = if percentages.is_empty() {
            0.0
        } else {
            percentages.iter().sum::<f64>() / percentages.len() as f64
        };

        Self {
            total: records.len(),
            graded: records
                .iter()
                .filter(|r| r.status == ExamStatus::Graded)
                .count(),
            average_percentage: (average * 100.0).round() / 100.0,
        }
    }
}

pub struct ResultService<'a> {
    api: &'a ApiClient,
}

impl<'a> ResultService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// 考试记录：学生只看到自己的，管理员看到全部（按开始时间倒序）
    pub async fn history(&self) -> Result<Vec<StudentExam>, ApiError> {
        self.api.get_json("exams/history").await
    }

    /// 某场考试的全部作答记录（管理员）
    pub async fn exam_results(&self, exam_id: &str) -> Result<Vec<StudentExam>, ApiError> {
        self.api
            .get_json(&format!("exams/{}/results", exam_id))
            .await
    }

    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.api.get_json("dashboard/admin").await
    }

    pub async fn student_stats(&self) -> Result<StudentStats, ApiError> {
        self.api.get_json("dashboard/student").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: ExamStatus, score: Option<f64>, total_points: i64) -> StudentExam {
        StudentExam {
            id: "se".into(),
            exam_id: "e1".into(),
            student_id: "u1".into(),
            student_name: "Ani".into(),
            exam_title: "Bahasa Indonesia".into(),
            subject_name: "Bahasa".into(),
            answers: Vec::new(),
            score,
            total_points,
            started_at: None,
            submitted_at: None,
            status,
        }
    }

    #[test]
    fn test_summary_averages_graded_only() {
        let records = vec![
            record(ExamStatus::Graded, Some(8.0), 10),
            record(ExamStatus::Graded, Some(1.0), 3),
            record(ExamStatus::InProgress, None, 10),
        ];
        let summary = ResultSummary::from_records(&records);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.graded, 2);
        assert_eq!(summary.average_percentage, 56.67);
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(ResultSummary::from_records(&[]), ResultSummary::default());
    }
}
