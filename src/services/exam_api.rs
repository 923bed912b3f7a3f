//! 考试会话所需的后端能力
//!
//! 考试会话只依赖这个 trait，测试中可以用内存实现替换后端

use async_trait::async_trait;

use crate::error::ApiError;
use crate::infrastructure::ApiClient;
use crate::models::{Exam, ExamResult, Question, StudentExam, Submission};

/// 考试会话使用的后端接口
#[async_trait]
pub trait ExamApi: Send + Sync {
    /// `GET /exams/{id}`
    async fn fetch_exam(&self, exam_id: &str) -> Result<Exam, ApiError>;

    /// `GET /exams/{id}/questions`，按 `order` 排序
    async fn fetch_questions(&self, exam_id: &str) -> Result<Vec<Question>, ApiError>;

    /// `POST /exams/{id}/start`，在服务端登记一次作答
    async fn start_exam(&self, exam_id: &str) -> Result<StudentExam, ApiError>;

    /// `POST /exams/{id}/submit`
    async fn submit_exam(
        &self,
        exam_id: &str,
        submission: &Submission,
    ) -> Result<ExamResult, ApiError>;
}

#[async_trait]
impl ExamApi for ApiClient {
    async fn fetch_exam(&self, exam_id: &str) -> Result<Exam, ApiError> {
        self.get_json(&format!("exams/{}", exam_id)).await
    }

    async fn fetch_questions(&self, exam_id: &str) -> Result<Vec<Question>, ApiError> {
        self.get_json(&format!("exams/{}/questions", exam_id)).await
    }

    async fn start_exam(&self, exam_id: &str) -> Result<StudentExam, ApiError> {
        self.post_empty(&format!("exams/{}/start", exam_id)).await
    }

    async fn submit_exam(
        &self,
        exam_id: &str,
        submission: &Submission,
    ) -> Result<ExamResult, ApiError> {
        self.post_json(&format!("exams/{}/submit", exam_id), submission)
            .await
    }
}
