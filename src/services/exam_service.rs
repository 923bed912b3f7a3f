//! 考试与题目管理服务 - 业务能力层
//!
//! 管理员端的考试 / 题目增删查，学生端的可参加考试列表

use crate::error::{ApiError, AppResult};
use crate::infrastructure::ApiClient;
use crate::models::{Exam, NewExam, NewQuestion, Question};
use crate::services::ExamApi;
use tracing::info;

pub struct ExamService<'a> {
    api: &'a ApiClient,
}

impl<'a> ExamService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// 考试列表；学生只会拿到本班级且未结束的考试
    pub async fn list(&self) -> Result<Vec<Exam>, ApiError> {
        self.api.get_json("exams").await
    }

    pub async fn get(&self, exam_id: &str) -> Result<Exam, ApiError> {
        self.api.fetch_exam(exam_id).await
    }

    pub async fn create(&self, form: NewExam) -> AppResult<Exam> {
        let form = form.validate()?;
        let exam: Exam = self.api.post_json("exams", &form).await?;
        info!("✓ 考试已创建: {} ({})", exam.title, exam.id);
        Ok(exam)
    }

    /// 删除考试（后端会同时删除其题目）
    pub async fn delete(&self, exam_id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("exams/{}", exam_id)).await?;
        info!("🗑️ 考试已删除: {}", exam_id);
        Ok(())
    }

    /// 题目列表，按 `order` 升序
    pub async fn questions(&self, exam_id: &str) -> Result<Vec<Question>, ApiError> {
        let mut questions = self.api.fetch_questions(exam_id).await?;
        questions.sort_by_key(|q| q.order);
        Ok(questions)
    }

    /// 添加题目；未指定顺序时排在最后
    pub async fn add_question(
        &self,
        exam_id: &str,
        form: NewQuestion,
        order: Option<i64>,
    ) -> AppResult<Question> {
        let mut form = form.validate()?;
        form.order = match order {
            Some(order) => order,
            None => self.questions(exam_id).await?.len() as i64,
        };

        let question: Question = self
            .api
            .post_json(&format!("exams/{}/questions", exam_id), &form)
            .await?;
        info!("✓ 题目已添加: 考试 {} 第 {} 题", exam_id, question.order + 1);
        Ok(question)
    }

    pub async fn delete_question(&self, question_id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("questions/{}", question_id)).await?;
        info!("🗑️ 题目已删除: {}", question_id);
        Ok(())
    }
}
