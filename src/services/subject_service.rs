//! 科目管理服务 - 业务能力层

use crate::error::{ApiError, AppResult};
use crate::infrastructure::ApiClient;
use crate::models::{NewSubject, Subject};
use tracing::info;

pub struct SubjectService<'a> {
    api: &'a ApiClient,
}

impl<'a> SubjectService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Subject>, ApiError> {
        self.api.get_json("subjects").await
    }

    pub async fn create(&self, form: NewSubject) -> AppResult<Subject> {
        let form = form.validate()?;
        let subject: Subject = self.api.post_json("subjects", &form).await?;
        info!("✓ 科目已添加: {} ({})", subject.name, subject.id);
        Ok(subject)
    }

    pub async fn delete(&self, subject_id: &str) -> Result<(), ApiError> {
        self.api.delete(&format!("subjects/{}", subject_id)).await?;
        info!("🗑️ 科目已删除: {}", subject_id);
        Ok(())
    }
}
