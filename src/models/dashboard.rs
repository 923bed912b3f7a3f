use serde::{Deserialize, Serialize};

/// 管理员首页统计
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_exams: u64,
    pub total_subjects: u64,
    pub total_students: u64,
    pub total_submissions: u64,
}

/// 学生首页统计
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentStats {
    pub completed_exams: u64,
    pub in_progress: u64,
    /// 平均得分率（0–100）
    pub average_score: f64,
}
