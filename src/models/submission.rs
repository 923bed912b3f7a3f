use serde::{Deserialize, Serialize};

/// 单道题的作答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub question_id: String,
    pub answer_text: String,
}

/// 交卷请求体
///
/// 每道题恰好一条，按试卷顺序排列；未作答的题目为空串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub answers: Vec<AnswerEntry>,
}

impl Submission {
    /// 未作答（空串）的题目数量
    pub fn blank_count(&self) -> usize {
        self.answers
            .iter()
            .filter(|a| a.answer_text.is_empty())
            .count()
    }
}

/// 交卷后后端返回的成绩，仅用于展示
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub score: f64,
    pub total_points: i64,
}

impl ExamResult {
    /// 得分率（0–100）；总分为 0 时返回 0
    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.total_points)
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage())
    }
}

pub(crate) fn percentage(score: f64, total_points: i64) -> f64 {
    if total_points <= 0 {
        0.0
    } else {
        score / total_points as f64 * 100.0
    }
}

/// 成绩等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    /// ≥ 80%
    Excellent,
    /// ≥ 70%
    Good,
    /// ≥ 60%
    Fair,
    NeedsStudy,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Grade::Excellent
        } else if percentage >= 70.0 {
            Grade::Good
        } else if percentage >= 60.0 {
            Grade::Fair
        } else {
            Grade::NeedsStudy
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "非常好",
            Grade::Good => "良好",
            Grade::Fair => "及格",
            Grade::NeedsStudy => "需要更加努力",
        }
    }

    /// 结果页的鼓励语
    pub fn encouragement(self) -> &'static str {
        match self {
            Grade::Excellent => "🎉 太棒了！继续保持！",
            Grade::Good => "👍 不错！继续进步！",
            Grade::Fair => "💪 还可以，继续学习！",
            Grade::NeedsStudy => "📚 不要放弃，继续加油！",
        }
    }
}
