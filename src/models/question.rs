use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// 题目类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// 单选题，答案为选项下标（字符串形式）
    MultipleChoice { options: Vec<String> },
    /// 问答题，答案为自由文本
    Essay,
}

/// 题目，一场会话内不可变
///
/// 单选题至少有一个选项，否则在反序列化时即被拒绝
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    pub id: String,
    pub exam_id: String,
    pub text: String,
    pub kind: QuestionKind,
    /// 正确答案，学生端不会返回
    pub correct_answer: Option<String>,
    pub points: i64,
    pub order: i64,
}

impl Question {
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::MultipleChoice { options } => options,
            QuestionKind::Essay => &[],
        }
    }

    pub fn is_multiple_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::MultipleChoice { .. })
    }

    /// 选项字母：0 → A, 1 → B ...
    pub fn option_label(index: usize) -> char {
        (b'A' + (index % 26) as u8) as char
    }

    /// 将用户输入（字母或数字下标）解析为选项下标字符串
    ///
    /// 问答题原样返回输入文本
    pub fn normalize_answer(&self, input: &str) -> Option<String> {
        let input = input.trim();
        match &self.kind {
            QuestionKind::Essay => Some(input.to_string()),
            QuestionKind::MultipleChoice { options } => {
                let index = if let Ok(n) = input.parse::<usize>() {
                    n
                } else {
                    let mut chars = input.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) if c.is_ascii_alphabetic() => {
                            (c.to_ascii_uppercase() as u8 - b'A') as usize
                        }
                        _ => return None,
                    }
                };
                (index < options.len()).then(|| index.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    Essay,
}

fn default_points() -> i64 {
    10
}

/// 后端的题目结构
#[derive(Debug, Clone, Serialize, Deserialize)]
struct QuestionRecord {
    id: String,
    exam_id: String,
    question_text: String,
    question_type: QuestionType,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correct_answer: Option<String>,
    #[serde(default = "default_points")]
    points: i64,
    #[serde(default)]
    order: i64,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = ValidationError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let kind = match record.question_type {
            QuestionType::MultipleChoice => {
                let options = record.options.unwrap_or_default();
                if options.is_empty() {
                    return Err(ValidationError::InvalidQuestion {
                        id: record.id,
                        reason: "单选题没有选项".to_string(),
                    });
                }
                QuestionKind::MultipleChoice { options }
            }
            QuestionType::Essay => QuestionKind::Essay,
        };

        Ok(Self {
            id: record.id,
            exam_id: record.exam_id,
            text: record.question_text,
            kind,
            correct_answer: record.correct_answer,
            points: record.points,
            order: record.order,
        })
    }
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        let (question_type, options) = match question.kind {
            QuestionKind::MultipleChoice { options } => (QuestionType::MultipleChoice, Some(options)),
            QuestionKind::Essay => (QuestionType::Essay, None),
        };
        Self {
            id: question.id,
            exam_id: question.exam_id,
            question_text: question.text,
            question_type,
            options,
            correct_answer: question.correct_answer,
            points: question.points,
            order: question.order,
        }
    }
}

/// 新建题目表单
#[derive(Debug, Clone, Serialize)]
pub struct NewQuestion {
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    pub points: i64,
    pub order: i64,
}

impl NewQuestion {
    /// 单选题，`correct_index` 为正确选项下标
    pub fn multiple_choice(
        text: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        points: i64,
        order: i64,
    ) -> Self {
        Self {
            question_text: text.into(),
            question_type: QuestionType::MultipleChoice,
            options: Some(options),
            correct_answer: Some(correct_index.to_string()),
            points,
            order,
        }
    }

    /// 问答题（不自动评分）
    pub fn essay(text: impl Into<String>, points: i64, order: i64) -> Self {
        Self {
            question_text: text.into(),
            question_type: QuestionType::Essay,
            options: None,
            correct_answer: None,
            points,
            order,
        }
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.question_text.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "question_text",
            });
        }
        if self.question_type == QuestionType::MultipleChoice {
            let options = self.options.as_deref().unwrap_or_default();
            if options.is_empty() {
                return Err(ValidationError::NoOptions);
            }
            if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
                return Err(ValidationError::BlankOption { index: index + 1 });
            }
            let answer = self.correct_answer.clone().unwrap_or_default();
            match answer.parse::<usize>() {
                Ok(i) if i < options.len() => {}
                _ => {
                    return Err(ValidationError::CorrectAnswerOutOfRange {
                        answer,
                        len: options.len(),
                    })
                }
            }
        }
        Ok(self)
    }
}
