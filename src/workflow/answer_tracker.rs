//! 作答记录
//!
//! 题目 ID → 当前答案。只覆盖、不删除；键始终是本场考试题目 ID 的子集。

use std::collections::{BTreeMap, HashMap};

use crate::error::SessionError;
use crate::models::{AnswerEntry, Question, Submission};

#[derive(Debug, Clone, Default)]
pub struct AnswerTracker {
    /// 试卷定义的题目顺序
    question_ids: Vec<String>,
    answers: HashMap<String, String>,
}

impl AnswerTracker {
    /// 以试卷题目（已排序）创建空记录
    pub fn for_questions(questions: &[Question]) -> Self {
        Self {
            question_ids: questions.iter().map(|q| q.id.clone()).collect(),
            answers: HashMap::new(),
        }
    }

    /// 设置某题答案，覆盖旧值
    pub fn set(
        &mut self,
        question_id: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let question_id = question_id.into();
        if !self.question_ids.contains(&question_id) {
            return Err(SessionError::UnknownQuestion { question_id });
        }
        self.answers.insert(question_id, value.into());
        Ok(())
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// 当前答案快照
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.answers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.question_ids.len()
    }

    /// 答案非空的题目数
    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|v| !v.is_empty()).count()
    }

    pub fn unanswered_count(&self) -> usize {
        self.total() - self.answered_count()
    }

    /// 作答进度（0.0–1.0），只用于展示
    pub fn progress(&self) -> f64 {
        if self.question_ids.is_empty() {
            0.0
        } else {
            self.answered_count() as f64 / self.total() as f64
        }
    }

    /// 按试卷顺序生成交卷内容，未作答的题目为空串
    pub fn build_submission(&self) -> Submission {
        Submission {
            answers: self
                .question_ids
                .iter()
                .map(|id| AnswerEntry {
                    question_id: id.clone(),
                    answer_text: self.answers.get(id).cloned().unwrap_or_default(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionKind;

    fn questions(ids: &[&str]) -> Vec<Question> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| Question {
                id: id.to_string(),
                exam_id: "e1".into(),
                text: format!("Soal {}", i + 1),
                kind: QuestionKind::Essay,
                correct_answer: None,
                points: 10,
                order: i as i64,
            })
            .collect()
    }

    #[test]
    fn test_submission_keeps_order_and_fills_blanks() {
        let mut tracker = AnswerTracker::for_questions(&questions(&["q1", "q2", "q3"]));
        tracker.set("q3", "jawaban tiga").unwrap();
        tracker.set("q1", "0").unwrap();

        let submission = tracker.build_submission();
        let pairs: Vec<(&str, &str)> = submission
            .answers
            .iter()
            .map(|a| (a.question_id.as_str(), a.answer_text.as_str()))
            .collect();

        assert_eq!(pairs, vec![("q1", "0"), ("q2", ""), ("q3", "jawaban tiga")]);
        assert_eq!(submission.blank_count(), 1);
    }

    #[test]
    fn test_overwrite_and_progress() {
        let mut tracker = AnswerTracker::for_questions(&questions(&["q1", "q2"]));
        assert_eq!(tracker.progress(), 0.0);

        tracker.set("q1", "2").unwrap();
        tracker.set("q1", "3").unwrap();
        assert_eq!(tracker.get("q1"), Some("3"));
        assert_eq!(tracker.answered_count(), 1);
        assert_eq!(tracker.progress(), 0.5);

        // 清空的答案仍保留键，但不计入进度
        tracker.set("q1", "").unwrap();
        assert_eq!(tracker.snapshot().len(), 1);
        assert_eq!(tracker.answered_count(), 0);
        assert_eq!(tracker.unanswered_count(), 2);
    }

    #[test]
    fn test_snapshot_is_stable_between_reads() {
        let mut tracker = AnswerTracker::for_questions(&questions(&["q1", "q2"]));
        tracker.set("q2", "Jakarta").unwrap();

        assert_eq!(tracker.snapshot(), tracker.snapshot());
    }

    #[test]
    fn test_unknown_question_rejected() {
        let mut tracker = AnswerTracker::for_questions(&questions(&["q1"]));
        let err = tracker.set("q404", "x").unwrap_err();

        assert!(matches!(err, SessionError::UnknownQuestion { question_id } if question_id == "q404"));
        assert!(tracker.snapshot().is_empty());
    }

    #[test]
    fn test_empty_exam_progress() {
        let tracker = AnswerTracker::for_questions(&[]);
        assert_eq!(tracker.progress(), 0.0);
        assert!(tracker.build_submission().answers.is_empty());
    }
}
