//! 管理员端
//!
//! 首页统计、科目管理、考试与题目管理、成绩查看。
//! 删除操作都要先确认。

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::infrastructure::ApiClient;
use crate::models::{NewExam, NewQuestion, NewSubject};
use crate::orchestrator::commands::{Command, ExamAction, SubjectAction};
use crate::orchestrator::console::StdinConfirm;
use crate::orchestrator::views;
use crate::services::{ExamService, ResultService, ResultSummary, SubjectService};
use crate::workflow::{AssumeYes, Confirm};

pub struct AdminShell<'a> {
    api: &'a ApiClient,
}

impl<'a> AdminShell<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Home => {
                let stats = ResultService::new(self.api)
                    .admin_stats()
                    .await
                    .context("获取首页统计失败")?;
                views::print_admin_stats(&stats);
                Ok(())
            }
            Command::Subjects { action } => {
                self.subjects(action.unwrap_or(SubjectAction::List)).await
            }
            Command::Exams { action } => self.exams(action.unwrap_or(ExamAction::List)).await,
            Command::History => self.results(None).await,
            Command::Results { exam_id } => self.results(exam_id.as_deref()).await,
            Command::Take { .. } => bail!("管理员不能参加考试"),
            other => bail!("不支持的命令: {:?}", other),
        }
    }

    async fn subjects(&self, action: SubjectAction) -> Result<()> {
        let service = SubjectService::new(self.api);
        match action {
            SubjectAction::List => {
                views::print_subjects(&service.list().await?);
            }
            SubjectAction::Add {
                name,
                description,
                icon,
            } => {
                let subject = service
                    .create(NewSubject {
                        name,
                        description,
                        icon,
                    })
                    .await?;
                views::toast_success(&format!("科目已添加: {}", subject));
            }
            SubjectAction::Delete { subject_id, yes } => {
                if !confirmer(yes).confirm("确定要删除这个科目吗？").await {
                    info!("已取消删除科目 {}", subject_id);
                    return Ok(());
                }
                service.delete(&subject_id).await?;
                views::toast_success("科目已删除");
            }
        }
        Ok(())
    }

    async fn exams(&self, action: ExamAction) -> Result<()> {
        let service = ExamService::new(self.api);
        match action {
            ExamAction::List => {
                views::print_exams("📝 全部考试", &service.list().await?);
            }
            ExamAction::Show { exam_id } => {
                let (exam, questions) =
                    futures::try_join!(service.get(&exam_id), service.questions(&exam_id))?;
                views::print_exam_detail(&exam, &questions, true);
            }
            ExamAction::Create {
                title,
                subject_id,
                duration_minutes,
                description,
                class_name,
                start_time,
                end_time,
            } => {
                // 考试必须属于一个已存在的科目
                let subjects = SubjectService::new(self.api).list().await?;
                if !subjects.iter().any(|s| s.id == subject_id) {
                    bail!("科目不存在: {}（先用 `subjects list` 查看）", subject_id);
                }
                let exam = service
                    .create(NewExam {
                        title,
                        subject_id,
                        description,
                        duration_minutes,
                        class_name,
                        start_time,
                        end_time,
                    })
                    .await?;
                views::toast_success(&format!("考试已创建: {} ({})", exam.title, exam.id));
            }
            ExamAction::Delete { exam_id, yes } => {
                if !confirmer(yes)
                    .confirm("确定要删除这个考试吗？所有题目也将被删除。")
                    .await
                {
                    info!("已取消删除考试 {}", exam_id);
                    return Ok(());
                }
                service.delete(&exam_id).await?;
                views::toast_success("考试已删除");
            }
            ExamAction::Questions { exam_id } => {
                let questions = service.questions(&exam_id).await?;
                println!("题目（{}）", questions.len());
                views::print_questions(&questions, true);
            }
            ExamAction::AddChoice {
                exam_id,
                text,
                options,
                correct,
                points,
                order,
            } => {
                let form = NewQuestion::multiple_choice(text, options, correct, points, 0);
                let question = service.add_question(&exam_id, form, order).await?;
                views::toast_success(&format!("题目已添加: 第 {} 题", question.order + 1));
            }
            ExamAction::AddEssay {
                exam_id,
                text,
                points,
                order,
            } => {
                let form = NewQuestion::essay(text, points, 0);
                let question = service.add_question(&exam_id, form, order).await?;
                views::toast_success(&format!("题目已添加: 第 {} 题", question.order + 1));
            }
            ExamAction::DeleteQuestion { question_id, yes } => {
                if !confirmer(yes).confirm("确定要删除这道题目吗？").await {
                    info!("已取消删除题目 {}", question_id);
                    return Ok(());
                }
                service.delete_question(&question_id).await?;
                views::toast_success("题目已删除");
            }
        }
        Ok(())
    }

    /// 全部记录或某场考试的记录，附带汇总
    async fn results(&self, exam_id: Option<&str>) -> Result<()> {
        let service = ResultService::new(self.api);
        let records = match exam_id {
            Some(exam_id) => service.exam_results(exam_id).await?,
            None => service.history().await?,
        };
        views::print_history(&records, true);
        views::print_summary(&ResultSummary::from_records(&records));
        Ok(())
    }
}

fn confirmer(assume_yes: bool) -> Box<dyn Confirm> {
    if assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    }
}
