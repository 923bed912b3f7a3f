//! 学生端
//!
//! 首页统计、可参加考试、参加考试、考试记录

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::infrastructure::ApiClient;
use crate::models::{ExamStatus, User};
use crate::orchestrator::commands::{Command, ExamAction, SubjectAction};
use crate::orchestrator::console::{spawn_stdin_lines, Console, ConsoleConfirm};
use crate::orchestrator::views;
use crate::services::{ExamApi, ExamService, ResultService, SubjectService};
use crate::utils::append_session_log;
use crate::workflow::{ExamSession, SessionOutcome};

pub struct StudentShell<'a> {
    user: &'a User,
    api: &'a ApiClient,
    config: &'a Config,
}

impl<'a> StudentShell<'a> {
    pub fn new(user: &'a User, api: &'a ApiClient, config: &'a Config) -> Self {
        Self { user, api, config }
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Home => self.home().await,
            Command::Exams { action: None }
            | Command::Exams {
                action: Some(ExamAction::List),
            } => self.available_exams().await,
            Command::Subjects { action: None }
            | Command::Subjects {
                action: Some(SubjectAction::List),
            } => {
                let subjects = SubjectService::new(self.api).list().await?;
                views::print_subjects(&subjects);
                Ok(())
            }
            Command::Take { exam_id } => self.take_exam(&exam_id).await,
            Command::History => {
                let records = ResultService::new(self.api).history().await?;
                views::print_history(&records, false);
                Ok(())
            }
            other => bail!("该功能仅限管理员使用: {:?}", other),
        }
    }

    async fn home(&self) -> Result<()> {
        let stats = ResultService::new(self.api)
            .student_stats()
            .await
            .context("获取首页统计失败")?;
        views::print_student_stats(self.user, &stats);
        self.available_exams().await
    }

    async fn available_exams(&self) -> Result<()> {
        let exams = ExamService::new(self.api)
            .list()
            .await
            .context("获取考试列表失败")?;
        views::print_exams("📝 可参加的考试", &exams);
        Ok(())
    }

    /// 参加考试：从标准输入作答
    async fn take_exam(&self, exam_id: &str) -> Result<()> {
        self.register_attempt(exam_id).await?;
        self.run_session(exam_id, spawn_stdin_lines()).await
    }

    /// 参加考试，作答输入来自 `lines`
    pub async fn take_exam_with_input(
        &self,
        exam_id: &str,
        lines: mpsc::UnboundedReceiver<String>,
    ) -> Result<()> {
        self.register_attempt(exam_id).await?;
        self.run_session(exam_id, lines).await
    }

    /// 在服务端登记作答
    ///
    /// 已有进行中的记录时直接继续（后端对重复的 `/start` 返回 400），
    /// 已交卷的考试不能再次进入
    async fn register_attempt(&self, exam_id: &str) -> Result<()> {
        let history = ResultService::new(self.api)
            .history()
            .await
            .context("获取考试记录失败")?;

        if let Some(record) = history.iter().find(|r| r.exam_id == exam_id) {
            if record.status == ExamStatus::InProgress {
                info!("🔁 继续未完成的考试: {} ({})", record.exam_title, record.id);
                return Ok(());
            }
            views::toast_error("你已经参加过这场考试");
            bail!("考试 {} {}，不能再次作答", exam_id, record.status.label());
        }

        match self.api.start_exam(exam_id).await {
            Ok(record) => {
                debug!("已登记作答: {} ({:?})", record.id, record.status);
                Ok(())
            }
            Err(e) => {
                views::toast_error(&e.user_message("无法开始考试"));
                Err(e).context(format!("无法开始考试 {}", exam_id))
            }
        }
    }

    async fn run_session(
        &self,
        exam_id: &str,
        lines: mpsc::UnboundedReceiver<String>,
    ) -> Result<()> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, mut command_rx) = mpsc::channel(32);
        let (confirm, confirm_rx) = ConsoleConfirm::channel();

        let session = ExamSession::new(self.api, exam_id, event_tx);
        let console = Console::new(self.config.low_time_warning_secs);

        let (outcome, ()) = tokio::join!(
            session.run(&mut command_rx, &confirm),
            console.drive(event_rx, command_tx, confirm_rx, lines)
        );

        match outcome {
            SessionOutcome::Completed { exam, result } => {
                views::print_result(&exam, &result);
                if let Err(e) = append_session_log(&self.config.output_log_file, &exam, &result) {
                    warn!("⚠️ 写入考试日志失败: {}", e);
                } else {
                    info!("📝 考试记录已写入: {}", self.config.output_log_file);
                }
                Ok(())
            }
            SessionOutcome::LoadFailed => {
                // 回到可参加考试列表
                self.available_exams().await
            }
            SessionOutcome::Left => {
                println!("🚪 已离开考试，答案未提交");
                Ok(())
            }
        }
    }
}
