//! 考试会话 - 流程层
//!
//! 核心职责：定义"一次作答"的完整流程
//!
//! 状态流转：
//! 1. Loading：并发获取试卷与题目，任一失败 → Errored（跳回考试列表）
//! 2. Active：作答、倒计时；手动交卷（需确认）或时间到自动交卷
//! 3. Submitting：一次交卷请求；失败回到 Active，可再次交卷
//! 4. Completed：携带成绩进入结果页，会话结束

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::SessionError;
use crate::models::{Exam, ExamResult, Question};
use crate::services::ExamApi;
use crate::workflow::answer_tracker::AnswerTracker;
use crate::workflow::session_timer::SessionTimer;

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Active,
    Submitting,
    Completed,
    Errored,
}

/// 界面发给会话的指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// 设置某题答案（单选题为选项下标字符串）
    Answer { question_id: String, value: String },
    /// 手动交卷
    Submit,
    /// 离开考试页面
    Leave,
}

/// 交卷触发方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    /// 时间到，不需要确认
    TimeUp,
}

/// 会话发给界面的提示
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    LoadFailed { reason: String },
    TimeUp,
    Submitted,
    SubmitFailed { reason: String },
    SubmitCancelled,
    AnswerRejected { question_id: String },
}

impl Notice {
    /// 面向用户的提示文本
    pub fn message(&self) -> String {
        match self {
            Notice::LoadFailed { .. } => "加载考试失败".to_string(),
            Notice::TimeUp => "⏰ 时间到，正在自动交卷".to_string(),
            Notice::Submitted => "考试提交成功！".to_string(),
            Notice::SubmitFailed { .. } => "交卷失败，答案已保留，可以再次交卷".to_string(),
            Notice::SubmitCancelled => "已取消交卷".to_string(),
            Notice::AnswerRejected { question_id } => format!("题目 {} 不属于本场考试", question_id),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::LoadFailed { .. } | Notice::SubmitFailed { .. } | Notice::AnswerRejected { .. }
        )
    }
}

/// 会话事件
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Phase(SessionPhase),
    Loaded {
        exam: Exam,
        questions: Vec<Question>,
    },
    /// 倒计时剩余秒数
    Countdown { remaining: u64 },
    Progress { answered: usize, total: usize },
    Notice(Notice),
}

/// 会话结束方式
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// 交卷成功，进入结果页
    Completed { exam: Exam, result: ExamResult },
    /// 加载失败，回到可参加考试列表
    LoadFailed,
    /// 未交卷离开，计时器已注销
    Left,
}

/// 阻塞式是/否确认
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// 总是同意（`--yes`）
pub struct AssumeYes;

#[async_trait]
impl Confirm for AssumeYes {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// 手动交卷的确认文案；未答完只做提醒，不阻止交卷
pub fn submit_prompt(unanswered: usize) -> String {
    if unanswered > 0 {
        format!(
            "还有 {} 道题未作答。确定要交卷吗？交卷后答案不可修改。",
            unanswered
        )
    } else {
        "确定要交卷吗？交卷后答案不可修改。".to_string()
    }
}

enum TimerSignal {
    Tick(u64),
    Expired,
}

/// 考试会话
///
/// `run` 消耗会话本身，交卷成功后不可能再修改答案或重复交卷
pub struct ExamSession<'a, A: ExamApi + ?Sized> {
    api: &'a A,
    exam_id: String,
    phase: SessionPhase,
    events: mpsc::UnboundedSender<SessionEvent>,
}

/// 加载完成后的会话数据
struct ActiveExam {
    exam: Exam,
    tracker: AnswerTracker,
}

impl<'a, A: ExamApi + ?Sized> ExamSession<'a, A> {
    pub fn new(
        api: &'a A,
        exam_id: impl Into<String>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            api,
            exam_id: exam_id.into(),
            phase: SessionPhase::Loading,
            events,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// 运行会话直到交卷成功、加载失败或离开
    ///
    /// `commands` 关闭后不再接收指令，倒计时仍会自动交卷；
    /// 自动交卷失败且没有输入时以 `Left` 结束
    pub async fn run<C: Confirm + ?Sized>(
        mut self,
        commands: &mut mpsc::Receiver<SessionCommand>,
        confirm: &C,
    ) -> SessionOutcome {
        self.set_phase(SessionPhase::Loading);

        let (exam, questions) = match self.load().await {
            Ok(loaded) => loaded,
            Err(e) => {
                error!("❌ {}", e);
                self.set_phase(SessionPhase::Errored);
                self.notify(Notice::LoadFailed {
                    reason: e.to_string(),
                });
                return SessionOutcome::LoadFailed;
            }
        };

        let mut active = ActiveExam {
            tracker: AnswerTracker::for_questions(&questions),
            exam,
        };
        let duration = active.exam.duration_secs();

        info!(
            "📝 开始作答: {} | 题目 {} 道 | 时长 {} 秒",
            active.exam.title,
            questions.len(),
            duration
        );

        let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
        let expire_tx = timer_tx.clone();
        let mut timer = SessionTimer::start(
            duration,
            move |left| {
                let _ = timer_tx.send(TimerSignal::Tick(left));
            },
            move || {
                let _ = expire_tx.send(TimerSignal::Expired);
            },
        );

        self.emit(SessionEvent::Loaded {
            exam: active.exam.clone(),
            questions,
        });
        self.set_phase(SessionPhase::Active);
        self.emit(SessionEvent::Countdown {
            remaining: duration,
        });
        self.emit_progress(&active.tracker);

        if timer.is_expired() {
            warn!("⏰ 考试时长为 0，视为已到时间");
            self.notify(Notice::TimeUp);
            if let Some(result) = self.submit(&active, SubmitTrigger::TimeUp).await {
                return self.complete(active, result);
            }
        }

        let mut input_open = true;

        loop {
            tokio::select! {
                Some(signal) = timer_rx.recv() => match signal {
                    TimerSignal::Tick(remaining) => {
                        self.emit(SessionEvent::Countdown { remaining });
                    }
                    TimerSignal::Expired => {
                        info!("⏰ 时间到，自动交卷");
                        self.notify(Notice::TimeUp);
                        if let Some(result) = self.submit(&active, SubmitTrigger::TimeUp).await {
                            return self.complete(active, result);
                        }
                    }
                },
                command = commands.recv(), if input_open => match command {
                    Some(SessionCommand::Answer { question_id, value }) => {
                        match active.tracker.set(question_id.clone(), value) {
                            Ok(()) => self.emit_progress(&active.tracker),
                            Err(e) => {
                                warn!("⚠️ {}", e);
                                self.notify(Notice::AnswerRejected { question_id });
                            }
                        }
                    }
                    Some(SessionCommand::Submit) => {
                        let prompt = submit_prompt(active.tracker.unanswered_count());
                        if !confirm.confirm(&prompt).await {
                            debug!("用户取消交卷");
                            self.notify(Notice::SubmitCancelled);
                            continue;
                        }
                        if let Some(result) = self.submit(&active, SubmitTrigger::Manual).await {
                            timer.cancel();
                            return self.complete(active, result);
                        }
                    }
                    Some(SessionCommand::Leave) => {
                        timer.cancel();
                        info!("🚪 离开考试 {}，未交卷", self.exam_id);
                        return SessionOutcome::Left;
                    }
                    None => {
                        debug!("指令通道已关闭，只等待倒计时");
                        input_open = false;
                    }
                },
                // 没有输入，计时器也已结束（自动交卷失败或时长为 0）
                else => {
                    warn!("⚠️ 考试 {} 无法继续作答，未交卷离开", self.exam_id);
                    return SessionOutcome::Left;
                }
            }
        }
    }

    /// 并发获取试卷与题目，两者都成功才继续
    async fn load(&self) -> Result<(Exam, Vec<Question>), SessionError> {
        info!("📥 正在加载考试 {}...", self.exam_id);

        let (exam, mut questions) = futures::try_join!(
            self.api.fetch_exam(&self.exam_id),
            self.api.fetch_questions(&self.exam_id)
        )
        .map_err(|source| SessionError::FetchFailure {
            exam_id: self.exam_id.clone(),
            source,
        })?;

        questions.sort_by_key(|q| q.order);
        Ok((exam, questions))
    }

    /// 发出一次交卷请求；失败时回到 Active 并返回 `None`
    async fn submit(&mut self, active: &ActiveExam, trigger: SubmitTrigger) -> Option<ExamResult> {
        self.set_phase(SessionPhase::Submitting);

        let submission = active.tracker.build_submission();
        info!(
            "📤 正在交卷 ({:?}): {} 道题, 未作答 {} 道",
            trigger,
            submission.answers.len(),
            submission.blank_count()
        );

        match self.api.submit_exam(&self.exam_id, &submission).await {
            Ok(result) => {
                info!("✓ 交卷成功: {}/{}", result.score, result.total_points);
                self.set_phase(SessionPhase::Completed);
                self.notify(Notice::Submitted);
                Some(result)
            }
            Err(source) => {
                let e = SessionError::SubmitFailure {
                    exam_id: self.exam_id.clone(),
                    source,
                };
                warn!("⚠️ {}", e);
                self.set_phase(SessionPhase::Active);
                self.notify(Notice::SubmitFailed {
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    fn complete(&self, active: ActiveExam, result: ExamResult) -> SessionOutcome {
        SessionOutcome::Completed {
            exam: active.exam,
            result,
        }
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        debug!("会话阶段: {:?} → {:?}", self.phase, phase);
        self.phase = phase;
        self.emit(SessionEvent::Phase(phase));
    }

    fn emit_progress(&self, tracker: &AnswerTracker) {
        self.emit(SessionEvent::Progress {
            answered: tracker.answered_count(),
            total: tracker.total(),
        });
    }

    fn notify(&self, notice: Notice) {
        self.emit(SessionEvent::Notice(notice));
    }

    // 界面可能已经关闭，发送失败可以忽略
    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}
