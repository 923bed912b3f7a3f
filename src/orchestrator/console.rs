//! 控制台作答界面
//!
//! 把考试会话的事件渲染到终端，把输入行翻译成会话指令。
//! 确认框通过通道转给控制台，由下一行输入回答。

use async_trait::async_trait;
use regex::Regex;
use std::io::{BufRead, Write};
use std::sync::OnceLock;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::models::Question;
use crate::orchestrator::views::{print_exams, print_questions, toast_error, toast_success};
use crate::utils::format_countdown;
use crate::workflow::{Confirm, SessionCommand, SessionEvent, SessionPhase};

/// 一行输入的含义
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// `<题号> <答案>`，题号从 1 开始；只有题号时清空答案
    Answer { number: usize, value: String },
    Submit,
    Status,
    List,
    Quit,
    Help,
    Unknown(String),
}

fn answer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)(?:\s+(.*))?$").expect("valid answer regex"))
}

pub fn parse_input(line: &str) -> ConsoleInput {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "submit" | "s" | "交卷" => return ConsoleInput::Submit,
        "status" | "?" => return ConsoleInput::Status,
        "list" | "l" => return ConsoleInput::List,
        "quit" | "q" | "exit" => return ConsoleInput::Quit,
        "help" | "h" => return ConsoleInput::Help,
        _ => {}
    }

    match answer_pattern().captures(line) {
        Some(caps) => match caps[1].parse::<usize>() {
            Ok(number) => ConsoleInput::Answer {
                number,
                value: caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            },
            Err(_) => ConsoleInput::Unknown(line.to_string()),
        },
        None => ConsoleInput::Unknown(line.to_string()),
    }
}

/// 是否为肯定回答
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "是" | "确定"
    )
}

fn print_help() {
    println!("输入说明:");
    println!("  <题号> <答案>   单选题填选项字母，例如 `1 B`；问答题直接写答案");
    println!("  <题号>          清空该题答案");
    println!("  status          查看剩余时间和作答进度");
    println!("  list            重新显示题目");
    println!("  submit          交卷");
    println!("  quit            离开（不交卷）");
}

/// 控制台发给确认框的请求
pub struct ConfirmRequest {
    pub message: String,
    pub reply: oneshot::Sender<bool>,
}

/// 由控制台回答的确认框
pub struct ConsoleConfirm {
    requests: mpsc::UnboundedSender<ConfirmRequest>,
}

impl ConsoleConfirm {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ConfirmRequest>) {
        let (requests, rx) = mpsc::unbounded_channel();
        (Self { requests }, rx)
    }
}

#[async_trait]
impl Confirm for ConsoleConfirm {
    async fn confirm(&self, message: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        let request = ConfirmRequest {
            message: message.to_string(),
            reply,
        };
        if self.requests.send(request).is_err() {
            return false;
        }
        answer.await.unwrap_or(false)
    }
}

/// 直接读标准输入的确认框，用于删除等一次性操作
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        let _ = std::io::stdout().flush();

        let line = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| line)
        })
        .await;

        matches!(line, Ok(Ok(answer)) if is_yes(&answer))
    }
}

/// 后台线程逐行读取标准输入
///
/// 线程阻塞在读取上时不会拖住进程退出
pub fn spawn_stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
    rx
}

/// 控制台作答界面
pub struct Console {
    /// 剩余时间低于该秒数时提醒
    low_time_warning_secs: u64,
    questions: Vec<Question>,
    remaining: u64,
    answered: usize,
    total: usize,
}

impl Console {
    pub fn new(low_time_warning_secs: u64) -> Self {
        Self {
            low_time_warning_secs,
            questions: Vec::new(),
            remaining: 0,
            answered: 0,
            total: 0,
        }
    }

    /// 运行界面，直到会话关闭事件通道
    ///
    /// 输入结束后不再读取，但继续渲染事件（倒计时仍会自动交卷）
    pub async fn drive(
        mut self,
        mut events: mpsc::UnboundedReceiver<SessionEvent>,
        commands: mpsc::Sender<SessionCommand>,
        mut confirms: mpsc::UnboundedReceiver<ConfirmRequest>,
        mut lines: mpsc::UnboundedReceiver<String>,
    ) {
        let mut pending: Option<oneshot::Sender<bool>> = None;
        let mut input_open = true;
        // 输入结束时释放发送端，会话才能知道不会再有指令
        let mut commands = Some(commands);

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.render(event),
                    None => break,
                },
                Some(request) = confirms.recv() => {
                    if input_open {
                        print!("{} [y/N] ", request.message);
                        let _ = std::io::stdout().flush();
                        pending = Some(request.reply);
                    } else {
                        let _ = request.reply.send(false);
                    }
                }
                line = lines.recv(), if input_open => match line {
                    Some(line) => {
                        if let Some(reply) = pending.take() {
                            let _ = reply.send(is_yes(&line));
                        } else if let Some(commands) = &commands {
                            self.handle_line(&line, commands).await;
                        }
                    }
                    None => {
                        debug!("标准输入已关闭");
                        input_open = false;
                        commands = None;
                        if let Some(reply) = pending.take() {
                            let _ = reply.send(false);
                        }
                    }
                },
            }
        }
    }

    async fn handle_line(&self, line: &str, commands: &mpsc::Sender<SessionCommand>) {
        let command = match parse_input(line) {
            ConsoleInput::Answer { number, value } => {
                let Some(question) = number.checked_sub(1).and_then(|i| self.questions.get(i))
                else {
                    toast_error(&format!("没有第 {} 题", number));
                    return;
                };
                if value.is_empty() {
                    SessionCommand::Answer {
                        question_id: question.id.clone(),
                        value,
                    }
                } else {
                    match question.normalize_answer(&value) {
                        Some(value) => SessionCommand::Answer {
                            question_id: question.id.clone(),
                            value,
                        },
                        None => {
                            toast_error(&format!(
                                "第 {} 题没有选项 {}，可选 A-{}",
                                number,
                                value,
                                Question::option_label(question.options().len().saturating_sub(1))
                            ));
                            return;
                        }
                    }
                }
            }
            ConsoleInput::Submit => SessionCommand::Submit,
            ConsoleInput::Quit => SessionCommand::Leave,
            ConsoleInput::Status => {
                self.print_status();
                return;
            }
            ConsoleInput::List => {
                print_questions(&self.questions, false);
                return;
            }
            ConsoleInput::Help => {
                print_help();
                return;
            }
            ConsoleInput::Unknown(text) => {
                if !text.is_empty() {
                    toast_error(&format!("无法识别的输入: {}（输入 help 查看说明）", text));
                }
                return;
            }
        };

        if commands.send(command).await.is_err() {
            warn!("⚠️ 考试会话已结束，输入被忽略");
        }
    }

    fn render(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Phase(phase) => {
                debug!("界面收到阶段: {:?}", phase);
                if phase == SessionPhase::Submitting {
                    println!("📤 正在交卷...");
                }
            }
            SessionEvent::Loaded { exam, questions } => {
                print_exams("📝 开始考试", std::slice::from_ref(&exam));
                print_questions(&questions, false);
                println!();
                print_help();
                self.total = questions.len();
                self.questions = questions;
            }
            SessionEvent::Countdown { remaining } => {
                self.remaining = remaining;
                if remaining == self.low_time_warning_secs && remaining > 0 {
                    println!(
                        "⚠️ 剩余时间 {}，请尽快作答",
                        format_countdown(remaining)
                    );
                } else if remaining % 60 == 0 || remaining <= 10 {
                    println!("⏱️ 剩余时间 {}", format_countdown(remaining));
                }
            }
            SessionEvent::Progress { answered, total } => {
                self.answered = answered;
                self.total = total;
                println!("✏️ 已作答 {}/{}", answered, total);
            }
            SessionEvent::Notice(notice) => {
                if notice.is_error() {
                    toast_error(&notice.message());
                } else {
                    toast_success(&notice.message());
                }
            }
        }
    }

    fn print_status(&self) {
        let marker = if self.remaining < self.low_time_warning_secs {
            "⚠️"
        } else {
            "⏱️"
        };
        println!(
            "{} 剩余时间 {} | 已作答 {}/{}",
            marker,
            format_countdown(self.remaining),
            self.answered,
            self.total
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer_lines() {
        assert_eq!(
            parse_input("2 b"),
            ConsoleInput::Answer {
                number: 2,
                value: "b".into()
            }
        );
        assert_eq!(
            parse_input("  3   Ibu kota Indonesia adalah Jakarta "),
            ConsoleInput::Answer {
                number: 3,
                value: "Ibu kota Indonesia adalah Jakarta".into()
            }
        );
        assert_eq!(
            parse_input("4"),
            ConsoleInput::Answer {
                number: 4,
                value: String::new()
            }
        );
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_input("SUBMIT"), ConsoleInput::Submit);
        assert_eq!(parse_input("交卷"), ConsoleInput::Submit);
        assert_eq!(parse_input("q"), ConsoleInput::Quit);
        assert_eq!(parse_input("?"), ConsoleInput::Status);
        assert!(matches!(parse_input("abc"), ConsoleInput::Unknown(_)));
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(is_yes("是"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }

    #[tokio::test]
    async fn test_console_confirm_round_trip() {
        let (confirm, mut requests) = ConsoleConfirm::channel();
        let responder = tokio::spawn(async move {
            let request = requests.recv().await.unwrap();
            assert!(request.message.contains("交卷"));
            request.reply.send(true).unwrap();
        });

        assert!(confirm.confirm("确定要交卷吗？").await);
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn test_console_confirm_without_console_declines() {
        let (confirm, requests) = ConsoleConfirm::channel();
        drop(requests);
        assert!(!confirm.confirm("确定要交卷吗？").await);
    }
}
