use anyhow::Result;
/// 日志与展示工具模块
///
/// 提供日志格式化、倒计时显示和会话日志文件的辅助函数
use std::fs::OpenOptions;
use std::io::Write;
use tracing::info;

use crate::models::{Exam, ExamResult};

/// 倒计时显示为 `mm:ss`
///
/// 超过 99 分钟时分钟位会变宽，不截断
pub fn format_countdown(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// 记录程序启动信息
pub fn log_startup(api_base_url: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 在线考试客户端启动");
    info!("🌐 服务地址: {}", api_base_url);
    info!("{}", "=".repeat(60));
}

/// 打印分隔标题
pub fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

/// 打印细分隔线
pub fn print_rule() {
    println!("{}", "─".repeat(60));
}

/// 追加一条考试会话记录
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `exam`: 本场考试
/// - `result`: 交卷结果
pub fn append_session_log(log_file_path: &str, exam: &Exam, result: &ExamResult) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    writeln!(
        file,
        "[{}] {} ({}) 得分 {}/{} ({:.1}%) {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        exam.title,
        exam.id,
        result.score,
        result.total_points,
        result.percentage(),
        result.grade().label()
    )?;
    Ok(())
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(59), "00:59");
        assert_eq!(format_countdown(3600), "60:00");
        assert_eq!(format_countdown(299), "04:59");
    }

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("在线考试系统", 4), "在线考试...");
        assert_eq!(truncate_text("短", 4), "短");
    }

    #[test]
    fn test_append_session_log() {
        let path = std::env::temp_dir().join(format!("exam_log_{}.txt", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        let exam: Exam = serde_json::from_value(serde_json::json!({
            "id": "e1",
            "title": "Matematika Dasar",
            "subject_id": "s1",
            "duration_minutes": 30,
            "total_points": 20
        }))
        .unwrap();
        let result = ExamResult {
            score: 16.0,
            total_points: 20,
        };

        append_session_log(&path_str, &exam, &result).unwrap();
        append_session_log(&path_str, &exam, &result).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Matematika Dasar (e1) 得分 16/20 (80.0%)"));
        let _ = std::fs::remove_file(&path);
    }
}
