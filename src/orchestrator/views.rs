//! 控制台视图
//!
//! 列表、统计卡片、结果页的打印函数。只负责展示，不发请求。

use chrono::{DateTime, Local, Utc};

use crate::models::{
    AdminStats, Exam, ExamResult, Question, StudentExam, StudentStats, Subject, User,
};
use crate::services::ResultSummary;
use crate::utils::logging::{print_banner, print_rule, truncate_text};

/// 成功提示
pub fn toast_success(message: &str) {
    println!("✅ {}", message);
}

/// 失败提示
pub fn toast_error(message: &str) {
    println!("❌ {}", message);
}

fn local_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn print_user(user: &User) {
    println!("👤 {} <{}>", user.name, user.email);
    println!("   角色: {}", user.role.name());
    if let Some(class_name) = &user.class_name {
        println!("   班级: {}", class_name);
    }
}

pub fn print_admin_stats(stats: &AdminStats) {
    print_banner("📊 管理员首页");
    println!("考试总数: {}", stats.total_exams);
    println!("科目总数: {}", stats.total_subjects);
    println!("学生人数: {}", stats.total_students);
    println!("交卷次数: {}", stats.total_submissions);
}

pub fn print_student_stats(user: &User, stats: &StudentStats) {
    print_banner(&format!("👋 欢迎，{}", user.name));
    println!("已完成考试: {}", stats.completed_exams);
    println!("进行中: {}", stats.in_progress);
    println!("平均分: {:.1}", stats.average_score);
}

pub fn print_subjects(subjects: &[Subject]) {
    print_banner(&format!("📚 科目（{}）", subjects.len()));
    if subjects.is_empty() {
        println!("暂无科目");
        return;
    }
    for subject in subjects {
        println!("[{}] {}", subject.id, subject);
        if let Some(description) = &subject.description {
            println!("    {}", truncate_text(description, 60));
        }
    }
}

pub fn print_exams(title: &str, exams: &[Exam]) {
    print_banner(&format!("{}（{}）", title, exams.len()));
    if exams.is_empty() {
        println!("暂无考试");
        return;
    }
    for exam in exams {
        println!("[{}] {}", exam.id, exam.title);
        println!(
            "    科目: {} | 时长: {} 分钟 | 总分: {}",
            exam.subject_label(),
            exam.duration_minutes,
            exam.total_points
        );
        if let Some(class_name) = &exam.class_name {
            println!("    班级: {}", class_name);
        }
        if exam.start_time.is_some() || exam.end_time.is_some() {
            println!(
                "    时间: {} ~ {}",
                local_time(exam.start_time),
                local_time(exam.end_time)
            );
        }
    }
}

/// 打印题目；`show_answers` 为真时标出正确选项
pub fn print_questions(questions: &[Question], show_answers: bool) {
    for (number, question) in questions.iter().enumerate() {
        println!(
            "\n{}. {}（{} 分）",
            number + 1,
            question.text,
            question.points
        );
        if question.is_multiple_choice() {
            for (index, option) in question.options().iter().enumerate() {
                let correct = show_answers
                    && question.correct_answer.as_deref() == Some(index.to_string().as_str());
                println!(
                    "   {}. {}{}",
                    Question::option_label(index),
                    option,
                    if correct { "  ✓" } else { "" }
                );
            }
        } else {
            println!("   （问答题）");
        }
        if show_answers {
            println!("   [{}] 顺序 {}", question.id, question.order);
        }
    }
}

pub fn print_exam_detail(exam: &Exam, questions: &[Question], show_answers: bool) {
    print_exams("📝 考试详情", std::slice::from_ref(exam));
    if let Some(description) = &exam.description {
        println!("{}", description);
    }
    print_rule();
    println!("题目（{}）", questions.len());
    print_questions(questions, show_answers);
}

/// 考试记录；`show_student` 为真时显示学生姓名（管理员视图）
pub fn print_history(records: &[StudentExam], show_student: bool) {
    print_banner(&format!("📋 考试记录（{}）", records.len()));
    if records.is_empty() {
        println!("暂无记录");
        return;
    }
    for record in records {
        let score = match (record.score, record.percentage()) {
            (Some(score), Some(percentage)) => format!(
                "{}/{} ({:.1}%)",
                score, record.total_points, percentage
            ),
            _ => "-".to_string(),
        };
        if show_student {
            println!("{} | {}", record.student_name, record.exam_title);
        } else {
            println!("{}", record.exam_title);
        }
        println!(
            "    {} | {} | 得分: {} | 开始: {} | 交卷: {}",
            record.subject_name,
            record.status.label(),
            score,
            local_time(record.started_at),
            local_time(record.submitted_at)
        );
    }
}

pub fn print_summary(summary: &ResultSummary) {
    print_rule();
    println!(
        "共 {} 条记录，已评分 {} 条，平均得分率 {:.2}%",
        summary.total, summary.graded, summary.average_percentage
    );
}

/// 交卷后的结果页
pub fn print_result(exam: &Exam, result: &ExamResult) {
    let grade = result.grade();
    print_banner("🏁 考试完成！");
    println!("{}", exam.title);
    println!("得分: {}/{}", result.score, result.total_points);
    println!("得分率: {:.1}%  {}", result.percentage(), grade.label());
    println!("{}", grade.encouragement());
}
