//! 命令行子命令
//!
//! 每个子命令对应网页端的一个页面或操作

use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::models::Role;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// 邮箱密码登录，令牌保存在本地
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "EXAM_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// 注册新账号
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "EXAM_PASSWORD", hide_env_values = true)]
        password: String,
        /// 姓名
        #[arg(short, long)]
        name: String,
        /// admin | student
        #[arg(short, long, default_value = "student")]
        role: Role,
        /// 班级（仅学生）
        #[arg(short, long)]
        class_name: Option<String>,
    },

    /// 退出登录并删除本地令牌
    Logout,

    /// 显示当前登录用户
    Whoami,

    /// 首页统计
    Home,

    /// 科目管理
    Subjects {
        #[command(subcommand)]
        action: Option<SubjectAction>,
    },

    /// 考试与题目管理；学生只能查看可参加的考试
    Exams {
        #[command(subcommand)]
        action: Option<ExamAction>,
    },

    /// 参加考试
    Take { exam_id: String },

    /// 考试记录
    History,

    /// 成绩查看（管理员）；不指定考试时显示全部记录
    Results { exam_id: Option<String> },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubjectAction {
    List,
    Add {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        icon: Option<String>,
    },
    Delete {
        subject_id: String,
        /// 跳过确认
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ExamAction {
    List,
    /// 试卷详情与题目
    Show { exam_id: String },
    Create {
        title: String,
        #[arg(short, long)]
        subject_id: String,
        /// 考试时长（分钟）
        #[arg(short = 'm', long, default_value_t = 60)]
        duration_minutes: i64,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        class_name: Option<String>,
        /// RFC 3339，例如 2024-05-01T08:00:00Z
        #[arg(long)]
        start_time: Option<DateTime<Utc>>,
        #[arg(long)]
        end_time: Option<DateTime<Utc>>,
    },
    Delete {
        exam_id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// 题目列表
    Questions { exam_id: String },
    /// 添加单选题，`--option` 可重复
    AddChoice {
        exam_id: String,
        text: String,
        #[arg(short, long = "option", required = true)]
        options: Vec<String>,
        /// 正确选项下标（从 0 开始）
        #[arg(short, long, default_value_t = 0)]
        correct: usize,
        #[arg(short, long, default_value_t = 10)]
        points: i64,
        /// 题目顺序，默认排在最后
        #[arg(long)]
        order: Option<i64>,
    },
    /// 添加问答题
    AddEssay {
        exam_id: String,
        text: String,
        #[arg(short, long, default_value_t = 10)]
        points: i64,
        #[arg(long)]
        order: Option<i64>,
    },
    DeleteQuestion {
        question_id: String,
        #[arg(short, long)]
        yes: bool,
    },
}
