//! # Exam Portal Client
//!
//! 在线考试平台的命令行客户端：管理员维护科目、考试和题目，学生在限时内作答并交卷
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源，只暴露能力
//! - `ApiClient` - 唯一的 HTTP 客户端，携带登录令牌
//! - `TokenStore` - 本地令牌文件
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `AuthService` - 登录 / 注册 / 当前用户
//! - `SubjectService` / `ExamService` - 科目、考试、题目管理
//! - `ResultService` - 考试记录与首页统计
//! - `ExamApi` - 考试会话依赖的后端接口
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次作答"的完整流程
//! - `SessionTimer` - 倒计时
//! - `AnswerTracker` - 作答记录
//! - `ExamSession` - 状态机（加载 → 作答 → 交卷 → 完成）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 登录状态与命令分派
//! - `orchestrator/admin_shell` / `student_shell` - 按角色划分的界面
//! - `orchestrator/console` - 控制台作答界面
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ApiClient, TokenStore};
pub use models::{Exam, ExamResult, Question, Role, Submission, User};
pub use orchestrator::{App, Command};
pub use services::ExamApi;
pub use workflow::{AnswerTracker, ExamSession, SessionOutcome, SessionTimer};
