//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责登录状态与命令调度，是整个客户端的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用主结构
//! - 持有 `ApiClient` 和 `TokenStore`
//! - 恢复 / 保存 / 清除登录令牌
//! - 按角色把命令交给对应界面
//!
//! ### `admin_shell` / `student_shell` - 按角色划分的界面
//! - 管理员：科目、考试、题目、成绩
//! - 学生：可参加考试、参加考试、考试记录
//!
//! ### `console` - 控制台作答界面
//! - 渲染考试会话事件，把输入翻译成会话指令
//!
//! ## 层次关系
//!
//! ```text
//! app (登录状态 + 分派)
//!     ↓
//! admin_shell / student_shell (单个命令)
//!     ↓
//! workflow::ExamSession (一次作答)
//!     ↓
//! services (能力层：auth / subject / exam / result)
//!     ↓
//! infrastructure (基础设施：ApiClient / TokenStore)
//! ```

pub mod admin_shell;
pub mod app;
pub mod commands;
pub mod console;
pub mod shell;
pub mod student_shell;
pub mod views;

// 重新导出主要类型
pub use app::App;
pub use commands::{Command, ExamAction, SubjectAction};
pub use console::{Console, ConsoleConfirm, StdinConfirm};
pub use shell::Shell;
