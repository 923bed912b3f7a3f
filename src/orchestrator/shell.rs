//! 按角色分派命令

use anyhow::Result;

use crate::config::Config;
use crate::infrastructure::ApiClient;
use crate::models::{Role, User};
use crate::orchestrator::admin_shell::AdminShell;
use crate::orchestrator::commands::Command;
use crate::orchestrator::student_shell::StudentShell;

/// 登录用户对应的界面
pub enum Shell<'a> {
    Admin(AdminShell<'a>),
    Student(StudentShell<'a>),
}

impl<'a> Shell<'a> {
    pub fn for_user(user: &'a User, api: &'a ApiClient, config: &'a Config) -> Self {
        match user.role {
            Role::Admin => Shell::Admin(AdminShell::new(api)),
            Role::Student => Shell::Student(StudentShell::new(user, api, config)),
        }
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match self {
            Shell::Admin(shell) => shell.run(command).await,
            Shell::Student(shell) => shell.run(command).await,
        }
    }
}
