//! 应用主结构 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建 API 客户端，恢复本地令牌并向后端确认身份
//! 2. **登录状态**：登录 / 注册 / 退出，令牌写入 `TokenStore`
//! 3. **命令分派**：按当前用户角色交给管理员端或学生端
//! 4. **身份失效**：任何命令遇到 401/403 时清除令牌并提示重新登录

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::infrastructure::{ApiClient, TokenStore};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::orchestrator::commands::Command;
use crate::orchestrator::shell::Shell;
use crate::orchestrator::views;
use crate::services::AuthService;
use crate::utils::logging::log_startup;

/// 应用主结构
pub struct App {
    config: Config,
    api: ApiClient,
    store: TokenStore,
    user: Option<User>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config.api_base_url);

        let api = ApiClient::new(&config).context("初始化 API 客户端失败")?;
        let store = TokenStore::new(&config.token_file);

        let mut app = Self {
            config,
            api,
            store,
            user: None,
        };
        app.restore_session().await?;
        Ok(app)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// 用本地令牌恢复登录状态；令牌失效时删除
    async fn restore_session(&mut self) -> Result<()> {
        let Some(token) = self.store.load()? else {
            return Ok(());
        };
        self.api.set_token(token);

        match AuthService::new(&self.api).me().await {
            Ok(user) => {
                info!("👤 已登录: {} ({})", user.name, user.role.name());
                self.user = Some(user);
                Ok(())
            }
            Err(e) if e.is_auth_failure() => {
                warn!("⚠️ 登录已失效，删除本地令牌: {}", e);
                self.forget_token()?;
                Ok(())
            }
            Err(e) => Err(e).context("无法连接服务器验证登录状态"),
        }
    }

    /// 运行一个命令
    pub async fn run(mut self, command: Command) -> Result<()> {
        match command {
            Command::Login { email, password } => {
                let response = AuthService::new(&self.api)
                    .login(&LoginRequest { email, password })
                    .await
                    .map_err(|e| login_error(e.into(), "登录失败"))?;
                self.remember(response)?;
                views::toast_success("登录成功！");
                return Ok(());
            }
            Command::Register {
                email,
                password,
                name,
                role,
                class_name,
            } => {
                let response = AuthService::new(&self.api)
                    .register(RegisterRequest {
                        email,
                        password,
                        name,
                        role,
                        class_name,
                    })
                    .await
                    .map_err(|e| login_error(e.into(), "注册失败"))?;
                self.remember(response)?;
                views::toast_success("注册成功！");
                return Ok(());
            }
            Command::Logout => {
                self.forget_token()?;
                self.user = None;
                views::toast_success("已退出登录");
                return Ok(());
            }
            Command::Whoami => {
                match &self.user {
                    Some(user) => views::print_user(user),
                    None => println!("未登录"),
                }
                return Ok(());
            }
            _ => {}
        }

        let Some(user) = self.user.as_ref() else {
            bail!("请先登录：exam-client login --email <邮箱> --password <密码>");
        };

        let result = Shell::for_user(user, &self.api, &self.config)
            .run(command)
            .await;

        if let Err(e) = &result {
            if is_auth_failure(e) {
                warn!("⚠️ 身份验证失败，清除本地令牌");
                self.forget_token()?;
                bail!("登录已失效，请重新登录");
            }
        }
        result
    }

    fn remember(&mut self, response: AuthResponse) -> Result<()> {
        self.store
            .save(&response.token)
            .context("保存登录令牌失败")?;
        self.api.set_token(response.token);
        views::print_user(&response.user);
        self.user = Some(response.user);
        Ok(())
    }

    fn forget_token(&mut self) -> Result<()> {
        self.api.clear_token();
        self.store.clear().context("删除登录令牌失败")?;
        Ok(())
    }
}

/// 错误链中是否含有 401/403
pub fn is_auth_failure(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_auth_failure)
    })
}

/// 登录 / 注册失败时优先展示后端的 detail
fn login_error(error: anyhow::Error, fallback: &str) -> anyhow::Error {
    let detail = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ApiError>())
        .map(|e| e.user_message(fallback));
    match detail {
        Some(message) => error.context(message),
        None => error.context(fallback.to_string()),
    }
}
