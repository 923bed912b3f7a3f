//! 登录服务 - 业务能力层
//!
//! 只负责"换取令牌 / 查询当前用户"，令牌的保存由调用方决定

use crate::error::{ApiError, AppResult};
use crate::infrastructure::ApiClient;
use crate::models::user::validate_email;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use tracing::{debug, info};

pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// 邮箱密码登录
    pub async fn login(&self, request: &LoginRequest) -> AppResult<AuthResponse> {
        validate_email(&request.email)?;
        debug!("登录: {}", request.email);

        let response: AuthResponse = self.api.post_json("auth/login", request).await?;
        info!("✓ 登录成功: {} ({})", response.user.name, response.user.role.name());
        Ok(response)
    }

    /// 注册新账号，成功后直接返回令牌
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let request = request.validate()?;
        debug!("注册: {} ({})", request.email, request.role.code());

        let response: AuthResponse = self.api.post_json("auth/register", &request).await?;
        info!("✓ 注册成功: {}", response.user.name);
        Ok(response)
    }

    /// 当前令牌对应的用户
    pub async fn me(&self) -> Result<User, ApiError> {
        self.api.get_json("auth/me").await
    }
}
