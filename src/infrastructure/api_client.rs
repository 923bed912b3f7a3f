//! API 客户端 - 基础设施层
//!
//! 持有唯一的 HTTP 连接池和登录令牌，只暴露"发请求"的能力

use crate::config::Config;
use crate::error::ApiError;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// API 客户端
///
/// 职责：
/// - 持有 `reqwest::Client` 和登录令牌
/// - 为每个请求附加 `Authorization: Bearer <token>`（没有令牌时不附加）
/// - 把非 2xx 响应转换为 `ApiError`
/// - 不认识 Exam / Question，不处理业务流程
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

/// 后端错误响应体 `{"detail": ...}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl ApiClient {
    /// 创建新的 API 客户端（未登录）
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|source| ApiError::ClientBuildFailed { source })?;

        Ok(Self {
            http,
            api_base: format!("{}/api", config.api_base_url.trim_end_matches('/')),
            token: None,
        })
    }

    /// 使用已有令牌
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// 完整请求地址
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// GET 并解析 JSON
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path);
        self.send_json(&endpoint("GET", path), request).await
    }

    /// POST JSON 请求体并解析 JSON
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        self.send_json(&endpoint("POST", path), request).await
    }

    /// 无请求体的 POST
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path);
        self.send_json(&endpoint("POST", path), request).await
    }

    /// DELETE，忽略响应内容
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let endpoint = endpoint("DELETE", path);
        let request = self.request(Method::DELETE, path);
        self.send(&endpoint, request).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(endpoint, request).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source,
            })
    }

    async fn send(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        debug!("发送请求: {}", endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        let status = response.status();
        debug!("响应状态: {} ({})", status, endpoint);

        if status.is_success() {
            return Ok(response);
        }

        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.detail.map(|d| match d {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            }),
            Err(_) => None,
        };

        Err(ApiError::from_status(endpoint, status.as_u16(), detail))
    }
}

fn endpoint(method: &str, path: &str) -> String {
    format!("{} /{}", method, path.trim_start_matches('/'))
}
