//! 请求与响应描述

use reqwest::Method;
use secrecy::Secret;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ClientError, Result};

/// 每个原始请求最多因认证失败重试的次数
pub const MAX_AUTH_RETRIES: u32 = 1;

/// 发往 API 的请求（路径相对于 API 前缀）
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// 匿名请求不携带凭证，也不参与 401 拦截（登录、注册、刷新）
    pub anonymous: bool,
    bearer: Option<Secret<String>>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            anonymous: false,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn with_query(mut self, params: Vec<(String, String)>) -> Self {
        self.query.extend(params);
        self
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    /// 实际携带的凭证
    pub fn bearer(&self) -> Option<&Secret<String>> {
        self.bearer.as_ref()
    }

    pub(crate) fn set_bearer(&mut self, token: Option<Secret<String>>) {
        self.bearer = token;
    }
}

/// API 响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// 解析 JSON 响应体
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            ClientError::Decode(format!("status {}: {}", self.status, e))
        })
    }

    /// 非 2xx 响应转换为 RequestFailed
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::RequestFailed {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// 管道内流转的请求，显式记录认证重试次数
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    request: ApiRequest,
    retries: u32,
}

impl RequestDescriptor {
    pub fn new(request: ApiRequest) -> Self {
        Self {
            request,
            retries: 0,
        }
    }

    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn can_retry(&self) -> bool {
        !self.request.anonymous && self.retries < MAX_AUTH_RETRIES
    }

    pub fn mark_retried(&mut self) {
        self.retries += 1;
    }

    /// 重写凭证头
    pub fn authorize(&mut self, token: Option<Secret<String>>) {
        self.request.set_bearer(token);
    }
}
