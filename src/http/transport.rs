//! 传输层
//! 管道只依赖 Transport trait，生产环境使用 reqwest，测试可替换为内存实现

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use tracing::debug;
use url::Url;

use super::request::{ApiRequest, ApiResponse};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// 执行单个 HTTP 请求，不做任何认证处理
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// 基于 reqwest 的传输实现
pub struct ReqwestTransport {
    client: Client,
    root: Url,
}

impl ReqwestTransport {
    /// 创建新的传输（超时同样作用于刷新请求）
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;
        let root = config.api_root()?;

        Ok(Self { client, root })
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let mut url = self
            .root
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| ClientError::Config(format!("Invalid request path {}: {}", request.path, e)))?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(request)?;
        debug!(method = %request.method, url = %url, "Sending request");

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header("Content-Type", "application/json");

        if let Some(token) = request.bearer() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_appends_query() {
        let transport = ReqwestTransport::new(&ClientConfig::default()).unwrap();
        let request = ApiRequest::get("/posts/").with_query(vec![
            ("division".to_string(), "Cox's Bazar".to_string()),
            ("page".to_string(), "2".to_string()),
        ]);

        let url = transport.url_for(&request).unwrap();
        assert_eq!(url.path(), "/api/posts/");
        assert_eq!(url.query(), Some("division=Cox%27s+Bazar&page=2"));
    }

    #[test]
    fn test_transport_uses_configured_root() {
        let mut config = ClientConfig::default();
        config.api.base_url = "https://reports.example.com".to_string();
        config.api.prefix = "v2".to_string();

        let transport = ReqwestTransport::new(&config).unwrap();
        assert_eq!(transport.root().as_str(), "https://reports.example.com/v2/");
    }
}
