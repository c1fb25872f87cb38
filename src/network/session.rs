//! HTTP 会话管理
//!
//! `Session` 持有一个共享的 `reqwest::Client`，每次 `fetch` 只发出一个请求，
//! 不做重试。任何非 200 的状态码都视为失败。

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{StyleStatsError, StyleStatsResult};
use crate::network::response::FetchedResponse;

/// 传输层配置，原样传递给 HTTP 客户端
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// 附加请求头，按顺序追加（同名头可出现多次）
    pub headers: Vec<(String, String)>,
    pub user_agent: Option<String>,
    /// 是否接受 gzip / brotli / deflate 压缩
    pub compression: bool,
    pub timeout: Option<Duration>,
    /// 接受无效证书
    pub insecure: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        RequestOptions {
            headers: Vec::new(),
            user_agent: None,
            compression: true,
            timeout: None,
            insecure: false,
        }
    }
}

/// 网络会话
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
}

impl Session {
    pub fn new(options: &RequestOptions) -> StyleStatsResult<Session> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| {
                StyleStatsError::InvalidArgument(format!("invalid header name: {name:?}"))
            })?;
            let header_value = HeaderValue::from_str(value.trim()).map_err(|_| {
                StyleStatsError::InvalidArgument(format!("invalid value for header {name}"))
            })?;
            default_headers.append(header_name, header_value);
        }

        let mut builder = Client::builder()
            .default_headers(default_headers)
            .gzip(options.compression)
            .brotli(options.compression)
            .deflate(options.compression)
            .danger_accept_invalid_certs(options.insecure);

        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            StyleStatsError::InvalidArgument(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Session { client })
    }

    /// 发出一次 GET 请求（跟随重定向）并返回解码后的响应
    pub async fn fetch(&self, url: &Url) -> StyleStatsResult<FetchedResponse> {
        tracing::debug!("fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| {
                tracing::warn!("request to {} failed: {}", url, source);
                StyleStatsError::Transport {
                    url: url.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("{} responded with {}", url, status);
            return Err(StyleStatsError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let headers = response.headers().clone();
        let data = response
            .bytes()
            .await
            .map_err(|source| StyleStatsError::Transport {
                url: url.to_string(),
                source,
            })?;

        tracing::debug!("fetched {} ({} bytes)", final_url, data.len());

        Ok(FetchedResponse::from_bytes(
            status.as_u16(),
            headers,
            &data,
            final_url,
        ))
    }
}
