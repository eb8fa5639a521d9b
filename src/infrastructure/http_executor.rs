//! HTTP 执行器 - 基础设施层
//!
//! 持有唯一的 reqwest::Client，只暴露"发请求"的能力

use reqwest::multipart::Form;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// 一次请求的原始响应
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub endpoint: String,
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpReply {
    /// 把响应体反序列化为指定类型，失败视为响应格式错误
    pub fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| AppError::malformed(&self.endpoint, e.to_string()))
    }
}

/// HTTP 执行器
///
/// 职责：
/// - 持有唯一的 Client 资源和服务地址
/// - 暴露 multipart / JSON / 下载三种能力
/// - 不认识 Module / Segment
pub struct HttpExecutor {
    client: Client,
    base_url: String,
}

impl HttpExecutor {
    /// 创建新的 HTTP 执行器
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::request_failed(config.base_url(), e))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 拼接完整地址
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// 发送 multipart 表单
    pub async fn post_multipart(&self, endpoint: &str, form: Form) -> AppResult<HttpReply> {
        let url = self.url(endpoint);
        debug!("POST (multipart) {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::request_failed(endpoint, e))?;

        Self::read_reply(endpoint, response).await
    }

    /// 发送 JSON 请求体
    pub async fn post_json<T: Serialize + ?Sized>(&self, endpoint: &str, body: &T) -> AppResult<HttpReply> {
        let url = self.url(endpoint);
        debug!("POST (json) {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::request_failed(endpoint, e))?;

        Self::read_reply(endpoint, response).await
    }

    /// 下载文件内容
    pub async fn get_bytes(&self, url: &str) -> AppResult<HttpReply> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::request_failed(url, e))?;

        Self::read_reply(url, response).await
    }

    async fn read_reply(endpoint: &str, response: reqwest::Response) -> AppResult<HttpReply> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::request_failed(endpoint, e))?
            .to_vec();

        debug!("{} -> {} ({} 字节)", endpoint, status, body.len());

        Ok(HttpReply {
            endpoint: endpoint.to_string(),
            status,
            body,
        })
    }
}

/// 服务地址与相对路径拼接，连接处只保留一个斜杠；绝对地址原样返回
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
