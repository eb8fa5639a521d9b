/// 大纲服务客户端
///
/// 封装所有与大纲抽取 / 定稿服务相关的调用逻辑
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value as JsonValue;
use tokio::fs;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{join_url, HttpExecutor, HttpReply};
use crate::models::outline::Outline;
use crate::models::upload::{mime_for, UploadBundle};

pub const GENERATE_OUTLINE_ENDPOINT: &str = "/generate-outline";
pub const FINALIZE_OUTLINE_ENDPOINT: &str = "/finalize-outline";

/// 定稿接口的返回
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeReply {
    pub message: String,
    /// 相对于服务地址的下载路径
    pub download_url: String,
}

/// 大纲后端能力
///
/// 会话只依赖这个 trait，测试里可以替换成假的实现
#[async_trait]
pub trait OutlineBackend: Send + Sync {
    /// 上传材料并抽取大纲
    async fn generate_outline(&self, bundle: &UploadBundle) -> AppResult<Outline>;

    /// 提交精简后的大纲，生成最终文件
    async fn finalize_outline(&self, selected: &Outline) -> AppResult<FinalizeReply>;

    /// 下载最终文件
    async fn download(&self, link: &str) -> AppResult<Vec<u8>>;

    /// 服务地址 + 相对下载路径
    fn download_link(&self, download_url: &str) -> String;
}

/// 大纲服务 HTTP 客户端
pub struct OutlineClient {
    executor: HttpExecutor,
}

impl OutlineClient {
    /// 创建新的大纲服务客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            executor: HttpExecutor::new(config)?,
        })
    }

    /// 使用已有的执行器创建
    pub fn with_executor(executor: HttpExecutor) -> Self {
        Self { executor }
    }

    /// 构建 multipart 表单
    async fn build_form(bundle: &UploadBundle) -> AppResult<Form> {
        let mut form = Form::new();

        for (field, path) in bundle.parts() {
            let data = fs::read(path)
                .await
                .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| field.field_name().to_string());

            debug!(
                "添加表单文件 {} = {} ({} 字节)",
                field.field_name(),
                file_name,
                data.len()
            );

            let part = Part::bytes(data)
                .file_name(file_name)
                .mime_str(mime_for(path))
                .map_err(|e| AppError::request_failed(GENERATE_OUTLINE_ENDPOINT, e))?;

            form = form.part(field.field_name(), part);
        }

        Ok(form)
    }
}

#[async_trait]
impl OutlineBackend for OutlineClient {
    async fn generate_outline(&self, bundle: &UploadBundle) -> AppResult<Outline> {
        let form = Self::build_form(bundle).await?;
        let reply = self
            .executor
            .post_multipart(GENERATE_OUTLINE_ENDPOINT, form)
            .await?;
        let outline = parse_generate_reply(&reply)?;

        info!(
            "✓ 大纲抽取完成: {} 个模块, {} 个片段",
            outline.modules.len(),
            outline.segment_count()
        );
        Ok(outline)
    }

    async fn finalize_outline(&self, selected: &Outline) -> AppResult<FinalizeReply> {
        debug!("定稿 Payload: {} 个模块", selected.modules.len());

        let reply = self
            .executor
            .post_json(FINALIZE_OUTLINE_ENDPOINT, selected)
            .await?;
        parse_finalize_reply(&reply)
    }

    async fn download(&self, link: &str) -> AppResult<Vec<u8>> {
        let reply = self.executor.get_bytes(link).await?;
        if !reply.status.is_success() {
            return Err(AppError::backend_reported(
                link,
                format!("下载失败: HTTP {}", reply.status),
            ));
        }
        Ok(reply.body)
    }

    fn download_link(&self, download_url: &str) -> String {
        join_url(self.executor.base_url(), download_url)
    }
}

/// 解析抽取接口的响应
///
/// 非空的 error 字段优先；缺少 modules 视为空大纲
pub fn parse_generate_reply(reply: &HttpReply) -> AppResult<Outline> {
    let value: JsonValue = reply.json()?;

    if let Some(message) = reported_error(&value) {
        return Err(AppError::backend_reported(&reply.endpoint, message));
    }
    if !reply.status.is_success() {
        return Err(AppError::backend_reported(
            &reply.endpoint,
            format!("HTTP {}", reply.status),
        ));
    }

    match value.get("modules") {
        None | Some(JsonValue::Null) => Ok(Outline::default()),
        Some(modules) => serde_json::from_value(modules.clone())
            .map_err(|e| AppError::malformed(&reply.endpoint, e.to_string())),
    }
}

/// 解析定稿接口的响应
pub fn parse_finalize_reply(reply: &HttpReply) -> AppResult<FinalizeReply> {
    let value: JsonValue = reply.json()?;

    if let Some(message) = reported_error(&value) {
        return Err(AppError::backend_reported(&reply.endpoint, message));
    }
    if !reply.status.is_success() {
        return Err(AppError::backend_reported(
            &reply.endpoint,
            format!("HTTP {}", reply.status),
        ));
    }

    let download_url = value
        .get("download_url")
        .and_then(JsonValue::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::malformed(&reply.endpoint, "缺少 download_url"))?;

    let message = value
        .get("message")
        .and_then(JsonValue::as_str)
        .unwrap_or_default();

    Ok(FinalizeReply {
        message: message.to_string(),
        download_url: download_url.to_string(),
    })
}

/// 提取响应中的错误信息（error 或 detail 字段）
fn reported_error(value: &JsonValue) -> Option<String> {
    ["error", "detail"].iter().find_map(|key| match value.get(key)? {
        JsonValue::Null | JsonValue::Bool(false) => None,
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}
