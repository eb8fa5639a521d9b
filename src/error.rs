use thiserror::Error;

use crate::models::selection::SegmentCoord;

/// 错误类别
///
/// 对应界面上的三种提示方式：本地阻断提示、后端错误原文、通用失败提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 用户输入错误（未选择片段、超过视频上限等），状态不变
    UserInput,
    /// 后端在响应中报告的错误，原样展示
    BackendReported,
    /// 网络或解析失败，展示通用提示
    Transport,
    /// 本地文件 / 配置错误（仅命令行使用）
    Local,
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 片段选择相关错误
    #[error("选择错误: {0}")]
    Selection(#[from] SelectionError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 片段选择错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// 模块内视频片段已达上限
    #[error("每个模块最多只能选择 {cap} 个视频片段 (模块 #{module_idx})")]
    CapacityExceeded { module_idx: usize, cap: usize },
    /// 提交时没有选择任何片段
    #[error("请至少选择一个片段")]
    NothingSelected,
    /// 坐标不对应任何片段
    #[error("片段 {0} 不存在")]
    UnknownSegment(SegmentCoord),
    /// 片段尚未被选择
    #[error("片段 {0} 尚未被选择")]
    NotSelected(SegmentCoord),
    /// 非视频片段不能设置视频类型
    #[error("片段 {0} 的学习类型不是 Video，不能设置视频类型")]
    VideoTypeRequiresVideo(SegmentCoord),
    /// 还没有可下载的文件
    #[error("还没有可下载的最终大纲")]
    NoDownloadAvailable,
    /// 上一个请求尚未完成
    #[error("上一个请求仍在处理中")]
    Busy,
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 后端在响应中报告了错误
    #[error("{message}")]
    BackendReported { endpoint: String, message: String },
    /// 响应结构不符合约定
    #[error("响应格式错误 ({endpoint}): {reason}")]
    MalformedResponse { endpoint: String, reason: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 文件内容解析失败
    #[error("解析文件失败 ({path}): {reason}")]
    ParseFailed { path: String, reason: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置值不合法
    #[error("配置项 {name} 的值 '{value}' 不合法: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

impl AppError {
    /// 错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Selection(_) => ErrorKind::UserInput,
            AppError::Api(ApiError::BackendReported { .. }) => ErrorKind::BackendReported,
            AppError::Api(_) => ErrorKind::Transport,
            AppError::File(FileError::NotFound { .. }) => ErrorKind::UserInput,
            AppError::File(_) | AppError::Config(_) => ErrorKind::Local,
        }
    }

    /// 面向用户的提示文本
    ///
    /// 后端错误原样返回，网络错误统一为通用提示
    pub fn user_notice(&self) -> String {
        match self {
            AppError::Api(ApiError::BackendReported { message, .. }) => {
                format!("Error: {}", message)
            }
            AppError::Api(ApiError::RequestFailed { endpoint, .. })
            | AppError::Api(ApiError::MalformedResponse { endpoint, .. }) => {
                if endpoint.contains("finalize") {
                    "Failed to create final outline.".to_string()
                } else {
                    "Upload failed".to_string()
                }
            }
            other => other.to_string(),
        }
    }

    /// 创建API请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建后端报告错误
    pub fn backend_reported(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Api(ApiError::BackendReported {
            endpoint: endpoint.into(),
            message: message.into(),
        })
    }

    /// 创建响应格式错误
    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Api(ApiError::MalformedResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为视频上限错误
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(
            self,
            AppError::Selection(SelectionError::CapacityExceeded { .. })
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
