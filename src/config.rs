use crate::error::{AppResult, ConfigError};

/// 默认的每模块视频片段上限
pub const DEFAULT_MAX_VIDEO_PER_MODULE: usize = 7;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 大纲服务地址（不带结尾斜杠）
    pub service_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 每个模块最多可选的视频片段数
    pub max_video_per_module: usize,
    /// 下载文件存放目录
    pub output_dir: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 300,
            max_video_per_module: DEFAULT_MAX_VIDEO_PER_MODULE,
            output_dir: "output".to_string(),
            output_log_file: "curator_log.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            service_base_url: std::env::var("OUTLINE_SERVICE_URL").unwrap_or(default.service_base_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            max_video_per_module: std::env::var("MAX_VIDEO_PER_MODULE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_video_per_module),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> AppResult<()> {
        if self.max_video_per_module == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_VIDEO_PER_MODULE".to_string(),
                value: "0".to_string(),
                reason: "上限必须大于 0".to_string(),
            }
            .into());
        }

        let url = self.service_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                name: "OUTLINE_SERVICE_URL".to_string(),
                value: self.service_base_url.clone(),
                reason: "必须以 http:// 或 https:// 开头".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// 去掉结尾斜杠后的服务地址
    pub fn base_url(&self) -> &str {
        self.service_base_url.trim().trim_end_matches('/')
    }
}
