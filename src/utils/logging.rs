//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::Result;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::workflow::FinalizeOutcome;

/// 初始化 tracing
///
/// RUST_LOG 优先；否则默认 info，verbose 时为 debug。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n课程大纲整理日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `service_url`: 大纲服务地址
/// - `cap`: 每模块视频上限
pub fn log_startup(service_url: &str, cap: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 课程大纲整理");
    info!("🌐 大纲服务: {}", service_url);
    info!("🎬 每模块最多 {} 个视频片段", cap);
    info!("{}", "=".repeat(60));
}

/// 记录大纲加载信息
pub fn log_outline_loaded(modules: usize, segments: usize) {
    info!("✓ 大纲包含 {} 个模块, {} 个片段", modules, segments);
}

/// 打印定稿结果
pub fn log_finalized(outcome: &FinalizeOutcome) {
    info!("\n{}", "=".repeat(60));
    info!("📊 定稿完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ {}", outcome.message);
    info!("📦 模块: {} | 片段: {}", outcome.modules, outcome.segments);
    info!("📥 下载地址: {}", outcome.download_link);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
