use crate::error::{AppError, AppResult, FileError};
use crate::models::selection::SelectionPlan;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载选择计划
pub async fn load_selection_plan(toml_file_path: &Path) -> AppResult<SelectionPlan> {
    if !toml_file_path.exists() {
        return Err(FileError::NotFound {
            path: toml_file_path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(toml_file_path.display().to_string(), e))?;

    let plan = parse_selection_plan(&content).map_err(|reason| FileError::ParseFailed {
        path: toml_file_path.display().to_string(),
        reason,
    })?;

    tracing::info!(
        "成功加载 {} 条选择记录: {}",
        plan.picks.len(),
        toml_file_path.display()
    );

    Ok(plan)
}

/// 解析选择计划文本
pub fn parse_selection_plan(content: &str) -> Result<SelectionPlan, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}
