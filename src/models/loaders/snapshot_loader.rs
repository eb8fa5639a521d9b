use crate::error::{AppError, AppResult, FileError};
use crate::models::outline::Outline;
use std::path::Path;
use tokio::fs;

/// 从 JSON 快照加载大纲（extract 命令的输出）
pub async fn load_outline_snapshot(json_file_path: &Path) -> AppResult<Outline> {
    if !json_file_path.exists() {
        return Err(FileError::NotFound {
            path: json_file_path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(json_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(json_file_path.display().to_string(), e))?;

    let outline: Outline = serde_json::from_str(&content).map_err(|e| FileError::ParseFailed {
        path: json_file_path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!(
        "成功加载大纲快照: {} 个模块, {} 个片段",
        outline.modules.len(),
        outline.segment_count()
    );

    Ok(outline)
}

/// 把大纲写入 JSON 快照
pub async fn save_outline_snapshot(json_file_path: &Path, outline: &Outline) -> AppResult<()> {
    let content = serde_json::to_string_pretty(outline).map_err(|e| FileError::ParseFailed {
        path: json_file_path.display().to_string(),
        reason: e.to_string(),
    })?;

    if let Some(parent) = json_file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
        }
    }

    fs::write(json_file_path, content)
        .await
        .map_err(|e| AppError::file_write_failed(json_file_path.display().to_string(), e))?;

    tracing::debug!("大纲快照已写入: {}", json_file_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::outline::{Block, LearningType, Module, Segment, VideoType};

    #[tokio::test]
    async fn test_snapshot_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("outline.json");

        let outline = Outline::new(vec![Module {
            module_title: "Module 1".to_string(),
            blocks: vec![Block {
                block_title: "Week 1".to_string(),
                segments: vec![
                    Segment::new("Welcome", LearningType::Video).with_video_type(VideoType::Screencast),
                    Segment::new("Syllabus", LearningType::Reading),
                ],
            }],
        }]);

        save_outline_snapshot(&path, &outline).await.unwrap();
        let loaded = load_outline_snapshot(&path).await.unwrap();
        assert_eq!(loaded, outline);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outline.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = load_outline_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::ParseFailed { .. })));
    }
}
