//! 上传材料
//!
//! 一个教学计划文件 + 若干课件 + 若干作业文件

use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{AppResult, FileError};

/// multipart 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadField {
    /// 教学计划（docx）
    Plan,
    /// 课件（pptx）
    Slides,
    /// 作业（docx / pdf / txt）
    Assignments,
}

impl UploadField {
    /// 表单字段名
    pub fn field_name(self) -> &'static str {
        match self {
            UploadField::Plan => "plan",
            UploadField::Slides => "slides",
            UploadField::Assignments => "assignments",
        }
    }

    /// 选择文件时接受的扩展名
    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            UploadField::Plan => &["docx"],
            // 后端同样能解析 pdf 和 docx 课件
            UploadField::Slides => &["pptx", "pdf", "docx"],
            UploadField::Assignments => &["docx", "pdf", "txt"],
        }
    }
}

/// 一次上传的全部材料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBundle {
    pub plan: PathBuf,
    pub slides: Vec<PathBuf>,
    pub assignments: Vec<PathBuf>,
}

impl UploadBundle {
    pub fn new(plan: impl Into<PathBuf>) -> Self {
        Self {
            plan: plan.into(),
            slides: Vec::new(),
            assignments: Vec::new(),
        }
    }

    pub fn with_slides(mut self, slides: impl IntoIterator<Item = PathBuf>) -> Self {
        self.slides.extend(slides);
        self
    }

    pub fn with_assignments(mut self, assignments: impl IntoIterator<Item = PathBuf>) -> Self {
        self.assignments.extend(assignments);
        self
    }

    /// 按表单顺序列出所有文件
    pub fn parts(&self) -> Vec<(UploadField, &Path)> {
        let mut parts = vec![(UploadField::Plan, self.plan.as_path())];
        parts.extend(self.slides.iter().map(|p| (UploadField::Slides, p.as_path())));
        parts.extend(
            self.assignments
                .iter()
                .map(|p| (UploadField::Assignments, p.as_path())),
        );
        parts
    }

    pub fn file_count(&self) -> usize {
        1 + self.slides.len() + self.assignments.len()
    }

    /// 检查文件是否存在
    ///
    /// 扩展名不在接受列表里只记录警告，不校验文件内容
    pub fn validate(&self) -> AppResult<()> {
        for (field, path) in self.parts() {
            if !path.is_file() {
                return Err(FileError::NotFound {
                    path: path.display().to_string(),
                }
                .into());
            }

            let ext = extension_of(path);
            if !field.accepted_extensions().contains(&ext.as_str()) {
                warn!(
                    "⚠️ {} 字段的文件扩展名不常见: {} (期望 {:?})",
                    field.field_name(),
                    path.display(),
                    field.accepted_extensions()
                );
            }
        }
        Ok(())
    }
}

/// 小写扩展名
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default()
}

/// 根据扩展名推断 MIME 类型
pub fn mime_for(path: &Path) -> &'static str {
    match extension_of(path).as_str() {
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
