//! 大纲整理会话 - 流程层
//!
//! 核心职责：持有唯一的状态容器，定义"上传 → 选择 → 定稿 → 下载"的流程
//!
//! 流程顺序：
//! 1. submit_upload：上传材料，替换大纲并清空选择
//! 2. toggle / set_learning_type / set_video_type：整理选择
//! 3. submit_final：精简大纲并提交，得到下载链接
//! 4. download_final：下载最终文件（可选）

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::clients::{OutlineBackend, OutlineClient};
use crate::config::Config;
use crate::error::{AppError, AppResult, SelectionError};
use crate::models::outline::{LearningType, Outline, VideoType};
use crate::models::selection::{Pick, SegmentCoord, SelectionPlan};
use crate::models::upload::UploadBundle;
use crate::services::outline_view;
use crate::services::selection_state::{SelectionState, Toggled};
use crate::workflow::busy::BusyFlag;

/// 下载到目录时使用的文件名
pub const FINAL_FILE_NAME: &str = "Final_Course_Outline.xlsx";

/// 上传结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub modules: usize,
    pub segments: usize,
}

/// 定稿结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeOutcome {
    /// 后端返回的提示信息
    pub message: String,
    /// 服务地址 + 下载路径
    pub download_link: String,
    pub modules: usize,
    pub segments: usize,
}

/// 选择文件的应用结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanReport {
    pub applied: usize,
    /// (坐标, 跳过原因)
    pub skipped: Vec<(String, String)>,
}

/// 大纲整理会话
///
/// - 唯一持有大纲、选择状态和忙碌标记
/// - 所有修改都通过 &mut self 串行进行
/// - 出错时保留原有状态，只记录提示信息
pub struct CurationSession<B: OutlineBackend = OutlineClient> {
    backend: B,
    outline: Outline,
    selection: SelectionState,
    busy: BusyFlag,
    download_link: Option<String>,
    last_notice: Option<String>,
}

impl CurationSession<OutlineClient> {
    /// 按配置创建连接真实服务的会话
    pub fn from_config(config: &Config) -> AppResult<Self> {
        config.validate()?;
        Ok(Self::new(
            OutlineClient::new(config)?,
            config.max_video_per_module,
        ))
    }
}

impl<B: OutlineBackend> CurationSession<B> {
    /// 创建新的会话
    pub fn new(backend: B, max_video_per_module: usize) -> Self {
        Self {
            backend,
            outline: Outline::default(),
            selection: SelectionState::with_cap(max_video_per_module),
            busy: BusyFlag::new(),
            download_link: None,
            last_notice: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// 给观察者使用的忙碌标记副本
    ///
    /// 提交操作持有 `&mut self`，会话自身不会并发提交；
    /// 标记供其它任务通过该副本观察进度，或在外部占用时让提交以 `Busy` 失败
    pub fn busy_handle(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn download_link(&self) -> Option<&str> {
        self.download_link.as_deref()
    }

    /// 最近一次给用户的提示
    pub fn last_notice(&self) -> Option<&str> {
        self.last_notice.as_deref()
    }

    /// 直接载入已有的大纲（例如命令行快照），清空选择
    pub fn load_outline(&mut self, outline: Outline) {
        self.outline = outline;
        self.selection.clear();
        self.download_link = None;
    }

    /// 渲染当前大纲和选择
    pub fn render(&self) -> String {
        outline_view::render(&self.outline, &self.selection)
    }

    pub fn toggle(&mut self, coord: SegmentCoord) -> AppResult<Toggled> {
        let result = self.selection.toggle(&self.outline, coord);
        self.note(result)
    }

    pub fn set_learning_type(&mut self, coord: SegmentCoord, new_type: LearningType) -> AppResult<()> {
        let result = self.selection.set_learning_type(coord, new_type);
        self.note(result)
    }

    pub fn set_video_type(&mut self, coord: SegmentCoord, video_type: VideoType) -> AppResult<()> {
        let result = self.selection.set_video_type(coord, video_type);
        self.note(result)
    }

    /// 上传材料并抽取大纲
    ///
    /// 成功时替换大纲并清空选择；失败时保留原有状态
    pub async fn submit_upload(&mut self, bundle: &UploadBundle) -> AppResult<UploadOutcome> {
        if let Err(e) = bundle.validate() {
            return Err(self.surface(e));
        }

        let _guard = match self.busy.try_acquire() {
            Ok(guard) => guard,
            Err(e) => return Err(self.surface(e)),
        };
        self.download_link = None;

        info!("📤 正在上传 {} 个文件...", bundle.file_count());

        match self.backend.generate_outline(bundle).await {
            Ok(outline) => {
                let outcome = UploadOutcome {
                    modules: outline.modules.len(),
                    segments: outline.segment_count(),
                };
                self.outline = outline;
                self.selection.clear();
                self.last_notice = None;
                Ok(outcome)
            }
            Err(e) => Err(self.surface(e)),
        }
    }

    /// 提交精简后的大纲
    ///
    /// 没有任何选择时直接返回错误，不发请求
    pub async fn submit_final(&mut self) -> AppResult<FinalizeOutcome> {
        if self.selection.is_empty() || self.outline.is_empty() {
            return Err(self.surface(SelectionError::NothingSelected.into()));
        }

        let _guard = match self.busy.try_acquire() {
            Ok(guard) => guard,
            Err(e) => return Err(self.surface(e)),
        };

        let reduced = match self.selection.reduce(&self.outline) {
            Ok(reduced) => reduced,
            Err(e) => return Err(self.surface(e)),
        };
        let modules = reduced.modules.len();
        let segments = reduced.segment_count();

        info!("📤 正在提交 {} 个模块 / {} 个片段...", modules, segments);

        match self.backend.finalize_outline(&reduced).await {
            Ok(reply) => {
                let link = self.backend.download_link(&reply.download_url);
                self.download_link = Some(link.clone());
                self.last_notice = Some(reply.message.clone());
                Ok(FinalizeOutcome {
                    message: reply.message,
                    download_link: link,
                    modules,
                    segments,
                })
            }
            Err(e) => Err(self.surface(e)),
        }
    }

    /// 下载最终文件
    ///
    /// `dest` 为目录时写入其中的 Final_Course_Outline.xlsx
    pub async fn download_final(&self, dest: &Path) -> AppResult<PathBuf> {
        let link = self
            .download_link
            .as_deref()
            .ok_or(SelectionError::NoDownloadAvailable)?;
        let _guard = self.busy.try_acquire()?;

        let bytes = self.backend.download(link).await?;

        let target = if dest.is_dir() {
            dest.join(FINAL_FILE_NAME)
        } else {
            dest.to_path_buf()
        };
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
            }
        }
        fs::write(&target, &bytes)
            .await
            .map_err(|e| AppError::file_write_failed(target.display().to_string(), e))?;

        info!("📥 已下载 {} 字节到 {}", bytes.len(), target.display());
        Ok(target)
    }

    /// 按选择文件逐条应用：勾选，再覆盖学习类型，再覆盖视频类型
    ///
    /// 单条失败时回滚该条的改动并跳过，不影响其它记录；重复的坐标不会被取消勾选
    pub fn apply_plan(&mut self, plan: &SelectionPlan) -> PlanReport {
        let mut report = PlanReport::default();

        for pick in &plan.picks {
            let before = self.selection.clone();
            match self.apply_pick(pick) {
                Ok(()) => report.applied += 1,
                Err(reason) => {
                    self.selection = before;
                    warn!("⚠️ 跳过选择 {}: {}", pick.coord, reason);
                    report.skipped.push((pick.coord.clone(), reason));
                }
            }
        }

        info!(
            "✓ 已应用 {} 条选择, 跳过 {} 条",
            report.applied,
            report.skipped.len()
        );
        report
    }

    fn apply_pick(&mut self, pick: &Pick) -> Result<(), String> {
        let coord: SegmentCoord = pick.coord.parse()?;

        if !self.selection.is_selected(coord) {
            self.toggle(coord).map_err(|e| e.to_string())?;
        }
        if let Some(raw) = &pick.learning_type {
            let learning_type: LearningType = raw.parse()?;
            self.set_learning_type(coord, learning_type)
                .map_err(|e| e.to_string())?;
        }
        if let Some(raw) = &pick.video_type {
            let video_type: VideoType = raw.parse()?;
            self.set_video_type(coord, video_type)
                .map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    fn note<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        result.map_err(|e| self.surface(e))
    }

    fn surface(&mut self, err: AppError) -> AppError {
        warn!("⚠️ {}", err);
        self.last_notice = Some(err.user_notice());
        err
    }
}
