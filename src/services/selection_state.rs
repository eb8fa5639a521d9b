//! 片段选择状态 - 业务能力层
//!
//! 只负责"记录用户选了哪些片段、改成了什么类型"，不关心网络请求
//!
//! ## 不变量
//! - 同一模块内学习类型为 Video 的选择数不超过上限
//! - 视频类型存在当且仅当学习类型为 Video

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::config::DEFAULT_MAX_VIDEO_PER_MODULE;
use crate::error::{AppResult, SelectionError};
use crate::models::outline::{Block, LearningType, Module, Outline, Segment, VideoType};
use crate::models::selection::{SegmentCoord, SelectionEntry};

/// 切换结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    /// 新增了选择
    Selected,
    /// 取消了选择
    Deselected,
}

/// 片段选择状态
///
/// 职责：
/// - 以坐标为键保存选择记录（保持插入顺序）
/// - 勾选时检查模块视频上限
/// - 把选择投影为精简后的大纲
#[derive(Debug, Clone)]
pub struct SelectionState {
    entries: Vec<SelectionEntry>,
    cap: usize,
}

impl SelectionState {
    /// 使用默认上限创建
    pub fn new() -> Self {
        Self::with_cap(DEFAULT_MAX_VIDEO_PER_MODULE)
    }

    /// 使用自定义上限创建
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序返回所有记录
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn entry(&self, coord: SegmentCoord) -> Option<&SelectionEntry> {
        self.entries.iter().find(|e| e.coord == coord)
    }

    pub fn is_selected(&self, coord: SegmentCoord) -> bool {
        self.entry(coord).is_some()
    }

    /// 某个模块当前被选为 Video 的片段数
    pub fn video_count(&self, module_idx: usize) -> usize {
        self.entries
            .iter()
            .filter(|e| e.coord.module_idx == module_idx && e.is_video())
            .count()
    }

    /// 复选框是否可用
    ///
    /// 已选中的总是可以取消；未选中的视频片段在模块达到上限后不可选
    pub fn can_select(&self, outline: &Outline, coord: SegmentCoord) -> bool {
        let Some(segment) = outline.segment(coord) else {
            return false;
        };
        self.is_selected(coord)
            || !(segment.learning_type.is_video() && self.video_count(coord.module_idx) >= self.cap)
    }

    /// 清空所有选择
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 勾选 / 取消勾选一个片段
    ///
    /// 已选中则直接移除；未选中时，原始类型为 Video 且模块已达上限则拒绝
    pub fn toggle(&mut self, outline: &Outline, coord: SegmentCoord) -> AppResult<Toggled> {
        let segment = outline
            .segment(coord)
            .ok_or(SelectionError::UnknownSegment(coord))?;

        if let Some(pos) = self.position(coord) {
            self.entries.remove(pos);
            debug!("取消选择片段 {}", coord);
            return Ok(Toggled::Deselected);
        }

        if segment.learning_type.is_video() && self.video_count(coord.module_idx) >= self.cap {
            return Err(SelectionError::CapacityExceeded {
                module_idx: coord.module_idx,
                cap: self.cap,
            }
            .into());
        }

        // 后端漏给视频类型时补默认值，保证不变量成立
        let custom_video_type = if segment.learning_type.is_video() {
            Some(segment.video_type.unwrap_or(VideoType::DEFAULT))
        } else {
            None
        };

        self.entries.push(SelectionEntry {
            coord,
            custom_learning_type: segment.learning_type,
            custom_video_type,
        });
        debug!("选择片段 {} ({})", coord, segment.learning_type);

        Ok(Toggled::Selected)
    }

    /// 修改已选片段的学习类型
    ///
    /// 改为非 Video 时清除视频类型；改为 Video 时若没有视频类型则使用第一个选项。
    /// 从非 Video 改为 Video 同样受模块上限约束。
    pub fn set_learning_type(
        &mut self,
        coord: SegmentCoord,
        new_type: LearningType,
    ) -> AppResult<()> {
        let pos = self
            .position(coord)
            .ok_or(SelectionError::NotSelected(coord))?;

        let becomes_video = new_type.is_video() && !self.entries[pos].is_video();
        if becomes_video && self.video_count(coord.module_idx) >= self.cap {
            return Err(SelectionError::CapacityExceeded {
                module_idx: coord.module_idx,
                cap: self.cap,
            }
            .into());
        }

        let entry = &mut self.entries[pos];
        entry.custom_learning_type = new_type;
        entry.custom_video_type = if new_type.is_video() {
            Some(entry.custom_video_type.unwrap_or(VideoType::DEFAULT))
        } else {
            None
        };
        debug!("片段 {} 学习类型改为 {}", coord, new_type);

        Ok(())
    }

    /// 修改已选视频片段的视频类型
    pub fn set_video_type(&mut self, coord: SegmentCoord, video_type: VideoType) -> AppResult<()> {
        let pos = self
            .position(coord)
            .ok_or(SelectionError::NotSelected(coord))?;

        let entry = &mut self.entries[pos];
        if !entry.is_video() {
            return Err(SelectionError::VideoTypeRequiresVideo(coord).into());
        }
        entry.custom_video_type = Some(video_type);
        debug!("片段 {} 视频类型改为 {}", coord, video_type);

        Ok(())
    }

    /// 把选择投影为精简后的大纲
    ///
    /// 模块和单元按其在原大纲中的顺序排列，单元内的片段按选择顺序排列；
    /// 每个片段是原片段的副本，并应用用户覆盖的类型
    pub fn reduce(&self, outline: &Outline) -> AppResult<Outline> {
        let mut grouped: BTreeMap<usize, BTreeMap<usize, Vec<Segment>>> = BTreeMap::new();

        for entry in &self.entries {
            let original = outline
                .segment(entry.coord)
                .ok_or(SelectionError::UnknownSegment(entry.coord))?;

            let mut segment = original.clone();
            segment.learning_type = entry.custom_learning_type;
            segment.video_type = if entry.is_video() {
                entry.custom_video_type
            } else {
                None
            };

            grouped
                .entry(entry.coord.module_idx)
                .or_default()
                .entry(entry.coord.block_idx)
                .or_default()
                .push(segment);
        }

        let modules = grouped
            .into_iter()
            .map(|(module_idx, blocks)| {
                let module = &outline.modules[module_idx];
                Module {
                    module_title: module.module_title.clone(),
                    blocks: blocks
                        .into_iter()
                        .map(|(block_idx, segments)| Block {
                            block_title: module.blocks[block_idx].block_title.clone(),
                            segments,
                        })
                        .collect(),
                }
            })
            .collect();

        Ok(Outline::new(modules))
    }

    fn position(&self, coord: SegmentCoord) -> Option<usize> {
        self.entries.iter().position(|e| e.coord == coord)
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

/// 内容相等：同样的上限、同样的一组记录（与插入顺序无关）
impl PartialEq for SelectionState {
    fn eq(&self, other: &Self) -> bool {
        if self.cap != other.cap || self.entries.len() != other.entries.len() {
            return false;
        }
        let mine: HashMap<SegmentCoord, &SelectionEntry> =
            self.entries.iter().map(|e| (e.coord, e)).collect();
        other
            .entries
            .iter()
            .all(|e| mine.get(&e.coord).is_some_and(|m| *m == e))
    }
}

impl Eq for SelectionState {}
