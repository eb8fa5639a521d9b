//! 选择记录相关数据结构

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::models::outline::{LearningType, VideoType};

/// 片段坐标（模块、单元、片段的下标）
///
/// 大纲加载后不可变，因此下标可以作为稳定的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentCoord {
    pub module_idx: usize,
    pub block_idx: usize,
    pub segment_idx: usize,
}

impl SegmentCoord {
    pub fn new(module_idx: usize, block_idx: usize, segment_idx: usize) -> Self {
        Self {
            module_idx,
            block_idx,
            segment_idx,
        }
    }
}

impl fmt::Display for SegmentCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.module_idx, self.block_idx, self.segment_idx)
    }
}

/// 坐标正则，只编译一次
fn coord_pattern() -> Result<&'static Regex, String> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^\s*(\d+)\s*\.\s*(\d+)\s*\.\s*(\d+)\s*$"))
        .as_ref()
        .map_err(|e| e.to_string())
}

impl FromStr for SegmentCoord {
    type Err = String;

    /// 解析 "模块.单元.片段" 格式
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = coord_pattern()?
            .captures(s)
            .ok_or_else(|| format!("坐标格式错误: '{}'，应为 模块.单元.片段", s))?;

        let parse = |i: usize| -> Result<usize, String> {
            caps[i]
                .parse::<usize>()
                .map_err(|e| format!("坐标 '{}' 解析失败: {}", s, e))
        };

        Ok(Self::new(parse(1)?, parse(2)?, parse(3)?))
    }
}

/// 用户对某个片段的选择及分类覆盖
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub coord: SegmentCoord,
    pub custom_learning_type: LearningType,
    /// 仅当 custom_learning_type 为 Video 时存在
    pub custom_video_type: Option<VideoType>,
}

impl SelectionEntry {
    pub fn is_video(&self) -> bool {
        self.custom_learning_type.is_video()
    }
}

/// 命令行使用的选择文件中的一条记录
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Pick {
    /// "模块.单元.片段"
    pub coord: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_type: Option<String>,
}

/// 选择文件
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SelectionPlan {
    #[serde(default, rename = "pick")]
    pub picks: Vec<Pick>,
}
