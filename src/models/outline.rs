//! 课程大纲数据结构
//!
//! 模块 → 单元（block）→ 片段（segment），由后端抽取得到，加载后只读

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

use crate::models::selection::SegmentCoord;

/// 学习类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearningType {
    Video,
    Reading,
    Assignment,
    Quiz,
    Discussion,
}

impl LearningType {
    /// 下拉框中的选项顺序
    pub const ALL: [LearningType; 5] = [
        LearningType::Video,
        LearningType::Reading,
        LearningType::Assignment,
        LearningType::Quiz,
        LearningType::Discussion,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            LearningType::Video => "Video",
            LearningType::Reading => "Reading",
            LearningType::Assignment => "Assignment",
            LearningType::Quiz => "Quiz",
            LearningType::Discussion => "Discussion",
        }
    }

    pub fn is_video(self) -> bool {
        self == LearningType::Video
    }
}

impl FromStr for LearningType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("未知的学习类型: {}", s))
    }
}

impl fmt::Display for LearningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 视频类型，仅在学习类型为 Video 时有意义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoType {
    #[serde(rename = "Talking head")]
    TalkingHead,
    #[serde(rename = "Light Board")]
    LightBoard,
    Screencast,
    #[serde(rename = "Lab Interview")]
    LabInterview,
}

impl VideoType {
    /// 下拉框中的选项顺序
    pub const ALL: [VideoType; 4] = [
        VideoType::TalkingHead,
        VideoType::LightBoard,
        VideoType::Screencast,
        VideoType::LabInterview,
    ];

    /// 第一个选项，切换为 Video 时的默认值
    pub const DEFAULT: VideoType = VideoType::TalkingHead;

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            VideoType::TalkingHead => "Talking head",
            VideoType::LightBoard => "Light Board",
            VideoType::Screencast => "Screencast",
            VideoType::LabInterview => "Lab Interview",
        }
    }
}

impl FromStr for VideoType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("未知的视频类型: {}", s))
    }
}

impl fmt::Display for VideoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 学习片段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub segment_title: String,
    pub learning_type: LearningType,
    #[serde(
        default,
        deserialize_with = "deserialize_video_type",
        serialize_with = "serialize_video_type"
    )]
    pub video_type: Option<VideoType>,
    /// 后端附带的其它字段（如 includes），原样保留
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Segment {
    pub fn new(title: impl Into<String>, learning_type: LearningType) -> Self {
        Self {
            segment_title: title.into(),
            learning_type,
            video_type: None,
            extra: Map::new(),
        }
    }

    pub fn with_video_type(mut self, video_type: VideoType) -> Self {
        self.video_type = Some(video_type);
        self
    }
}

// 缺失、null 和空字符串都视为没有视频类型
fn deserialize_video_type<'de, D>(deserializer: D) -> Result<Option<VideoType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<VideoType>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

// 没有视频类型时输出空字符串
fn serialize_video_type<S>(value: &Option<VideoType>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.map(VideoType::name).unwrap_or(""))
}

/// 单元（学习周）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub block_title: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// 模块
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub module_title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// 完整大纲，序列化为模块数组
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outline {
    pub modules: Vec<Module>,
}

impl Outline {
    pub fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn module(&self, module_idx: usize) -> Option<&Module> {
        self.modules.get(module_idx)
    }

    pub fn block(&self, module_idx: usize, block_idx: usize) -> Option<&Block> {
        self.module(module_idx)?.blocks.get(block_idx)
    }

    /// 按坐标查找片段
    pub fn segment(&self, coord: SegmentCoord) -> Option<&Segment> {
        self.block(coord.module_idx, coord.block_idx)?
            .segments
            .get(coord.segment_idx)
    }

    /// 片段总数
    pub fn segment_count(&self) -> usize {
        self.modules
            .iter()
            .flat_map(|m| &m.blocks)
            .map(|b| b.segments.len())
            .sum()
    }

    /// 按顺序遍历所有片段及其坐标
    pub fn coords(&self) -> impl Iterator<Item = (SegmentCoord, &Segment)> + '_ {
        self.modules.iter().enumerate().flat_map(|(m, module)| {
            module.blocks.iter().enumerate().flat_map(move |(b, block)| {
                block
                    .segments
                    .iter()
                    .enumerate()
                    .map(move |(s, segment)| (SegmentCoord::new(m, b, s), segment))
            })
        })
    }
}
