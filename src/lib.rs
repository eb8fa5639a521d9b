//! # Outline Curator
//!
//! 课程大纲整理工具：上传教学材料，从抽取出的大纲中挑选片段并调整分类，提交生成最终大纲
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（reqwest Client），只暴露能力
//! - `HttpExecutor` - 唯一的 client owner，提供 multipart / JSON / 下载能力
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 大纲服务的三个接口，校验响应结构
//! - `OutlineBackend` - 会话依赖的接口，测试中可替换
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不发网络请求
//! - `SelectionState` - 勾选 / 改类型 / 精简大纲，维护每模块视频上限
//! - `outline_view` - 文本渲染
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - `CurationSession` 持有唯一状态容器，定义上传 → 选择 → 定稿 → 下载
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/` - 命令行应用
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{FinalizeReply, OutlineBackend, OutlineClient};
pub use config::Config;
pub use error::{AppError, AppResult, ErrorKind};
pub use models::{Block, LearningType, Module, Outline, SegmentCoord, Segment, SelectionEntry, UploadBundle, VideoType};
pub use orchestrator::App;
pub use services::{SelectionState, Toggled};
pub use workflow::{CurationSession, FinalizeOutcome, UploadOutcome};
