//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 命令行入口的"指挥中心"：读写快照和选择文件，驱动会话完成整个流程。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (命令分发、文件读写)
//!     ↓
//! workflow::CurationSession (上传 / 选择 / 定稿 / 下载)
//!     ↓
//! services (能力层：selection_state / outline_view)
//!     ↓
//! clients (OutlineBackend / OutlineClient)
//!     ↓
//! infrastructure (基础设施：HttpExecutor)
//! ```

pub mod app;

pub use app::App;
