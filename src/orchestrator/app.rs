//! 命令行应用 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：日志文件、启动信息、创建会话
//! 2. **命令分发**：extract / show / finalize
//! 3. **文件读写**：大纲快照、选择文件、最终文件下载
//!
//! 不做具体的选择判断，全部委托给 `CurationSession`

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::cli::{Command, ExtractArgs, FinalizeArgs, ShowArgs};
use crate::config::Config;
use crate::models::loaders::{load_outline_snapshot, load_selection_plan, save_outline_snapshot};
use crate::models::upload::UploadBundle;
use crate::utils::logging::{init_log_file, log_finalized, log_outline_loaded, log_startup, truncate_text};
use crate::workflow::{CurationSession, PlanReport};

/// 应用主结构
pub struct App {
    config: Config,
    session: CurationSession,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        log_startup(config.base_url(), config.max_video_per_module);

        let session = CurationSession::from_config(&config)?;

        Ok(Self { config, session })
    }

    /// 运行命令
    pub async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Extract(args) => self.extract(args).await,
            Command::Show(args) => self.show(args).await,
            Command::Finalize(args) => self.finalize(args).await,
        }
    }

    async fn extract(&mut self, args: ExtractArgs) -> Result<()> {
        let bundle = UploadBundle::new(args.plan)
            .with_slides(args.slides)
            .with_assignments(args.assignments);

        let outcome = self.session.submit_upload(&bundle).await?;
        log_outline_loaded(outcome.modules, outcome.segments);

        if outcome.modules == 0 {
            warn!("⚠️ 后端没有返回任何模块");
        }

        save_outline_snapshot(&args.out, self.session.outline()).await?;
        info!("💾 大纲快照已保存至: {}", args.out.display());

        println!("{}", self.session.render());
        Ok(())
    }

    async fn show(&mut self, args: ShowArgs) -> Result<()> {
        let outline = load_outline_snapshot(&args.outline).await?;
        log_outline_loaded(outline.modules.len(), outline.segment_count());
        self.session.load_outline(outline);

        if let Some(path) = args.selection {
            let plan = load_selection_plan(&path).await?;
            let report = self.session.apply_plan(&plan);
            print_report(&report);
        }

        println!("{}", self.session.render());
        Ok(())
    }

    async fn finalize(&mut self, args: FinalizeArgs) -> Result<()> {
        let outline = load_outline_snapshot(&args.outline).await?;
        log_outline_loaded(outline.modules.len(), outline.segment_count());
        self.session.load_outline(outline);

        let plan = load_selection_plan(&args.selection).await?;
        let report = self.session.apply_plan(&plan);
        print_report(&report);

        let outcome = self.session.submit_final().await?;
        log_finalized(&outcome);
        println!("{}", outcome.message);
        println!("📥 Download Course Outline: {}", outcome.download_link);

        // 只有指定 --download 时才下载；不带路径时放到配置的输出目录
        if let Some(dest) = args.download {
            let dest = dest.unwrap_or_else(|| PathBuf::from(&self.config.output_dir));
            if !dest.exists() && dest.extension().is_none() {
                tokio::fs::create_dir_all(&dest)
                    .await
                    .with_context(|| format!("无法创建目录: {}", dest.display()))?;
            }
            let saved = self.session.download_final(&dest).await?;
            println!("💾 {}", saved.display());
        }

        Ok(())
    }
}

fn print_report(report: &PlanReport) {
    for (coord, reason) in &report.skipped {
        println!("⚠️ 跳过 {}: {}", coord, truncate_text(reason, 120));
    }
    println!("已应用 {} 条选择", report.applied);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, LearningType, Module, Outline, Segment};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::path::Path;

    async fn finalize_ok(Json(_body): Json<Value>) -> Json<Value> {
        Json(json!({
            "message": "Final Excel outline created!",
            "download_url": "/download-final-excel"
        }))
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// 准备大纲快照和选择文件，返回 (配置, 参数)
    async fn prepare(
        dir: &Path,
        base_url: String,
        download: Option<Option<PathBuf>>,
    ) -> (Config, FinalizeArgs) {
        let outline = Outline::new(vec![Module {
            module_title: "Foundations".to_string(),
            blocks: vec![Block {
                block_title: "Week 1".to_string(),
                segments: vec![Segment::new("Welcome", LearningType::Video)],
            }],
        }]);
        let outline_path = dir.join("outline.json");
        save_outline_snapshot(&outline_path, &outline).await.unwrap();

        let selection_path = dir.join("picks.toml");
        std::fs::write(&selection_path, "[[pick]]\ncoord = \"0.0.0\"\n").unwrap();

        let config = Config {
            service_base_url: base_url,
            request_timeout_secs: 10,
            output_dir: dir.join("out").display().to_string(),
            output_log_file: dir.join("curator_log.txt").display().to_string(),
            ..Config::default()
        };
        let args = FinalizeArgs {
            outline: outline_path,
            selection: selection_path,
            download,
        };
        (config, args)
    }

    #[tokio::test]
    async fn test_finalize_without_download_flag_skips_download() {
        // 服务端没有下载路由，一旦下载就会失败
        let base = serve(Router::new().route("/finalize-outline", post(finalize_ok))).await;
        let dir = tempfile::tempdir().unwrap();
        let (config, args) = prepare(dir.path(), base, None).await;

        let mut app = App::initialize(config).unwrap();
        tokio_test::assert_ok!(app.run(Command::Finalize(args)).await);

        assert!(app.session.download_link().is_some());
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn test_finalize_with_download_flag_saves_file() {
        let router = Router::new()
            .route("/finalize-outline", post(finalize_ok))
            .route("/download-final-excel", get(|| async { b"PK-fake-xlsx".to_vec() }));
        let base = serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("final.xlsx");
        let (config, args) = prepare(dir.path(), base, Some(Some(target.clone()))).await;

        let mut app = App::initialize(config).unwrap();
        tokio_test::assert_ok!(app.run(Command::Finalize(args)).await);

        assert_eq!(std::fs::read(&target).unwrap(), b"PK-fake-xlsx");
    }

    #[tokio::test]
    async fn test_bare_download_flag_uses_output_dir() {
        let router = Router::new()
            .route("/finalize-outline", post(finalize_ok))
            .route("/download-final-excel", get(|| async { b"PK-fake-xlsx".to_vec() }));
        let base = serve(router).await;
        let dir = tempfile::tempdir().unwrap();
        let (config, args) = prepare(dir.path(), base, Some(None)).await;

        let mut app = App::initialize(config).unwrap();
        tokio_test::assert_ok!(app.run(Command::Finalize(args)).await);

        let saved = dir.path().join("out").join(crate::workflow::FINAL_FILE_NAME);
        assert_eq!(std::fs::read(saved).unwrap(), b"PK-fake-xlsx");
    }
}
