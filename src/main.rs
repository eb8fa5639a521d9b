use anyhow::Result;
use clap::Parser;
use outline_curator::cli::Cli;
use outline_curator::utils::logging;
use outline_curator::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::from_env();
    if let Some(url) = cli.service_url {
        config.service_base_url = url;
    }
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config)?.run(cli.command).await?;

    Ok(())
}
