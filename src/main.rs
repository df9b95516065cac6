use std::path::PathBuf;

use anyhow::Result;
use pdf_quiz::utils::logging;
use pdf_quiz::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置（.env → quiz.toml → 环境变量）
    let loaded = Config::load()?;

    // 初始化日志，再补上加载配置时的提示
    logging::init(loaded.config.verbose_logging);
    loaded.log();
    let config = loaded.config;

    // 命令行参数即上传的 PDF 文件
    let files: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();

    App::initialize(config).run(&files).await?;

    Ok(())
}
