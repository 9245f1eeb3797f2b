use std::path::PathBuf;

use anyhow::Result;
use naer_exam_download::utils::logging;
use naer_exam_download::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 第一个参数可指定 TOML 配置文件
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_toml_file(&PathBuf::from(path))?,
        None => Config::from_env(),
    };

    // 初始化日志
    logging::init(&config)?;

    // 初始化并运行应用
    App::initialize(config).run().await?;

    Ok(())
}
