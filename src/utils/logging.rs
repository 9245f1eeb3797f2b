/// 日志工具模块
///
/// 初始化 tracing，并提供日志格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::models::{HarvestOutcome, SearchUrlTemplate};

/// 初始化日志
///
/// 终端与 `log_file` 同时输出；`RUST_LOG` 优先于 `verbose_logging`
pub fn init(config: &Config) -> Result<()> {
    init_log_file(&config.log_file)?;

    let file = OpenOptions::new()
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("无法打开日志文件: {}", config.log_file))?;

    let default_level = if config.verbose_logging { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("日志系统初始化失败")?;

    Ok(())
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题库下载日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 国教院题库下载程式");
    info!("🌐 题库网址: {}", config.base_url);
    info!("📁 下载位置: {}", config.download_folder.display());
    info!("{}", "=".repeat(60));
}

/// 记录即将开始的下载
pub fn log_harvest_start(template: &SearchUrlTemplate) {
    info!("🔍 搜索网址: {}", template.confirmed_url());
    info!("📋 分页模板: {}", template);
}

/// 打印最终统计信息
pub fn print_final_stats(outcome: &HarvestOutcome, config: &Config) {
    let summary = outcome.summary();
    info!("\n{}", "=".repeat(60));
    info!("📊 下载统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 已处理页数: {}", summary.pages);
    info!("📝 资料行数: {} (略过 {})", summary.rows, summary.skipped_rows);
    info!("✅ 下载成功: {}", summary.saved);
    info!("❌ 下载失败: {}", summary.failed);
    match outcome {
        HarvestOutcome::Completed(_) => info!("🎉 完成：所有档案已下载完成！"),
        HarvestOutcome::Cancelled(_) => warn!("⚠️ 已取消"),
        HarvestOutcome::Aborted { message, .. } => error!("❌ 错误：{}", message),
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.log_file);
}
