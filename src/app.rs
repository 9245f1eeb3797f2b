//! 应用入口
//!
//! 串接：取得搜索网址 → 后台下载 → 在终端显示进度 → 最终统计

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::browser::SearchSession;
use crate::config::Config;
use crate::models::{HarvestEvent, HarvestOutcome, SearchUrlTemplate};
use crate::orchestrator::{HarvestHandle, Harvester};
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        logging::log_startup(&config);
        Self { config }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        let (confirmed_url, session) = self.obtain_search_url().await?;
        let template = match SearchUrlTemplate::from_confirmed_url(&confirmed_url) {
            Ok(template) => template,
            Err(e) => {
                if let Some(session) = session {
                    session.close().await;
                }
                return Err(e.into());
            }
        };
        logging::log_harvest_start(&template);

        let harvester = Harvester::new(&self.config)?;
        let handle = harvester.spawn(template);
        let outcome = watch_harvest(handle).await;

        logging::print_final_stats(&outcome, &self.config);

        if let Some(session) = session {
            session.close().await;
        }

        match outcome {
            HarvestOutcome::Aborted { message, .. } => bail!(message),
            _ => Ok(()),
        }
    }

    /// 配置中已有网址就直接使用，否则开启浏览器让使用者确认
    async fn obtain_search_url(&self) -> Result<(String, Option<SearchSession>)> {
        if let Some(url) = &self.config.search_url {
            info!("使用配置中的搜索网址");
            return Ok((url.clone(), None));
        }

        let session = SearchSession::open(&self.config).await?;
        let url = session.confirm_search_url().await?;
        Ok((url, Some(session)))
    }
}

/// 显示后台任务的事件，Ctrl-C 请求取消
async fn watch_harvest(mut handle: HarvestHandle) -> HarvestOutcome {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interrupted = false;

    loop {
        tokio::select! {
            signal = &mut ctrl_c, if !interrupted => {
                interrupted = true;
                if signal.is_ok() {
                    warn!("收到 Ctrl-C，完成目前文件后停止...");
                    handle.cancel();
                }
            }
            event = handle.events.recv() => match event {
                Some(HarvestEvent::Started { total_pages }) => {
                    info!("⬇️ 开始下载，共 {} 页", total_pages);
                }
                Some(HarvestEvent::PageDone(progress)) => {
                    info!("{} {}", progress_bar(progress.fraction(), 30), progress);
                }
                // 单个文件的结果已由下载服务记录
                Some(HarvestEvent::Document(_)) => {}
                Some(HarvestEvent::Finished(_)) | None => break,
            },
        }
    }

    handle.join().await
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
