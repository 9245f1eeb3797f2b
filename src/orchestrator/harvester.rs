//! 分页下载器 - 编排层
//!
//! ## 职责
//!
//! 本模块是下载流程的入口，负责分页循环和生命周期管理。
//!
//! ## 核心功能
//!
//! 1. **总页数**：抓取第 1 页并读取 `span#total_p`，找不到即终止
//! 2. **分页循环**：按 1..=N 顺序处理每一页，第 1 页沿用已抓取的结果
//! 3. **进度回报**：每页处理完成后发送 `PageDone`
//! 4. **终止通知**：无论成功、失败或取消，都恰好发送一次 `Finished`
//! 5. **后台执行**：`spawn` 在单一 tokio 任务中执行，展示层只读取事件
//!
//! ## 设计特点
//!
//! - 总页数只在开始时读取一次
//! - 页面抓取失败直接终止，已下载的文件保留
//! - 每页、每行之间检查取消请求

use std::path::PathBuf;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::clients::ListingClient;
use crate::config::Config;
use crate::error::{HarvestError, HarvestResult};
use crate::models::{
    HarvestEvent, HarvestOutcome, HarvestProgress, HarvestState, HarvestSummary, ListingPage,
    SearchUrlTemplate,
};
use crate::orchestrator::page_processor::{self, PageContext, PageResult};
use crate::services::{DocumentDownloader, FilenameBuilder};

/// 分页下载器
pub struct Harvester {
    client: ListingClient,
    downloader: DocumentDownloader,
    filenames: FilenameBuilder,
    download_folder: PathBuf,
}

/// 后台下载任务的句柄
pub struct HarvestHandle {
    /// 事件接收端
    pub events: mpsc::UnboundedReceiver<HarvestEvent>,
    state: watch::Receiver<HarvestState>,
    cancel: CancellationToken,
    task: JoinHandle<HarvestOutcome>,
}

impl HarvestHandle {
    /// 当前状态
    pub fn state(&self) -> HarvestState {
        *self.state.borrow()
    }

    /// 请求取消，在下一页或下一行之前生效
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// 等待任务进入终止状态
    pub async fn terminal_state(&mut self) -> HarvestState {
        let reached = self.state.wait_for(|state| state.is_terminal()).await.map(|s| *s);
        match reached {
            Ok(state) => state,
            Err(_) => *self.state.borrow(),
        }
    }

    /// 等待后台任务结束
    pub async fn join(self) -> HarvestOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("下载任务异常结束: {}", e);
                HarvestOutcome::Aborted {
                    message: e.to_string(),
                    summary: HarvestSummary::default(),
                }
            }
        }
    }
}

/// 分页循环的结束方式
enum RunEnd {
    Completed,
    Cancelled,
}

impl Harvester {
    /// 由配置建立下载器
    pub fn new(config: &Config) -> HarvestResult<Self> {
        let client = ListingClient::new(config)?;
        let downloader = DocumentDownloader::new(client.http().clone(), &config.base_url)?;
        let filenames = FilenameBuilder::new(
            config.exam_label.clone(),
            config.answer_label.clone(),
            config.file_extension.clone(),
        );

        Ok(Self {
            client,
            downloader,
            filenames,
            download_folder: config.download_folder.clone(),
        })
    }

    /// 在后台任务中执行下载
    pub fn spawn(self, template: SearchUrlTemplate) -> HarvestHandle {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(HarvestState::Idle);
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            let _ = state_tx.send(HarvestState::Running);
            let outcome = self.run(&template, &event_tx, &worker_cancel).await;
            let _ = state_tx.send(outcome.state());
            outcome
        });

        HarvestHandle {
            events: event_rx,
            state: state_rx,
            cancel,
            task,
        }
    }

    /// 执行一次完整的下载
    ///
    /// 结果同时以 `HarvestEvent::Finished` 发送
    pub async fn run(
        &self,
        template: &SearchUrlTemplate,
        events: &mpsc::UnboundedSender<HarvestEvent>,
        cancel: &CancellationToken,
    ) -> HarvestOutcome {
        let mut summary = HarvestSummary::default();

        let outcome = match self.harvest(template, events, cancel, &mut summary).await {
            Ok(RunEnd::Completed) => {
                info!("✅ 所有档案已下载完成！");
                HarvestOutcome::Completed(summary)
            }
            Ok(RunEnd::Cancelled) => {
                warn!("⚠️ 下载已取消");
                HarvestOutcome::Cancelled(summary)
            }
            Err(e) => {
                error!("❌ 下载中止: {}", e);
                HarvestOutcome::Aborted {
                    message: e.to_string(),
                    summary,
                }
            }
        };

        let _ = events.send(HarvestEvent::Finished(outcome.clone()));
        outcome
    }

    async fn harvest(
        &self,
        template: &SearchUrlTemplate,
        events: &mpsc::UnboundedSender<HarvestEvent>,
        cancel: &CancellationToken,
        summary: &mut HarvestSummary,
    ) -> HarvestResult<RunEnd> {
        if cancel.is_cancelled() {
            return Ok(RunEnd::Cancelled);
        }

        tokio::fs::create_dir_all(&self.download_folder)
            .await
            .map_err(|e| HarvestError::io(&self.download_folder, e))?;

        let first_url = template.page_url(1);
        let first_page = self.client.fetch_page(&first_url).await?;
        let total_pages = read_total_pages(&first_page, &first_url)?;

        info!("📄 共 {} 页搜索结果", total_pages);
        let _ = events.send(HarvestEvent::Started { total_pages });

        let ctx = PageContext {
            downloader: &self.downloader,
            filenames: &self.filenames,
            download_folder: &self.download_folder,
            events,
            cancel,
        };

        let mut first_page = Some(first_page);
        for page in 1..=total_pages {
            if cancel.is_cancelled() {
                return Ok(RunEnd::Cancelled);
            }

            let listing = match first_page.take() {
                Some(listing) => listing,
                None => {
                    let page_url = template.page_url(page);
                    self.client.fetch_page(&page_url).await?
                }
            };

            info!("[第 {}/{} 页] 开始处理, 共 {} 行", page, total_pages, listing.rows.len());
            if page_processor::process_page(&ctx, &listing, page, summary).await?
                == PageResult::Cancelled
            {
                return Ok(RunEnd::Cancelled);
            }

            summary.pages = page;
            let progress = HarvestProgress::new(page, total_pages);
            debug!("进度: {}", progress);
            let _ = events.send(HarvestEvent::PageDone(progress));
        }

        Ok(RunEnd::Completed)
    }
}

/// 读取第 1 页的总页数
fn read_total_pages(listing: &ListingPage, url: &str) -> HarvestResult<u32> {
    let text = listing
        .total_pages_text
        .as_deref()
        .ok_or_else(|| HarvestError::MissingPageCount {
            url: url.to_string(),
        })?;

    text.trim()
        .parse::<u32>()
        .map_err(|_| HarvestError::InvalidPageCount {
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(total: Option<&str>) -> ListingPage {
        ListingPage {
            total_pages_text: total.map(str::to_string),
            rows: Vec::new(),
        }
    }

    #[test]
    fn test_read_total_pages() {
        assert_eq!(read_total_pages(&listing(Some(" 12 ")), "u").unwrap(), 12);
        assert_eq!(read_total_pages(&listing(Some("0")), "u").unwrap(), 0);
    }

    #[test]
    fn test_read_total_pages_missing() {
        let err = read_total_pages(&listing(None), "https://exam.naer.edu.tw/s?page=1").unwrap_err();
        assert!(matches!(err, HarvestError::MissingPageCount { .. }));
    }

    #[test]
    fn test_read_total_pages_not_numeric() {
        let err = read_total_pages(&listing(Some("三")), "u").unwrap_err();
        assert!(matches!(err, HarvestError::InvalidPageCount { .. }));
        assert!(read_total_pages(&listing(Some("-1")), "u").is_err());
    }
}
