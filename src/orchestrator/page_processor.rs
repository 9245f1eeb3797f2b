//! 单页处理器 - 编排层
//!
//! ## 职责
//!
//! 处理一页搜索结果中的所有行，是页面级别的编排器。
//!
//! 1. **遍历行**：按文档顺序处理 `Vec<ListingRow>`
//! 2. **解析**：委托 `row_parser` 产生 `ExamRecord`，不足的行略过
//! 3. **下载**：每行最多两个文档，先试卷后答案，互不影响
//! 4. **统计输出**：记录成功/失败/略过数量

use std::path::Path;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::HarvestResult;
use crate::models::{HarvestEvent, HarvestSummary, ListingPage};
use crate::services::{parse_row, DocumentDownloader, FilenameBuilder};

/// 单页处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageResult {
    /// 所有行都已处理
    Done,
    /// 处理途中收到取消请求
    Cancelled,
}

/// 单页统计
#[derive(Debug, Default)]
struct PageStats {
    rows: usize,
    skipped: usize,
    saved: usize,
    failed: usize,
}

/// 单页处理所需的共享能力
pub struct PageContext<'a> {
    pub downloader: &'a DocumentDownloader,
    pub filenames: &'a FilenameBuilder,
    pub download_folder: &'a Path,
    pub events: &'a UnboundedSender<HarvestEvent>,
    pub cancel: &'a CancellationToken,
}

/// 处理一页中的所有行
///
/// 单个文档失败只计数；本地写入失败直接返回错误
pub async fn process_page(
    ctx: &PageContext<'_>,
    listing: &ListingPage,
    page: u32,
    summary: &mut HarvestSummary,
) -> HarvestResult<PageResult> {
    let mut stats = PageStats::default();

    for (index, row) in listing.rows.iter().enumerate() {
        if ctx.cancel.is_cancelled() {
            info!("[第 {} 页] 收到取消请求，停止处理", page);
            summary.rows += stats.rows;
            summary.skipped_rows += stats.skipped;
            return Ok(PageResult::Cancelled);
        }

        let Some(record) = parse_row(row) else {
            debug!("[第 {} 页] 第 {} 行单元格不足 ({}), 略过", page, index + 1, row.len());
            stats.skipped += 1;
            continue;
        };
        stats.rows += 1;

        for task in ctx.filenames.tasks_for(&record) {
            let outcome = ctx.downloader.download(&task, ctx.download_folder).await?;
            if outcome.is_saved() {
                stats.saved += 1;
            } else {
                stats.failed += 1;
            }
            summary.add_outcome(&outcome);
            let _ = ctx.events.send(HarvestEvent::Document(outcome));
        }
    }

    summary.rows += stats.rows;
    summary.skipped_rows += stats.skipped;
    log_page_complete(page, &stats);

    Ok(PageResult::Done)
}

fn log_page_complete(page: u32, stats: &PageStats) {
    info!(
        "[第 {} 页] 资料 {} 行, 下载成功 {}, 失败 {}, 略过 {} 行",
        page, stats.rows, stats.saved, stats.failed, stats.skipped
    );
}
