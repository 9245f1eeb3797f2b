//! 下载进度与事件
//!
//! 下载任务在后台执行，通过 `HarvestEvent` 把进度、单个文件结果和最终结果
//! 发送给展示层，核心流程不持有任何展示对象。

use std::fmt;

use super::DocumentKind;

/// 下载任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestState {
    Idle,
    Running,
    Completed,
    Aborted,
    Cancelled,
}

impl HarvestState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            HarvestState::Completed | HarvestState::Aborted | HarvestState::Cancelled
        )
    }
}

/// 页面进度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HarvestProgress {
    pub current_page: u32,
    pub total_pages: u32,
}

impl HarvestProgress {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    /// 完成比例，范围 [0, 1]
    pub fn fraction(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        (self.current_page.min(self.total_pages) as f64) / (self.total_pages as f64)
    }

    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

impl fmt::Display for HarvestProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({:.1}%)",
            self.current_page,
            self.total_pages,
            self.percent()
        )
    }
}

/// 单个文档下载失败的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadFailure {
    /// 服务器返回非 2xx
    Status(u16),
    /// 网络层错误
    Transport(String),
    /// 链接无法解析为网址
    InvalidUrl(String),
}

impl fmt::Display for DownloadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadFailure::Status(code) => write!(f, "HTTP {}", code),
            DownloadFailure::Transport(msg) => write!(f, "网络错误: {}", msg),
            DownloadFailure::InvalidUrl(link) => write!(f, "无效链接: {}", link),
        }
    }
}

/// 单个文档的下载结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved {
        file_name: String,
        kind: DocumentKind,
        bytes: usize,
    },
    Failed {
        file_name: String,
        kind: DocumentKind,
        reason: DownloadFailure,
    },
}

impl DownloadOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            DownloadOutcome::Saved { file_name, .. } | DownloadOutcome::Failed { file_name, .. } => {
                file_name
            }
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved { .. })
    }
}

/// 下载统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HarvestSummary {
    pub pages: u32,
    pub rows: usize,
    pub skipped_rows: usize,
    pub saved: usize,
    pub failed: usize,
}

impl HarvestSummary {
    pub fn add_outcome(&mut self, outcome: &DownloadOutcome) {
        if outcome.is_saved() {
            self.saved += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// 下载任务的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestOutcome {
    Completed(HarvestSummary),
    Aborted {
        message: String,
        summary: HarvestSummary,
    },
    Cancelled(HarvestSummary),
}

impl HarvestOutcome {
    pub fn state(&self) -> HarvestState {
        match self {
            HarvestOutcome::Completed(_) => HarvestState::Completed,
            HarvestOutcome::Aborted { .. } => HarvestState::Aborted,
            HarvestOutcome::Cancelled(_) => HarvestState::Cancelled,
        }
    }

    pub fn summary(&self) -> &HarvestSummary {
        match self {
            HarvestOutcome::Completed(summary)
            | HarvestOutcome::Aborted { summary, .. }
            | HarvestOutcome::Cancelled(summary) => summary,
        }
    }
}

/// 后台任务发给展示层的事件
#[derive(Debug, Clone, PartialEq)]
pub enum HarvestEvent {
    /// 已取得总页数
    Started { total_pages: u32 },
    /// 一页处理完成
    PageDone(HarvestProgress),
    /// 一个文档处理完成
    Document(DownloadOutcome),
    /// 任务结束，每次执行恰好一次
    Finished(HarvestOutcome),
}
