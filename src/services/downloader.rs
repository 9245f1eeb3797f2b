//! 文档下载服务 - 业务能力层
//!
//! 只负责"下载一个文档并存档"，失败在本地记录，不中断整个流程

use std::path::{Path, PathBuf};

use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{HarvestError, HarvestResult};
use crate::models::{DownloadFailure, DownloadOutcome, DownloadTask};

/// 文档下载服务
///
/// 职责：
/// - 把相对链接解析为绝对网址
/// - 成功时覆盖写入目标文件
/// - 非 2xx 和网络错误只回报 `Failed`
/// - 本地写入失败才返回错误
pub struct DocumentDownloader {
    http: Client,
    base_url: Url,
}

impl DocumentDownloader {
    pub fn new(http: Client, base_url: &str) -> HarvestResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| HarvestError::InvalidSearchUrl {
            url: base_url.to_string(),
            reason: format!("基础网址无效: {}", e),
        })?;
        Ok(Self { http, base_url })
    }

    /// 相对链接解析为绝对网址
    pub fn resolve(&self, link: &str) -> Option<Url> {
        self.base_url.join(link).ok()
    }

    /// 下载单个文档到 `destination_dir`
    pub async fn download(
        &self,
        task: &DownloadTask,
        destination_dir: &Path,
    ) -> HarvestResult<DownloadOutcome> {
        let failed = |reason| DownloadOutcome::Failed {
            file_name: task.file_name.clone(),
            kind: task.kind,
            reason,
        };

        let Some(url) = self.resolve(&task.link) else {
            warn!("⚠️ 无法下载: {} (无效链接 {})", task.file_name, task.link);
            return Ok(failed(DownloadFailure::InvalidUrl(task.link.clone())));
        };

        debug!("GET {}", url);
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("⚠️ 无法下载: {} ({})", task.file_name, e);
                return Ok(failed(DownloadFailure::Transport(e.to_string())));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("⚠️ 无法下载: {} (HTTP {})", task.file_name, status.as_u16());
            return Ok(failed(DownloadFailure::Status(status.as_u16())));
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!("⚠️ 无法下载: {} ({})", task.file_name, e);
                return Ok(failed(DownloadFailure::Transport(e.to_string())));
            }
        };

        let path: PathBuf = destination_dir.join(&task.file_name);
        tokio::fs::write(&path, &body)
            .await
            .map_err(|e| HarvestError::io(&path, e))?;

        info!("✓ 已下载{}: {}", task.kind, task.file_name);
        Ok(DownloadOutcome::Saved {
            file_name: task.file_name.clone(),
            kind: task.kind,
            bytes: body.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downloader(base: &str) -> DocumentDownloader {
        DocumentDownloader::new(Client::new(), base).unwrap()
    }

    #[test]
    fn test_resolve_relative_links() {
        let d = downloader("https://exam.naer.edu.tw/");
        assert_eq!(
            d.resolve("/files/e.pdf").unwrap().as_str(),
            "https://exam.naer.edu.tw/files/e.pdf"
        );
        assert_eq!(
            d.resolve("download.php?id=1").unwrap().as_str(),
            "https://exam.naer.edu.tw/download.php?id=1"
        );
        assert_eq!(
            d.resolve("https://cdn.example.org/x.pdf").unwrap().as_str(),
            "https://cdn.example.org/x.pdf"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(DocumentDownloader::new(Client::new(), "not a url").is_err());
    }
}
