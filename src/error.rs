use std::path::PathBuf;

use thiserror::Error;

/// 下载流程错误类型
///
/// 单个文档下载失败不会出现在这里，它们以 `DownloadOutcome::Failed` 的形式
/// 在本地记录后继续；这里的错误都会终止整个下载任务。
#[derive(Debug, Error)]
pub enum HarvestError {
    /// 网络层失败（DNS、连接、超时）
    #[error("请求失败 ({url}): {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 页面返回非 2xx 状态码
    #[error("页面返回错误状态 ({url}): HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// 第一页找不到总页数元素
    #[error("无法找到总页数 ({url})")]
    MissingPageCount { url: String },

    /// 总页数不是整数
    #[error("总页数无法解析: '{value}'")]
    InvalidPageCount { value: String },

    /// 确认的搜索网址不可用作分页模板
    #[error("搜索网址无效 ({url}): {reason}")]
    InvalidSearchUrl { url: String, reason: String },

    /// 本地文件写入失败
    #[error("文件操作失败 ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP 客户端初始化失败
    #[error("HTTP 客户端初始化失败: {0}")]
    Client(#[source] reqwest::Error),
}

impl HarvestError {
    /// 创建文件错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarvestError::Io {
            path: path.into(),
            source,
        }
    }

    /// 是否值得重试（只有网络层错误）
    pub fn is_transient(&self) -> bool {
        matches!(self, HarvestError::Transport { .. })
    }
}

/// 下载流程结果类型
pub type HarvestResult<T> = Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_is_transient() {
        let status = HarvestError::HttpStatus {
            url: "https://exam.naer.edu.tw/searchResult.php?page=1".to_string(),
            status: 500,
        };
        assert!(!status.is_transient());

        let missing = HarvestError::MissingPageCount {
            url: "https://exam.naer.edu.tw/".to_string(),
        };
        assert!(!missing.is_transient());
    }

    #[test]
    fn test_error_messages_carry_context() {
        let err = HarvestError::InvalidPageCount {
            value: "abc".to_string(),
        };
        assert!(err.to_string().contains("abc"));

        let err = HarvestError::io(
            "下載試卷/a.pdf",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("下載試卷/a.pdf"));
    }
}
