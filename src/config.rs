use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库网首页，也是相对链接的解析基准
    pub base_url: String,
    /// 已确认的搜索结果网址；为空时通过浏览器让使用者确认
    pub search_url: Option<String>,
    /// 下载资料夹
    pub download_folder: PathBuf,
    /// 试卷文件名后缀
    pub exam_label: String,
    /// 答案文件名后缀
    pub answer_label: String,
    /// 文档扩展名
    pub file_extension: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 页面请求遇到网络错误时的重试次数
    pub transport_retries: usize,
    /// 重试间隔基数（毫秒），第 n 次重试等待 n 倍
    pub retry_backoff_ms: u64,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 确认搜索后等待总页数元素出现的时间（秒）
    pub confirm_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://exam.naer.edu.tw/".to_string(),
            search_url: None,
            download_folder: PathBuf::from("下載試卷"),
            exam_label: "exam".to_string(),
            answer_label: "answer".to_string(),
            file_extension: "pdf".to_string(),
            request_timeout_secs: 30,
            transport_retries: 2,
            retry_backoff_ms: 500,
            browser_debug_port: 9222,
            confirm_timeout_secs: 10,
            verbose_logging: false,
            log_file: "download_log.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，环境变量优先
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;
        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            base_url: env_string("BASE_URL").unwrap_or(self.base_url),
            search_url: env_string("SEARCH_URL").or(self.search_url),
            download_folder: env_string("DOWNLOAD_FOLDER").map(PathBuf::from).unwrap_or(self.download_folder),
            exam_label: env_string("EXAM_LABEL").unwrap_or(self.exam_label),
            answer_label: env_string("ANSWER_LABEL").unwrap_or(self.answer_label),
            file_extension: env_string("FILE_EXTENSION").unwrap_or(self.file_extension),
            request_timeout_secs: env_parsed("REQUEST_TIMEOUT_SECS").unwrap_or(self.request_timeout_secs),
            transport_retries: env_parsed("TRANSPORT_RETRIES").unwrap_or(self.transport_retries),
            retry_backoff_ms: env_parsed("RETRY_BACKOFF_MS").unwrap_or(self.retry_backoff_ms),
            browser_debug_port: env_parsed("BROWSER_DEBUG_PORT").unwrap_or(self.browser_debug_port),
            confirm_timeout_secs: env_parsed("CONFIRM_TIMEOUT_SECS").unwrap_or(self.confirm_timeout_secs),
            verbose_logging: env_parsed("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            log_file: env_string("OUTPUT_LOG_FILE").unwrap_or(self.log_file),
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
