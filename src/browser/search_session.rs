//! 搜索确认会话
//!
//! 让使用者在真实浏览器中设定筛选条件并搜索，确认后读取当前网址。
//! 下载流程只接收这里产生的网址字符串，不依赖浏览器本身。

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chromiumoxide::{Browser, Page};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep, Instant};
use tracing::{info, warn};

use super::connection::{open_browser_page, settle, BrowserOrigin};
use crate::config::Config;

/// 总页数元素，出现即代表搜索结果已载入
const TOTAL_PAGES_SELECTOR: &str = "#total_p";

/// 浏览器搜索会话
pub struct SearchSession {
    browser: Browser,
    page: Page,
    origin: BrowserOrigin,
    confirm_timeout: Duration,
}

impl SearchSession {
    /// 开启浏览器并前往题库网
    pub async fn open(config: &Config) -> Result<Self> {
        let (browser, page, origin) =
            open_browser_page(config.browser_debug_port, &config.base_url).await?;
        settle().await;

        Ok(Self {
            browser,
            page,
            origin,
            confirm_timeout: Duration::from_secs(config.confirm_timeout_secs),
        })
    }

    /// 等待使用者确认后返回搜索结果网址
    pub async fn confirm_search_url(&self) -> Result<String> {
        info!("请在浏览器中选择搜索条件并按下搜索按钮，完成后回到此处按 Enter 确认");
        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .context("读取确认输入失败")?;

        self.wait_for_results().await?;

        let url = self
            .page
            .url()
            .await?
            .context("无法取得目前页面网址")?;
        info!("确认搜索网址：{}", url);
        Ok(url)
    }

    /// 等待搜索结果的总页数元素出现
    async fn wait_for_results(&self) -> Result<()> {
        let deadline = Instant::now() + self.confirm_timeout;
        loop {
            if self.page.find_element(TOTAL_PAGES_SELECTOR).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                bail!(
                    "{} 秒内未出现搜索结果，请确认已按下搜索按钮",
                    self.confirm_timeout.as_secs()
                );
            }
            sleep(Duration::from_millis(500)).await;
        }
    }

    /// 关闭会话；连接来的浏览器保持开启
    pub async fn close(mut self) {
        if self.origin == BrowserOrigin::Launched {
            match self.browser.close().await {
                Ok(_) => info!("已关闭浏览器"),
                Err(e) => warn!("关闭浏览器时发生错误: {}", e),
            }
        }
    }
}
