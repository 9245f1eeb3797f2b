use anyhow::{anyhow, Result};
use chromiumoxide::handler::Handler;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 浏览器连接方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserOrigin {
    /// 连接到已开启调试端口的浏览器
    Connected,
    /// 由本程序启动
    Launched,
}

/// 取得可供使用者操作的浏览器并打开 `start_url`
///
/// 先尝试连接调试端口上的浏览器，失败时启动一个有界面的浏览器
pub async fn open_browser_page(port: u16, start_url: &str) -> Result<(Browser, Page, BrowserOrigin)> {
    let (browser, origin) = match connect(port).await {
        Ok(browser) => (browser, BrowserOrigin::Connected),
        Err(e) => {
            debug!("连接调试端口失败，改为启动浏览器: {}", e);
            (launch().await?, BrowserOrigin::Launched)
        }
    };

    let page = browser.new_page(start_url).await.map_err(|e| {
        error!("打开页面失败: {}", e);
        anyhow!("打开页面失败 ({}): {}", start_url, e)
    })?;
    info!("已打开: {}", start_url);

    Ok((browser, page, origin))
}

async fn connect(port: u16) -> Result<Browser> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, handler) = Browser::connect(&browser_url).await?;
    spawn_handler(handler);
    debug!("浏览器连接成功");

    Ok(browser)
}

async fn launch() -> Result<Browser> {
    info!("🚀 启动浏览器...");

    let config = BrowserConfig::builder()
        .with_head()
        .args(vec!["--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"])
        .build()
        .map_err(|e| {
            error!("配置浏览器失败: {}", e);
            anyhow!("配置浏览器失败: {}", e)
        })?;

    let (browser, handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        anyhow!("启动浏览器失败: {}，请确认是否已安装 Chrome 浏览器", e)
    })?;
    spawn_handler(handler);

    Ok(browser)
}

/// 在后台处理浏览器事件
fn spawn_handler(mut handler: Handler) {
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });
}

/// 等待浏览器状态同步
pub(crate) async fn settle() {
    sleep(tokio::time::Duration::from_millis(300)).await;
}
