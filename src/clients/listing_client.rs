/// 搜索结果页客户端
///
/// 负责抓取单页搜索结果并解析成 `ListingPage`
use std::time::Duration;

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{HarvestError, HarvestResult};
use crate::models::{ListingCell, ListingPage, ListingRow};

/// 搜索结果页客户端
#[derive(Clone)]
pub struct ListingClient {
    http: Client,
    max_retries: usize,
    retry_backoff: Duration,
}

impl ListingClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> HarvestResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(HarvestError::Client)?;

        Ok(Self {
            http,
            max_retries: config.transport_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    /// 底层 HTTP 客户端，供文档下载共用连接池
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// 抓取并解析一页搜索结果
    ///
    /// 网络错误按配置重试，非 2xx 状态码直接返回错误
    pub async fn fetch_page(&self, page_url: &str) -> HarvestResult<ListingPage> {
        let mut attempt = 0;
        loop {
            match self.fetch_body(page_url).await {
                Ok(body) => return Ok(parse_listing(&body)),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "页面请求失败 (尝试 {}/{}), 稍后重试: {}",
                        attempt, self.max_retries, e
                    );
                    sleep(self.retry_backoff * attempt as u32).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_body(&self, page_url: &str) -> HarvestResult<String> {
        debug!("GET {}", page_url);
        let transport = |source| HarvestError::Transport {
            url: page_url.to_string(),
            source,
        };

        let response = self.http.get(page_url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::HttpStatus {
                url: page_url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("invalid static selector")
}

/// 解析搜索结果页 HTML
///
/// 第一个 `<tr>` 视为表头直接略过；其余每行保留所有 `<td>`。
pub fn parse_listing(html: &str) -> ListingPage {
    let document = Html::parse_document(html);
    let total_sel = selector("span#total_p");
    let row_sel = selector("tr");
    let cell_sel = selector("td");
    let link_sel = selector("a");

    let total_pages_text = document
        .select(&total_sel)
        .next()
        .map(|el| element_text(&el));

    let rows = document
        .select(&row_sel)
        .skip(1)
        .map(|row| {
            let cells = row
                .select(&cell_sel)
                .map(|cell| ListingCell {
                    text: element_text(&cell),
                    href: cell
                        .select(&link_sel)
                        .next()
                        .and_then(|a| a.value().attr("href"))
                        .map(str::to_string),
                })
                .collect();
            ListingRow::new(cells)
        })
        .collect();

    ListingPage {
        total_pages_text,
        rows,
    }
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="pager">共 <span id="total_p"> 3 </span> 頁</div>
          <table>
            <tr><th>縣市</th><th>學校</th></tr>
            <tr>
              <td> 新北市 </td><td>OO國小</td><td>一年級</td><td>112</td><td></td>
              <td>國語</td><td>期中</td><td>B版</td><td>12345</td>
              <td><a href="/files/e.pdf">試卷</a></td>
              <td><a href="mailto:x@y.z">答案</a></td>
            </tr>
            <tr><td colspan="11">沒有資料</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_total_pages_text() {
        let page = parse_listing(PAGE);
        assert_eq!(page.total_pages_text.as_deref(), Some("3"));
    }

    #[test]
    fn test_parse_rows_skip_header() {
        let page = parse_listing(PAGE);
        assert_eq!(page.rows.len(), 2);

        let row = &page.rows[0];
        assert_eq!(row.len(), 11);
        assert_eq!(row.cells[0].text, "新北市");
        assert_eq!(row.cells[0].href, None);
        assert_eq!(row.cells[9].href.as_deref(), Some("/files/e.pdf"));
        assert_eq!(row.cells[9].text, "試卷");
        assert_eq!(row.cells[10].href.as_deref(), Some("mailto:x@y.z"));

        assert_eq!(page.rows[1].len(), 1);
    }

    #[test]
    fn test_missing_total_pages() {
        let page = parse_listing("<html><body><table><tr><td>x</td></tr></table></body></html>");
        assert!(page.total_pages_text.is_none());
        assert!(page.rows.is_empty());
    }
}
