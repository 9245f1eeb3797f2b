use naer_exam_download::browser::SearchSession;
use naer_exam_download::clients::ListingClient;
use naer_exam_download::services::parse_row;
use naer_exam_download::{Config, SearchUrlTemplate};

// 范例为「新北市/国小/一年级」条件产生的网址
const SAMPLE_SEARCH_URL: &str = "https://exam.naer.edu.tw/searchResult.php?page=1&orderBy=lastest&keyword=&selCountry=30&selCategory=41&selTech=0&selYear=&selTerm=&selType=&selPublisher=&chkCourses%5B%5D=53";

#[tokio::test]
#[ignore] // 需要网络，手动运行：cargo test -- --ignored
async fn test_live_listing_page() {
    let _ = tracing_subscriber::fmt::try_init();

    let config = Config::from_env();
    let client = ListingClient::new(&config).expect("建立客户端失败");
    let template = SearchUrlTemplate::from_confirmed_url(SAMPLE_SEARCH_URL).unwrap();

    let page = client
        .fetch_page(&template.page_url(1))
        .await
        .expect("抓取第一页失败");

    let total: u32 = page
        .total_pages_text
        .as_deref()
        .expect("应该有总页数")
        .parse()
        .expect("总页数应为整数");
    assert!(total > 0);

    let records: Vec<_> = page.rows.iter().filter_map(parse_row).collect();
    println!("共 {} 页, 第一页 {} 笔资料", total, records.len());
    assert!(!records.is_empty());
}

#[tokio::test]
#[ignore] // 需要浏览器和人工操作
async fn test_confirm_search_in_browser() {
    let _ = tracing_subscriber::fmt::try_init();

    let config = Config::from_env();
    let session = SearchSession::open(&config).await.expect("开启浏览器失败");
    let url = session
        .confirm_search_url()
        .await
        .expect("确认搜索网址失败");
    session.close().await;

    assert!(SearchUrlTemplate::from_confirmed_url(&url).is_ok());
}
