use std::fmt;

use regex::Regex;
use url::Url;

use crate::error::{HarvestError, HarvestResult};

/// 分页搜索网址模板
///
/// 由使用者确认的搜索结果网址建立，只改写其中的 `page=<数字>` 参数，
/// 其余筛选条件原样保留。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUrlTemplate {
    confirmed: String,
    before: String,
    after: String,
}

impl SearchUrlTemplate {
    pub fn from_confirmed_url(url: &str) -> HarvestResult<Self> {
        let url = url.trim();
        let invalid = |reason: &str| HarvestError::InvalidSearchUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let parsed = Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("只支持 http/https"));
        }

        let page_param = Regex::new(r"[?&]page=(\d+)").map_err(|e| invalid(&e.to_string()))?;
        let digits = page_param
            .captures(url)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| invalid("缺少 page 参数"))?;

        Ok(Self {
            confirmed: url.to_string(),
            before: url[..digits.start()].to_string(),
            after: url[digits.end()..].to_string(),
        })
    }

    /// 第 `page` 页的网址
    pub fn page_url(&self, page: u32) -> String {
        format!("{}{}{}", self.before, page, self.after)
    }

    /// 使用者确认时的原始网址
    pub fn confirmed_url(&self) -> &str {
        &self.confirmed
    }
}

impl fmt::Display for SearchUrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}page={{}}{}", self.before.trim_end_matches("page="), self.after)
    }
}
