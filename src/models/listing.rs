//! 搜索结果页的解析结果
//!
//! 只保存下载流程需要的结构：总页数文字和每一行的单元格。
//! 全部是自有数据，可以跨 await 持有。

/// 表格中的一个单元格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingCell {
    /// 去除首尾空白后的文字
    pub text: String,
    /// 单元格中第一个 `<a>` 的 href
    pub href: Option<String>,
}

impl ListingCell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: None,
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: Some(href.into()),
        }
    }
}

/// 表格中的一行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRow {
    pub cells: Vec<ListingCell>,
}

impl ListingRow {
    pub fn new(cells: Vec<ListingCell>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 带边界检查的单元格访问
    pub fn cell(&self, index: usize) -> Option<&ListingCell> {
        self.cells.get(index)
    }
}

/// 一页搜索结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// `span#total_p` 的文字，找不到时为 `None`
    pub total_pages_text: Option<String>,
    /// 表头之后的所有行
    pub rows: Vec<ListingRow>,
}
