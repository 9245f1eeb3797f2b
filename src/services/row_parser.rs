//! 行解析服务 - 业务能力层
//!
//! 只负责把一行表格转成 `ExamRecord`，不关心下载

use crate::models::{ExamRecord, ListingRow};

/// 有效资料行至少需要的单元格数
pub const MIN_CELLS: usize = 11;

const CITY: usize = 0;
const SCHOOL: usize = 1;
const GRADE: usize = 2;
const YEAR: usize = 3;
// 4: 未使用
const SUBJECT: usize = 5;
const EXAM_TYPE: usize = 6;
const VERSION: usize = 7;
const RECORD_ID: usize = 8;
const EXAM_LINK: usize = 9;
const ANSWER_LINK: usize = 10;

/// 解析一行资料
///
/// 单元格不足的行（表头、提示行）返回 `None`，不视为错误。
pub fn parse_row(row: &ListingRow) -> Option<ExamRecord> {
    if row.len() < MIN_CELLS {
        return None;
    }

    let text = |index: usize| {
        row.cell(index)
            .map(|cell| cell.text.trim().to_string())
            .unwrap_or_default()
    };

    Some(ExamRecord {
        city: text(CITY),
        school: text(SCHOOL),
        grade: text(GRADE),
        year: text(YEAR),
        subject: text(SUBJECT),
        exam_type: text(EXAM_TYPE),
        version: text(VERSION),
        record_id: text(RECORD_ID),
        exam_link: document_link(row, EXAM_LINK),
        answer_link: document_link(row, ANSWER_LINK),
    })
}

/// 取出可直接下载的链接
///
/// `mailto:` 代表需要来信申请，没有可下载的文档
fn document_link(row: &ListingRow, index: usize) -> Option<String> {
    let href = row.cell(index)?.href.as_deref()?.trim();
    if href.is_empty() || href.starts_with("mailto:") {
        return None;
    }
    Some(href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingCell;

    fn sample_row(exam: ListingCell, answer: ListingCell) -> ListingRow {
        let mut cells: Vec<ListingCell> = [
            " 新北市 ", "OO國小", "一年級", "112", "", "國語", "期中", "B版", "12345",
        ]
        .iter()
        .map(|t| ListingCell::text(*t))
        .collect();
        cells.push(exam);
        cells.push(answer);
        ListingRow::new(cells)
    }

    #[test]
    fn test_parse_row_fields() {
        let row = sample_row(
            ListingCell::link("exam", "/files/e.pdf"),
            ListingCell::link("answer", "/files/a.pdf"),
        );
        let record = parse_row(&row).unwrap();

        assert_eq!(record.city, "新北市");
        assert_eq!(record.school, "OO國小");
        assert_eq!(record.grade, "一年級");
        assert_eq!(record.year, "112");
        assert_eq!(record.subject, "國語");
        assert_eq!(record.exam_type, "期中");
        assert_eq!(record.version, "B版");
        assert_eq!(record.record_id, "12345");
        assert_eq!(record.exam_link.as_deref(), Some("/files/e.pdf"));
        assert_eq!(record.answer_link.as_deref(), Some("/files/a.pdf"));
    }

    #[test]
    fn test_short_rows_are_skipped() {
        for len in 0..MIN_CELLS {
            let row = ListingRow::new(vec![ListingCell::text("x"); len]);
            assert!(parse_row(&row).is_none(), "{} 个单元格应被略过", len);
        }
    }

    #[test]
    fn test_mailto_links_are_absent() {
        let row = sample_row(
            ListingCell::link("exam", "/files/e.pdf"),
            ListingCell::link("answer", "mailto:x@y.z"),
        );
        let record = parse_row(&row).unwrap();
        assert_eq!(record.exam_link.as_deref(), Some("/files/e.pdf"));
        assert!(record.answer_link.is_none());

        let row = sample_row(
            ListingCell::link("exam", "mailto:x@y.z"),
            ListingCell::text("無"),
        );
        let record = parse_row(&row).unwrap();
        assert!(record.exam_link.is_none());
        assert!(record.answer_link.is_none());
    }

    #[test]
    fn test_extra_cells_are_ignored() {
        let mut row = sample_row(
            ListingCell::link("exam", "/files/e.pdf"),
            ListingCell::text(""),
        );
        row.cells.push(ListingCell::link("extra", "/files/x.pdf"));
        let record = parse_row(&row).unwrap();
        assert_eq!(record.record_id, "12345");
        assert!(record.answer_link.is_none());
    }
}
