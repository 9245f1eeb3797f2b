use std::fmt;

/// 搜索结果中的一行试卷资料
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamRecord {
    pub city: String,
    pub school: String,
    pub grade: String,
    pub year: String,
    pub subject: String,
    pub exam_type: String,
    pub version: String,
    pub record_id: String,
    /// 试卷链接；`None` 表示没有可直接下载的文档
    pub exam_link: Option<String>,
    /// 答案链接
    pub answer_link: Option<String>,
}

impl ExamRecord {
    /// 指定种类的文档链接
    pub fn link(&self, kind: DocumentKind) -> Option<&str> {
        match kind {
            DocumentKind::Exam => self.exam_link.as_deref(),
            DocumentKind::Answer => self.answer_link.as_deref(),
        }
    }
}

/// 一行资料对应的两种文档
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// 试卷
    Exam,
    /// 答案
    Answer,
}

impl DocumentKind {
    /// 下载顺序：先试卷后答案
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Exam, DocumentKind::Answer];

    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Exam => "试卷",
            DocumentKind::Answer => "答案",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 单个文档的下载任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// 文档链接（原始 href，下载时再解析为绝对网址）
    pub link: String,
    /// 目标文件名
    pub file_name: String,
    pub kind: DocumentKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_display() {
        assert_eq!(DocumentKind::Exam.to_string(), "试卷");
        assert_eq!(format!("{}", DocumentKind::Answer), "答案");
    }

    #[test]
    fn test_link_by_kind() {
        let record = ExamRecord {
            exam_link: Some("/files/e.pdf".to_string()),
            ..ExamRecord::default()
        };
        assert_eq!(record.link(DocumentKind::Exam), Some("/files/e.pdf"));
        assert_eq!(record.link(DocumentKind::Answer), None);
    }
}
