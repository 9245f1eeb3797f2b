//! 文件名服务 - 业务能力层
//!
//! 由 `ExamRecord` 生成固定格式的文件名：
//! `城市_学校_年级_学年度_科目_考试类别_版本_编号_{后缀}.{扩展名}`

use crate::models::{DocumentKind, DownloadTask, ExamRecord};

/// 文件名生成器
#[derive(Debug, Clone)]
pub struct FilenameBuilder {
    exam_label: String,
    answer_label: String,
    extension: String,
}

impl FilenameBuilder {
    pub fn new(
        exam_label: impl Into<String>,
        answer_label: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            exam_label: exam_label.into(),
            answer_label: answer_label.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    /// 不含后缀的基础文件名
    pub fn base_name(record: &ExamRecord) -> String {
        [
            &record.city,
            &record.school,
            &record.grade,
            &record.year,
            &record.subject,
            &record.exam_type,
            &record.version,
            &record.record_id,
        ]
        .iter()
        .map(|field| sanitize_component(field))
        .collect::<Vec<_>>()
        .join("_")
    }

    /// 指定文档种类的完整文件名
    pub fn file_name(&self, base_name: &str, kind: DocumentKind) -> String {
        let label = match kind {
            DocumentKind::Exam => &self.exam_label,
            DocumentKind::Answer => &self.answer_label,
        };
        format!("{}_{}.{}", base_name, label, self.extension)
    }

    /// 为一行资料建立下载任务，先试卷后答案，没有链接的略过
    pub fn tasks_for(&self, record: &ExamRecord) -> Vec<DownloadTask> {
        let base_name = Self::base_name(record);
        DocumentKind::ALL
            .into_iter()
            .filter_map(|kind| {
                record.link(kind).map(|link| DownloadTask {
                    link: link.to_string(),
                    file_name: self.file_name(&base_name, kind),
                    kind,
                })
            })
            .collect()
    }
}

impl Default for FilenameBuilder {
    fn default() -> Self {
        Self::new("exam", "answer", "pdf")
    }
}

/// 把单一路径元素中不安全的字符换成 `_`
fn sanitize_component(field: &str) -> String {
    field
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ExamRecord {
        ExamRecord {
            city: "新北市".to_string(),
            school: "OO國小".to_string(),
            grade: "一年級".to_string(),
            year: "112".to_string(),
            subject: "國語".to_string(),
            exam_type: "期中".to_string(),
            version: "B版".to_string(),
            record_id: "12345".to_string(),
            exam_link: Some("/files/e.pdf".to_string()),
            answer_link: None,
        }
    }

    #[test]
    fn test_base_name_order() {
        assert_eq!(
            FilenameBuilder::base_name(&sample_record()),
            "新北市_OO國小_一年級_112_國語_期中_B版_12345"
        );
    }

    #[test]
    fn test_exam_and_answer_differ_only_by_label() {
        let builder = FilenameBuilder::default();
        let base = FilenameBuilder::base_name(&sample_record());
        let exam = builder.file_name(&base, DocumentKind::Exam);
        let answer = builder.file_name(&base, DocumentKind::Answer);

        assert_eq!(exam, "新北市_OO國小_一年級_112_國語_期中_B版_12345_exam.pdf");
        assert_eq!(answer, "新北市_OO國小_一年級_112_國語_期中_B版_12345_answer.pdf");
        assert_eq!(
            exam.trim_end_matches("_exam.pdf"),
            answer.trim_end_matches("_answer.pdf")
        );
    }

    #[test]
    fn test_base_name_is_pure() {
        let a = sample_record();
        let mut b = sample_record();
        b.exam_link = None;
        b.answer_link = Some("/other.pdf".to_string());
        assert_eq!(FilenameBuilder::base_name(&a), FilenameBuilder::base_name(&b));
    }

    #[test]
    fn test_localized_labels() {
        let builder = FilenameBuilder::new("試卷", "答案", ".pdf");
        assert_eq!(builder.file_name("x", DocumentKind::Exam), "x_試卷.pdf");
        assert_eq!(builder.file_name("x", DocumentKind::Answer), "x_答案.pdf");
    }

    #[test]
    fn test_unsafe_characters_replaced() {
        let mut record = sample_record();
        record.school = "OO國小/分校".to_string();
        record.version = "A:B?".to_string();
        assert_eq!(
            FilenameBuilder::base_name(&record),
            "新北市_OO國小_分校_一年級_112_國語_期中_A_B__12345"
        );
    }

    #[test]
    fn test_tasks_skip_missing_links() {
        let builder = FilenameBuilder::default();
        let tasks = builder.tasks_for(&sample_record());

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].kind, DocumentKind::Exam);
        assert_eq!(tasks[0].link, "/files/e.pdf");
        assert_eq!(
            tasks[0].file_name,
            "新北市_OO國小_一年級_112_國語_期中_B版_12345_exam.pdf"
        );

        let mut both = sample_record();
        both.answer_link = Some("/files/a.pdf".to_string());
        let kinds: Vec<_> = builder.tasks_for(&both).iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![DocumentKind::Exam, DocumentKind::Answer]);
    }
}
