//! 考生信息定位服务 - 业务能力层
//!
//! 只负责"找到考生信息区块并提取字段"能力

use regex::Regex;
use scraper::{Html, Selector};

use crate::models::CandidateMetadata;
use crate::services::question_locator::flattened_text;

/// 考生信息区块的识别标记
const CANDIDATE_MARKER: &str = "Application No";

/// 已识别的字段标签，取值时在下一个标签处截断
const FIELD_LABELS: [&str; 6] = [
    "Application No",
    "Candidate Name",
    "Roll No",
    "Test Date",
    "Test Time",
    "Subject",
];

/// 考生信息定位服务
///
/// 职责：
/// - 扫描表格类容器，找到第一个包含识别标记的区块
/// - 各字段独立提取，单个字段缺失不影响其他字段
/// - 找不到匹配容器时返回全空的 CandidateMetadata，不算错误
pub struct CandidateLocator;

impl CandidateLocator {
    pub fn new() -> Self {
        Self
    }

    /// 在文档中定位考生信息区块并提取字段
    pub fn locate(&self, doc: &Html) -> CandidateMetadata {
        let Ok(selector) = Selector::parse("table") else {
            return CandidateMetadata::default();
        };

        for table in doc.select(&selector) {
            let text = flattened_text(table);
            if text.contains(CANDIDATE_MARKER) {
                return Self::extract_from_text(&text);
            }
        }

        CandidateMetadata::default()
    }

    /// 从扁平化文本中按标签提取全部字段
    pub(crate) fn extract_from_text(text: &str) -> CandidateMetadata {
        CandidateMetadata {
            application_no: labeled_value(text, "Application No"),
            candidate_name: labeled_value(text, "Candidate Name"),
            roll_no: labeled_value(text, "Roll No"),
            test_date: labeled_value(text, "Test Date"),
            test_time: labeled_value(text, "Test Time"),
            subject: labeled_value(text, "Subject"),
        }
    }
}

impl Default for CandidateLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// 提取单个标签后的值
///
/// 值在下一个已识别标签或文本结尾处截断，避免把后续字段吞进来
fn labeled_value(text: &str, label: &str) -> String {
    let stops = FIELD_LABELS
        .iter()
        .filter(|l| **l != label)
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"(?i){}\s*:?\s*(.*?)\s*(?:{}|$)", regex::escape(label), stops);

    let Ok(re) = Regex::new(&pattern) else {
        return String::new();
    };

    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANDIDATE_TABLE: &str = r#"
        <html><body>
          <table><tr><td>Exam Legend</td><td>ignore me</td></tr></table>
          <table>
            <tr><td>Application No</td><td>220710012345</td></tr>
            <tr><td>Candidate Name</td><td>RAHUL NAIR</td></tr>
            <tr><td>Roll No</td><td>ND07100221</td></tr>
            <tr><td>Test Date</td><td>26/11/2023</td></tr>
            <tr><td>Test Time</td><td>8:30 AM - 10:30 AM</td></tr>
            <tr><td>Subject</td><td>Common Admission Test</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_extracts_all_fields() {
        let doc = Html::parse_document(CANDIDATE_TABLE);
        let candidate = CandidateLocator::new().locate(&doc);

        assert_eq!(candidate.application_no, "220710012345");
        assert_eq!(candidate.candidate_name, "RAHUL NAIR");
        assert_eq!(candidate.roll_no, "ND07100221");
        assert_eq!(candidate.test_date, "26/11/2023");
        assert_eq!(candidate.test_time, "8:30 AM - 10:30 AM");
        assert_eq!(candidate.subject, "Common Admission Test");
    }

    #[test]
    fn test_name_stops_at_next_label() {
        // 姓名后面紧跟 Roll No，取值必须在标签处截断而不是吞掉后续文本
        let candidate = CandidateLocator::extract_from_text(
            "Application No 1234 Candidate Name PRIYA SHARMA Roll No DL0042 Test Date 24/11/2024",
        );

        assert_eq!(candidate.candidate_name, "PRIYA SHARMA");
        assert_eq!(candidate.roll_no, "DL0042");
    }

    #[test]
    fn test_missing_field_does_not_block_others() {
        let candidate =
            CandidateLocator::extract_from_text("Application No 555 Roll No MB0009 Subject CAT");

        assert_eq!(candidate.application_no, "555");
        assert_eq!(candidate.candidate_name, "");
        assert_eq!(candidate.roll_no, "MB0009");
        assert_eq!(candidate.subject, "CAT");
    }

    #[test]
    fn test_no_marker_returns_empty_metadata() {
        let doc = Html::parse_document("<html><body><table><tr><td>Score Legend</td></tr></table></body></html>");
        let candidate = CandidateLocator::new().locate(&doc);

        assert!(candidate.is_empty());
    }
}
