//! PDF 行模式提取服务 - 业务能力层
//!
//! 输入是 PDF 协作方给出的有序文本行（已去除首尾空白），
//! 不负责从二进制文件提取文本本身

use regex::Regex;

use crate::error::AppResult;
use crate::models::{CandidateMetadata, QuestionRecord, QuestionStatus};
use crate::services::candidate_locator::CandidateLocator;
use crate::services::field_extractor::is_blank_token;
use crate::utils::logging::truncate_text;

/// 新题目行前缀
const QUESTION_PREFIX: &str = "Q.";
/// 作答行前缀
const YOUR_ANSWER_PREFIX: &str = "Your Answer :";
/// 答案行前缀
const CORRECT_ANSWER_PREFIX: &str = "Correct Answer :";

/// PDF 行模式提取服务
///
/// 职责：
/// - 以 "Q." 开头的行开启一道新题
/// - "Your Answer :" / "Correct Answer :" 行设置当前题目的字段
/// - 带括号数字前缀的行追加为选项文本
/// - 不携带任何信号的题目按结构噪声丢弃
pub struct PdfLineExtractor {
    option_re: Regex,
}

impl PdfLineExtractor {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            option_re: Regex::new(r"^\(\d+\)\s*(.+)$")?,
        })
    }

    /// 从文本行序列提取考生信息与作答记录
    pub fn extract(&self, lines: &[String]) -> (CandidateMetadata, Vec<QuestionRecord>) {
        let mut records: Vec<QuestionRecord> = Vec::new();
        let mut pending: Option<QuestionRecord> = None;

        for line in lines {
            if line.starts_with(QUESTION_PREFIX) {
                push_if_usable(&mut records, pending.take());
                pending = Some(QuestionRecord {
                    question_text: truncate_text(line, 80),
                    ..QuestionRecord::default()
                });
                continue;
            }

            let Some(record) = pending.as_mut() else {
                continue;
            };

            if let Some(value) = strip_field(line, YOUR_ANSWER_PREFIX) {
                if is_blank_token(&value) {
                    record.status = QuestionStatus::NotAnswered;
                } else {
                    record.chosen_option = value;
                    record.status = QuestionStatus::Answered;
                }
            } else if let Some(value) = strip_field(line, CORRECT_ANSWER_PREFIX) {
                record.correct_answer = value;
            } else if let Some(caps) = self.option_re.captures(line) {
                if let Some(text) = caps.get(1) {
                    record.options.push(text.as_str().trim().to_string());
                }
            }
        }
        push_if_usable(&mut records, pending.take());

        // 第一道题之前的页眉行带有考生信息标记时顺带提取，
        // 题目行不参与，避免把题干吞进字段值里
        let header = lines
            .iter()
            .take_while(|line| !line.starts_with(QUESTION_PREFIX))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let candidate = if header.contains("Application No") {
            CandidateLocator::extract_from_text(&header)
        } else {
            CandidateMetadata::default()
        };

        (candidate, records)
    }
}

/// 只保留携带可用信号的记录，并按保留顺序编号
fn push_if_usable(records: &mut Vec<QuestionRecord>, pending: Option<QuestionRecord>) {
    if let Some(mut record) = pending {
        if record.has_signal() {
            record.ordinal_index = records.len();
            records.push(record);
        }
    }
}

/// 截取字段行前缀后的值
fn strip_field(line: &str, prefix: &str) -> Option<String> {
    line.strip_prefix(prefix).map(|rest| rest.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_extracts_questions_with_options() {
        let extractor = PdfLineExtractor::new().expect("构建提取器失败");
        let (_, records) = extractor.extract(&lines(&[
            "Q.1 What is 6 x 8?",
            "(1) 42",
            "(2) 48",
            "Your Answer : 2",
            "Correct Answer : 2",
            "Q.2 What is the capital of France?",
            "Your Answer : --",
        ]));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ordinal_index, 0);
        assert_eq!(records[0].options, vec!["42".to_string(), "48".to_string()]);
        assert_eq!(records[0].chosen_option, "2");
        assert_eq!(records[0].correct_answer, "2");
        assert_eq!(records[0].status, QuestionStatus::Answered);
        assert_eq!(records[1].status, QuestionStatus::NotAnswered);
        assert_eq!(records[1].chosen_option, "");
    }

    #[test]
    fn test_question_without_signal_is_dropped() {
        let extractor = PdfLineExtractor::new().expect("构建提取器失败");
        let (_, records) = extractor.extract(&lines(&[
            "Q.1 A stem with no answer lines at all",
            "Q.2 Second question",
            "Your Answer : 3",
        ]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ordinal_index, 0);
        assert_eq!(records[0].chosen_option, "3");
    }

    #[test]
    fn test_lines_before_first_question_are_ignored() {
        let extractor = PdfLineExtractor::new().expect("构建提取器失败");
        let (_, records) = extractor.extract(&lines(&[
            "Response Sheet",
            "Your Answer : 9",
            "Q.1 First real question",
            "Your Answer : 1",
        ]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].chosen_option, "1");
    }

    #[test]
    fn test_candidate_metadata_from_labeled_lines() {
        let extractor = PdfLineExtractor::new().expect("构建提取器失败");
        let (candidate, _) = extractor.extract(&lines(&[
            "Application No 220099 Candidate Name ANITA DESAI Roll No PN0077",
            "Q.1 stem",
            "Your Answer : 1",
        ]));

        assert_eq!(candidate.application_no, "220099");
        assert_eq!(candidate.candidate_name, "ANITA DESAI");
        assert_eq!(candidate.roll_no, "PN0077");
    }

    #[test]
    fn test_long_stem_is_truncated() {
        let extractor = PdfLineExtractor::new().expect("构建提取器失败");
        let long_stem = format!("Q.1 {}", "x".repeat(200));
        let (_, records) = extractor.extract(&lines(&[&long_stem, "Your Answer : 1"]));

        assert_eq!(records[0].question_text.chars().count(), 83);
        assert!(records[0].question_text.ends_with("..."));
    }
}
