//! 字段提取服务 - 业务能力层
//!
//! 只负责"从单个题目区块提取字段"能力，不关心区块怎么来、分数怎么算

use regex::Regex;

use crate::error::AppResult;
use crate::models::QuestionStatus;
use crate::services::question_locator::QuestionBlock;

/// 空白答案占位符（TITA 题未作答时门户填充的记号）
pub(crate) const BLANK_TOKENS: [&str; 3] = ["--", "-", "—"];

/// 判断取到的值是否为空白占位符
pub(crate) fn is_blank_token(value: &str) -> bool {
    BLANK_TOKENS.contains(&value)
}

/// 单个区块的提取结果
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExtractedFields {
    pub chosen_option: String,
    pub correct_answer: String,
    pub status: Option<QuestionStatus>,
}

impl ExtractedFields {
    /// 是否携带任何可用信号
    ///
    /// 状态、所选答案、正确答案全空的区块是结构噪声（图例、表头等），
    /// 调用方应当直接丢弃。
    pub fn has_signal(&self) -> bool {
        self.status.is_some() || !self.chosen_option.is_empty() || !self.correct_answer.is_empty()
    }
}

/// 字段提取服务
///
/// 职责：
/// - 只处理单个题目区块
/// - 按固定优先级尝试各模式族，每个字段首个命中生效
/// - 行式版式走 标签/值 行兜底（有的版式把同样的信息放在表格行里，
///   而不是行内 "Label: Value" 文本）
pub struct FieldExtractor {
    chosen_re: Regex,
    given_re: Regex,
    correct_re: Regex,
    right_re: Regex,
    possible_re: Regex,
}

impl FieldExtractor {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            chosen_re: Regex::new(r"(?i)Chosen\s+Option\s*:?\s*(\d+)")?,
            given_re: Regex::new(r"(?i)Given\s+Answer\s*:?\s*(\S+)")?,
            correct_re: Regex::new(r"(?i)Correct\s+Answer\s*:?\s*(\d+)")?,
            right_re: Regex::new(r"(?i)Right\s+Option\s*:?\s*(\d+)")?,
            possible_re: Regex::new(r"(?i)Possible\s+Answer\s*:?\s*(\S+)")?,
        })
    }

    /// 提取单个区块的全部字段
    pub fn extract(&self, block: &QuestionBlock) -> ExtractedFields {
        let mut fields = ExtractedFields::default();
        let text = &block.text;

        // 所选答案：MCQ 的 Chosen Option 优先，其次 TITA 的 Given Answer
        if let Some(value) = capture(&self.chosen_re, text) {
            fields.chosen_option = value;
            fields.status = Some(QuestionStatus::Answered);
        } else if let Some(value) = capture(&self.given_re, text) {
            if is_blank_token(&value) {
                fields.status = Some(QuestionStatus::NotAnswered);
            } else {
                fields.chosen_option = value;
                fields.status = Some(QuestionStatus::Answered);
            }
        }

        // 正确答案：三个显式模式依次尝试
        fields.correct_answer = capture(&self.correct_re, text)
            .or_else(|| capture(&self.right_re, text))
            .or_else(|| capture(&self.possible_re, text))
            .unwrap_or_default();

        // 行式兜底：只填尚未取到的字段
        self.apply_row_fallback(block, &mut fields);

        // 状态字面量扫描，按此优先级
        if fields.status.is_none() {
            fields.status = scan_status_literal(text);
        }

        fields
    }

    /// 标签/值 行兜底
    fn apply_row_fallback(&self, block: &QuestionBlock, fields: &mut ExtractedFields) {
        for (label, value) in &block.rows {
            let label_lc = label.to_lowercase();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            if label_lc.contains("chosen option") && fields.chosen_option.is_empty() {
                fields.chosen_option = value.to_string();
                fields.status.get_or_insert(QuestionStatus::Answered);
            } else if (label_lc.contains("correct answer")
                || label_lc.contains("right option")
                || label_lc.contains("possible answer"))
                && fields.correct_answer.is_empty()
            {
                fields.correct_answer = value.to_string();
            } else if label_lc.contains("given answer") && fields.chosen_option.is_empty() {
                if is_blank_token(value) {
                    fields.status.get_or_insert(QuestionStatus::NotAnswered);
                } else {
                    fields.chosen_option = value.to_string();
                    fields.status.get_or_insert(QuestionStatus::Answered);
                }
            }
        }
    }
}

/// 状态字面量扫描
///
/// "Not Answered" 必须先于 "Answered" 检查，后者是前者的子串
fn scan_status_literal(text: &str) -> Option<QuestionStatus> {
    if text.contains("Not Answered") {
        Some(QuestionStatus::NotAnswered)
    } else if text.contains("Answered") {
        Some(QuestionStatus::Answered)
    } else if text.contains("Marked for Review") {
        Some(QuestionStatus::MarkedForReview)
    } else {
        None
    }
}

/// 取首个捕获组并去除首尾空白，空结果视作未命中
fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new().expect("构建字段提取器失败")
    }

    fn block_with_text(text: &str) -> QuestionBlock {
        QuestionBlock {
            text: text.to_string(),
            ..QuestionBlock::default()
        }
    }

    #[test]
    fn test_chosen_option_sets_answered() {
        let fields = extractor().extract(&block_with_text(
            "Q.5 Which of the following... Chosen Option : 3 Correct Answer : 3",
        ));

        assert_eq!(fields.chosen_option, "3");
        assert_eq!(fields.correct_answer, "3");
        assert_eq!(fields.status, Some(QuestionStatus::Answered));
    }

    #[test]
    fn test_given_answer_blank_token_means_not_answered() {
        let fields = extractor().extract(&block_with_text("Q.8 Given Answer : -- Possible Answer : 517"));

        assert_eq!(fields.chosen_option, "");
        assert_eq!(fields.correct_answer, "517");
        assert_eq!(fields.status, Some(QuestionStatus::NotAnswered));
    }

    #[test]
    fn test_given_answer_value_sets_answered() {
        let fields = extractor().extract(&block_with_text("Given Answer : 42 Possible Answer : 42"));

        assert_eq!(fields.chosen_option, "42");
        assert_eq!(fields.status, Some(QuestionStatus::Answered));
    }

    #[test]
    fn test_right_option_is_second_choice_for_correct_answer() {
        let fields = extractor().extract(&block_with_text("Chosen Option : 1 Right Option : 2"));

        assert_eq!(fields.correct_answer, "2");
    }

    #[test]
    fn test_row_fallback_fills_unset_fields() {
        let block = QuestionBlock {
            text: "Q.12 some stem text without inline labels".to_string(),
            inner_html: String::new(),
            rows: vec![
                ("Chosen Option".to_string(), "4".to_string()),
                ("Correct Answer".to_string(), "2".to_string()),
            ],
        };
        let fields = extractor().extract(&block);

        assert_eq!(fields.chosen_option, "4");
        assert_eq!(fields.correct_answer, "2");
        assert_eq!(fields.status, Some(QuestionStatus::Answered));
    }

    #[test]
    fn test_row_fallback_does_not_overwrite_inline_values() {
        let block = QuestionBlock {
            text: "Chosen Option : 1".to_string(),
            inner_html: String::new(),
            rows: vec![("Chosen Option".to_string(), "9".to_string())],
        };
        let fields = extractor().extract(&block);

        assert_eq!(fields.chosen_option, "1");
    }

    #[test]
    fn test_status_literal_not_answered_beats_answered() {
        // "Answered" 是 "Not Answered" 的子串，优先级顺序不能反
        let fields = extractor().extract(&block_with_text("Q.3 Status : Not Answered"));

        assert_eq!(fields.status, Some(QuestionStatus::NotAnswered));
    }

    #[test]
    fn test_status_literal_marked_for_review() {
        let fields = extractor().extract(&block_with_text("Q.9 Marked for Review"));

        assert_eq!(fields.status, Some(QuestionStatus::MarkedForReview));
    }

    #[test]
    fn test_block_without_signal_is_noise() {
        let fields = extractor().extract(&block_with_text("Section Legend: green means right"));

        assert!(!fields.has_signal());
    }
}
