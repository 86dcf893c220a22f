//! 正确性判定服务 - 业务能力层
//!
//! 只在 chosen_option 非空的记录上调用

use crate::models::QuestionRecord;

/// 视觉标记判定结果
///
/// 三态：把"无信号"与"判定为错"区分开，
/// 默认收口在 CorrectnessResolver 里是单独、可见的一步。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    ResolvedTrue,
    ResolvedFalse,
    Unresolved,
}

/// 视觉标记判定策略
///
/// 部分题型的正确性只通过样式表达，没有任何显式文本字段，
/// 这里在区块的原始标记里扫描两组互斥的信号子串。
pub struct VisualIndicatorPolicy;

impl VisualIndicatorPolicy {
    /// "答对"信号：对勾字形及其数字字符引用、绿色系颜色记号、
    /// 正确答案类名片段、字面量 correct
    ///
    /// 颜色记号必须带 color: 前缀或写成十六进制，裸词 green / red
    /// 会误命中普通文本（比如 Answered 里就含有 red）
    const POSITIVE_SIGNALS: [&'static str; 14] = [
        "✓",
        "✔",
        "&#10003;",
        "&#10004;",
        "&#x2713;",
        "&#x2714;",
        "color:green",
        "color: green",
        "#4caf50",
        "#008000",
        "rightans",
        "right-answer",
        "success",
        "correct",
    ];

    /// "答错"信号：叉号字形及其数字字符引用、红色系颜色记号、
    /// 错误答案类名片段
    const NEGATIVE_SIGNALS: [&'static str; 15] = [
        "✗",
        "✘",
        "&#10007;",
        "&#10008;",
        "&#x2717;",
        "&#x2718;",
        "color:red",
        "color: red",
        "#f44336",
        "#ff0000",
        "wrongans",
        "wrong-answer",
        "error",
        "danger",
        "incorrect",
    ];

    pub fn new() -> Self {
        Self
    }

    /// 在原始标记中判定视觉信号
    pub fn inspect(&self, markup: &str) -> Resolution {
        let markup_lc = markup.to_lowercase();
        let positive = Self::POSITIVE_SIGNALS.iter().any(|s| markup_lc.contains(s));
        let negative = Self::NEGATIVE_SIGNALS.iter().any(|s| markup_lc.contains(s));

        if positive && !negative {
            Resolution::ResolvedTrue
        } else if negative {
            Resolution::ResolvedFalse
        } else {
            Resolution::Unresolved
        }
    }
}

impl Default for VisualIndicatorPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// 正确性判定服务
pub struct CorrectnessResolver {
    policy: VisualIndicatorPolicy,
}

impl CorrectnessResolver {
    pub fn new() -> Self {
        Self {
            policy: VisualIndicatorPolicy::new(),
        }
    }

    /// 判定一条记录的正确性并回填
    ///
    /// chosen_option 为空的记录不做任何判定。
    pub fn resolve(&self, record: &mut QuestionRecord, markup: &str) {
        if record.chosen_option.is_empty() {
            return;
        }

        // 情况 A：正确答案已知，直接比较
        if !record.correct_answer.is_empty() {
            record.is_correct = answers_match(&record.chosen_option, &record.correct_answer);
            return;
        }

        // 情况 B：正确答案未知，按视觉信号判定
        match self.policy.inspect(markup) {
            Resolution::ResolvedTrue => {
                // 回填正确答案，保持下游口径一致
                record.correct_answer = record.chosen_option.clone();
                record.is_correct = true;
            }
            Resolution::ResolvedFalse => record.is_correct = false,
            // 没有任何信号时一律按答错计
            Resolution::Unresolved => record.is_correct = false,
        }
    }
}

impl Default for CorrectnessResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// 忽略大小写与首尾空白比较两个答案
fn answers_match(chosen: &str, correct: &str) -> bool {
    chosen.trim().to_lowercase() == correct.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionStatus;

    fn answered_record(chosen: &str, correct: &str) -> QuestionRecord {
        QuestionRecord {
            chosen_option: chosen.to_string(),
            correct_answer: correct.to_string(),
            status: QuestionStatus::Answered,
            ..QuestionRecord::default()
        }
    }

    #[test]
    fn test_explicit_answer_comparison_is_trimmed_and_case_insensitive() {
        let resolver = CorrectnessResolver::new();

        let mut record = answered_record(" A ", "a");
        resolver.resolve(&mut record, "");
        assert!(record.is_correct);

        let mut record = answered_record("2", "3");
        resolver.resolve(&mut record, "");
        assert!(!record.is_correct);
    }

    #[test]
    fn test_positive_signal_backfills_correct_answer() {
        let resolver = CorrectnessResolver::new();
        let mut record = answered_record("2", "");

        resolver.resolve(&mut record, r#"<td class="rightAns">(2) 48</td>"#);

        assert!(record.is_correct);
        assert_eq!(record.correct_answer, "2");
    }

    #[test]
    fn test_negative_signal_resolves_false() {
        let resolver = CorrectnessResolver::new();
        let mut record = answered_record("1", "");

        resolver.resolve(&mut record, r#"<span style="color: red">✗</span>"#);

        assert!(!record.is_correct);
        assert_eq!(record.correct_answer, "");
    }

    #[test]
    fn test_negative_wins_when_both_signals_present() {
        let policy = VisualIndicatorPolicy::new();

        let resolution = policy.inspect(r#"<td class="rightAns">✓</td><td class="wrongAns">✗</td>"#);

        assert_eq!(resolution, Resolution::ResolvedFalse);
    }

    #[test]
    fn test_no_signal_defaults_to_incorrect() {
        // 默认偏置：两类信号都缺席时按答错计，这是约定行为而不是事实判断
        let resolver = CorrectnessResolver::new();
        let mut record = answered_record("4", "");

        resolver.resolve(&mut record, "<td>(4) 96</td>");

        assert!(!record.is_correct);
        assert_eq!(record.correct_answer, "");
    }

    #[test]
    fn test_incorrect_class_fragment_is_a_negative_signal() {
        let policy = VisualIndicatorPolicy::new();

        assert_eq!(
            policy.inspect(r#"<td class="incorrect">(1)</td>"#),
            Resolution::ResolvedFalse
        );
    }

    #[test]
    fn test_unattempted_record_is_left_alone() {
        let resolver = CorrectnessResolver::new();
        let mut record = QuestionRecord::default();

        resolver.resolve(&mut record, "✓ green everywhere");

        assert!(!record.is_correct);
        assert_eq!(record.correct_answer, "");
    }
}
