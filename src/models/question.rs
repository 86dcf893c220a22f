use serde::{Deserialize, Serialize};

/// 作答状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionStatus {
    /// 已作答
    Answered,
    /// 未作答
    NotAnswered,
    /// 标记待复查
    MarkedForReview,
    /// 无法判定
    Unknown,
}

impl Default for QuestionStatus {
    fn default() -> Self {
        QuestionStatus::Unknown
    }
}

/// 单道题目的作答记录
///
/// `ordinal_index` 是记录在保留序列中的位置（0 起始），
/// 分区切分只依据这个位置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub ordinal_index: usize,
    /// 题干预览（截断，不作权威内容）
    pub question_text: String,
    /// 选项文本，多数来源页面不暴露选项，因此常为空
    #[serde(default)]
    pub options: Vec<String>,
    /// 所选答案，空串表示未作答
    pub chosen_option: String,
    /// 正确答案，空串表示未知
    pub correct_answer: String,
    pub status: QuestionStatus,
    /// 仅当 status == Answered 时有意义
    pub is_correct: bool,
}

impl Default for QuestionRecord {
    fn default() -> Self {
        Self {
            ordinal_index: 0,
            question_text: String::new(),
            options: Vec::new(),
            chosen_option: String::new(),
            correct_answer: String::new(),
            status: QuestionStatus::Unknown,
            is_correct: false,
        }
    }
}

impl QuestionRecord {
    /// 记录是否携带任何可用信号
    ///
    /// 状态、所选答案、正确答案全部为空的记录属于结构噪声
    /// （图例、表头等），不应保留。
    pub fn has_signal(&self) -> bool {
        self.status != QuestionStatus::Unknown
            || !self.chosen_option.is_empty()
            || !self.correct_answer.is_empty()
    }
}
