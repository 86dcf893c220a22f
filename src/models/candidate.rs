use serde::{Deserialize, Serialize};

/// 考生信息
///
/// 全部字段为可选字符串，缺失不是错误，默认空串。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateMetadata {
    pub application_no: String,
    pub candidate_name: String,
    pub roll_no: String,
    /// 自由文本，不解析为日期类型
    pub test_date: String,
    pub test_time: String,
    pub subject: String,
}

impl CandidateMetadata {
    /// 是否一个字段都没提取到
    pub fn is_empty(&self) -> bool {
        self.application_no.is_empty()
            && self.candidate_name.is_empty()
            && self.roll_no.is_empty()
            && self.test_date.is_empty()
            && self.test_time.is_empty()
            && self.subject.is_empty()
    }
}
