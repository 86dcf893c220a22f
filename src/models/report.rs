use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateMetadata;
use crate::models::question::QuestionRecord;
use crate::models::section::Section;

/// 单个分区的得分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub name: String,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub raw_score: i32,
    /// 当前与 raw_score 恒等映射，未做真正的归一化
    pub scaled_score: f64,
    pub percentile: Option<f64>,
}

impl SectionScore {
    /// 构造一个全零得分
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            correct_count: 0,
            incorrect_count: 0,
            raw_score: 0,
            scaled_score: 0.0,
            percentile: None,
        }
    }
}

/// 整卷得分报告
///
/// overall 的百分位由三个分区百分位混合得出，不做独立插值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub varc: SectionScore,
    pub dilr: SectionScore,
    pub qa: SectionScore,
    pub overall: SectionScore,
    /// 填入百分位的估算策略名称
    #[serde(default)]
    pub percentile_method: String,
}

impl ScoreReport {
    /// 构造一个全零报告（未定位到任何题目时使用）
    pub fn zero() -> Self {
        Self {
            varc: SectionScore::empty(Section::Varc.name()),
            dilr: SectionScore::empty(Section::Dilr.name()),
            qa: SectionScore::empty(Section::Qa.name()),
            overall: SectionScore::empty("OVERALL"),
            percentile_method: String::new(),
        }
    }

    /// 按切分顺序访问三个分区得分
    pub fn section(&self, section: Section) -> &SectionScore {
        match section {
            Section::Varc => &self.varc,
            Section::Dilr => &self.dilr,
            Section::Qa => &self.qa,
        }
    }

    /// 按切分顺序可变访问三个分区得分
    pub fn section_mut(&mut self, section: Section) -> &mut SectionScore {
        match section {
            Section::Varc => &mut self.varc,
            Section::Dilr => &mut self.dilr,
            Section::Qa => &mut self.qa,
        }
    }
}

/// 一张答题卡的完整解析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetReport {
    /// 来源标识（URL 或文件名）
    pub source: String,
    pub candidate: CandidateMetadata,
    pub questions: Vec<QuestionRecord>,
    pub score: ScoreReport,
}
