//! 分区切分与得分服务 - 业务能力层
//!
//! 纯函数式统计：同样的记录序列永远得到同样的报告

use crate::models::{QuestionRecord, QuestionStatus, ScoreReport, Section};

/// 每道答对题的得分
const MARKS_PER_CORRECT: i32 = 3;
/// 每道答错题的扣分
const PENALTY_PER_INCORRECT: i32 = 1;

/// 分区切分策略
///
/// 切分只依据题目序号。计分逻辑不感知具体策略，
/// 将来可以整体换成基于内容的切分实现。
pub trait SectionSegmenter: Send + Sync {
    fn name(&self) -> &'static str;

    /// 给定题目序号与总题数，返回所属分区
    fn section_of(&self, ordinal: usize, total: usize) -> Section;
}

/// 固定比例切分（33% / 33% / 34%）
///
/// 来源页面不携带真实的分区边界，只能假设固定比例版式。
/// 已知近似：真实考试不按 33/33/34 切分时会静默错分。
pub struct ProportionalSegmenter;

impl SectionSegmenter for ProportionalSegmenter {
    fn name(&self) -> &'static str {
        "proportional-33-33-34"
    }

    fn section_of(&self, ordinal: usize, total: usize) -> Section {
        let cut = (total as f64 * 0.33).ceil() as usize;
        if ordinal < cut {
            Section::Varc
        } else if ordinal < 2 * cut {
            Section::Dilr
        } else {
            Section::Qa
        }
    }
}

/// 得分服务
///
/// 扣分对所有已作答且不正确的记录统一生效，包括来自
/// Given Answer 模式的填空题记录，记录在计分时不携带题型。
pub struct SectionScorer {
    segmenter: Box<dyn SectionSegmenter>,
}

impl SectionScorer {
    pub fn new() -> Self {
        Self {
            segmenter: Box::new(ProportionalSegmenter),
        }
    }

    /// 使用自定义切分策略创建
    pub fn with_segmenter(segmenter: Box<dyn SectionSegmenter>) -> Self {
        Self { segmenter }
    }

    /// 当前切分策略名称
    pub fn segmenter_name(&self) -> &'static str {
        self.segmenter.name()
    }

    /// 统计整卷得分（不含百分位）
    pub fn score(&self, records: &[QuestionRecord]) -> ScoreReport {
        let mut report = ScoreReport::zero();
        let total = records.len();

        for record in records {
            if record.status != QuestionStatus::Answered {
                continue;
            }
            let section = self.segmenter.section_of(record.ordinal_index, total);
            let entry = report.section_mut(section);
            if record.is_correct {
                entry.correct_count += 1;
            } else {
                entry.incorrect_count += 1;
            }
        }

        for section in Section::all() {
            let entry = report.section_mut(section);
            entry.raw_score = MARKS_PER_CORRECT * entry.correct_count as i32
                - PENALTY_PER_INCORRECT * entry.incorrect_count as i32;
            // 当前不做归一化，缩放分与原始分恒等
            entry.scaled_score = entry.raw_score as f64;
        }

        report.overall.correct_count =
            report.varc.correct_count + report.dilr.correct_count + report.qa.correct_count;
        report.overall.incorrect_count =
            report.varc.incorrect_count + report.dilr.incorrect_count + report.qa.incorrect_count;
        report.overall.raw_score =
            report.varc.raw_score + report.dilr.raw_score + report.qa.raw_score;
        report.overall.scaled_score = report.overall.raw_score as f64;

        report
    }
}

impl Default for SectionScorer {
    fn default() -> Self {
        Self::new()
    }
}
