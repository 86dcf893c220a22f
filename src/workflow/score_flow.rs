//! 答题卡评分流程 - 流程层
//!
//! 核心职责：定义"一张答题卡"的完整处理流程
//!
//! 流程顺序：
//! 1. 定位考生信息区块 + 题目区块（或走 PDF 行模式）
//! 2. 逐区块提取字段，丢弃结构噪声
//! 3. 逐记录判定正确性
//! 4. 分区切分、计分
//! 5. 锚点插值估算百分位并混合整卷百分位
//!
//! 整个流程是纯同步的单文档变换：同样的文档与锚点表，
//! 输出必须逐位一致。

use scraper::Html;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{
    AnchorTableFile, CandidateMetadata, QuestionRecord, ScoreReport, Section, SheetDocument,
    SheetReport,
};
use crate::services::{
    blend_overall, CandidateLocator, CorrectnessResolver, FieldExtractor, InterpolatedEstimator,
    PdfLineExtractor, QuestionLocator, SectionScorer,
};
use crate::utils::logging::truncate_text;
use crate::workflow::sheet_ctx::SheetCtx;

/// 答题卡评分流程
///
/// - 编排完整的解析与评分流程
/// - 不持有任何外部资源（HTTP 客户端、文件句柄）
/// - 只依赖业务能力（services）
pub struct ScoreFlow {
    candidate_locator: CandidateLocator,
    question_locator: QuestionLocator,
    field_extractor: FieldExtractor,
    correctness: CorrectnessResolver,
    pdf_extractor: PdfLineExtractor,
    scorer: SectionScorer,
    estimator: InterpolatedEstimator,
    verbose_logging: bool,
}

impl ScoreFlow {
    /// 创建新的评分流程
    ///
    /// 锚点表为空或乱序时立刻失败：参考数据损坏绝不能被静默计成零分。
    pub fn new(config: &Config, anchors: Option<AnchorTableFile>) -> AppResult<Self> {
        let estimator = match &anchors {
            Some(tables) => InterpolatedEstimator::from_tables(tables)?,
            None => InterpolatedEstimator::with_defaults()?,
        };

        Ok(Self {
            candidate_locator: CandidateLocator::new(),
            question_locator: QuestionLocator::new(),
            field_extractor: FieldExtractor::new()?,
            correctness: CorrectnessResolver::new(),
            pdf_extractor: PdfLineExtractor::new()?,
            scorer: SectionScorer::new(),
            estimator,
            verbose_logging: config.verbose_logging,
        })
    }

    /// 处理一张答题卡
    ///
    /// 结构性落空（找不到考生区块、找不到题目区块）一律吸收为数据：
    /// 空的考生信息、空的记录序列、全零报告，绝不在这里报错。
    pub fn run(&self, ctx: &SheetCtx, document: &SheetDocument) -> SheetReport {
        // ========== 流程 1: 解析文档，得到考生信息与作答记录 ==========
        let (candidate, records) = match document {
            SheetDocument::Markup { markup, .. } => self.parse_markup(ctx, markup),
            SheetDocument::TextLines { lines, .. } => {
                info!("{} 📄 按 PDF 行模式解析，共 {} 行", ctx, lines.len());
                let (candidate, mut records) = self.pdf_extractor.extract(lines);
                // 行模式没有视觉标记，这里只会走显式答案比较和默认偏置
                for record in records.iter_mut() {
                    self.correctness.resolve(record, "");
                }
                (candidate, records)
            }
        };

        if candidate.is_empty() {
            debug!("{} 未提取到考生信息", ctx);
        }

        if records.is_empty() {
            warn!("{} ⚠️ 没有任何可用的作答记录，输出全零报告", ctx);
        } else {
            info!("{} ✓ 共保留 {} 条作答记录", ctx, records.len());
        }

        // ========== 流程 2: 分区切分与计分 ==========
        let mut score = self.scorer.score(&records);

        // ========== 流程 3: 锚点插值估算百分位 ==========
        for section in Section::all() {
            let entry = score.section_mut(section);
            entry.percentile = Some(self.estimator.estimate(section, entry.scaled_score));
        }

        let section_percentiles = [
            score.varc.percentile,
            score.dilr.percentile,
            score.qa.percentile,
        ];
        score.overall.percentile = Some(blend_overall(&section_percentiles));
        score.percentile_method = self.estimator.name().to_string();

        self.log_score(ctx, &score);

        SheetReport {
            source: document.source().to_string(),
            candidate,
            questions: records,
            score,
        }
    }

    /// 解析结构化标记
    fn parse_markup(
        &self,
        ctx: &SheetCtx,
        markup: &str,
    ) -> (CandidateMetadata, Vec<QuestionRecord>) {
        let doc = Html::parse_document(markup);

        let candidate = self.candidate_locator.locate(&doc);

        info!("{} 🔍 正在定位题目区块...", ctx);
        let located = self.question_locator.locate(&doc);
        match located.tier {
            Some(tier) => info!(
                "{} ✓ 选择器层级 {} 命中 {} 个区块",
                ctx,
                tier,
                located.blocks.len()
            ),
            None => warn!("{} ⚠️ 三级选择器全部落空", ctx),
        }

        let mut records = Vec::new();
        for block in &located.blocks {
            let fields = self.field_extractor.extract(block);

            // 没有任何信号的区块是结构噪声（图例、表头），静默丢弃
            if !fields.has_signal() {
                if self.verbose_logging {
                    debug!("{} 丢弃噪声区块: {}", ctx, truncate_text(&block.text, 60));
                }
                continue;
            }

            let mut record = QuestionRecord {
                ordinal_index: records.len(),
                question_text: truncate_text(&block.text, 80),
                chosen_option: fields.chosen_option,
                correct_answer: fields.correct_answer,
                status: fields.status.unwrap_or_default(),
                ..QuestionRecord::default()
            };

            self.correctness.resolve(&mut record, &block.inner_html);
            records.push(record);
        }

        (candidate, records)
    }

    // ========== 日志辅助方法 ==========

    /// 显示整卷得分概要
    fn log_score(&self, ctx: &SheetCtx, score: &ScoreReport) {
        for section in Section::all() {
            let entry = score.section(section);
            info!(
                "{}   {}: 对 {} / 错 {} / 原始分 {} / 百分位 {:?}",
                ctx,
                entry.name,
                entry.correct_count,
                entry.incorrect_count,
                entry.raw_score,
                entry.percentile
            );
        }
        info!(
            "{} 🏁 整卷: 原始分 {} / 百分位 {:?} ({})",
            ctx, score.overall.raw_score, score.overall.percentile, score.percentile_method
        );
    }
}
