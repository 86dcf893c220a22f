//! 业务能力层（Services Layer）
//!
//! 每个能力一个模块，只处理单个区块 / 单张答题卡的局部问题，
//! 不关心流程顺序，也不持有任何外部资源

pub mod candidate_locator;
pub mod correctness;
pub mod field_extractor;
pub mod pdf_extractor;
pub mod percentile;
pub mod question_locator;
pub mod scoring;

pub use candidate_locator::CandidateLocator;
pub use correctness::{CorrectnessResolver, Resolution, VisualIndicatorPolicy};
pub use field_extractor::{ExtractedFields, FieldExtractor};
pub use pdf_extractor::PdfLineExtractor;
pub use percentile::{blend_overall, AnchorTable, InterpolatedEstimator, SteppedBandEstimator};
pub use question_locator::{LocatedBlocks, QuestionBlock, QuestionLocator};
pub use scoring::{ProportionalSegmenter, SectionScorer, SectionSegmenter};
