//! 百分位估算服务 - 业务能力层
//!
//! 两个互相独立的估算策略：
//! - `InterpolatedEstimator`：锚点降序分段线性插值，报告用它填百分位
//! - `SteppedBandEstimator`：分段平台粗估，走单独的入口
//!
//! 两者口径刻意不统一，调用方通过策略名称区分结果来源。

use crate::error::AnchorError;
use crate::models::{Anchor, AnchorTableFile, Section};

/// 内置默认锚点表（按分数降序）
const DEFAULT_VARC: [(f64, f64); 10] = [
    (58.0, 99.5),
    (48.0, 99.0),
    (42.0, 98.0),
    (36.0, 95.0),
    (30.0, 90.0),
    (25.0, 85.0),
    (20.0, 75.0),
    (15.0, 60.0),
    (10.0, 40.0),
    (5.0, 20.0),
];

const DEFAULT_DILR: [(f64, f64); 10] = [
    (52.0, 99.5),
    (44.0, 99.0),
    (38.0, 98.0),
    (32.0, 95.0),
    (26.0, 90.0),
    (21.0, 85.0),
    (17.0, 75.0),
    (13.0, 60.0),
    (9.0, 40.0),
    (4.0, 20.0),
];

const DEFAULT_QA: [(f64, f64); 10] = [
    (60.0, 99.5),
    (50.0, 99.0),
    (43.0, 98.0),
    (36.0, 95.0),
    (29.0, 90.0),
    (24.0, 85.0),
    (19.0, 75.0),
    (14.0, 60.0),
    (9.0, 40.0),
    (4.0, 20.0),
];

/// 单个分区的锚点表
///
/// 构造时校验非空且按分数严格降序。校验失败立刻报错：
/// 参考表损坏属于配置错误，绝不能被静默计成零分。
#[derive(Debug, Clone)]
pub struct AnchorTable {
    anchors: Vec<Anchor>,
}

impl AnchorTable {
    pub fn new(section: &str, anchors: Vec<Anchor>) -> Result<Self, AnchorError> {
        if anchors.is_empty() {
            return Err(AnchorError::EmptyTable {
                section: section.to_string(),
            });
        }
        for (i, pair) in anchors.windows(2).enumerate() {
            if pair[1].score >= pair[0].score {
                return Err(AnchorError::NotDescending {
                    section: section.to_string(),
                    position: i + 1,
                });
            }
        }
        Ok(Self { anchors })
    }

    /// 按降序锚点做分段线性插值
    ///
    /// 高于最高锚点不外推（直接取最高锚点的百分位），
    /// 低于最低锚点取最低锚点的百分位，非正分数恒为 0。
    pub fn lookup(&self, scaled_score: f64) -> f64 {
        if scaled_score <= 0.0 {
            return 0.0;
        }

        for (i, anchor) in self.anchors.iter().enumerate() {
            if scaled_score >= anchor.score {
                if i == 0 {
                    return anchor.percentile;
                }
                let prev = &self.anchors[i - 1];
                let ratio = (scaled_score - anchor.score) / (prev.score - anchor.score);
                return round2(anchor.percentile + ratio * (prev.percentile - anchor.percentile));
            }
        }

        self.anchors[self.anchors.len() - 1].percentile
    }
}

/// 锚点插值估算器
///
/// 每个分区一张锚点表，报告里的百分位由本策略填入。
pub struct InterpolatedEstimator {
    varc: AnchorTable,
    dilr: AnchorTable,
    qa: AnchorTable,
}

impl InterpolatedEstimator {
    /// 策略名称，写入报告的 percentile_method
    pub const NAME: &'static str = "anchor-interpolated";

    /// 使用内置默认锚点表创建
    pub fn with_defaults() -> Result<Self, AnchorError> {
        Ok(Self {
            varc: table_from_pairs(Section::Varc.name(), &DEFAULT_VARC)?,
            dilr: table_from_pairs(Section::Dilr.name(), &DEFAULT_DILR)?,
            qa: table_from_pairs(Section::Qa.name(), &DEFAULT_QA)?,
        })
    }

    /// 使用外部参考文件创建
    pub fn from_tables(tables: &AnchorTableFile) -> Result<Self, AnchorError> {
        Ok(Self {
            varc: AnchorTable::new(Section::Varc.name(), tables.varc.clone())?,
            dilr: AnchorTable::new(Section::Dilr.name(), tables.dilr.clone())?,
            qa: AnchorTable::new(Section::Qa.name(), tables.qa.clone())?,
        })
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// 估算单个分区的百分位
    pub fn estimate(&self, section: Section, scaled_score: f64) -> f64 {
        self.table(section).lookup(scaled_score)
    }

    fn table(&self, section: Section) -> &AnchorTable {
        match section {
            Section::Varc => &self.varc,
            Section::Dilr => &self.dilr,
            Section::Qa => &self.qa,
        }
    }
}

/// 分段平台估算器
///
/// 固定分数断点映射到固定百分位，最低断点以下线性递减。
/// 与锚点插值估算器各走各的入口，口径刻意不统一。
pub struct SteppedBandEstimator;

impl SteppedBandEstimator {
    /// 策略名称
    pub const NAME: &'static str = "stepped-band";

    /// 整卷分数断点（按分数降序，各映射一个固定百分位）
    const BANDS: [(f64, f64); 8] = [
        (160.0, 99.9),
        (130.0, 99.0),
        (105.0, 97.0),
        (85.0, 92.0),
        (68.0, 85.0),
        (52.0, 75.0),
        (38.0, 60.0),
        (24.0, 45.0),
    ];

    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// 粗估整卷分数的百分位
    pub fn estimate(&self, scaled_score: f64) -> f64 {
        if scaled_score <= 0.0 {
            return 0.0;
        }

        for (threshold, percentile) in Self::BANDS {
            if scaled_score >= threshold {
                return percentile;
            }
        }

        // 最低断点以下线性递减
        let (lowest_threshold, lowest_percentile) = Self::BANDS[Self::BANDS.len() - 1];
        round2(lowest_percentile * scaled_score / lowest_threshold)
    }
}

impl Default for SteppedBandEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// 分区百分位混合为整卷百分位
///
/// 0.7 × 均值 + 0.3 × 最小值，只统计非空分区；全部为空时返回 0，
/// 绝不出现除以零。
pub fn blend_overall(section_percentiles: &[Option<f64>]) -> f64 {
    let values: Vec<f64> = section_percentiles.iter().flatten().copied().collect();
    if values.is_empty() {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    round2(0.7 * mean + 0.3 * min)
}

fn table_from_pairs(section: &str, pairs: &[(f64, f64)]) -> Result<AnchorTable, AnchorError> {
    let anchors = pairs
        .iter()
        .map(|&(score, percentile)| Anchor { score, percentile })
        .collect();
    AnchorTable::new(section, anchors)
}

/// 保留两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> AnchorTable {
        table_from_pairs("VARC", &[(45.0, 99.0), (40.0, 97.0), (35.0, 95.0)]).expect("构建锚点表失败")
    }

    #[test]
    fn test_interpolates_between_anchors() {
        // 97 + ((37.5−40)/(35−40))×(95−97) = 96.0
        assert_eq!(sample_table().lookup(37.5), 96.0);
    }

    #[test]
    fn test_no_extrapolation_above_top_anchor() {
        assert_eq!(sample_table().lookup(50.0), 99.0);
        assert_eq!(sample_table().lookup(45.0), 99.0);
    }

    #[test]
    fn test_zero_or_negative_score_maps_to_zero() {
        assert_eq!(sample_table().lookup(0.0), 0.0);
        assert_eq!(sample_table().lookup(-7.0), 0.0);
    }

    #[test]
    fn test_below_all_anchors_returns_lowest_percentile() {
        assert_eq!(sample_table().lookup(10.0), 95.0);
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let result = AnchorTable::new("DILR", Vec::new());

        assert!(matches!(
            result,
            Err(AnchorError::EmptyTable { ref section }) if section == "DILR"
        ));
    }

    #[test]
    fn test_unsorted_table_is_rejected() {
        let result = table_from_pairs("QA", &[(40.0, 97.0), (45.0, 99.0)]);

        assert!(matches!(
            result,
            Err(AnchorError::NotDescending { ref section, position: 1 }) if section == "QA"
        ));
    }

    #[test]
    fn test_duplicate_threshold_is_rejected() {
        let result = table_from_pairs("QA", &[(40.0, 97.0), (40.0, 95.0)]);

        assert!(result.is_err());
    }

    #[test]
    fn test_default_tables_are_valid() {
        let estimator = InterpolatedEstimator::with_defaults().expect("默认锚点表必须有效");

        assert_eq!(estimator.name(), "anchor-interpolated");
        assert_eq!(estimator.estimate(Section::Varc, 0.0), 0.0);
        assert_eq!(estimator.estimate(Section::Varc, 99.0), 99.5);
    }

    #[test]
    fn test_blend_overall_formula() {
        // 均值 80，最小值 70：0.7×80 + 0.3×70 = 77
        let blended = blend_overall(&[Some(90.0), Some(80.0), Some(70.0)]);

        assert_eq!(blended, 77.0);
    }

    #[test]
    fn test_blend_skips_null_sections() {
        // 只统计非空分区：均值 85，最小值 80
        let blended = blend_overall(&[Some(90.0), None, Some(80.0)]);

        assert_eq!(blended, 83.5);
    }

    #[test]
    fn test_blend_of_all_null_is_zero_not_nan() {
        assert_eq!(blend_overall(&[None, None, None]), 0.0);
        assert_eq!(blend_overall(&[]), 0.0);
    }

    #[test]
    fn test_stepped_band_flat_values() {
        let estimator = SteppedBandEstimator::new();

        assert_eq!(estimator.estimate(200.0), 99.9);
        assert_eq!(estimator.estimate(130.0), 99.0);
        assert_eq!(estimator.estimate(60.0), 75.0);
        assert_eq!(estimator.estimate(24.0), 45.0);
    }

    #[test]
    fn test_stepped_band_tapers_below_lowest_breakpoint() {
        let estimator = SteppedBandEstimator::new();

        // 45 × 12 / 24 = 22.5
        assert_eq!(estimator.estimate(12.0), 22.5);
        assert_eq!(estimator.estimate(0.0), 0.0);
        assert_eq!(estimator.estimate(-5.0), 0.0);
    }

    #[test]
    fn test_strategies_are_named_and_distinct() {
        assert_ne!(InterpolatedEstimator::NAME, SteppedBandEstimator::NAME);
    }
}
