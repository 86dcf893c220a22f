use serde::{Deserialize, Serialize};

/// 百分位锚点：(分数阈值, 百分位)
///
/// 参考表按 score 降序排列，估算时在相邻锚点之间线性插值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub score: f64,
    pub percentile: f64,
}

/// 锚点参考文件（TOML）
///
/// 三个分区各一张表，整体替换内置默认表。
#[derive(Debug, Clone, Deserialize)]
pub struct AnchorTableFile {
    pub varc: Vec<Anchor>,
    pub dilr: Vec<Anchor>,
    pub qa: Vec<Anchor>,
}
