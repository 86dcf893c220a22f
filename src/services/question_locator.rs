//! 题目区块定位服务 - 业务能力层
//!
//! 只负责"定位题目区块"能力，不关心字段提取

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// 单个题目区块的快照
///
/// 从文档树中摘出并持有自己的数据，定位完成后不再依赖文档生命周期
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBlock {
    /// 扁平化并压缩空白后的文本
    pub text: String,
    /// 原始内部标记（供视觉标记判定使用）
    pub inner_html: String,
    /// 表格行的 标签/值 对
    pub rows: Vec<(String, String)>,
}

/// 单个选择器层级
struct SelectorTier {
    name: &'static str,
    css: &'static str,
}

/// 定位结果
#[derive(Debug, Default)]
pub struct LocatedBlocks {
    /// 命中的层级名称，三级全部落空时为 None
    pub tier: Option<&'static str>,
    pub blocks: Vec<QuestionBlock>,
}

/// 题目区块定位服务
///
/// 职责：
/// - 按固定顺序尝试三级选择器，取第一个产生非空结果的层级
/// - 不假设单一页面版式（来源站点的标记结构在历次考试周期中变更过）
/// - 三级全部落空时返回空列表，不报错
pub struct QuestionLocator {
    tiers: Vec<SelectorTier>,
}

impl QuestionLocator {
    pub fn new() -> Self {
        // 三级兜底：主面板 class → 面板表格 class → 旧版行表格 class
        let tiers = vec![
            SelectorTier {
                name: "question-pnl",
                css: "div.question-pnl",
            },
            SelectorTier {
                name: "questionPnlTbl",
                css: "table.questionPnlTbl",
            },
            SelectorTier {
                name: "questionRowTbl",
                css: "table.questionRowTbl",
            },
        ];
        Self { tiers }
    }

    /// 定位文档中的全部题目区块
    pub fn locate(&self, doc: &Html) -> LocatedBlocks {
        for tier in &self.tiers {
            let Ok(selector) = Selector::parse(tier.css) else {
                continue;
            };

            let blocks: Vec<QuestionBlock> = doc
                .select(&selector)
                .map(|el| QuestionBlock {
                    text: flattened_text(el),
                    inner_html: el.inner_html(),
                    rows: label_value_rows(el),
                })
                .collect();

            if !blocks.is_empty() {
                debug!("选择器层级 {} 命中 {} 个区块", tier.name, blocks.len());
                return LocatedBlocks {
                    tier: Some(tier.name),
                    blocks,
                };
            }
        }

        LocatedBlocks::default()
    }
}

impl Default for QuestionLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// 扁平化元素文本并压缩空白
pub(crate) fn flattened_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 摘出区块内表格行的 标签/值 对
///
/// 取每行第一个单元格为标签、最后一个单元格为值，少于两个单元格的行跳过
fn label_value_rows(el: ElementRef<'_>) -> Vec<(String, String)> {
    let (Ok(row_sel), Ok(cell_sel)) = (Selector::parse("tr"), Selector::parse("td")) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for tr in el.select(&row_sel) {
        let cells: Vec<String> = tr.select(&cell_sel).map(flattened_text).collect();
        if cells.len() >= 2 {
            rows.push((cells[0].clone(), cells[cells.len() - 1].clone()));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_tier_wins() {
        let html = r#"
            <html><body>
              <div class="question-pnl">Q.1 Chosen Option : 2</div>
              <div class="question-pnl">Q.2 Chosen Option : 3</div>
              <table class="questionRowTbl"><tr><td>legacy</td><td>x</td></tr></table>
            </body></html>
        "#;
        let doc = Html::parse_document(html);
        let located = QuestionLocator::new().locate(&doc);

        assert_eq!(located.tier, Some("question-pnl"));
        assert_eq!(located.blocks.len(), 2);
        assert!(located.blocks[0].text.contains("Chosen Option : 2"));
    }

    #[test]
    fn test_falls_back_to_panel_table() {
        let html = r#"
            <html><body>
              <table class="questionPnlTbl"><tr><td>Q.1</td><td>Answered</td></tr></table>
            </body></html>
        "#;
        let doc = Html::parse_document(html);
        let located = QuestionLocator::new().locate(&doc);

        assert_eq!(located.tier, Some("questionPnlTbl"));
        assert_eq!(located.blocks.len(), 1);
        assert_eq!(located.blocks[0].rows, vec![("Q.1".to_string(), "Answered".to_string())]);
    }

    #[test]
    fn test_falls_back_to_legacy_row_table() {
        let html = r#"
            <html><body>
              <table class="questionRowTbl"><tr><td>Chosen Option</td><td>1</td></tr></table>
            </body></html>
        "#;
        let doc = Html::parse_document(html);
        let located = QuestionLocator::new().locate(&doc);

        assert_eq!(located.tier, Some("questionRowTbl"));
        assert_eq!(located.blocks.len(), 1);
    }

    #[test]
    fn test_no_tier_matches_returns_empty() {
        let doc = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        let located = QuestionLocator::new().locate(&doc);

        assert_eq!(located.tier, None);
        assert!(located.blocks.is_empty());
    }

    #[test]
    fn test_flattened_text_collapses_whitespace() {
        let html = "<div class=\"question-pnl\">  Q.1 \n\n  Status :   Answered  </div>";
        let doc = Html::parse_document(html);
        let located = QuestionLocator::new().locate(&doc);

        assert_eq!(located.blocks[0].text, "Q.1 Status : Answered");
    }
}
