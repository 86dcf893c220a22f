/// 待解析的答题卡文档
///
/// 摄取后不可变，一次引擎调用独占一份。
#[derive(Debug, Clone)]
pub enum SheetDocument {
    /// 门户页面的结构化标记
    Markup { source: String, markup: String },
    /// PDF 提取出的有序文本行（已去除首尾空白）
    TextLines { source: String, lines: Vec<String> },
}

impl SheetDocument {
    /// 来源标识（URL 或文件名）
    pub fn source(&self) -> &str {
        match self {
            SheetDocument::Markup { source, .. } => source,
            SheetDocument::TextLines { source, .. } => source,
        }
    }
}
