//! 答题卡处理上下文
//!
//! 封装"我正在处理第几张、来自哪里的答题卡"这一信息

use std::fmt::Display;

/// 答题卡处理上下文
#[derive(Debug, Clone)]
pub struct SheetCtx {
    /// 来源标识（URL 或文件名）
    pub source: String,

    /// 答题卡索引（仅用于日志显示，从 1 开始）
    pub sheet_index: usize,
}

impl SheetCtx {
    /// 创建新的答题卡上下文
    pub fn new(source: String, sheet_index: usize) -> Self {
        Self {
            source,
            sheet_index,
        }
    }
}

impl Display for SheetCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[答题卡 #{} 来源 {}]", self.sheet_index, self.source)
    }
}
