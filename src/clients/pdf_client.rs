/// PDF 文本提取客户端
///
/// 把二进制 PDF 文件转换为有序的文本行，供行模式提取器消费
use std::path::Path;

use tracing::debug;

use crate::error::PdfError;

/// 从 PDF 文件提取文本行
///
/// 每行去除首尾空白，空行丢弃。一行文本都提取不出来按错误处理，
/// 区别于"提取到了行但里面没有题目"（那是结构性落空，由引擎吸收）。
pub fn extract_lines(path: &Path) -> Result<Vec<String>, PdfError> {
    let text = pdf_extract::extract_text(path).map_err(|e| PdfError::ExtractFailed {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;

    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if lines.is_empty() {
        return Err(PdfError::EmptyDocument {
            path: path.display().to_string(),
        });
    }

    debug!("PDF {} 提取出 {} 行文本", path.display(), lines.len());
    Ok(lines)
}
