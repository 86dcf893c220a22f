use std::path::Path;

use tokio::fs;

use crate::error::{AppError, AppResult};
use crate::models::anchor::AnchorTableFile;

/// 从 TOML 文件加载锚点参考表
///
/// 表的排序与非空校验在估算器构造时进行，这里只负责读取和反序列化。
pub async fn load_anchor_file(path: &Path) -> AppResult<AnchorTableFile> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let tables: AnchorTableFile = toml::from_str(&content)
        .map_err(|e| AppError::toml_parse_failed(path.display().to_string(), e))?;

    tracing::info!(
        "已加载锚点参考表: {} (VARC {} / DILR {} / QA {} 个锚点)",
        path.display(),
        tables.varc.len(),
        tables.dilr.len(),
        tables.qa.len()
    );

    Ok(tables)
}
