//! 批量答题卡处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量答题卡的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、加载锚点参考表、构建评分流程与抓取客户端
//! 2. **来源收集**：扫描本地目录（.html / .pdf）并合并配置里的 URL 列表
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将答题卡分批次处理，每批完成后再开始下一批
//! 5. **报告落盘**：每张答题卡输出一份 JSON 得分报告
//! 6. **全局统计**：汇总所有答题卡的处理结果

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::clients::{pdf_client, FetchClient};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{load_anchor_file, SheetDocument, SheetReport};
use crate::services::SteppedBandEstimator;
use crate::utils::logging::{
    init_log_file, log_batch_complete, log_batch_start, log_sheets_loaded, log_startup,
    print_final_stats,
};
use crate::workflow::{ScoreFlow, SheetCtx};

/// 待处理的答题卡来源
#[derive(Debug, Clone)]
pub enum SheetSource {
    /// 本地文件（.html / .htm / .pdf）
    File(PathBuf),
    /// 远程页面
    Url(String),
}

impl std::fmt::Display for SheetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetSource::File(path) => write!(f, "{}", path.display()),
            SheetSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    fetch_client: Arc<FetchClient>,
    flow: Arc<ScoreFlow>,
}

impl App {
    /// 初始化应用
    ///
    /// 锚点参考表损坏（空表、乱序）会在这里立刻失败，
    /// 绝不带着坏的参考数据继续评分。
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(config.max_concurrent_sheets);

        // 加载锚点参考表（可选，不设置时用内置默认表）
        let anchors = match &config.anchor_table_file {
            Some(path) => Some(load_anchor_file(Path::new(path)).await?),
            None => None,
        };

        let flow = Arc::new(ScoreFlow::new(&config, anchors)?);
        let fetch_client = Arc::new(FetchClient::new(&config)?);

        tokio::fs::create_dir_all(&config.report_folder)
            .await
            .with_context(|| format!("无法创建报告目录: {}", config.report_folder))?;

        Ok(Self {
            config,
            fetch_client,
            flow,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 收集所有待处理的答题卡来源
        let all_sheets = self.collect_sources().await?;

        if all_sheets.is_empty() {
            warn!("⚠️ 没有找到待处理的答题卡，程序结束");
            return Ok(());
        }

        let total = all_sheets.len();
        log_sheets_loaded(total, self.config.max_concurrent_sheets);

        // 处理所有答题卡
        let stats = self.process_all_sheets(all_sheets).await?;

        // 输出最终统计
        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 收集全部答题卡来源
    ///
    /// 本地目录扫描结果按路径排序，保证多次运行的处理顺序一致。
    async fn collect_sources(&self) -> Result<Vec<SheetSource>> {
        info!("\n📁 正在扫描待处理的答题卡...");

        let mut files: Vec<PathBuf> = Vec::new();
        let folder = PathBuf::from(&self.config.sheet_folder);
        if folder.exists() {
            let mut entries = tokio::fs::read_dir(&folder)
                .await
                .with_context(|| format!("无法读取目录: {}", self.config.sheet_folder))?;

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if matches!(
                    path.extension().and_then(|s| s.to_str()),
                    Some("html") | Some("htm") | Some("pdf")
                ) {
                    files.push(path);
                }
            }
            files.sort();
        } else {
            warn!("⚠️ 答题卡目录不存在: {}", self.config.sheet_folder);
        }

        let mut sources: Vec<SheetSource> = files.into_iter().map(SheetSource::File).collect();
        for url in &self.config.sheet_urls {
            sources.push(SheetSource::Url(url.clone()));
        }

        Ok(sources)
    }

    /// 处理所有答题卡
    async fn process_all_sheets(&self, all_sheets: Vec<SheetSource>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_sheets));
        let total = all_sheets.len();
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        // 分批处理
        for batch_start in (0..total).step_by(self.config.max_concurrent_sheets) {
            let batch_end = (batch_start + self.config.max_concurrent_sheets).min(total);
            let batch = &all_sheets[batch_start..batch_end];
            let batch_num = batch_start / self.config.max_concurrent_sheets + 1;
            let total_batches = (total + self.config.max_concurrent_sheets - 1)
                / self.config.max_concurrent_sheets;

            log_batch_start(batch_num, total_batches, batch_start + 1, batch_end, total);

            let result = self.process_batch(batch, batch_start, semaphore.clone()).await?;
            stats.success += result.success;
            stats.failed += result.failed;

            log_batch_complete(batch_num, result.success, result.success + result.failed);
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch: &[SheetSource],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut handles = Vec::new();

        // 为本批创建并发任务
        for (idx, source) in batch.iter().enumerate() {
            let sheet_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let source = source.clone();
            let fetch_client = self.fetch_client.clone();
            let flow = self.flow.clone();
            let report_folder = self.config.report_folder.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                process_single_sheet(&source, sheet_index, fetch_client, flow, &report_folder).await
            });
            handles.push((sheet_index, handle));
        }

        // 等待本批所有任务完成
        let mut result = BatchResult::default();
        for (sheet_index, handle) in handles {
            match handle.await {
                Ok(Ok(())) => result.success += 1,
                Ok(Err(e)) => {
                    error!("[答题卡 #{}] ❌ 处理失败: {}", sheet_index, e);
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[答题卡 #{}] 任务执行失败: {}", sheet_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
}

/// 处理单张答题卡：加载 → 评分 → 落盘报告
pub async fn process_single_sheet(
    source: &SheetSource,
    sheet_index: usize,
    fetch_client: Arc<FetchClient>,
    flow: Arc<ScoreFlow>,
    report_folder: &str,
) -> Result<()> {
    let document = load_document(source, &fetch_client).await?;
    let ctx = SheetCtx::new(document.source().to_string(), sheet_index);

    info!("{} 开始处理", ctx);
    let report = flow.run(&ctx, &document);

    // 粗估入口与报告入口相互独立，不做口径统一
    let quick = SteppedBandEstimator::new();
    info!(
        "{} ⚡ 粗估百分位 ({}): {:.2}",
        ctx,
        quick.name(),
        quick.estimate(report.score.overall.scaled_score)
    );

    let report_path = write_report(report_folder, &report).await?;
    info!("{} ✅ 报告已写入: {}", ctx, report_path.display());

    Ok(())
}

/// 按来源加载答题卡文档
async fn load_document(source: &SheetSource, fetch_client: &FetchClient) -> Result<SheetDocument> {
    match source {
        SheetSource::Url(url) => {
            let markup = fetch_client.fetch_sheet(url).await?;
            Ok(SheetDocument::Markup {
                source: url.clone(),
                markup,
            })
        }
        SheetSource::File(path) => {
            let name = path.display().to_string();
            if path.extension().and_then(|s| s.to_str()) == Some("pdf") {
                let lines = pdf_client::extract_lines(path)?;
                Ok(SheetDocument::TextLines {
                    source: name,
                    lines,
                })
            } else {
                let markup = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("无法读取文件: {}", name))?;
                Ok(SheetDocument::Markup {
                    source: name,
                    markup,
                })
            }
        }
    }
}

/// 写出单张答题卡的 JSON 得分报告
async fn write_report(report_folder: &str, report: &SheetReport) -> Result<PathBuf> {
    let file_name = format!("{}.score.json", sanitize_source(&report.source));
    let path = Path::new(report_folder).join(file_name);

    let json = serde_json::to_string_pretty(report)?;
    tokio::fs::write(&path, json)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

    Ok(path)
}

/// 把来源标识变成安全的文件名
fn sanitize_source(source: &str) -> String {
    let tail = source.rsplit('/').next().unwrap_or(source);
    let stem = tail
        .strip_suffix(".html")
        .or_else(|| tail.strip_suffix(".htm"))
        .or_else(|| tail.strip_suffix(".pdf"))
        .unwrap_or(tail);

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "sheet".to_string()
    } else {
        cleaned
    }
}
