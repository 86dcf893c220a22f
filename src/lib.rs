//! # Response Sheet Scorer
//!
//! 一个用于解析并评分在线考试答题卡的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 协作方层（Clients）
//! - `clients/` - 外部协作方的薄封装
//! - `FetchClient` - 答题卡页面抓取（超时 / 403 / 404 等映射为用户可读类别）
//! - `pdf_client` - PDF 二进制 → 有序文本行
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个区块 / 单张卷子
//! - `CandidateLocator` / `QuestionLocator` - 区块定位能力（三级选择器兜底）
//! - `FieldExtractor` - 字段提取能力（模式族 + 行式兜底）
//! - `CorrectnessResolver` - 正确性判定能力（显式比较 + 视觉信号三态判定）
//! - `SectionScorer` - 分区切分与计分能力（+3 / −1）
//! - `InterpolatedEstimator` / `SteppedBandEstimator` - 两个独立的百分位估算策略
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一张答题卡"的完整处理流程
//! - `SheetCtx` - 上下文封装（来源 + 序号）
//! - `ScoreFlow` - 流程编排（定位 → 提取 → 判定 → 计分 → 百分位）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量答题卡处理器，管理资源和并发
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    CandidateMetadata, QuestionRecord, QuestionStatus, ScoreReport, Section, SectionScore,
    SheetDocument, SheetReport,
};
pub use orchestrator::App;
pub use workflow::{ScoreFlow, SheetCtx};
