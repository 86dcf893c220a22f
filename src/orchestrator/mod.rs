//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ### `batch_processor` - 批量答题卡处理器
//! - 管理应用生命周期（初始化、运行、统计）
//! - 收集答题卡来源（本地目录 + URL 列表）
//! - 控制并发数量（Semaphore）
//! - 持有外部资源（FetchClient）
//! - 输出 JSON 报告与全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<SheetSource>)
//!     ↓
//! workflow::ScoreFlow (处理单张 SheetDocument)
//!     ↓
//! services (能力层：定位 / 提取 / 判定 / 计分 / 百分位)
//!     ↓
//! clients (协作方：HTTP 抓取 / PDF 文本)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：编排层只做调度和统计，不做具体业务判断
//! 2. **资源隔离**：只有编排层持有 FetchClient 和文件系统访问
//! 3. **向下依赖**：编排层 → workflow → services → clients

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{process_single_sheet, App, SheetSource};
