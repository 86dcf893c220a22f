/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的答题卡数量
    pub max_concurrent_sheets: usize,
    /// 本地答题卡文件存放目录（.html / .pdf）
    pub sheet_folder: String,
    /// 远程答题卡 URL 列表
    pub sheet_urls: Vec<String>,
    /// 得分报告输出目录
    pub report_folder: String,
    /// 锚点参考表文件（TOML），不设置时使用内置默认表
    pub anchor_table_file: Option<String>,
    /// 抓取超时（秒）
    pub fetch_timeout_secs: u64,
    /// 抓取用 User-Agent
    pub user_agent: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_sheets: 4,
            sheet_folder: "sheets".to_string(),
            sheet_urls: Vec::new(),
            report_folder: "reports".to_string(),
            anchor_table_file: None,
            fetch_timeout_secs: 20,
            user_agent: "Mozilla/5.0 (compatible; ResponseSheetScorer/0.1)".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_sheets: std::env::var("MAX_CONCURRENT_SHEETS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_sheets),
            sheet_folder: std::env::var("SHEET_FOLDER").unwrap_or(default.sheet_folder),
            sheet_urls: std::env::var("RESPONSE_SHEET_URLS").map(|v| v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()).unwrap_or(default.sheet_urls),
            report_folder: std::env::var("REPORT_FOLDER").unwrap_or(default.report_folder),
            anchor_table_file: std::env::var("ANCHOR_TABLE_FILE").ok().filter(|v| !v.trim().is_empty()),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.fetch_timeout_secs),
            user_agent: std::env::var("FETCH_USER_AGENT").unwrap_or(default.user_agent),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
