use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 答题卡抓取错误
    Fetch(FetchError),
    /// PDF 处理错误
    Pdf(PdfError),
    /// 锚点参考表错误（数据集损坏，必须立刻失败）
    Anchor(AnchorError),
    /// 文件操作错误
    File(FileError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Fetch(e) => write!(f, "抓取错误: {}", e),
            AppError::Pdf(e) => write!(f, "PDF错误: {}", e),
            AppError::Anchor(e) => write!(f, "锚点表错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Fetch(e) => Some(e),
            AppError::Pdf(e) => Some(e),
            AppError::Anchor(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 答题卡抓取错误
///
/// 把传输层失败映射为面向用户的类别
#[derive(Debug)]
pub enum FetchError {
    /// 请求超时
    Timeout { url: String },
    /// 无法连接到目标站点
    Unreachable { url: String },
    /// 访问被拒绝（403）
    Forbidden { url: String },
    /// 页面不存在（404）
    NotFound { url: String },
    /// 其他非成功状态码
    BadStatus { url: String, status: u16 },
    /// 请求发送失败
    RequestFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 响应体读取失败
    BodyReadFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Timeout { url } => write!(f, "请求超时: {}", url),
            FetchError::Unreachable { url } => write!(f, "无法连接到目标站点: {}", url),
            FetchError::Forbidden { url } => write!(f, "访问被拒绝 (403): {}", url),
            FetchError::NotFound { url } => write!(f, "页面不存在 (404): {}", url),
            FetchError::BadStatus { url, status } => {
                write!(f, "请求失败 (状态码 {}): {}", status, url)
            }
            FetchError::RequestFailed { url, source } => {
                write!(f, "请求发送失败 ({}): {}", url, source)
            }
            FetchError::BodyReadFailed { url, source } => {
                write!(f, "响应体读取失败 ({}): {}", url, source)
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::RequestFailed { source, .. } | FetchError::BodyReadFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// PDF 处理错误
#[derive(Debug)]
pub enum PdfError {
    /// 文本提取失败
    ExtractFailed { path: String, detail: String },
    /// 提取结果为空
    EmptyDocument { path: String },
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ExtractFailed { path, detail } => {
                write!(f, "PDF文本提取失败 ({}): {}", path, detail)
            }
            PdfError::EmptyDocument { path } => {
                write!(f, "PDF未提取到任何文本: {}", path)
            }
        }
    }
}

impl std::error::Error for PdfError {}

/// 锚点参考表错误
///
/// 属于配置/数据集错误而不是文档差异，绝不吞掉，
/// 否则损坏的参考表会被静默计成零分。
#[derive(Debug)]
pub enum AnchorError {
    /// 参考表为空
    EmptyTable { section: String },
    /// 参考表未按分数严格降序排列
    NotDescending { section: String, position: usize },
}

impl fmt::Display for AnchorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorError::EmptyTable { section } => {
                write!(f, "锚点表为空: {}", section)
            }
            AnchorError::NotDescending { section, position } => {
                write!(f, "锚点表未按分数降序排列: {} (位置 {})", section, position)
            }
        }
    }
}

impl std::error::Error for AnchorError {}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Fetch(err)
    }
}

impl From<PdfError> for AppError {
    fn from(err: PdfError) -> Self {
        AppError::Pdf(err)
    }
}

impl From<AnchorError> for AppError {
    fn from(err: AnchorError) -> Self {
        AppError::Anchor(err)
    }
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        AppError::File(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Other(format!("正则表达式编译失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建 TOML 解析错误
    pub fn toml_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
