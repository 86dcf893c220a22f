/// 考试分区枚举
///
/// 三个固定分区，按题目在文档中的位置比例切分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Section {
    /// 语言理解与阅读
    Varc,
    /// 数据解读与逻辑推理
    Dilr,
    /// 数量能力
    Qa,
}

impl Section {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Section::Varc => "VARC",
            Section::Dilr => "DILR",
            Section::Qa => "QA",
        }
    }

    /// 按切分顺序返回全部分区
    pub fn all() -> [Section; 3] {
        [Section::Varc, Section::Dilr, Section::Qa]
    }

    /// 尝试从字符串解析分区（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "VARC" => Some(Section::Varc),
            "DILR" => Some(Section::Dilr),
            "QA" => Some(Section::Qa),
            _ => None,
        }
    }

    /// 智能查找分区（支持模糊匹配）
    pub fn find(s: &str) -> Option<Self> {
        // 先尝试精确匹配
        if let Some(section) = Self::from_str(s) {
            return Some(section);
        }

        // 模糊匹配
        let s_lower = s.to_lowercase();
        if s_lower.contains("verbal") || s_lower.contains("reading") {
            return Some(Section::Varc);
        }
        if s_lower.contains("data") || s_lower.contains("logical") {
            return Some(Section::Dilr);
        }
        if s_lower.contains("quant") {
            return Some(Section::Qa);
        }

        None
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
