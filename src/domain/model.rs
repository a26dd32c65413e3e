use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 查詢表：key -> 顯示名稱，建立後唯讀
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    map: HashMap<String, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 重複的 key 以最後一筆為準
    pub fn insert(&mut self, key: String, display: String) {
        self.map.insert(key, display);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// 一筆關聯記錄：左右兩個 key 加上分數，解析後立即使用
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipRecord {
    pub left_key: String,
    pub right_key: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LookupVariant {
    /// key 是第一欄，其餘欄位合併成標題
    BillTitle,
    /// key 是第一欄，值是 "名 姓"
    PersonName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReportMode {
    /// 同一個左 key 的連續記錄收在一個群組標題下
    Grouped,
    /// 每筆存活記錄輸出一行 "left,right"
    Flat,
}

/// 兩個輸入檔的原始內容，extract 階段一次讀入
#[derive(Debug, Clone)]
pub struct RawInputs {
    pub lookup_text: String,
    pub relationship_text: String,
}

/// 一次執行的統計數字
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub records_parsed: usize,
    pub lines_emitted: usize,
    pub group_headers: usize,
    pub skipped_low_score: usize,
    pub skipped_malformed: usize,
    pub unresolved_keys: usize,
}

#[derive(Debug, Clone)]
pub struct ReportResult {
    pub report: String,
    pub stats: ReportStats,
}
