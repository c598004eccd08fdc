use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{OptionType, TradeRecord};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    All,
    Only(OptionType),
}

impl TypeFilter {
    /// `"all"` and anything unrecognised mean no type filtering.
    pub fn from_str_loose(s: &str) -> TypeFilter {
        match OptionType::from_str_loose(s) {
            Some(t) => TypeFilter::Only(t),
            None => TypeFilter::All,
        }
    }

    pub fn admits(&self, record: &TradeRecord) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => record.option_type == *t,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => write!(f, "all"),
            TypeFilter::Only(t) => write!(f, "{}", t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Pnl,
    Risk,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Pnl => "pnl",
            SortKey::Risk => "risk",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<SortKey> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Some(SortKey::Date),
            "pnl" => Some(SortKey::Pnl),
            "risk" => Some(SortKey::Risk),
            _ => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsQuery {
    pub search_term: String,
    pub filter: TypeFilter,
    /// `None` keeps the input order.
    pub sort_by: Option<SortKey>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for RecordsQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            filter: TypeFilter::All,
            sort_by: Some(SortKey::Date),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RecordsQuery {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Changing search, filter or sort sends the view back to the first page.
    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.page = 1;
    }

    pub fn set_filter(&mut self, filter: TypeFilter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort_by: Option<SortKey>) {
        self.sort_by = sort_by;
        self.page = 1;
    }

    fn effective_page_size(&self) -> usize {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }

    fn effective_page(&self) -> usize {
        self.page.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsPage {
    pub records: Vec<TradeRecord>,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub page: usize,
}

impl RecordsPage {
    /// Never reports "page 0 of 0".
    pub fn display_total_pages(&self) -> usize {
        self.total_pages.max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn showing_label(&self) -> String {
        format!("Showing {} of {}", self.records.len(), self.total_filtered)
    }
}

/// Search, then type filter, then stable descending sort.
///
/// The search term is trimmed and lowercased before matching, so `"  put "`
/// finds the same rows as `"put"` and a blank term keeps everything.
pub fn filter_and_sort(records: &[TradeRecord], query: &RecordsQuery) -> Vec<TradeRecord> {
    let needle = query.search_term.trim().to_lowercase();

    let mut out: Vec<TradeRecord> = records
        .iter()
        .filter(|r| r.matches_search(&needle))
        .filter(|r| query.filter.admits(r))
        .cloned()
        .collect();

    match query.sort_by {
        Some(SortKey::Date) => out.sort_by(|a, b| b.date.cmp(&a.date)),
        Some(SortKey::Pnl) => out.sort_by(|a, b| b.pnl.total_cmp(&a.pnl)),
        Some(SortKey::Risk) => out.sort_by(|a, b| b.risk.ordinal().cmp(&a.risk.ordinal())),
        None => {}
    }
    out
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Produce the visible page. Out-of-range pages come back empty.
pub fn run_query(records: &[TradeRecord], query: &RecordsQuery) -> RecordsPage {
    let filtered = filter_and_sort(records, query);
    let page_size = query.effective_page_size();
    let page = query.effective_page();
    let total_filtered = filtered.len();

    let start = (page - 1).saturating_mul(page_size);
    let visible: Vec<TradeRecord> = filtered.into_iter().skip(start).take(page_size).collect();

    RecordsPage {
        records: visible,
        total_filtered,
        total_pages: total_pages(total_filtered, page_size),
        page,
    }
}
