pub mod query;
pub mod summary;

pub use query::{filter_and_sort, run_query, RecordsPage, RecordsQuery, SortKey, TypeFilter};
pub use summary::{weekly_profit, RecordsSummary};
