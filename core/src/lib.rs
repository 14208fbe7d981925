pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod service;
pub mod source;
pub mod time;
pub mod usecase;

pub use error::ReportError;
pub use model::event::{Attempt, EventLog, Grade, RawEvent};
pub use model::stats::{accuracy_pct, AttemptRecord, DailyStat, UserStatistics, WordDailyStat};
pub use render::ImageSource;
pub use service::dto::{daily_summaries, DailySummary};
pub use service::project::{AnchorPolicy, GridColumn, SeriesPoint, REPORT_WINDOW_DAYS};
pub use source::{FileSource, MemorySource, ProductionSource};
pub use usecase::report::generate_report;
