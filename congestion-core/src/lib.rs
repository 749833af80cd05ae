pub mod config;
pub mod dataset;
pub mod error;
pub mod record;
pub mod report;
pub mod selector;

pub use config::AppConfig;
pub use dataset::analyze;
pub use error::Error;
pub use record::{NormalizedRoute, RawRecord, extract};
pub use report::{DisplayFields, Report, assemble};
pub use selector::{Metric, MetricTag, SelectionResult, select_slowest};
