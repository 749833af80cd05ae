pub mod finding_log;

pub use finding_log::FindingLog;
