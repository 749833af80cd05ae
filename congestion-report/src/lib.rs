pub mod cycle;
pub mod handlers;
pub mod render;
pub mod server;

pub use cycle::{Outcome, run_cycle};
pub use server::{ReportState, build_router};
