use congestion_core::{Error, Report, analyze};
use congestion_fetch::DatasetSource;
use congestion_observability::FindingLog;
use std::io;
use tracing::{info, warn};

/// A successful report cycle.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub report: Report,
    /// The finding log entry as written, timestamp included.
    pub entry: String,
}

/// Fetch → analyze → log, once.
///
/// The finding log is only written when every earlier stage succeeded.
pub async fn run_cycle(source: &dyn DatasetSource, log: &FindingLog) -> Result<Outcome, Error> {
    let origin = source.describe();
    let result = async {
        let doc = source.fetch().await?;
        let report = analyze(&doc)?;
        let entry = append_blocking(log.clone(), report.log_line.clone()).await?;
        Ok::<_, Error>(Outcome { report, entry })
    }
    .await;

    match &result {
        Ok(outcome) => info!(
            source = %origin,
            id = %outcome.report.display.id,
            name = %outcome.report.display.name,
            metric = outcome.report.display.metric.as_str(),
            value = %outcome.report.display.value,
            "Slowest route logged"
        ),
        Err(e) => warn!(source = %origin, kind = e.kind(), error = %e, "Report cycle failed"),
    }
    result
}

/// The append waits on an exclusive file lock, so it runs off the async workers.
async fn append_blocking(log: FindingLog, line: String) -> Result<String, Error> {
    let entry = tokio::task::spawn_blocking(move || log.append(&line))
        .await
        .map_err(io::Error::other)??;
    Ok(entry)
}
