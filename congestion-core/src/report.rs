use crate::record::format_metric;
use crate::selector::{MetricTag, SelectionResult};
use serde::Serialize;

/// Values shown to a reader of the report page.
///
/// `id`, `name` and `value` are the exact strings embedded in the log line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFields {
    pub id: String,
    pub name: String,
    pub metric: MetricTag,
    pub value: String,
    /// e.g. `velocidad = 12 (menor es más lenta)`.
    pub metric_clause: String,
}

/// A selection formatted for the finding log and for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub log_line: String,
    pub display: DisplayFields,
}

/// Format a selection. Pure; decides nothing.
pub fn assemble(result: &SelectionResult) -> Report {
    let id = result.route.id_str().to_string();
    let name = result.route.name.clone();
    let tag = result.metric.tag();
    let value = format_metric(result.metric.value());

    let log_line = format!("id={id} | name={name} | {}={value}", tag.as_str());
    let metric_clause = match tag {
        MetricTag::Speed => format!("velocidad = {value} (menor es más lenta)"),
        MetricTag::Duration => format!("duración = {value} (mayor es más lenta)"),
    };

    Report {
        log_line,
        display: DisplayFields {
            id,
            name,
            metric: tag,
            value,
            metric_clause,
        },
    }
}
