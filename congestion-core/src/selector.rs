//! Route selection — reduces a dataset to its single slowest route.
//!
//! Two tiers, decided for the whole dataset at once:
//! 1. If any route reports a speed, the lowest speed wins and routes that
//!    only report a duration are ignored entirely.
//! 2. Otherwise the highest duration wins.
//!
//! Ties go to the route that appears first.

use crate::error::Error;
use crate::record::NormalizedRoute;
use serde::Serialize;
use std::cmp::Ordering;

/// Which field justified a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricTag {
    Speed,
    Duration,
}

impl MetricTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricTag::Speed => "speed",
            MetricTag::Duration => "duration",
        }
    }
}

/// The winning metric and its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Speed(f64),
    Duration(f64),
}

impl Metric {
    pub fn tag(&self) -> MetricTag {
        match self {
            Metric::Speed(_) => MetricTag::Speed,
            Metric::Duration(_) => MetricTag::Duration,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Metric::Speed(v) | Metric::Duration(v) => *v,
        }
    }
}

/// The route chosen as slowest, tagged with the metric that decided it.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    pub route: NormalizedRoute,
    pub metric: Metric,
}

/// Pick the slowest route.
///
/// Fails with [`Error::NoMetricAvailable`] when no route carries a speed or
/// a duration (which includes the empty dataset).
pub fn select_slowest(routes: &[NormalizedRoute]) -> Result<SelectionResult, Error> {
    // `min_by` keeps the first of several equal minima.
    let by_speed = routes
        .iter()
        .filter_map(|r| r.speed.map(|s| (r, s)))
        .min_by(|(_, a), (_, b)| compare(*a, *b));
    if let Some((route, speed)) = by_speed {
        return Ok(SelectionResult {
            route: route.clone(),
            metric: Metric::Speed(speed),
        });
    }

    // Reversed comparison so ties still resolve to the earliest route.
    let by_duration = routes
        .iter()
        .filter_map(|r| r.duration.map(|d| (r, d)))
        .min_by(|(_, a), (_, b)| compare(*b, *a));
    if let Some((route, duration)) = by_duration {
        return Ok(SelectionResult {
            route: route.clone(),
            metric: Metric::Duration(duration),
        });
    }

    Err(Error::NoMetricAvailable)
}

/// Numeric order where `-0.0 == 0.0`. Extracted metrics are never NaN.
fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
