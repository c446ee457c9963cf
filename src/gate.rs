//! Threshold gate
//!
//! Three independent checks. All of them run every time so a single run
//! reports every violated limit.

use crate::config::Thresholds;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    MaxWarnings,
    MaxErrors,
    MinimumScore,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::MaxWarnings => write!(f, "max-warnings"),
            Metric::MaxErrors => write!(f, "max-errors"),
            Metric::MinimumScore => write!(f, "minimum-score"),
        }
    }
}

/// A limit that was exceeded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub metric: Metric,
    pub observed: f64,
    pub limit: f64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.metric {
            Metric::MaxWarnings => write!(
                f,
                "Total warnings ({}) exceeds max-warnings ({})",
                self.observed, self.limit
            ),
            Metric::MaxErrors => write!(
                f,
                "Total errors ({}) exceeds max-errors ({})",
                self.observed, self.limit
            ),
            Metric::MinimumScore => write!(
                f,
                "Score ({}) is below minimum-score ({})",
                self.observed, self.limit
            ),
        }
    }
}

/// Evaluate every limit and return all violations
pub fn evaluate(
    thresholds: &Thresholds,
    total_errors: usize,
    total_warnings: usize,
    score: f64,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    if let Some(max) = thresholds.max_warnings {
        if total_warnings > max as usize {
            violations.push(Violation {
                metric: Metric::MaxWarnings,
                observed: total_warnings as f64,
                limit: f64::from(max),
            });
        }
    }

    if let Some(max) = thresholds.max_errors {
        if total_errors > max as usize {
            violations.push(Violation {
                metric: Metric::MaxErrors,
                observed: total_errors as f64,
                limit: f64::from(max),
            });
        }
    }

    let minimum = f64::from(thresholds.minimum_score);
    if minimum > score {
        violations.push(Violation {
            metric: Metric::MinimumScore,
            observed: score,
            limit: minimum,
        });
    }

    violations
}
