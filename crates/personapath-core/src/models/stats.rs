use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Aggregate figures for the admin dashboard.
///
/// `average_rating` is `None` when no report carries feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportStats {
    pub total_reports: usize,
    pub average_rating: Option<f64>,
}

impl ReportStats {
    /// The average formatted to one decimal place, or `N/A`.
    pub fn average_display(&self) -> String {
        match self.average_rating {
            Some(avg) => format!("{avg:.1}"),
            None => "N/A".to_string(),
        }
    }
}
