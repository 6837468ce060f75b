use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::feedback::Feedback;
use super::profile::UserProfile;
use super::report::PersonalityReport;

/// A persisted report. Identity is `id`; only `feedback` ever changes after
/// the entry is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SavedReport {
    pub id: String,
    pub created_at: jiff::Timestamp,
    pub user_profile: UserProfile,
    pub report: PersonalityReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub feedback: Option<Feedback>,
}
