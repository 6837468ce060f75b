use serde::Serialize;
use ts_rs::TS;

use personapath_core::models::profile::UserProfile;
use personapath_core::models::report::PersonalityReport;
use personapath_quiz::runner::QuizProgress;

use crate::stage::Stage;

/// Everything a client needs to draw the current screen.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SessionView {
    pub stage: Stage,
    pub profile: Option<UserProfile>,
    pub quiz: Option<QuizProgress>,
    pub report: Option<PersonalityReport>,
    pub report_id: Option<String>,
    pub error_message: Option<String>,
}
