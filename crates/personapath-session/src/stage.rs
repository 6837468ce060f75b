use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Where a session is in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Stage {
    Welcome,
    Details,
    Quiz,
    Loading,
    Results,
    Error,
    Admin,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Welcome => "welcome",
            Stage::Details => "details",
            Stage::Quiz => "quiz",
            Stage::Loading => "loading",
            Stage::Results => "results",
            Stage::Error => "error",
            Stage::Admin => "admin",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
