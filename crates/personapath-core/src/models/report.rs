use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The structured output of a report generation call.
///
/// Field names match the JSON schema handed to the model (see
/// [`crate::schema::personality_report_schema`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PersonalityReport {
    pub personality_type: PersonalityType,
    pub strengths: Vec<Strength>,
    pub career_suggestions: Vec<CareerSuggestion>,
    pub fictional_match: FictionalMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PersonalityType {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Strength {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CareerSuggestion {
    pub role: String,
    pub why_fit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FictionalMatch {
    pub character: String,
    pub universe: String,
    pub reason: String,
}

impl PersonalityReport {
    /// Check the constraints the model's schema engine does not enforce:
    /// every string is non-blank and both lists are non-empty.
    ///
    /// Returns the dotted path of the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("personality_type.title", &self.personality_type.title)?;
        require(
            "personality_type.description",
            &self.personality_type.description,
        )?;

        if self.strengths.is_empty() {
            return Err(CoreError::MissingField("strengths".to_string()));
        }
        for (i, s) in self.strengths.iter().enumerate() {
            require(&format!("strengths[{i}].name"), &s.name)?;
            require(&format!("strengths[{i}].description"), &s.description)?;
        }

        if self.career_suggestions.is_empty() {
            return Err(CoreError::MissingField("career_suggestions".to_string()));
        }
        for (i, c) in self.career_suggestions.iter().enumerate() {
            require(&format!("career_suggestions[{i}].role"), &c.role)?;
            require(&format!("career_suggestions[{i}].why_fit"), &c.why_fit)?;
        }

        require("fictional_match.character", &self.fictional_match.character)?;
        require("fictional_match.universe", &self.fictional_match.universe)?;
        require("fictional_match.reason", &self.fictional_match.reason)?;

        Ok(())
    }
}

fn require(path: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::MissingField(path.to_string()))
    } else {
        Ok(())
    }
}
