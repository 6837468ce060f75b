use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 120;

/// Raw details form as submitted. Every field is a string; conversion to a
/// [`UserProfile`] is where validation happens.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProfileForm {
    pub name: String,
    pub age: String,
    pub gender: String,
}

/// The validated profile of the person taking the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserProfile {
    pub name: String,
    pub age: u8,
    #[ts(type = "string")]
    pub gender: Gender,
}

/// Gender as chosen on the details form. The closed set matches the form's
/// select options; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    PreferNotToSay,
    Other(String),
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NonBinary => "Non-binary",
            Gender::PreferNotToSay => "Prefer not to say",
            Gender::Other(s) => s,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            "Non-binary" => Gender::NonBinary,
            "Prefer not to say" => Gender::PreferNotToSay,
            _ => Gender::Other(value),
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<ProfileForm> for UserProfile {
    type Error = CoreError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(CoreError::validation("name", "must not be empty"));
        }

        let age: u8 = form
            .age
            .trim()
            .parse()
            .map_err(|_| CoreError::validation("age", format!("'{}' is not a whole number", form.age)))?;
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(CoreError::validation(
                "age",
                format!("{age} is outside [{MIN_AGE}, {MAX_AGE}]"),
            ));
        }

        let gender = form.gender.trim();
        if gender.is_empty() {
            return Err(CoreError::validation("gender", "must not be empty"));
        }

        Ok(UserProfile {
            name: name.to_string(),
            age,
            gender: Gender::from(gender.to_string()),
        })
    }
}
