use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A user's rating of a generated report, attached after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Feedback {
    pub rating: u8,
    pub comment: String,
    pub created_at: jiff::Timestamp,
}

impl Feedback {
    /// Build feedback stamped with the current time.
    ///
    /// Fails if `rating` is outside 1–5. The comment may be empty.
    pub fn new(rating: i64, comment: impl Into<String>) -> Result<Self, CoreError> {
        let rating = u8::try_from(rating)
            .ok()
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
            .ok_or_else(|| {
                CoreError::validation(
                    "rating",
                    format!("{rating} is outside [{MIN_RATING}, {MAX_RATING}]"),
                )
            })?;
        Ok(Self {
            rating,
            comment: comment.into(),
            created_at: jiff::Timestamp::now(),
        })
    }
}
