//! The structured-output contract for report generation.
//!
//! The schema mirrors [`PersonalityReport`](crate::models::report::PersonalityReport)
//! field for field, with every property required. `minItems` is declared on
//! both lists, but backends are free to ignore it, so callers still run
//! `PersonalityReport::validate` on whatever comes back.

use serde_json::{Value, json};

/// Top-level properties, in declaration order.
pub const REQUIRED_FIELDS: [&str; 4] = [
    "personality_type",
    "strengths",
    "career_suggestions",
    "fictional_match",
];

/// Build the JSON Schema describing a personality report.
pub fn personality_report_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "personality_type": object(&[("title", "Short archetype name"), ("description", "Two or three sentences describing the personality")]),
            "strengths": {
                "type": "array",
                "minItems": 1,
                "items": object(&[("name", "Strength name"), ("description", "How the strength shows up")]),
            },
            "career_suggestions": {
                "type": "array",
                "minItems": 1,
                "items": object(&[("role", "Job title or career path"), ("why_fit", "Why this role suits the person")]),
            },
            "fictional_match": object(&[
                ("character", "Fictional character name"),
                ("universe", "Book, film or series the character is from"),
                ("reason", "Why the person resembles the character"),
            ]),
        },
        "required": REQUIRED_FIELDS,
    })
}

/// An object schema whose string properties are all required.
fn object(fields: &[(&str, &str)]) -> Value {
    let properties: serde_json::Map<String, Value> = fields
        .iter()
        .map(|(name, description)| {
            (
                name.to_string(),
                json!({ "type": "string", "description": description }),
            )
        })
        .collect();
    let required: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
