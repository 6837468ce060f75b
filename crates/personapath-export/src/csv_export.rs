use tracing::info;

use personapath_core::models::saved_report::SavedReport;

use crate::error::ExportError;

/// Suggested download name for the export.
pub const EXPORT_FILENAME: &str = "personapath_data.csv";

/// Column order of the admin export.
pub const HEADERS: [&str; 8] = [
    "Date",
    "Name",
    "Age",
    "Gender",
    "Personality",
    "Character",
    "Rating",
    "Comment",
];

/// Render every saved report as one CSV row, in the order given.
///
/// Dates are UTC `YYYY-MM-DD`. Rating and comment are empty for reports
/// without feedback.
pub fn export_csv(reports: &[SavedReport]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;

    for r in reports {
        let (rating, comment) = match &r.feedback {
            Some(f) => (f.rating.to_string(), f.comment.clone()),
            None => (String::new(), String::new()),
        };
        writer.write_record([
            r.created_at.strftime("%Y-%m-%d").to_string(),
            r.user_profile.name.clone(),
            r.user_profile.age.to_string(),
            r.user_profile.gender.to_string(),
            r.report.personality_type.title.clone(),
            r.report.fictional_match.character.clone(),
            rating,
            comment,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    info!(rows = reports.len(), bytes = bytes.len(), "csv export complete");
    Ok(bytes)
}
