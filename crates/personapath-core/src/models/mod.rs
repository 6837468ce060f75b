pub mod answer;
pub mod feedback;
pub mod profile;
pub mod question;
pub mod report;
pub mod saved_report;
pub mod stats;
