use tracing::{info, warn};
use uuid::Uuid;

use personapath_core::models::feedback::Feedback;
use personapath_core::models::profile::UserProfile;
use personapath_core::models::report::PersonalityReport;
use personapath_core::models::saved_report::SavedReport;
use personapath_core::models::stats::ReportStats;
use personapath_core::storage_keys;

use crate::backing::Backing;
use crate::error::StorageError;
use crate::state::{load_state, save_state};

/// Saved reports, newest first, persisted as a single blob.
///
/// Every operation reads and writes the whole collection. There is one
/// writer; callers sharing a store across tasks put it behind a mutex.
pub struct ReportStore {
    backing: Box<dyn Backing>,
}

impl ReportStore {
    pub fn new(backing: impl Backing + 'static) -> Self {
        Self {
            backing: Box::new(backing),
        }
    }

    /// All saved reports, newest first.
    ///
    /// Missing storage reads as empty. Unreadable or corrupt storage is
    /// logged and also reads as empty.
    pub fn list(&self) -> Vec<SavedReport> {
        self.load().unwrap_or_else(|e| {
            warn!(error = %e, key = storage_keys::REPORTS, "report storage unreadable, treating as empty");
            Vec::new()
        })
    }

    pub fn get(&self, id: &str) -> Option<SavedReport> {
        self.list().into_iter().find(|r| r.id == id)
    }

    /// Save a new report in front of the existing ones. Returns its id.
    pub fn append(
        &mut self,
        profile: UserProfile,
        report: PersonalityReport,
    ) -> Result<String, StorageError> {
        let mut reports = self.load()?;
        let id = fresh_id(&reports);

        reports.insert(
            0,
            SavedReport {
                id: id.clone(),
                created_at: jiff::Timestamp::now(),
                user_profile: profile,
                report,
                feedback: None,
            },
        );

        self.persist(&reports)?;
        info!(report_id = %id, count = reports.len(), "report saved");
        Ok(id)
    }

    /// Attach feedback to a report, replacing any earlier feedback.
    ///
    /// Returns `false` without writing if no report has `id`. A rating
    /// outside 1–5 is rejected before anything is read.
    pub fn attach_feedback(
        &mut self,
        id: &str,
        rating: i64,
        comment: &str,
    ) -> Result<bool, StorageError> {
        let feedback = Feedback::new(rating, comment)?;

        let mut reports = self.load()?;
        let Some(entry) = reports.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        entry.feedback = Some(feedback);

        self.persist(&reports)?;
        info!(report_id = %id, rating, "feedback saved");
        Ok(true)
    }

    pub fn stats(&self) -> ReportStats {
        let reports = self.list();
        let ratings: Vec<f64> = reports
            .iter()
            .filter_map(|r| r.feedback.as_ref())
            .map(|f| f64::from(f.rating))
            .collect();

        let average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };

        ReportStats {
            total_reports: reports.len(),
            average_rating,
        }
    }

    /// Read for a write. Corrupt content reads as empty and gets replaced;
    /// a failed read is an error so existing reports are never overwritten.
    fn load(&self) -> Result<Vec<SavedReport>, StorageError> {
        match load_state::<Vec<SavedReport>>(&*self.backing, storage_keys::REPORTS) {
            Ok(reports) => Ok(reports.unwrap_or_default()),
            Err(StorageError::Serialization(e)) => {
                warn!(error = %e, key = storage_keys::REPORTS, "report storage corrupt, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn persist(&mut self, reports: &[SavedReport]) -> Result<(), StorageError> {
        save_state(&mut *self.backing, storage_keys::REPORTS, &reports)
    }
}

/// A v4 UUID not already used in `reports`.
fn fresh_id(reports: &[SavedReport]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !reports.iter().any(|r| r.id == id) {
            return id;
        }
    }
}
