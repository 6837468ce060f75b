use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use uuid::Uuid;

use personapath_core::models::answer::Answer;
use personapath_core::models::profile::UserProfile;
use personapath_core::models::report::PersonalityReport;
use personapath_core::schema::personality_report_schema;

use crate::backend::{BackendRequest, ReportBackend};
use crate::error::GenerationError;
use crate::prompt;

/// Turns a completed quiz and a profile into a validated report.
///
/// Stateless across calls: no caching, no retry. Identical inputs may yield
/// different reports.
#[derive(Clone)]
pub struct ReportGenerator {
    backend: Arc<dyn ReportBackend>,
    timeout: Option<Duration>,
}

impl ReportGenerator {
    pub fn new(backend: Arc<dyn ReportBackend>) -> Self {
        Self {
            backend,
            timeout: None,
        }
    }

    /// Give up on the backend after `timeout`, failing as unavailable.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build_request(answers: &[Answer], profile: &UserProfile) -> BackendRequest {
        BackendRequest {
            system_instruction: prompt::system_instruction(profile),
            user_content: prompt::user_content(answers, profile),
            output_schema: personality_report_schema(),
        }
    }

    pub async fn generate(
        &self,
        answers: &[Answer],
        profile: &UserProfile,
    ) -> Result<PersonalityReport, GenerationError> {
        let request_id = Uuid::new_v4();
        let backend = self.backend.name();
        info!(request_id = %request_id, backend, answers = answers.len(), "starting report generation");

        let result = self.invoke(&Self::build_request(answers, profile)).await;
        match &result {
            Ok(report) => info!(
                request_id = %request_id,
                title = %report.personality_type.title,
                "report generation complete"
            ),
            Err(e) => error!(
                request_id = %request_id,
                backend,
                kind = e.kind(),
                error = %e,
                "report generation failed"
            ),
        }
        result
    }

    async fn invoke(&self, request: &BackendRequest) -> Result<PersonalityReport, GenerationError> {
        let call = self.backend.complete(request);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                GenerationError::Unavailable(format!("no response within {}s", limit.as_secs()))
            })??,
            None => call.await?,
        };
        parse_report(response.text.as_deref())
    }
}

/// Parse and validate the model's text as a [`PersonalityReport`].
pub fn parse_report(text: Option<&str>) -> Result<PersonalityReport, GenerationError> {
    let text = text
        .map(strip_code_fence)
        .filter(|t| !t.is_empty())
        .ok_or(GenerationError::Empty)?;

    let report: PersonalityReport = serde_json::from_str(text)
        .map_err(|e| GenerationError::Malformed(format!("failed to parse report: {e}")))?;

    report
        .validate()
        .map_err(|e| GenerationError::Malformed(e.to_string()))?;

    Ok(report)
}

/// Models answering in plain text sometimes wrap JSON in a Markdown fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}
