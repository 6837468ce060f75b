use tracing::{error, info};
use uuid::Uuid;

use personapath_auth::Identity;
use personapath_bedrock::{GenerationError, ReportGenerator};
use personapath_core::models::answer::Answer;
use personapath_core::models::profile::{ProfileForm, UserProfile};
use personapath_core::models::report::PersonalityReport;
use personapath_quiz::{Advance, QuizRunner};
use personapath_storage::ReportStore;

use crate::error::SessionError;
use crate::stage::Stage;
use crate::view::SessionView;

/// Shown to the user for every generation or persistence failure.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong while analyzing your personality. Please try again.";

/// Outcome of answering one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Now showing the question at `index`.
    Next { index: usize },
    /// Last question answered; the session is now `Loading`.
    Completed,
}

/// What the report generator needs, copied out of a `Loading` session so
/// the call can run without holding the session.
#[derive(Debug, Clone)]
pub struct GenerationInput {
    /// Identifies the Loading run the result must be applied to.
    pub run_id: Uuid,
    pub answers: Vec<Answer>,
    pub profile: UserProfile,
}

/// Per-user state machine.
///
/// All per-run data (profile, runner, answers, report) lives here and
/// nowhere else; rendering code reads it through [`Session::view`].
/// Requests that are not an edge out of the current stage fail with
/// [`SessionError::InvalidTransition`] and change nothing.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    stage: Stage,
    profile: Option<UserProfile>,
    runner: Option<QuizRunner>,
    answers: Option<Vec<Answer>>,
    run_id: Option<Uuid>,
    report: Option<PersonalityReport>,
    report_id: Option<String>,
    error_message: Option<String>,
}

impl Session {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            stage: Stage::Welcome,
            profile: None,
            runner: None,
            answers: None,
            run_id: None,
            report: None,
            report_id: None,
            error_message: None,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn runner(&self) -> Option<&QuizRunner> {
        self.runner.as_ref()
    }

    pub fn report(&self) -> Option<&PersonalityReport> {
        self.report.as_ref()
    }

    pub fn report_id(&self) -> Option<&str> {
        self.report_id.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Welcome → Details.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.expect(Stage::Welcome, "start")?;
        self.transition(Stage::Details);
        Ok(())
    }

    /// Details → Quiz, once the form validates. An invalid form leaves the
    /// session in Details.
    pub fn submit_profile(&mut self, form: ProfileForm) -> Result<(), SessionError> {
        self.expect(Stage::Details, "submit a profile")?;
        let profile = UserProfile::try_from(form)?;
        self.profile = Some(profile);
        self.runner = Some(QuizRunner::new());
        self.transition(Stage::Quiz);
        Ok(())
    }

    pub fn select_option(&mut self, option_id: &str) -> Result<(), SessionError> {
        self.runner_mut("select an option")?
            .select_option(option_id)?;
        Ok(())
    }

    /// Record the selected answer. Answering the last question moves the
    /// session to Loading and discards the runner.
    pub fn advance(&mut self) -> Result<QuizStep, SessionError> {
        match self.runner_mut("advance")?.advance()? {
            Advance::Next { index } => Ok(QuizStep::Next { index }),
            Advance::Complete(answers) => {
                self.runner = None;
                self.answers = Some(answers);
                self.run_id = Some(Uuid::new_v4());
                self.transition(Stage::Loading);
                Ok(QuizStep::Completed)
            }
        }
    }

    /// The answers and profile to generate from. Only available while
    /// Loading.
    pub fn generation_input(&self) -> Result<GenerationInput, SessionError> {
        self.expect(Stage::Loading, "start generation")?;
        match (self.run_id, &self.answers, &self.profile) {
            (Some(run_id), Some(answers), Some(profile)) => Ok(GenerationInput {
                run_id,
                answers: answers.clone(),
                profile: profile.clone(),
            }),
            _ => Err(self.invalid("start generation")),
        }
    }

    /// Loading → Results when the report was generated and saved, otherwise
    /// Loading → Error with the generic failure message.
    ///
    /// `run_id` must be the one from [`Session::generation_input`]; a result
    /// for any other run is rejected and changes nothing.
    pub fn finish_generation(
        &mut self,
        run_id: Uuid,
        result: Result<PersonalityReport, GenerationError>,
        store: &mut ReportStore,
    ) -> Result<Stage, SessionError> {
        if self.run_id != Some(run_id) {
            info!(subject = %self.identity.subject, run_id = %run_id, stage = %self.stage, "dropping stale generation result");
            return Err(SessionError::StaleGeneration { stage: self.stage });
        }
        self.expect(Stage::Loading, "finish generation")?;
        self.answers = None;
        self.run_id = None;

        let report = match result {
            Ok(report) => report,
            Err(e) => {
                error!(subject = %self.identity.subject, kind = e.kind(), error = %e, "analysis failed");
                return Ok(self.fail());
            }
        };

        let Some(profile) = self.profile.clone() else {
            return Ok(self.fail());
        };

        match store.append(profile, report.clone()) {
            Ok(id) => {
                self.report = Some(report);
                self.report_id = Some(id);
                self.transition(Stage::Results);
                Ok(Stage::Results)
            }
            Err(e) => {
                error!(subject = %self.identity.subject, error = %e, "failed to save report");
                Ok(self.fail())
            }
        }
    }

    /// Generate and persist in one call. Convenient when nothing else needs
    /// the session during the backend call.
    pub async fn run_generation(
        &mut self,
        generator: &ReportGenerator,
        store: &mut ReportStore,
    ) -> Result<Stage, SessionError> {
        let input = self.generation_input()?;
        let result = generator.generate(&input.answers, &input.profile).await;
        self.finish_generation(input.run_id, result, store)
    }

    /// Results/Error → Welcome, discarding everything from the run.
    pub fn retake(&mut self) -> Result<(), SessionError> {
        if !matches!(self.stage, Stage::Results | Stage::Error) {
            return Err(self.invalid("retake"));
        }
        self.clear_run();
        self.transition(Stage::Welcome);
        Ok(())
    }

    /// Welcome → Admin.
    pub fn open_admin(&mut self) -> Result<(), SessionError> {
        self.expect(Stage::Welcome, "open admin")?;
        self.transition(Stage::Admin);
        Ok(())
    }

    /// Admin → Welcome.
    pub fn close_admin(&mut self) -> Result<(), SessionError> {
        self.expect(Stage::Admin, "close admin")?;
        self.transition(Stage::Welcome);
        Ok(())
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            stage: self.stage,
            profile: self.profile.clone(),
            quiz: self.runner.as_ref().map(QuizRunner::progress),
            report: self.report.clone(),
            report_id: self.report_id.clone(),
            error_message: self.error_message.clone(),
        }
    }

    fn runner_mut(&mut self, action: &'static str) -> Result<&mut QuizRunner, SessionError> {
        self.expect(Stage::Quiz, action)?;
        let stage = self.stage;
        self.runner
            .as_mut()
            .ok_or(SessionError::InvalidTransition { stage, action })
    }

    fn fail(&mut self) -> Stage {
        self.error_message = Some(GENERIC_FAILURE_MESSAGE.to_string());
        self.transition(Stage::Error);
        Stage::Error
    }

    fn clear_run(&mut self) {
        self.profile = None;
        self.runner = None;
        self.answers = None;
        self.run_id = None;
        self.report = None;
        self.report_id = None;
        self.error_message = None;
    }

    fn expect(&self, stage: Stage, action: &'static str) -> Result<(), SessionError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            stage: self.stage,
            action,
        }
    }

    fn transition(&mut self, to: Stage) {
        info!(subject = %self.identity.subject, from = %self.stage, to = %to, "session transition");
        self.stage = to;
    }
}
