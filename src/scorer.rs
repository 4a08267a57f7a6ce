//! Scores the candidate's spoken explanation against the think-aloud rubric.

use crate::coach::Coach;
use crate::contract::{self, CommunicationScore};
use crate::error::CoachError;
use crate::prompt;

/// Generic feedback shown when the analysis could not be completed. The
/// underlying cause goes to the log, not the candidate.
const ANALYSIS_FAILED: &str = "Analysis failed. Please try again.";

#[derive(Debug, Default)]
pub struct CommunicationScorer {
    score: Option<CommunicationScore>,
    feedback: Option<String>,
    loading: bool,
}

impl CommunicationScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one analysis over a transcript snapshot taken at invocation
    /// time. A valid reply atomically replaces any prior score; any failure
    /// leaves the prior score untouched.
    pub async fn analyze<C: Coach + Send + Sync>(
        &mut self,
        coach: &C,
        problem: &str,
        code: &str,
        transcript: &str,
    ) {
        if self.loading {
            tracing::debug!("analyze ignored: a request is already in flight");
            return;
        }
        if transcript.trim().is_empty() {
            self.feedback = Some("Record an explanation before asking for analysis.".to_string());
            return;
        }
        if !coach.is_ready() {
            self.feedback = Some(CoachError::NotReady.to_string());
            return;
        }

        self.loading = true;
        let request = prompt::think_aloud_prompt(problem, code, transcript);
        match coach
            .chat(&request)
            .await
            .and_then(|reply| contract::parse_score(&reply.into_text()))
        {
            Ok(score) => {
                tracing::info!(
                    clarity = score.clarity,
                    structure = score.structure,
                    technical = score.technical,
                    confidence = score.confidence,
                    "communication analysis complete"
                );
                self.feedback = Some(score.summary.clone());
                self.score = Some(score);
            }
            Err(e) => {
                tracing::error!(error = %e, "communication analysis failed");
                self.feedback = Some(ANALYSIS_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    /// Clears the score and feedback. Invoked alongside the transcript reset
    /// when the candidate explicitly starts over.
    pub fn reset(&mut self) {
        self.score = None;
        self.feedback = None;
    }

    pub fn score(&self) -> Option<&CommunicationScore> {
        self.score.as_ref()
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
