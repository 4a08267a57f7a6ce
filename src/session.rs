//! The interview session state machine.
//!
//! Owns the full lifecycle of one practice session: difficulty and language
//! selection, question generation, solution submission, hints, and simulated
//! dry runs. Every call into the AI capability goes through here, gated by a
//! single in-flight guard so no two replies can race to overwrite state.

use crate::coach::Coach;
use crate::contract::{self, Feedback, Question};
use crate::error::CoachError;
use crate::prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Medium,
    Intermediate,
}

impl Difficulty {
    /// Recognizes the exact on-screen labels; anything else is rejected.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Beginner" => Some(Self::Beginner),
            "Medium" => Some(Self::Medium),
            "Intermediate" => Some(Self::Intermediate),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Beginner => "Beginner",
            Self::Medium => "Medium",
            Self::Intermediate => "Intermediate",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Javascript,
    Python,
    Java,
    Cpp,
}

impl Language {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "javascript" => Some(Self::Javascript),
            "python" => Some(Self::Python),
            "java" => Some(Self::Java),
            "cpp" => Some(Self::Cpp),
            _ => None,
        }
    }

    /// The starter snippet the editor is reset to whenever the language or
    /// the question changes.
    pub fn boilerplate(self) -> &'static str {
        match self {
            Self::Javascript => "function solution() {\n  // write your code here\n}",
            Self::Python => "def solution():\n    # write your code here\n    pass",
            Self::Java => {
                "class Solution {\n    public static void solution() {\n        // write your code here\n    }\n}"
            }
            Self::Cpp => "#include <bits/stdc++.h>\n\nvoid solution() {\n    // write your code here\n}",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Javascript => "javascript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Cpp => "cpp",
        })
    }
}

/// Where the session currently is in the generate/ready/evaluate/solved
/// lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Generating,
    Ready,
    Evaluating,
    Solved,
}

pub struct InterviewSession {
    difficulty: Option<Difficulty>,
    language: Language,
    stage: Stage,
    question: Option<Question>,
    code: String,
    feedback: Option<Feedback>,
    hint: Option<String>,
    dry_run_output: Option<String>,
    warning: Option<String>,
    solved: bool,
    loading: bool,
    // Bumped on every generation attempt; replies snapshotting an older value
    // belong to a superseded question and are discarded.
    question_seq: u64,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewSession {
    pub fn new() -> Self {
        let language = Language::Javascript;
        Self {
            difficulty: None,
            language,
            stage: Stage::Idle,
            question: None,
            code: language.boilerplate().to_string(),
            feedback: None,
            hint: None,
            dry_run_output: None,
            warning: None,
            solved: false,
            loading: false,
            question_seq: 0,
        }
    }

    /// Records the chosen difficulty. An unrecognized label is refused
    /// without mutating the current selection.
    pub fn select_difficulty(&mut self, label: &str) {
        match Difficulty::parse(label) {
            Some(level) => {
                self.difficulty = Some(level);
                self.warning = None;
            }
            None => {
                self.warning = Some(format!("Unrecognized difficulty level: {label}"));
            }
        }
    }

    /// Switches the working language and resets the editor to that
    /// language's boilerplate, discarding unsaved edits.
    pub fn select_language(&mut self, name: &str) {
        match Language::parse(name) {
            Some(language) => {
                self.language = language;
                self.code = language.boilerplate().to_string();
                self.warning = None;
            }
            None => {
                self.warning = Some(format!("Unrecognized language: {name}"));
            }
        }
    }

    /// Editor content write-through.
    pub fn set_code(&mut self, code: String) {
        self.code = code;
    }

    /// Asks the coach for a fresh question at the selected difficulty.
    pub async fn generate_question<C: Coach + Send + Sync>(&mut self, coach: &C) {
        if self.loading {
            tracing::debug!("generate_question ignored: a request is already in flight");
            return;
        }
        let Some(difficulty) = self.difficulty else {
            self.warning =
                Some("Please select a difficulty level before generating a question.".to_string());
            return;
        };
        if !coach.is_ready() {
            self.warning = Some(CoachError::NotReady.to_string());
            return;
        }

        self.warning = None;
        self.loading = true;
        self.feedback = None;
        self.hint = None;
        self.dry_run_output = None;
        self.solved = false;
        self.question = None;
        self.code = self.language.boilerplate().to_string();
        self.stage = Stage::Generating;
        self.question_seq += 1;

        let request = prompt::question_prompt(difficulty, self.language);
        match coach
            .chat(&request)
            .await
            .and_then(|reply| contract::parse_question(&reply.into_text()))
        {
            Ok(question) => {
                tracing::info!(%difficulty, "question generated");
                self.question = Some(question);
                self.stage = Stage::Ready;
            }
            Err(e) => {
                tracing::error!(error = %e, "question generation failed");
                self.stage = Stage::Idle;
                self.feedback = Some(Feedback {
                    text: format!("Error: {e}"),
                    solved: false,
                });
            }
        }
        self.loading = false;
    }

    /// Sends the candidate's code for evaluation. The session stays in
    /// `Evaluating` for the duration of the call.
    pub async fn submit_solution<C: Coach + Send + Sync>(&mut self, coach: &C) {
        if self.loading {
            tracing::debug!("submit_solution ignored: a request is already in flight");
            return;
        }
        if self.code.trim().is_empty() {
            self.warning = Some("Write a solution before submitting.".to_string());
            return;
        }
        let Some(question) = self.question.clone() else {
            self.warning = Some("Generate a question before submitting a solution.".to_string());
            return;
        };

        self.warning = None;
        self.loading = true;
        let prev_stage = self.stage;
        self.stage = Stage::Evaluating;
        let issued_seq = self.question_seq;

        let request = prompt::evaluation_prompt(&question.problem, &self.code);
        let result = coach.chat(&request).await;
        self.apply_evaluation(issued_seq, prev_stage, result);
        self.loading = false;
    }

    /// Folds an evaluation reply back into the session. A reply issued for a
    /// question that has since been superseded is discarded outright.
    fn apply_evaluation(
        &mut self,
        issued_seq: u64,
        prev_stage: Stage,
        result: Result<contract::ChatReply, CoachError>,
    ) {
        if issued_seq != self.question_seq {
            tracing::warn!("discarding evaluation reply for a superseded question");
            return;
        }
        match result {
            Ok(reply) => {
                let feedback = Feedback::from_reply(reply.into_text());
                if feedback.solved {
                    tracing::info!("solution accepted");
                    self.solved = true;
                }
                // Solved is sticky for the current question.
                self.stage = if self.solved { Stage::Solved } else { Stage::Ready };
                self.feedback = Some(feedback);
            }
            Err(e) => {
                tracing::error!(error = %e, "evaluation failed");
                self.stage = prev_stage;
                self.feedback = Some(Feedback {
                    text: format!("Error: {e}"),
                    solved: false,
                });
            }
        }
    }

    /// Asks for a conceptual hint on the current question.
    pub async fn request_hint<C: Coach + Send + Sync>(&mut self, coach: &C) {
        if self.loading {
            tracing::debug!("request_hint ignored: a request is already in flight");
            return;
        }
        if !coach.is_ready() {
            self.warning = Some(CoachError::NotReady.to_string());
            return;
        }
        let Some(question) = self.question.clone() else {
            self.warning = Some("Generate a question before asking for a hint.".to_string());
            return;
        };

        self.warning = None;
        self.loading = true;
        let request = prompt::hint_prompt(&question.problem, &self.code);
        match coach.chat(&request).await {
            Ok(reply) => self.hint = Some(reply.into_text()),
            Err(e) => {
                tracing::error!(error = %e, "hint request failed");
                self.hint = Some("Could not retrieve hint. Please try again.".to_string());
            }
        }
        self.loading = false;
    }

    /// Simulates running the candidate's code against a supplied test input.
    pub async fn run_dry_test<C: Coach + Send + Sync>(&mut self, coach: &C, input: &str) {
        if self.loading {
            tracing::debug!("run_dry_test ignored: a request is already in flight");
            return;
        }
        if input.trim().is_empty() {
            self.warning = Some("Enter a test input to run.".to_string());
            return;
        }
        if !coach.is_ready() {
            self.warning = Some(CoachError::NotReady.to_string());
            return;
        }
        let Some(question) = self.question.clone() else {
            self.warning = Some("Generate a question before running a test.".to_string());
            return;
        };

        self.warning = None;
        self.loading = true;
        let request = prompt::dry_run_prompt(&question.problem, &self.code, input);
        match coach.chat(&request).await {
            Ok(reply) => self.dry_run_output = Some(reply.into_text()),
            Err(e) => {
                tracing::error!(error = %e, "dry run failed");
                self.dry_run_output = Some("Simulation failed. Please try again.".to_string());
            }
        }
        self.loading = false;
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn dry_run_output(&self) -> Option<&str> {
        self.dry_run_output.as_deref()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
