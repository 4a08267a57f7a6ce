//! Session orchestration core for an AI coding-interview practice coach.
//!
//! Drives a multi-stage practice session (generate question, submit
//! solution, hint, dry run), validates the text-generation capability's
//! free-form replies into typed records, aggregates live speech into an
//! append-only transcript, and scores the candidate's spoken explanation.
//! Presentation and the capabilities themselves live elsewhere; this crate
//! only owns the state machines and the parsing boundary between them.

pub mod coach;
pub mod config;
pub mod contract;
pub mod error;
pub mod prompt;
pub mod scorer;
pub mod session;
pub mod transcript;

pub use coach::{Coach, CoachClient};
pub use config::{Config, ConfigError};
pub use contract::{ChatReply, CommunicationScore, Feedback, Question};
pub use error::CoachError;
pub use scorer::CommunicationScorer;
pub use session::{Difficulty, InterviewSession, Language, Stage};
pub use transcript::{SpeechEvent, TranscriptAggregator};
