//! Aggregates the speech capability's interim/final events into a single
//! append-only transcript.
//!
//! The capability pushes batches of recognized alternatives; each batch
//! carries zero or more finalized segments and at most one provisional tail.
//! Modeled as a small state machine consuming discrete [`SpeechEvent`]
//! messages in delivery order.

use crate::error::CoachError;

/// One batch of recognition output, as delivered by the speech capability.
#[derive(Debug, Clone)]
pub enum SpeechEvent {
    /// Segments the recognizer will not revise, plus at most one interim tail.
    Result {
        finalized: Vec<String>,
        interim: Option<String>,
    },
    /// The recognizer reported an error; capture halts.
    Error(String),
    /// The recognizer ended the stream on its own.
    End,
}

#[derive(Debug)]
pub struct TranscriptAggregator {
    supported: bool,
    recording: bool,
    finalized: String,
    interim: String,
}

impl TranscriptAggregator {
    /// `supported` is the result of the one-time capability check performed
    /// at startup. When false, every recording operation is permanently
    /// disabled; callers report it as unsupported rather than retrying.
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            recording: false,
            finalized: String::new(),
            interim: String::new(),
        }
    }

    pub fn start(&mut self) -> Result<(), CoachError> {
        if !self.supported {
            return Err(CoachError::UnsupportedCapability);
        }
        if self.recording {
            tracing::debug!("start ignored: already recording");
            return Ok(());
        }
        self.recording = true;
        tracing::info!("speech capture started");
        Ok(())
    }

    /// Applies one capability event. Events delivered while idle are dropped.
    pub fn apply(&mut self, event: SpeechEvent) {
        if !self.recording {
            return;
        }
        match event {
            SpeechEvent::Result { finalized, interim } => {
                for segment in finalized {
                    if segment.is_empty() {
                        continue;
                    }
                    self.finalized.push_str(&segment);
                    if !segment.ends_with(char::is_whitespace) {
                        self.finalized.push(' ');
                    }
                }
                // The interim tail wholly replaces the previous one, and is
                // cleared when the batch carries none.
                self.interim = interim.unwrap_or_default();
            }
            SpeechEvent::Error(reason) => {
                tracing::warn!(%reason, "speech capture errored");
                self.halt();
            }
            SpeechEvent::End => self.halt(),
        }
    }

    /// Stops capture. The finalized transcript is preserved.
    pub fn stop(&mut self) {
        if self.recording {
            self.halt();
        }
    }

    /// Stops capture if running and clears the transcript.
    pub fn reset(&mut self) {
        self.stop();
        self.finalized.clear();
        self.interim.clear();
    }

    fn halt(&mut self) {
        self.recording = false;
        self.interim.clear();
        tracing::info!("speech capture stopped");
    }

    pub fn finalized(&self) -> &str {
        &self.finalized
    }

    pub fn interim(&self) -> &str {
        &self.interim
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(finalized: &[&str], interim: Option<&str>) -> SpeechEvent {
        SpeechEvent::Result {
            finalized: finalized.iter().map(|s| s.to_string()).collect(),
            interim: interim.map(|s| s.to_string()),
        }
    }

    #[test]
    fn finalized_segments_accumulate_in_delivery_order() {
        let mut transcript = TranscriptAggregator::new(true);
        transcript.start().unwrap();

        transcript.apply(result(&["Hello "], None));
        transcript.apply(result(&[], Some("wor")));
        assert_eq!(transcript.interim(), "wor");

        transcript.apply(result(&["world "], None));
        assert_eq!(transcript.finalized(), "Hello world ");
        // Committing a final segment cleared the interim tail.
        assert_eq!(transcript.interim(), "");

        transcript.stop();
        assert_eq!(transcript.finalized(), "Hello world ");
        assert_eq!(transcript.interim(), "");
        assert!(!transcript.is_recording());
    }

    #[test]
    fn segments_without_trailing_whitespace_get_a_single_separator() {
        let mut transcript = TranscriptAggregator::new(true);
        transcript.start().unwrap();
        transcript.apply(result(&["first", "second"], None));
        assert_eq!(transcript.finalized(), "first second ");
    }

    #[test]
    fn interim_is_replaced_on_every_event() {
        let mut transcript = TranscriptAggregator::new(true);
        transcript.start().unwrap();
        transcript.apply(result(&[], Some("so I")));
        transcript.apply(result(&[], Some("so I would")));
        assert_eq!(transcript.interim(), "so I would");
    }

    #[test]
    fn capability_error_halts_but_keeps_finalized() {
        let mut transcript = TranscriptAggregator::new(true);
        transcript.start().unwrap();
        transcript.apply(result(&["kept "], Some("dropped")));
        transcript.apply(SpeechEvent::Error("no-speech".into()));

        assert!(!transcript.is_recording());
        assert_eq!(transcript.finalized(), "kept ");
        assert_eq!(transcript.interim(), "");
    }

    #[test]
    fn events_while_idle_are_dropped() {
        let mut transcript = TranscriptAggregator::new(true);
        transcript.apply(result(&["ghost "], Some("ghost")));
        assert_eq!(transcript.finalized(), "");
        assert_eq!(transcript.interim(), "");
    }

    #[test]
    fn reset_clears_everything_regardless_of_prior_state() {
        let mut transcript = TranscriptAggregator::new(true);
        transcript.start().unwrap();
        transcript.apply(result(&["some words "], Some("tail")));
        transcript.reset();

        assert_eq!(transcript.finalized(), "");
        assert_eq!(transcript.interim(), "");
        assert!(!transcript.is_recording());

        // Reset while idle is also fine.
        transcript.reset();
        assert_eq!(transcript.finalized(), "");
    }

    #[test]
    fn unsupported_capability_never_records() {
        let mut transcript = TranscriptAggregator::new(false);
        let err = transcript.start().unwrap_err();
        assert!(matches!(err, CoachError::UnsupportedCapability));
        assert!(!transcript.is_recording());

        // Still disabled on a retry.
        assert!(transcript.start().is_err());
    }
}
