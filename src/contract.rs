//! The parsing boundary between the coach's free-form replies and the typed
//! domain records the session works with.
//!
//! Replies arrive either as a bare string or wrapped in a reply object with
//! the text nested under `message.content`. Structured payloads are often
//! wrapped in markdown code fences, so fences are stripped before decoding.
//! Nothing in this module panics on untrusted input; every failure becomes a
//! [`CoachError::MalformedResponse`].

use crate::error::CoachError;
use serde::Deserialize;

/// Marker substring the evaluation prompt asks the coach to emit when the
/// candidate's solution is correct. Matched exactly, case-sensitively.
pub const SOLVED_MARKER: &str = "Correct!";

/// The two shapes the text-generation capability may hand back.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChatReply {
    Text(String),
    Wrapped { message: ReplyMessage },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyMessage {
    pub content: String,
}

impl ChatReply {
    pub fn into_text(self) -> String {
        match self {
            ChatReply::Text(text) => text,
            ChatReply::Wrapped { message } => message.content,
        }
    }
}

/// A generated interview question. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub problem: String,
    pub example: String,
    pub constraints: String,
    pub note: String,
}

/// Scores for the candidate's spoken explanation, each dimension in 0..=10.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommunicationScore {
    pub clarity: u8,
    pub structure: u8,
    pub technical: u8,
    pub confidence: u8,
    pub summary: String,
    pub strengths: String,
    pub improvements: String,
}

/// Free-text evaluation feedback, inspected only for the solved marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub solved: bool,
}

impl Feedback {
    pub fn from_reply(text: String) -> Self {
        let solved = text.contains(SOLVED_MARKER);
        Feedback { text, solved }
    }
}

/// Strips one surrounding markdown code fence (triple backtick, optionally
/// tagged `json`) and surrounding whitespace, so fenced and unfenced payloads
/// decode identically.
pub fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

/// Decodes a question-generation reply. The field set must match exactly;
/// missing, extra, or mistyped fields all fail.
pub fn parse_question(reply: &str) -> Result<Question, CoachError> {
    serde_json::from_str(strip_fences(reply))
        .map_err(|e| CoachError::MalformedResponse(e.to_string()))
}

/// Decodes a think-aloud scoring reply. A single out-of-range or non-numeric
/// dimension invalidates the whole result.
pub fn parse_score(reply: &str) -> Result<CommunicationScore, CoachError> {
    let score: CommunicationScore = serde_json::from_str(strip_fences(reply))
        .map_err(|e| CoachError::MalformedResponse(e.to_string()))?;

    for (dimension, value) in [
        ("clarity", score.clarity),
        ("structure", score.structure),
        ("technical", score.technical),
        ("confidence", score.confidence),
    ] {
        if value > 10 {
            return Err(CoachError::MalformedResponse(format!(
                "{dimension} score {value} is outside 0-10"
            )));
        }
    }

    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTION_JSON: &str = r#"{
        "problem": "Reverse a linked list.",
        "example": "1->2->3 becomes 3->2->1",
        "constraints": "O(n) time, O(1) extra space",
        "note": "Consider the iterative approach first."
    }"#;

    #[test]
    fn fenced_and_unfenced_questions_decode_identically() {
        let fenced = format!("\n\n```json\n{QUESTION_JSON}\n```\n  ");
        let bare = parse_question(QUESTION_JSON).unwrap();
        let wrapped = parse_question(&fenced).unwrap();
        assert_eq!(bare, wrapped);

        // An untagged fence works too.
        let plain_fence = format!("```\n{QUESTION_JSON}\n```");
        assert_eq!(parse_question(&plain_fence).unwrap(), bare);
    }

    #[test]
    fn question_with_missing_field_is_malformed() {
        let reply = r#"{"problem": "p", "example": "e", "constraints": "c"}"#;
        let err = parse_question(reply).unwrap_err();
        assert!(matches!(err, CoachError::MalformedResponse(_)));
    }

    #[test]
    fn question_with_extra_field_is_malformed() {
        let reply = r#"{
            "problem": "p", "example": "e", "constraints": "c",
            "note": "n", "hint": "surprise"
        }"#;
        assert!(matches!(
            parse_question(reply),
            Err(CoachError::MalformedResponse(_))
        ));
    }

    #[test]
    fn question_with_mistyped_field_is_malformed() {
        let reply = r#"{"problem": 42, "example": "e", "constraints": "c", "note": "n"}"#;
        assert!(matches!(
            parse_question(reply),
            Err(CoachError::MalformedResponse(_))
        ));
    }

    #[test]
    fn unparseable_text_is_malformed_not_a_panic() {
        assert!(parse_question("Sure! Here's a question for you...").is_err());
        assert!(parse_score("").is_err());
    }

    #[test]
    fn score_in_range_parses() {
        let reply = r#"```json
        {
            "clarity": 8, "structure": 7, "technical": 9, "confidence": 6,
            "summary": "Solid walkthrough.",
            "strengths": "Named the invariant early.",
            "improvements": "State complexity up front."
        }
        ```"#;
        let score = parse_score(reply).unwrap();
        assert_eq!(score.clarity, 8);
        assert_eq!(score.summary, "Solid walkthrough.");
    }

    #[test]
    fn out_of_range_score_is_malformed() {
        let reply = r#"{
            "clarity": 15, "structure": 7, "technical": 9, "confidence": 6,
            "summary": "s", "strengths": "s", "improvements": "i"
        }"#;
        let err = parse_score(reply).unwrap_err();
        assert!(err.to_string().contains("clarity"));
    }

    #[test]
    fn non_numeric_score_is_malformed() {
        let reply = r#"{
            "clarity": "eight", "structure": 7, "technical": 9, "confidence": 6,
            "summary": "s", "strengths": "s", "improvements": "i"
        }"#;
        assert!(matches!(
            parse_score(reply),
            Err(CoachError::MalformedResponse(_))
        ));
    }

    #[test]
    fn solved_marker_is_exact_and_case_sensitive() {
        assert!(Feedback::from_reply("Correct! Well Done.".into()).solved);
        assert!(Feedback::from_reply("Nearly there... Correct! in the end".into()).solved);
        assert!(!Feedback::from_reply("correct! but lowercase".into()).solved);
        assert!(!Feedback::from_reply("Correct, but no exclamation".into()).solved);
    }

    #[test]
    fn reply_text_is_extracted_from_both_shapes() {
        let bare: ChatReply = serde_json::from_str(r#""hello there""#).unwrap();
        assert_eq!(bare.into_text(), "hello there");

        let wrapped: ChatReply =
            serde_json::from_str(r#"{"message": {"content": "nested text"}}"#).unwrap();
        assert_eq!(wrapped.into_text(), "nested text");
    }
}
