//! Prompt construction for every request kind the session can issue.
//!
//! Each builder is a pure function over the session fields it needs. The two
//! structured kinds (question generation, think-aloud scoring) embed the
//! exact JSON schema the reply must match; the coaching kinds embed the
//! instruction to withhold the full solution, which is a behavioral contract
//! with the candidate rather than formatting.

use crate::session::{Difficulty, Language};

pub fn question_prompt(difficulty: Difficulty, language: Language) -> String {
    format!(
        r#"Generate a random {difficulty} level coding interview question, solvable in {language}.
Return ONLY valid JSON:
{{
 "problem": "string",
 "example": "string",
 "constraints": "string",
 "note": "string"
}}"#
    )
}

pub fn evaluation_prompt(problem: &str, code: &str) -> String {
    format!(
        r#"You are a helpful interview coach.
The question is: "{problem}".
Here is the candidate's solution:
{code}

1. If correct, say "Correct! Well Done."
2. If wrong, give hints but don't reveal the full answer."#
    )
}

pub fn hint_prompt(problem: &str, code: &str) -> String {
    format!(
        r#"The user is stuck on this problem: "{problem}".
Their current code is: "{code}".
Provide a short, conceptual hint to help them progress without giving away the full solution."#
    )
}

pub fn dry_run_prompt(problem: &str, code: &str, input: &str) -> String {
    format!(
        r#"Act as a code interpreter for this problem: "{problem}".
User code: "{code}".
Test input: "{input}".
Simulate execution. If correct, show expected output. If there's a bug, explain it briefly with hints."#
    )
}

pub fn think_aloud_prompt(problem: &str, code: &str, transcript: &str) -> String {
    format!(
        r#"You are an expert technical interview coach evaluating a candidate's "think aloud" communication.

Problem: "{problem}"
Candidate's Code:
{code}

Candidate's Spoken Explanation (transcript):
"{transcript}"

Evaluate the candidate on these 4 dimensions, scoring each out of 10:
1. Clarity - how clearly did they explain their approach?
2. Structure - did they break down the problem logically before coding?
3. Technical Accuracy - did their explanation match what the code actually does?
4. Confidence - did they sound confident and avoid filler/confusion?

Return ONLY valid JSON in this exact shape:
{{
  "clarity": <number>,
  "structure": <number>,
  "technical": <number>,
  "confidence": <number>,
  "summary": "<2-3 sentence overall assessment>",
  "strengths": "<1-2 specific things they did well>",
  "improvements": "<1-2 specific actionable suggestions>"
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_prompt_requests_json_only_with_full_schema() {
        let prompt = question_prompt(Difficulty::Medium, Language::Python);
        assert!(prompt.contains("ONLY valid JSON"));
        for field in ["\"problem\"", "\"example\"", "\"constraints\"", "\"note\""] {
            assert!(prompt.contains(field), "schema is missing {field}");
        }
        assert!(prompt.contains("Medium"));
        assert!(prompt.contains("python"));
    }

    #[test]
    fn coaching_prompts_withhold_the_answer() {
        let eval = evaluation_prompt("Two Sum", "fn main() {}");
        assert!(eval.contains("don't reveal the full answer"));
        assert!(eval.contains("\"Correct! Well Done.\""));

        let hint = hint_prompt("Two Sum", "fn main() {}");
        assert!(hint.contains("without giving away the full solution"));
    }

    #[test]
    fn think_aloud_prompt_embeds_rubric_and_inputs() {
        let prompt = think_aloud_prompt("Two Sum", "def solution(): pass", "first I sort");
        for field in ["\"clarity\"", "\"structure\"", "\"technical\"", "\"confidence\""] {
            assert!(prompt.contains(field), "rubric is missing {field}");
        }
        assert!(prompt.contains("out of 10"));
        assert!(prompt.contains("first I sort"));
        assert!(prompt.contains("def solution(): pass"));
    }

    #[test]
    fn dry_run_prompt_embeds_the_test_input() {
        let prompt = dry_run_prompt("Two Sum", "code", "[1, 2, 3]");
        assert!(prompt.contains("[1, 2, 3]"));
        assert!(prompt.contains("Simulate execution"));
    }
}
