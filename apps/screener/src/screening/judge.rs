//! Semantic judge — the optional external verdict on a resume.
//!
//! `TextJudge` is the only seam: `ClaudeJudge` when a credential is configured,
//! `AbsentJudge` otherwise. `AppState` holds an `Arc<dyn TextJudge>` built once
//! at startup, so the scoring path never checks for a missing client itself.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, LlmClient, LlmError};
use crate::screening::prompts::JUDGE_SYSTEM;

#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("semantic judge is not configured")]
    Unavailable,

    #[error("judge request failed: {0}")]
    Request(#[from] LlmError),

    #[error("judge reply is not a valid verdict: {0}")]
    Malformed(String),

    #[error("judge overall_score {0} is outside 0-100")]
    ScoreOutOfRange(f64),
}

/// Text-generation capability used to re-score resumes.
#[async_trait]
pub trait TextJudge: Send + Sync {
    /// Sends `prompt` and returns the model's free-form reply.
    async fn complete(&self, prompt: &str) -> Result<String, JudgeError>;

    /// False for the no-op judge; the whole batch then skips the enhanced path.
    fn is_available(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &str;
}

/// Judge backed by the Claude Messages API.
pub struct ClaudeJudge {
    llm: LlmClient,
    system: String,
}

impl ClaudeJudge {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system: format!("{JUDGE_SYSTEM} {JSON_ONLY_SYSTEM}"),
        }
    }
}

#[async_trait]
impl TextJudge for ClaudeJudge {
    async fn complete(&self, prompt: &str) -> Result<String, JudgeError> {
        Ok(self.llm.call_text(prompt, &self.system).await?)
    }

    fn backend_name(&self) -> &str {
        "claude"
    }
}

/// Stand-in used when no credential is configured.
pub struct AbsentJudge;

#[async_trait]
impl TextJudge for AbsentJudge {
    async fn complete(&self, _prompt: &str) -> Result<String, JudgeError> {
        Err(JudgeError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &str {
        "none"
    }
}

/// Structured verdict the judge is asked to return.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JudgeVerdict {
    pub overall_score: f64,
    pub eligible: bool,
    pub summary: String,
}

impl JudgeVerdict {
    /// Score as a whole percentage.
    pub fn percentage(&self) -> u32 {
        self.overall_score.round() as u32
    }
}

/// Parses a judge reply: code fences stripped, then either a bare JSON object
/// or the first `{ ... }` span embedded in surrounding prose.
pub fn parse_verdict(reply: &str) -> Result<JudgeVerdict, JudgeError> {
    let text = strip_json_fences(reply);

    let verdict: JudgeVerdict = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(direct) => {
            let embedded = match (text.find('{'), text.rfind('}')) {
                (Some(start), Some(end)) if start < end => &text[start..=end],
                _ => return Err(JudgeError::Malformed(direct.to_string())),
            };
            serde_json::from_str(embedded).map_err(|e| JudgeError::Malformed(e.to_string()))?
        }
    };

    if !verdict.overall_score.is_finite() || !(0.0..=100.0).contains(&verdict.overall_score) {
        return Err(JudgeError::ScoreOutOfRange(verdict.overall_score));
    }
    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_object() {
        let v = parse_verdict(r#"{"overall_score": 82, "eligible": true, "summary": "Strong"}"#)
            .unwrap();
        assert_eq!(v.percentage(), 82);
        assert!(v.eligible);
        assert_eq!(v.summary, "Strong");
    }

    #[test]
    fn test_parse_fenced_object() {
        let reply = "```json\n{\"overall_score\": 40.6, \"eligible\": false, \"summary\": \"Gaps\"}\n```";
        let v = parse_verdict(reply).unwrap();
        assert_eq!(v.percentage(), 41);
        assert!(!v.eligible);
    }

    #[test]
    fn test_parse_object_embedded_in_prose() {
        let reply = "Here is my verdict:\n{\"overall_score\": 55, \"eligible\": false, \"summary\": \"Close\"}\nThanks.";
        assert_eq!(parse_verdict(reply).unwrap().percentage(), 55);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = parse_verdict(r#"{"overall_score": 90, "summary": "no verdict"}"#).unwrap_err();
        assert!(matches!(err, JudgeError::Malformed(_)));
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let err = parse_verdict(r#"{"overall_score": "high", "eligible": true, "summary": ""}"#)
            .unwrap_err();
        assert!(matches!(err, JudgeError::Malformed(_)));
    }

    #[test]
    fn test_not_json_is_malformed() {
        assert!(matches!(
            parse_verdict("I cannot evaluate this resume."),
            Err(JudgeError::Malformed(_))
        ));
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let err = parse_verdict(r#"{"overall_score": 140, "eligible": true, "summary": "x"}"#)
            .unwrap_err();
        assert!(matches!(err, JudgeError::ScoreOutOfRange(s) if s == 140.0));
        assert!(parse_verdict(r#"{"overall_score": -1, "eligible": false, "summary": "x"}"#).is_err());
    }

    #[tokio::test]
    async fn test_absent_judge_is_unavailable() {
        let judge = AbsentJudge;
        assert!(!judge.is_available());
        assert!(matches!(judge.complete("p").await, Err(JudgeError::Unavailable)));
    }
}
