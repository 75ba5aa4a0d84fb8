//! Scripted judges shared by the scorer and orchestrator tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::LlmError;
use crate::screening::extract::{ExtractedResume, StructuredText};
use crate::screening::judge::{JudgeError, TextJudge};

/// Replies with queued answers in call order; `None` stands for a failed call.
pub struct ScriptedJudge {
    replies: Mutex<VecDeque<Option<String>>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedJudge {
    pub fn new(replies: Vec<Option<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextJudge for ScriptedJudge {
    async fn complete(&self, prompt: &str) -> Result<String, JudgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front().flatten() {
            Some(reply) => Ok(reply),
            None => Err(JudgeError::Request(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })),
        }
    }

    fn backend_name(&self) -> &str {
        "scripted"
    }
}

pub fn verdict(score: u32, eligible: bool, summary: &str) -> String {
    format!(r#"{{"overall_score": {score}, "eligible": {eligible}, "summary": "{summary}"}}"#)
}

pub fn resume(file_name: &str, text: &str) -> ExtractedResume {
    ExtractedResume {
        file_name: file_name.to_string(),
        text: StructuredText::from_text(text.to_string(), 50),
    }
}
