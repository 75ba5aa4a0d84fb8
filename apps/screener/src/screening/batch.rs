//! Batch Orchestrator — validates a screening request, extracts every
//! document and dispatches to the keyword or enhanced scorer.

use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::ScreeningConfig;
use crate::errors::AppError;
use crate::screening::enhanced;
use crate::screening::extract::{extract, ExtractedResume, TextRenderer};
use crate::screening::judge::TextJudge;
use crate::screening::scorer::{score, ResumeResult};

/// One uploaded document.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub content: Bytes,
    pub file_name: String,
}

/// The response for one screening request. `eligible_count` is derived from
/// `results` at construction and cannot drift from it.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    total_resumes: usize,
    eligible_count: usize,
    results: Vec<ResumeResult>,
}

impl BatchReport {
    pub fn new(results: Vec<ResumeResult>) -> Self {
        Self {
            total_resumes: results.len(),
            eligible_count: results.iter().filter(|r| r.eligible).count(),
            results,
        }
    }

    pub fn total_resumes(&self) -> usize {
        self.total_resumes
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible_count
    }

    pub fn results(&self) -> &[ResumeResult] {
        &self.results
    }
}

/// Runs screening batches. Built once at startup and shared through `AppState`.
#[derive(Clone)]
pub struct Screener {
    renderer: Arc<dyn TextRenderer>,
    judge: Arc<dyn TextJudge>,
    config: ScreeningConfig,
}

impl Screener {
    pub fn new(
        renderer: Arc<dyn TextRenderer>,
        judge: Arc<dyn TextJudge>,
        config: ScreeningConfig,
    ) -> Self {
        Self {
            renderer,
            judge,
            config,
        }
    }

    pub fn judge(&self) -> &dyn TextJudge {
        self.judge.as_ref()
    }

    /// Screens `documents` against `required_skills`.
    ///
    /// Either every document is scored or the whole batch fails: an empty
    /// upload, blank skill list or unreadable document is an error.
    pub async fn run(
        &self,
        documents: Vec<DocumentInput>,
        required_skills: &str,
        use_enhanced: bool,
    ) -> Result<BatchReport, AppError> {
        validate(&documents, required_skills)?;

        let span = info_span!(
            "screen_batch",
            batch_id = %Uuid::new_v4(),
            resumes = documents.len(),
            enhanced = use_enhanced
        );
        self.run_validated(documents, required_skills, use_enhanced)
            .instrument(span)
            .await
    }

    async fn run_validated(
        &self,
        documents: Vec<DocumentInput>,
        required_skills: &str,
        use_enhanced: bool,
    ) -> Result<BatchReport, AppError> {
        let renderer = Arc::clone(&self.renderer);
        let lines_per_page = self.config.lines_per_page;
        let resumes = tokio::task::spawn_blocking(move || {
            extract_all(renderer.as_ref(), documents, lines_per_page)
        })
        .await
        .context("Document extraction task failed")??;

        let results = if use_enhanced {
            enhanced::score_all(&resumes, required_skills, self.judge.as_ref(), &self.config).await
        } else {
            resumes
                .iter()
                .map(|r| score(&r.text, required_skills, &r.file_name, &self.config))
                .collect()
        };

        let report = BatchReport::new(results);
        info!(
            total = report.total_resumes(),
            eligible = report.eligible_count(),
            "Batch screened"
        );
        Ok(report)
    }
}

fn validate(documents: &[DocumentInput], required_skills: &str) -> Result<(), AppError> {
    if documents.is_empty() {
        return Err(AppError::Validation(
            "At least one resume must be uploaded".to_string(),
        ));
    }
    if required_skills.trim().is_empty() {
        return Err(AppError::Validation(
            "Required skills cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Extracts documents in order, stopping at the first failure.
fn extract_all(
    renderer: &dyn TextRenderer,
    documents: Vec<DocumentInput>,
    lines_per_page: usize,
) -> Result<Vec<ExtractedResume>, AppError> {
    documents
        .into_iter()
        .map(|doc| match extract(renderer, &doc.content, lines_per_page) {
            Ok(text) => Ok(ExtractedResume {
                file_name: doc.file_name,
                text,
            }),
            Err(source) => Err(AppError::Extraction {
                file_name: doc.file_name,
                source,
            }),
        })
        .collect()
}
