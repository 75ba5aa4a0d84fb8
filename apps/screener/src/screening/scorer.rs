//! Deterministic Scorer — substring evidence across the skill list, turned into
//! a match percentage and eligibility verdict.

use serde::{Deserialize, Serialize};

use crate::config::ScreeningConfig;
use crate::screening::extract::StructuredText;
use crate::screening::locator::{find_occurrences, Occurrence};

/// Which backend produced a result's percentage, verdict and summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMethod {
    Keyword,
    Judge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatch {
    /// As supplied by the caller, original case.
    pub skill: String,
    pub occurrences: Vec<Occurrence>,
    pub total_occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeResult {
    pub file_name: String,
    pub eligible: bool,
    pub match_percentage: u32,
    pub matched: Vec<SkillMatch>,
    pub missing: Vec<String>,
    pub summary: String,
    pub total_lines: usize,
    pub estimated_pages: usize,
    pub scored_by: ScoringMethod,
}

/// Splits a raw comma-separated skill list. Elements are trimmed but never
/// dropped or deduplicated, so `"Go,,Rust,"` yields four skills, two of them empty.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// `round(100 * matched / total)` with halves rounded up, in integer arithmetic.
pub fn match_percentage(matched: usize, total: usize) -> u32 {
    if total == 0 {
        // Callers reject empty skill lists before scoring.
        return 0;
    }
    ((200 * matched + total) / (2 * total)) as u32
}

pub fn summarize(matched: usize, total: usize) -> String {
    format!("Found {matched}/{total} required skills")
}

/// Scores one resume against an already-split skill list.
pub fn score_skills(
    text: &StructuredText,
    skills: &[String],
    file_name: &str,
    config: &ScreeningConfig,
) -> ResumeResult {
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for skill in skills {
        let occurrences = find_occurrences(text, skill, config.context_radius);
        if occurrences.is_empty() {
            missing.push(skill.clone());
        } else {
            matched.push(SkillMatch {
                skill: skill.clone(),
                total_occurrences: occurrences.len(),
                occurrences,
            });
        }
    }

    let match_percentage = match_percentage(matched.len(), skills.len());

    ResumeResult {
        file_name: file_name.to_string(),
        eligible: match_percentage >= config.threshold_percent,
        match_percentage,
        summary: summarize(matched.len(), skills.len()),
        matched,
        missing,
        total_lines: text.total_lines,
        estimated_pages: text.estimated_pages,
        scored_by: ScoringMethod::Keyword,
    }
}

/// Scores one resume against the caller's raw skill string.
pub fn score(
    text: &StructuredText,
    required_skills: &str,
    file_name: &str,
    config: &ScreeningConfig,
) -> ResumeResult {
    score_skills(text, &parse_skill_list(required_skills), file_name, config)
}
