//! Enhanced Scorer — asks the semantic judge for a verdict on each resume and
//! falls back to the keyword result whenever the judge cannot give one.
//!
//! Calls run one at a time in input order with a pacing delay between them.
//! A failure only ever affects the resume it happened on.

use tracing::{debug, info, warn};

use crate::config::ScreeningConfig;
use crate::screening::extract::ExtractedResume;
use crate::screening::judge::{parse_verdict, JudgeError, JudgeVerdict, TextJudge};
use crate::screening::prompts::build_judge_prompt;
use crate::screening::scorer::{parse_skill_list, score_skills, ResumeResult, ScoringMethod};

pub async fn score_all(
    resumes: &[ExtractedResume],
    required_skills: &str,
    judge: &dyn TextJudge,
    config: &ScreeningConfig,
) -> Vec<ResumeResult> {
    let skills = parse_skill_list(required_skills);
    let keyword_score = |r: &ExtractedResume| score_skills(&r.text, &skills, &r.file_name, config);

    if !judge.is_available() {
        info!(
            backend = judge.backend_name(),
            "Semantic judge unavailable; scoring batch by keyword only"
        );
        return resumes.iter().map(keyword_score).collect();
    }

    let mut results = Vec::with_capacity(resumes.len());
    for (i, resume) in resumes.iter().enumerate() {
        let baseline = keyword_score(resume);

        if i > 0 && !config.judge_delay.is_zero() {
            tokio::time::sleep(config.judge_delay).await;
        }

        let result = match ask_judge(judge, resume, &skills).await {
            Ok(verdict) => {
                debug!(
                    file_name = %resume.file_name,
                    keyword = baseline.match_percentage,
                    judge = verdict.percentage(),
                    "Judge verdict applied"
                );
                apply_verdict(baseline, verdict)
            }
            Err(e) => {
                warn!(
                    file_name = %resume.file_name,
                    error = %e,
                    "Judge failed; keeping keyword score"
                );
                baseline
            }
        };
        results.push(result);
    }
    results
}

async fn ask_judge(
    judge: &dyn TextJudge,
    resume: &ExtractedResume,
    skills: &[String],
) -> Result<JudgeVerdict, JudgeError> {
    let prompt = build_judge_prompt(skills, &resume.text.full_text);
    let reply = judge.complete(&prompt).await?;
    parse_verdict(&reply)
}

/// Overwrites the verdict fields; occurrence evidence and line/page counts stay.
fn apply_verdict(mut result: ResumeResult, verdict: JudgeVerdict) -> ResumeResult {
    result.match_percentage = verdict.percentage();
    result.eligible = verdict.eligible;
    result.summary = verdict.summary;
    result.scored_by = ScoringMethod::Judge;
    result
}
