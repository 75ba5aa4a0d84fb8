// LLM prompt constants for the semantic judge.
// Reuses the JSON-only fragment from llm_client::prompts.

/// System prompt for resume verdicts.
pub const JUDGE_SYSTEM: &str = "You are an experienced technical recruiter screening resumes \
    against a list of required skills. Judge whether the candidate genuinely has each skill, \
    counting clear equivalents and evidence from projects, not just literal keyword mentions.";

/// Verdict prompt template. Replace `{skills}` and `{resume_text}` before sending.
pub const JUDGE_PROMPT_TEMPLATE: &str = r#"Evaluate the resume below against these required skills:
{skills}

Return a JSON object with this EXACT schema (no extra fields):
{
  "overall_score": 72,
  "eligible": true,
  "summary": "One or two sentences naming the strongest matches and the most important gaps."
}

Rules:
- overall_score is a number from 0 to 100: how well the candidate covers the required skills.
- eligible is true only if the candidate covers enough of the required skills to be worth interviewing.
- summary must be plain text.

RESUME:
{resume_text}"#;

/// Fills the verdict template for one resume.
pub fn build_judge_prompt(skills: &[String], resume_text: &str) -> String {
    let skills = skills
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");
    // Skills first: a resume containing "{skills}" must not be substituted into.
    JUDGE_PROMPT_TEMPLATE
        .replace("{skills}", &skills)
        .replace("{resume_text}", resume_text)
}
