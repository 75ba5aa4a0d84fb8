// Resume screening engine.
// Pipeline: extract → locate → keyword score → (optional) judge re-score → batch report.
// All LLM calls go through llm_client via the judge module.

pub mod batch;
pub mod enhanced;
pub mod extract;
pub mod handlers;
pub mod judge;
pub mod locator;
pub mod prompts;
pub mod scorer;

#[cfg(test)]
pub mod test_utils;
