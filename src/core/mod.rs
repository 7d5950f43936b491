pub mod benchmark;
pub mod explain;
pub mod input;
pub mod report;
pub mod score;

pub use score::ScoringParams;

use crate::core::input::{PartialInput, StageDetectionInput};
use crate::core::report::StageDetectionResult;
use anyhow::Result;
use tracing::debug;

fn to_owned_lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

/// Classifies a startup into a funding stage. Never fails: every input,
/// including nonsense values, yields a result.
pub fn detect_startup_stage(
    input: &StageDetectionInput,
    params: &ScoringParams,
) -> StageDetectionResult {
    let scores = score::score_all(input, params);
    let (stage, winning_score) = score::select_stage(&scores);
    let confidence = score::confidence_for(winning_score);

    debug!(
        company = %input.company_name,
        pre_seed = scores.pre_seed,
        seed = scores.seed,
        series_a = scores.series_a,
        growth = scores.growth,
        stage = stage.as_str(),
        confidence,
        "scored startup"
    );

    StageDetectionResult {
        detected_stage: stage,
        confidence,
        stage_score: winning_score.clamp(0.0, 100.0),
        scores,
        reasons: to_owned_lines(explain::reasons_for(stage)),
        recommendations: to_owned_lines(explain::recommendations_for(stage)),
        next_milestones: to_owned_lines(explain::milestones_for(stage)),
        benchmark_comparison: benchmark::compare(input, stage),
    }
}

#[derive(Debug, Clone)]
pub struct Assessment {
    pub input: StageDetectionInput,
    pub result: StageDetectionResult,
}

/// Validates a raw submission, fills in defaults and scores it.
pub fn assess(partial: PartialInput, params: &ScoringParams) -> Result<Assessment> {
    input::validate_submission(&partial)?;
    let input = input::normalize(partial);
    let result = detect_startup_stage(&input, params);
    Ok(Assessment { input, result })
}
