use crate::core::benchmark::BenchmarkComparison;
use crate::core::score::{Stage, StageScores};
use crate::store::{SubmissionId, SubmissionRecord};
use colored::Colorize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDetectionResult {
    pub detected_stage: Stage,
    pub confidence: f64,
    pub stage_score: f64,
    pub scores: StageScores,
    pub reasons: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_milestones: Vec<String>,
    pub benchmark_comparison: Vec<BenchmarkComparison>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<SubmissionId>,
    #[serde(flatten)]
    pub result: StageDetectionResult,
}

impl JsonReport {
    pub fn new(
        company_name: impl Into<String>,
        result: &StageDetectionResult,
        submission_id: Option<SubmissionId>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            submission_id,
            result: result.clone(),
        }
    }
}

impl From<&SubmissionRecord> for JsonReport {
    fn from(record: &SubmissionRecord) -> Self {
        Self::new(
            record.input.company_name.clone(),
            &record.result,
            Some(record.id.clone()),
        )
    }
}

fn colored_stage(stage: Stage) -> String {
    let label = stage.to_string();
    match stage {
        Stage::PreSeed => label.blue().bold().to_string(),
        Stage::Seed => label.cyan().bold().to_string(),
        Stage::SeriesA => label.yellow().bold().to_string(),
        Stage::Growth => label.green().bold().to_string(),
    }
}

fn colored_percentile(percentile: u8) -> String {
    let label = format!("p{}", percentile);
    if percentile >= 70 {
        label.green().to_string()
    } else if percentile >= 60 {
        label.yellow().to_string()
    } else {
        label.red().to_string()
    }
}

pub fn print_human(company_name: &str, result: &StageDetectionResult) {
    println!(
        "{}: {} (score {:.1}/100, confidence {:.0}%)",
        company_name,
        colored_stage(result.detected_stage),
        result.stage_score,
        result.confidence
    );

    println!();
    println!("{}", "SCORES".bold());
    for stage in Stage::ALL {
        let marker = if stage == result.detected_stage { "*" } else { " " };
        println!(
            "{} {:<9} {:>5.1}",
            marker,
            stage.to_string(),
            result.scores.get(stage)
        );
    }

    print_section("WHY", &result.reasons);
    print_section("RECOMMENDATIONS", &result.recommendations);
    print_section("NEXT MILESTONES", &result.next_milestones);

    if !result.benchmark_comparison.is_empty() {
        println!();
        println!("{} ({})", "BENCHMARKS".bold(), result.detected_stage);
        for row in &result.benchmark_comparison {
            println!(
                "{:<17} you {:>12} | typical {:>12} | {}",
                row.metric.to_string(),
                format_amount(row.your_value),
                format_amount(row.benchmark_value),
                colored_percentile(row.percentile)
            );
        }
    }
}

fn print_section(title: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }

    println!();
    println!("{}", title.bold());
    for line in lines {
        println!("-> {}", line);
    }
}

pub fn print_submission_list(user_id: &str, records: &[SubmissionRecord]) {
    if records.is_empty() {
        println!("no submissions for user {}", user_id);
        return;
    }

    println!("{} submission(s) for user {}", records.len(), user_id);
    for record in records {
        println!(
            "{}  {}  {:<24} {} ({:.0}%)",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.input.company_name,
            colored_stage(record.result.detected_stage),
            record.result.confidence
        );
    }
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
