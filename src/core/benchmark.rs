use crate::core::input::StageDetectionInput;
use crate::core::score::Stage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference values a typical company at a given stage reaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageBenchmarks {
    pub team_size: f64,
    pub active_customers: f64,
    pub monthly_revenue: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TeamSize,
    ActiveCustomers,
    MonthlyRevenue,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::TeamSize,
        Metric::ActiveCustomers,
        Metric::MonthlyRevenue,
    ];

    fn value_from(self, input: &StageDetectionInput) -> f64 {
        match self {
            Self::TeamSize => f64::from(input.team_size),
            Self::ActiveCustomers => input.active_customers as f64,
            Self::MonthlyRevenue => input.monthly_revenue,
        }
    }

    fn benchmark_from(self, benchmarks: &StageBenchmarks) -> f64 {
        match self {
            Self::TeamSize => benchmarks.team_size,
            Self::ActiveCustomers => benchmarks.active_customers,
            Self::MonthlyRevenue => benchmarks.monthly_revenue,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TeamSize => write!(f, "Team Size"),
            Self::ActiveCustomers => write!(f, "Active Customers"),
            Self::MonthlyRevenue => write!(f, "Monthly Revenue"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub stage: Stage,
    pub metric: Metric,
    pub your_value: f64,
    pub benchmark_value: f64,
    pub percentile: u8,
}

pub fn benchmarks_for(stage: Stage) -> StageBenchmarks {
    match stage {
        Stage::PreSeed => StageBenchmarks {
            team_size: 3.0,
            active_customers: 10.0,
            monthly_revenue: 1_000.0,
        },
        Stage::Seed => StageBenchmarks {
            team_size: 8.0,
            active_customers: 100.0,
            monthly_revenue: 10_000.0,
        },
        Stage::SeriesA => StageBenchmarks {
            team_size: 25.0,
            active_customers: 1_000.0,
            monthly_revenue: 100_000.0,
        },
        Stage::Growth => StageBenchmarks {
            team_size: 100.0,
            active_customers: 10_000.0,
            monthly_revenue: 1_000_000.0,
        },
    }
}

/// Buckets `value / benchmark` into a percentile tier. A zero benchmark
/// cannot be divided by, so any positive value against it lands at 75.
pub fn calculate_percentile(value: f64, benchmark: f64) -> u8 {
    if benchmark == 0.0 {
        return if value > 0.0 { 75 } else { 50 };
    }

    let ratio = value / benchmark;
    if ratio >= 2.0 {
        90
    } else if ratio >= 1.5 {
        80
    } else if ratio >= 1.2 {
        70
    } else if ratio >= 1.0 {
        60
    } else if ratio >= 0.8 {
        50
    } else {
        40
    }
}

pub fn compare(input: &StageDetectionInput, stage: Stage) -> Vec<BenchmarkComparison> {
    let benchmarks = benchmarks_for(stage);

    Metric::ALL
        .into_iter()
        .map(|metric| {
            let your_value = metric.value_from(input);
            let benchmark_value = metric.benchmark_from(&benchmarks);
            BenchmarkComparison {
                stage,
                metric,
                your_value,
                benchmark_value,
                percentile: calculate_percentile(your_value, benchmark_value),
            }
        })
        .collect()
}
