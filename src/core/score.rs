use crate::core::input::StageDetectionInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// LTV/CAC ratio at which the growth scorer awards its full unit-economics
/// points.
pub const LTV_CAC_STANDARD_THRESHOLD: f64 = 3.0;

/// Stricter LTV/CAC ratio used by the older growth formula.
pub const LTV_CAC_STRICT_THRESHOLD: f64 = 5.0;

const MAX_SCORE: f64 = 100.0;
const CONFIDENCE_BASE: f64 = 60.0;
const MAX_CONFIDENCE: f64 = 95.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    PreSeed,
    Seed,
    SeriesA,
    Growth,
}

impl Stage {
    /// Enumeration order. Also the tie-break order for [`select_stage`].
    pub const ALL: [Stage; 4] = [Stage::PreSeed, Stage::Seed, Stage::SeriesA, Stage::Growth];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreSeed => "PRE_SEED",
            Self::Seed => "SEED",
            Self::SeriesA => "SERIES_A",
            Self::Growth => "GROWTH",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreSeed => write!(f, "Pre-Seed"),
            Self::Seed => write!(f, "Seed"),
            Self::SeriesA => write!(f, "Series A"),
            Self::Growth => write!(f, "Growth"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    pub ltv_cac_threshold: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            ltv_cac_threshold: LTV_CAC_STANDARD_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageScores {
    pub pre_seed: f64,
    pub seed: f64,
    pub series_a: f64,
    pub growth: f64,
}

impl StageScores {
    pub fn get(&self, stage: Stage) -> f64 {
        match stage {
            Stage::PreSeed => self.pre_seed,
            Stage::Seed => self.seed,
            Stage::SeriesA => self.series_a,
            Stage::Growth => self.growth,
        }
    }
}

pub fn calculate_pre_seed_score(input: &StageDetectionInput) -> f64 {
    let mut score: f64 = 0.0;

    score += (f64::from(input.team_size) / 5.0).min(1.0) * 35.0;
    score += if input.has_live_product { 25.0 } else { 15.0 };
    score += if input.active_customers > 10 { 20.0 } else { 10.0 };
    score += if input.total_funding > 0.0 { 10.0 } else { 5.0 };
    score += if input.market_size > 100_000.0 { 10.0 } else { 5.0 };

    score.min(MAX_SCORE)
}

pub fn calculate_seed_score(input: &StageDetectionInput) -> f64 {
    let mut score: f64 = 0.0;

    score += if input.has_paid_customers { 30.0 } else { 15.0 };
    score += if input.monthly_revenue > 1_000.0 { 25.0 } else { 10.0 };
    score += if input.has_recurring_revenue { 20.0 } else { 10.0 };
    score += (input.monthly_growth_rate / 20.0).min(1.0) * 15.0;
    score += if input.active_customers > 100 { 10.0 } else { 5.0 };

    score.min(MAX_SCORE)
}

pub fn calculate_series_a_score(input: &StageDetectionInput) -> f64 {
    let mut score: f64 = 0.0;

    score += if input.monthly_revenue >= 50_000.0 {
        35.0
    } else if input.monthly_revenue >= 20_000.0 {
        20.0
    } else {
        0.0
    };
    score += if input.has_scalable_business_model { 25.0 } else { 10.0 };
    score += if input.market_size >= 1_000_000.0 { 20.0 } else { 10.0 };
    score += if input.monthly_growth_rate >= 15.0 { 10.0 } else { 5.0 };
    score += if input.total_funding >= 500_000.0 { 10.0 } else { 5.0 };

    score.min(MAX_SCORE)
}

pub fn calculate_growth_score(input: &StageDetectionInput, ltv_cac_threshold: f64) -> f64 {
    let mut score: f64 = 0.0;

    score += if input.is_operationally_profitable { 40.0 } else { 10.0 };
    score += if input.active_customers > 1_000 { 25.0 } else { 15.0 };
    score += if input.monthly_revenue >= 200_000.0 { 20.0 } else { 5.0 };

    let healthy_unit_economics = input.lifetime_value > 0.0
        && input.customer_acquisition_cost > 0.0
        && input.lifetime_value / input.customer_acquisition_cost >= ltv_cac_threshold;
    score += if healthy_unit_economics { 15.0 } else { 5.0 };

    score.min(MAX_SCORE)
}

pub fn score_all(input: &StageDetectionInput, params: &ScoringParams) -> StageScores {
    StageScores {
        pre_seed: calculate_pre_seed_score(input),
        seed: calculate_seed_score(input),
        series_a: calculate_series_a_score(input),
        growth: calculate_growth_score(input, params.ltv_cac_threshold),
    }
}

/// Picks the highest scoring stage. A later stage only replaces the current
/// pick when it scores strictly higher, so ties resolve to the earliest
/// stage in [`Stage::ALL`].
pub fn select_stage(scores: &StageScores) -> (Stage, f64) {
    let mut best = Stage::PreSeed;
    let mut best_score = scores.get(best);

    for stage in Stage::ALL.into_iter().skip(1) {
        let score = scores.get(stage);
        if score > best_score {
            best = stage;
            best_score = score;
        }
    }

    (best, best_score)
}

/// Saturates at 95 for any winning score of 35 or more.
pub fn confidence_for(score: f64) -> f64 {
    (CONFIDENCE_BASE + score).clamp(0.0, MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn early_team() -> StageDetectionInput {
        StageDetectionInput {
            company_name: "Acme".to_string(),
            team_size: 3,
            has_live_product: true,
            active_customers: 5,
            ..StageDetectionInput::default()
        }
    }

    fn series_a_company() -> StageDetectionInput {
        StageDetectionInput {
            company_name: "Scaleup".to_string(),
            monthly_revenue: 60_000.0,
            has_scalable_business_model: true,
            market_size: 2_000_000.0,
            monthly_growth_rate: 20.0,
            total_funding: 600_000.0,
            ..StageDetectionInput::default()
        }
    }

    #[test]
    fn pre_seed_score_for_small_team() {
        let input = early_team();
        assert!((calculate_pre_seed_score(&input) - 66.0).abs() < 1e-9);
        assert!(calculate_seed_score(&input) < calculate_pre_seed_score(&input));

        let (stage, _) = select_stage(&score_all(&input, &ScoringParams::default()));
        assert_eq!(stage, Stage::PreSeed);
    }

    #[test]
    fn series_a_score_maxes_out() {
        let input = series_a_company();
        assert_eq!(calculate_series_a_score(&input), 100.0);

        let (stage, score) = select_stage(&score_all(&input, &ScoringParams::default()));
        assert_eq!(stage, Stage::SeriesA);
        assert_eq!(confidence_for(score), 95.0);
    }

    #[test]
    fn series_a_revenue_tiers() {
        let mut input = StageDetectionInput::default();
        let base = calculate_series_a_score(&input);

        input.monthly_revenue = 20_000.0;
        assert_eq!(calculate_series_a_score(&input) - base, 20.0);

        input.monthly_revenue = 50_000.0;
        assert_eq!(calculate_series_a_score(&input) - base, 35.0);
    }

    #[test]
    fn late_stage_scorers_start_from_their_floor() {
        let input = StageDetectionInput::default();
        assert_eq!(calculate_series_a_score(&input), 0.0 + 10.0 + 10.0 + 5.0 + 5.0);
        assert_eq!(
            calculate_growth_score(&input, LTV_CAC_STANDARD_THRESHOLD),
            10.0 + 15.0 + 5.0 + 5.0
        );
    }

    #[test]
    fn growth_rate_contribution_is_capped() {
        let mut input = StageDetectionInput::default();
        input.monthly_growth_rate = 10.0;
        let half = calculate_seed_score(&input);
        input.monthly_growth_rate = 500.0;
        let capped = calculate_seed_score(&input);

        assert!((capped - half - 7.5).abs() < 1e-9);
        assert_eq!(capped, 15.0 + 10.0 + 10.0 + 15.0 + 5.0);
    }

    #[test]
    fn ltv_cac_threshold_changes_growth_score() {
        let input = StageDetectionInput {
            lifetime_value: 4_000.0,
            customer_acquisition_cost: 1_000.0,
            ..StageDetectionInput::default()
        };

        let standard = calculate_growth_score(&input, LTV_CAC_STANDARD_THRESHOLD);
        let strict = calculate_growth_score(&input, LTV_CAC_STRICT_THRESHOLD);
        assert_eq!(standard, 10.0 + 15.0 + 5.0 + 15.0);
        assert_eq!(strict, 10.0 + 15.0 + 5.0 + 5.0);
    }

    #[test]
    fn ltv_cac_needs_both_values() {
        let input = StageDetectionInput {
            lifetime_value: 4_000.0,
            customer_acquisition_cost: 0.0,
            ..StageDetectionInput::default()
        };
        assert_eq!(
            calculate_growth_score(&input, LTV_CAC_STANDARD_THRESHOLD),
            10.0 + 15.0 + 5.0 + 5.0
        );
    }

    #[test]
    fn ties_resolve_to_earliest_stage() {
        let scores = StageScores {
            pre_seed: 50.0,
            seed: 70.0,
            series_a: 70.0,
            growth: 70.0,
        };
        assert_eq!(select_stage(&scores), (Stage::Seed, 70.0));

        let flat = StageScores {
            pre_seed: 40.0,
            seed: 40.0,
            series_a: 40.0,
            growth: 40.0,
        };
        assert_eq!(select_stage(&flat).0, Stage::PreSeed);
    }

    #[test]
    fn confidence_offsets_and_saturates() {
        assert_eq!(confidence_for(0.0), 60.0);
        assert_eq!(confidence_for(20.0), 80.0);
        assert_eq!(confidence_for(35.0), 95.0);
        assert_eq!(confidence_for(100.0), 95.0);
    }

    #[test]
    fn stage_labels() {
        assert_eq!(Stage::SeriesA.to_string(), "Series A");
        assert_eq!(Stage::PreSeed.as_str(), "PRE_SEED");
        assert_eq!(
            serde_json::to_string(&Stage::SeriesA).unwrap(),
            "\"SERIES_A\""
        );
    }

    fn arb_input() -> impl Strategy<Value = StageDetectionInput> {
        (
            (0u32..500, 0.0f64..1_000_000.0, 0.0f64..50_000_000.0, any::<bool>()),
            (0u64..100_000, 0.0f64..1e10, -50.0f64..200.0),
            (0.0f64..10_000.0, 0.0f64..100_000.0),
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
        )
            .prop_map(
                |(
                    (team_size, monthly_revenue, total_funding, has_live_product),
                    (active_customers, market_size, monthly_growth_rate),
                    (customer_acquisition_cost, lifetime_value),
                    (paid, recurring, profitable, scalable),
                )| StageDetectionInput {
                    company_name: "Prop".to_string(),
                    founded_year: 2020,
                    team_size,
                    monthly_revenue,
                    total_funding,
                    burn_rate: 0.0,
                    has_live_product,
                    active_customers,
                    market_size,
                    monthly_growth_rate,
                    customer_acquisition_cost,
                    lifetime_value,
                    has_paid_customers: paid,
                    has_recurring_revenue: recurring,
                    is_operationally_profitable: profitable,
                    has_scalable_business_model: scalable,
                },
            )
    }

    proptest! {
        #[test]
        fn scores_never_exceed_max(input in arb_input()) {
            let scores = score_all(&input, &ScoringParams::default());
            for stage in Stage::ALL {
                prop_assert!(scores.get(stage) <= MAX_SCORE);
            }
        }

        #[test]
        fn more_revenue_never_lowers_late_stage_scores(
            input in arb_input(),
            extra in 0.0f64..1_000_000.0,
        ) {
            let mut richer = input.clone();
            richer.monthly_revenue += extra;

            prop_assert!(calculate_series_a_score(&richer) >= calculate_series_a_score(&input));
            prop_assert!(
                calculate_growth_score(&richer, LTV_CAC_STANDARD_THRESHOLD)
                    >= calculate_growth_score(&input, LTV_CAC_STANDARD_THRESHOLD)
            );
        }

        #[test]
        fn selected_stage_has_maximum_score(input in arb_input()) {
            let scores = score_all(&input, &ScoringParams::default());
            let (stage, score) = select_stage(&scores);
            prop_assert_eq!(score, scores.get(stage));
            for other in Stage::ALL {
                prop_assert!(scores.get(other) <= score);
            }
        }
    }
}
