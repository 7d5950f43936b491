//! Fixed explanation text per stage. Two companies landing in the same stage
//! get the same text regardless of their numbers.

use crate::core::score::Stage;

pub fn reasons_for(stage: Stage) -> &'static [&'static str] {
    match stage {
        Stage::PreSeed => &[
            "Early team still validating the core idea",
            "Product and customer base are at an initial stage",
            "Funding so far is limited or self-financed",
        ],
        Stage::Seed => &[
            "Paying customers show early product-market fit",
            "Revenue is starting to recur month over month",
            "Growth rate suggests traction beyond the founding circle",
        ],
        Stage::SeriesA => &[
            "Revenue has reached a level that supports scaling",
            "Business model is built to scale with demand",
            "Addressable market is large enough for venture returns",
        ],
        Stage::Growth => &[
            "Operations are profitable or close to it",
            "Customer base has moved well past early adopters",
            "Unit economics support aggressive expansion",
        ],
    }
}

pub fn recommendations_for(stage: Stage) -> &'static [&'static str] {
    match stage {
        Stage::PreSeed => &[
            "Ship a minimum viable product and put it in front of users",
            "Interview potential customers to confirm the problem",
            "Line up angel investors or an accelerator program",
        ],
        Stage::Seed => &[
            "Convert early users into paying, recurring customers",
            "Track acquisition cost and lifetime value from day one",
            "Hire for the roles that unblock growth",
        ],
        Stage::SeriesA => &[
            "Build a repeatable sales and marketing engine",
            "Invest in infrastructure that holds up at ten times the load",
            "Formalize reporting so investors can follow key metrics",
        ],
        Stage::Growth => &[
            "Expand into adjacent markets or regions",
            "Protect margins while scaling headcount",
        ],
    }
}

pub fn milestones_for(stage: Stage) -> &'static [&'static str] {
    match stage {
        Stage::PreSeed => &[
            "Launch the first version of the product",
            "Sign the first ten active customers",
        ],
        Stage::Seed => &[
            "Reach 1,000 in monthly recurring revenue",
            "Pass 100 active customers",
            "Sustain 20% month-over-month growth",
        ],
        Stage::SeriesA => &[
            "Reach 200,000 in monthly revenue",
            "Become operationally profitable",
            "Pass 1,000 active customers",
        ],
        Stage::Growth => &[
            "Hold an LTV to CAC ratio above 3",
            "Prepare for a late-stage round or exit",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stage_has_two_or_three_entries() {
        for stage in Stage::ALL {
            for table in [
                reasons_for(stage),
                recommendations_for(stage),
                milestones_for(stage),
            ] {
                assert!((2..=3).contains(&table.len()), "{stage}: {table:?}");
            }
        }
    }

    #[test]
    fn stages_do_not_share_reasons() {
        assert_ne!(reasons_for(Stage::PreSeed), reasons_for(Stage::Growth));
        assert_ne!(reasons_for(Stage::Seed), reasons_for(Stage::SeriesA));
    }
}
