use crate::utils::fs::is_json_file;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Startup metrics as submitted. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialInput {
    pub company_name: Option<String>,
    pub founded_year: Option<i32>,
    pub team_size: Option<u32>,
    pub monthly_revenue: Option<f64>,
    pub total_funding: Option<f64>,
    pub burn_rate: Option<f64>,
    pub has_live_product: Option<bool>,
    pub active_customers: Option<u64>,
    pub market_size: Option<f64>,
    pub monthly_growth_rate: Option<f64>,
    pub customer_acquisition_cost: Option<f64>,
    pub lifetime_value: Option<f64>,
    pub has_paid_customers: Option<bool>,
    pub has_recurring_revenue: Option<bool>,
    pub is_operationally_profitable: Option<bool>,
    pub has_scalable_business_model: Option<bool>,
}

/// Startup metrics with every field filled in. Scorers only ever see this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageDetectionInput {
    pub company_name: String,
    pub founded_year: i32,
    pub team_size: u32,
    pub monthly_revenue: f64,
    pub total_funding: f64,
    pub burn_rate: f64,
    pub has_live_product: bool,
    pub active_customers: u64,
    pub market_size: f64,
    /// Percent per month, e.g. `15.0` for 15%.
    pub monthly_growth_rate: f64,
    pub customer_acquisition_cost: f64,
    pub lifetime_value: f64,
    pub has_paid_customers: bool,
    pub has_recurring_revenue: bool,
    pub is_operationally_profitable: bool,
    pub has_scalable_business_model: bool,
}

/// Fills every absent field with zero, `false` or an empty name.
///
/// Values are not range checked: negative revenue or a founding year in the
/// future pass through untouched.
pub fn normalize(partial: PartialInput) -> StageDetectionInput {
    StageDetectionInput {
        company_name: partial.company_name.unwrap_or_default(),
        founded_year: partial.founded_year.unwrap_or(0),
        team_size: partial.team_size.unwrap_or(0),
        monthly_revenue: partial.monthly_revenue.unwrap_or(0.0),
        total_funding: partial.total_funding.unwrap_or(0.0),
        burn_rate: partial.burn_rate.unwrap_or(0.0),
        has_live_product: partial.has_live_product.unwrap_or(false),
        active_customers: partial.active_customers.unwrap_or(0),
        market_size: partial.market_size.unwrap_or(0.0),
        monthly_growth_rate: partial.monthly_growth_rate.unwrap_or(0.0),
        customer_acquisition_cost: partial.customer_acquisition_cost.unwrap_or(0.0),
        lifetime_value: partial.lifetime_value.unwrap_or(0.0),
        has_paid_customers: partial.has_paid_customers.unwrap_or(false),
        has_recurring_revenue: partial.has_recurring_revenue.unwrap_or(false),
        is_operationally_profitable: partial.is_operationally_profitable.unwrap_or(false),
        has_scalable_business_model: partial.has_scalable_business_model.unwrap_or(false),
    }
}

/// Checks a submission before it reaches the engine.
pub fn validate_submission(partial: &PartialInput) -> Result<()> {
    let name_present = partial
        .company_name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if !name_present {
        bail!("company_name is required");
    }

    let numbers = [
        ("monthly_revenue", partial.monthly_revenue),
        ("total_funding", partial.total_funding),
        ("burn_rate", partial.burn_rate),
        ("market_size", partial.market_size),
        ("monthly_growth_rate", partial.monthly_growth_rate),
        ("customer_acquisition_cost", partial.customer_acquisition_cost),
        ("lifetime_value", partial.lifetime_value),
    ];
    for (field, value) in numbers {
        match value {
            Some(value) if !value.is_finite() => {
                bail!("{} must be a finite number, got {}", field, value)
            }
            _ => {}
        }
    }

    Ok(())
}

/// Reads a submission file. `.json` files are parsed as JSON, anything else
/// as TOML.
pub fn read_submission(path: &Path) -> Result<PartialInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading submission file {}", path.display()))?;

    let partial = if is_json_file(path) {
        serde_json::from_str::<PartialInput>(&content)
            .with_context(|| format!("failed parsing submission file {}", path.display()))?
    } else {
        toml::from_str::<PartialInput>(&content)
            .with_context(|| format!("failed parsing submission file {}", path.display()))?
    };

    Ok(partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_fills_missing_fields() {
        let input = normalize(PartialInput {
            company_name: Some("Acme".to_string()),
            team_size: Some(4),
            ..PartialInput::default()
        });

        assert_eq!(input.company_name, "Acme");
        assert_eq!(input.team_size, 4);
        assert_eq!(input.monthly_revenue, 0.0);
        assert_eq!(input.active_customers, 0);
        assert!(!input.has_live_product);
        assert!(!input.is_operationally_profitable);
    }

    #[test]
    fn normalize_keeps_out_of_range_values() {
        let input = normalize(PartialInput {
            founded_year: Some(2999),
            monthly_revenue: Some(-500.0),
            monthly_growth_rate: Some(400.0),
            ..PartialInput::default()
        });

        assert_eq!(input.founded_year, 2999);
        assert_eq!(input.monthly_revenue, -500.0);
        assert_eq!(input.monthly_growth_rate, 400.0);
    }

    #[test]
    fn validation_requires_company_name() {
        let missing = PartialInput::default();
        assert!(validate_submission(&missing).is_err());

        let blank = PartialInput {
            company_name: Some("   ".to_string()),
            ..PartialInput::default()
        };
        assert!(validate_submission(&blank).is_err());

        let named = PartialInput {
            company_name: Some("Acme".to_string()),
            ..PartialInput::default()
        };
        assert!(validate_submission(&named).is_ok());
    }

    #[test]
    fn validation_rejects_non_finite_numbers() {
        let partial = PartialInput {
            company_name: Some("Acme".to_string()),
            market_size: Some(f64::NAN),
            ..PartialInput::default()
        };
        let err = validate_submission(&partial).unwrap_err();
        assert!(err.to_string().contains("market_size"));
    }

    #[test]
    fn reads_toml_and_json_submissions() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("acme.toml");
        fs::write(
            &toml_path,
            r#"
company_name = "Acme"
team_size = 3
has_live_product = true
monthly_revenue = 1200.5
"#,
        )
        .unwrap();
        let from_toml = read_submission(&toml_path).unwrap();
        assert_eq!(from_toml.company_name.as_deref(), Some("Acme"));
        assert_eq!(from_toml.team_size, Some(3));
        assert_eq!(from_toml.has_live_product, Some(true));
        assert_eq!(from_toml.active_customers, None);

        let json_path = dir.path().join("acme.JSON");
        fs::write(
            &json_path,
            r#"{"company_name": "Acme", "active_customers": 42, "has_paid_customers": true}"#,
        )
        .unwrap();
        let from_json = read_submission(&json_path).unwrap();
        assert_eq!(from_json.active_customers, Some(42));
        assert_eq!(from_json.has_paid_customers, Some(true));
        assert_eq!(from_json.team_size, None);
    }

    #[test]
    fn demo_submission_is_complete() {
        let partial: PartialInput = toml::from_str(include_str!("../../demos/acme.toml")).unwrap();
        assert!(validate_submission(&partial).is_ok());
        assert_eq!(partial.has_scalable_business_model, Some(true));
        assert_eq!(partial.lifetime_value, Some(1200.0));
    }

    #[test]
    fn unreadable_submission_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = read_submission(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing.toml"));
    }
}
