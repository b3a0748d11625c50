use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current finances plus savings/return/withdrawal assumptions for a FIRE
/// timeline calculation. All rates are percentages (e.g. 4 for 4%).
#[derive(Debug, Clone, Deserialize)]
pub struct FireInput {
    pub current_age: u32,
    /// Desired retirement age. Informational only; the projection derives its
    /// own `retirement_age_projection` from the compounding loop.
    pub retirement_age: u32,
    pub current_savings: f64,
    pub annual_income: f64,
    pub annual_expenses: f64,
    pub savings_rate: f64,
    pub expected_return: f64,
    pub withdrawal_rate: f64,
}

/// One in-progress year on the path to the FIRE target. `balance` is the
/// start-of-year balance, before that year's growth and contributions.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FireYearSnapshot {
    pub year: u32,
    pub age: u32,
    pub balance: f64,
    pub contributions: f64,
    pub investment_growth: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FireMetrics {
    pub fire_number: f64,
    pub years_to_fire: f64,
    pub retirement_age_projection: f64,
    pub monthly_savings: f64,
    pub total_at_retirement: f64,
    pub safe_withdrawal_amount: f64,
    pub yearly_projections: Vec<FireYearSnapshot>,
}

/// A single investment to compound monthly over a fixed horizon.
#[derive(Debug, Clone, Deserialize)]
pub struct InvestmentProjectionInput {
    pub current_value: f64,
    pub monthly_contribution: f64,
    pub expected_annual_return: f64,
    pub projection_years: i32,
}

/// Yearly checkpoint of a single-investment projection. `contributions` and
/// `growth` are cumulative; the starting value counts as contributed capital.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InvestmentYearSnapshot {
    pub year: i32,
    pub balance: f64,
    pub contributions: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestmentProjectionResult {
    pub yearly_projections: Vec<InvestmentYearSnapshot>,
    pub final_value: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
    pub cagr: f64,
}

/// One holding in a portfolio projection. The portfolio-wide horizon applies
/// to every holding; `name` falls back to a default when absent or blank.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioHolding {
    #[serde(default)]
    pub name: Option<String>,
    pub current_value: f64,
    pub monthly_contribution: f64,
    pub expected_annual_return: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioProjectionInput {
    pub investments: Vec<PortfolioHolding>,
    pub projection_years: i32,
}

/// One year of the combined portfolio table, with per-holding balances keyed
/// by resolved display name.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioYearEntry {
    pub year: i32,
    pub total_balance: f64,
    pub balances: BTreeMap<String, f64>,
}

/// A holding's own projection result tagged with its resolved display name.
#[derive(Debug, Clone, Serialize)]
pub struct NamedInvestmentResult {
    pub name: String,
    #[serde(flatten)]
    pub result: InvestmentProjectionResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioProjectionResult {
    pub yearly_projections: Vec<PortfolioYearEntry>,
    pub final_total_value: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
    pub portfolio_cagr: f64,
    pub per_investment: Vec<NamedInvestmentResult>,
}
