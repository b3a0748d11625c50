use std::collections::{BTreeMap, HashMap};

use super::error::ProjectionError;
use super::types::{
    FireInput, FireMetrics, FireYearSnapshot, InvestmentProjectionInput,
    InvestmentProjectionResult, InvestmentYearSnapshot, NamedInvestmentResult, PortfolioHolding,
    PortfolioProjectionInput, PortfolioProjectionResult, PortfolioYearEntry,
};

/// Hard cap on the FIRE compounding loop, so that targets that can never be
/// reached (negative returns, no contributions) still terminate.
const MAX_PROJECTION_YEARS: u32 = 100;

/// Display name used for holdings that arrive without one.
const DEFAULT_HOLDING_NAME: &str = "Investment";

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Computes the FIRE target and the year-by-year path to reach it.
///
/// Each recorded year carries the start-of-year balance; growth is computed on
/// that pre-growth balance and contributions are added after growth. The loop
/// stops when the balance reaches the target or after [`MAX_PROJECTION_YEARS`]
/// years, then a terminal snapshot with the post-loop balance and zero flows
/// marks the target-reached state.
pub fn calculate_fire(input: &FireInput) -> Result<FireMetrics, ProjectionError> {
    if input.withdrawal_rate == 0.0 {
        return Err(ProjectionError::InvalidRate);
    }

    let fire_number = input.annual_expenses / (input.withdrawal_rate / 100.0);
    let monthly_savings = input.annual_income * (input.savings_rate / 100.0) / 12.0;
    let annual_savings = monthly_savings * 12.0;
    let annual_return = input.expected_return / 100.0;

    let mut yearly_projections = Vec::new();
    let mut balance = input.current_savings;
    let mut years_to_fire: u32 = 0;

    while balance < fire_number && years_to_fire < MAX_PROJECTION_YEARS {
        yearly_projections.push(FireYearSnapshot {
            year: years_to_fire,
            age: input.current_age + years_to_fire,
            balance: round2(balance),
            contributions: round2(annual_savings),
            investment_growth: round2(balance * annual_return),
        });
        balance = balance * (1.0 + annual_return) + annual_savings;
        years_to_fire += 1;
    }

    yearly_projections.push(FireYearSnapshot {
        year: years_to_fire,
        age: input.current_age + years_to_fire,
        balance: round2(balance),
        contributions: 0.0,
        investment_growth: 0.0,
    });

    Ok(FireMetrics {
        fire_number: round2(fire_number),
        years_to_fire: round1(f64::from(years_to_fire)),
        retirement_age_projection: round1(f64::from(input.current_age + years_to_fire)),
        monthly_savings: round2(monthly_savings),
        total_at_retirement: round2(balance),
        safe_withdrawal_amount: round2(balance * (input.withdrawal_rate / 100.0)),
        yearly_projections,
    })
}

/// Advances one investment year: twelve months of compounding at
/// `monthly_rate` with `monthly_contribution` added after each month's growth.
fn advance_one_year(
    balance: f64,
    contributions: f64,
    monthly_rate: f64,
    monthly_contribution: f64,
) -> (f64, f64) {
    (0..12).fold((balance, contributions), |(balance, contributions), _| {
        (
            balance * (1.0 + monthly_rate) + monthly_contribution,
            contributions + monthly_contribution,
        )
    })
}

/// Compounds a single investment monthly over the requested horizon and
/// returns yearly checkpoints plus CAGR.
///
/// Unlike [`calculate_fire`]'s annual compounding, twelve monthly steps are
/// concealed inside each annual checkpoint. Cumulative contributions start at
/// `current_value`, so cumulative growth is zero at year 0.
pub fn project_investment(
    input: &InvestmentProjectionInput,
) -> Result<InvestmentProjectionResult, ProjectionError> {
    if input.projection_years < 0 {
        return Err(ProjectionError::InvalidHorizon(input.projection_years));
    }

    let monthly_rate = input.expected_annual_return / 100.0 / 12.0;
    let mut yearly_projections = Vec::with_capacity(input.projection_years as usize + 1);
    let mut balance = input.current_value;
    let mut contributions = input.current_value;

    for year in 0..=input.projection_years {
        yearly_projections.push(InvestmentYearSnapshot {
            year,
            balance: round2(balance),
            contributions: round2(contributions),
            growth: round2(balance - contributions),
        });
        if year < input.projection_years {
            (balance, contributions) = advance_one_year(
                balance,
                contributions,
                monthly_rate,
                input.monthly_contribution,
            );
        }
    }

    let cagr = investment_cagr(
        input.current_value,
        balance,
        contributions,
        input.projection_years,
    );

    Ok(InvestmentProjectionResult {
        yearly_projections,
        final_value: round2(balance),
        total_contributions: round2(contributions),
        total_growth: round2(balance - contributions),
        cagr: round2(cagr),
    })
}

fn investment_cagr(initial: f64, final_value: f64, total_contributions: f64, years: i32) -> f64 {
    if years <= 0 {
        return 0.0;
    }
    let years = f64::from(years);
    if initial > 0.0 {
        ((final_value / initial).powf(1.0 / years) - 1.0) * 100.0
    } else if total_contributions > 0.0 {
        // Not a true CAGR: with no starting balance, the average annual
        // contribution stands in as the base. Kept as-is so existing clients
        // see unchanged numbers; a revised formula is an open item.
        let base = total_contributions / years;
        ((final_value / base).powf(1.0 / years) - 1.0) * 100.0
    } else {
        0.0
    }
}

/// Projects every holding independently over the shared horizon, then aligns
/// and sums their yearly balances into a combined trajectory.
///
/// Holding names are resolved before aggregation: blank or absent names fall
/// back to [`DEFAULT_HOLDING_NAME`], and duplicates get an ordinal suffix
/// (`"VTI"`, `"VTI #2"`, ...) so no balance entry silently overwrites another.
/// A failing holding fails the whole portfolio; partial totals would be
/// meaningless.
pub fn project_portfolio(
    input: &PortfolioProjectionInput,
) -> Result<PortfolioProjectionResult, ProjectionError> {
    if input.projection_years < 0 {
        return Err(ProjectionError::InvalidHorizon(input.projection_years));
    }

    let mut per_investment = Vec::with_capacity(input.investments.len());
    let mut name_counts: HashMap<String, u32> = HashMap::new();

    for holding in &input.investments {
        let result = project_investment(&InvestmentProjectionInput {
            current_value: holding.current_value,
            monthly_contribution: holding.monthly_contribution,
            expected_annual_return: holding.expected_annual_return,
            projection_years: input.projection_years,
        })?;
        per_investment.push(NamedInvestmentResult {
            name: resolve_holding_name(holding, &mut name_counts),
            result,
        });
    }

    let mut yearly_projections = Vec::with_capacity(input.projection_years as usize + 1);
    for year in 0..=input.projection_years {
        let mut total_balance = 0.0;
        let mut balances = BTreeMap::new();
        for investment in &per_investment {
            // Holdings all share the horizon, but tolerate shorter series.
            if let Some(snapshot) = investment.result.yearly_projections.get(year as usize) {
                total_balance += snapshot.balance;
                balances.insert(investment.name.clone(), snapshot.balance);
            }
        }
        yearly_projections.push(PortfolioYearEntry {
            year,
            total_balance: round2(total_balance),
            balances,
        });
    }

    let initial_total: f64 = input.investments.iter().map(|h| h.current_value).sum();
    let final_total_value: f64 = per_investment.iter().map(|i| i.result.final_value).sum();
    let total_contributions: f64 = per_investment
        .iter()
        .map(|i| i.result.total_contributions)
        .sum();

    let portfolio_cagr = if initial_total > 0.0 && input.projection_years > 0 {
        let years = f64::from(input.projection_years);
        ((final_total_value / initial_total).powf(1.0 / years) - 1.0) * 100.0
    } else {
        0.0
    };

    Ok(PortfolioProjectionResult {
        yearly_projections,
        final_total_value: round2(final_total_value),
        total_contributions: round2(total_contributions),
        total_growth: round2(final_total_value - total_contributions),
        portfolio_cagr: round2(portfolio_cagr),
        per_investment,
    })
}

fn resolve_holding_name(holding: &PortfolioHolding, counts: &mut HashMap<String, u32>) -> String {
    let base = match holding.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_HOLDING_NAME.to_string(),
    };
    let seen = counts.entry(base.clone()).or_insert(0);
    *seen += 1;
    if *seen == 1 {
        base
    } else {
        format!("{base} #{seen}")
    }
}
