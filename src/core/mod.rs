mod engine;
mod error;
mod types;

pub use engine::{calculate_fire, project_investment, project_portfolio};
pub use error::ProjectionError;
pub use types::{
    FireInput, FireMetrics, FireYearSnapshot, InvestmentProjectionInput,
    InvestmentProjectionResult, InvestmentYearSnapshot, NamedInvestmentResult, PortfolioHolding,
    PortfolioProjectionInput, PortfolioProjectionResult, PortfolioYearEntry,
};
