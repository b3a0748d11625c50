use thiserror::Error;

/// Failures a projection can produce. Any real-valued rate or amount is
/// mathematically acceptable, so the taxonomy stays small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("withdrawal_rate must be greater than zero")]
    InvalidRate,
    #[error("projection_years must not be negative (got {0})")]
    InvalidHorizon(i32),
}
