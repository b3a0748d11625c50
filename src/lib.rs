//! FI/RE dashboard API: FIRE timeline, single-investment and portfolio
//! projections behind a small HTTP surface.

pub mod api;
pub mod core;
