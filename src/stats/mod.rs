//! Stats module - Regional aggregation

mod calculator;

pub use calculator::{RegionalMean, StatsCalculator};
