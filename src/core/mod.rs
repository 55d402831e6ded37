mod engine;
mod solver;
mod types;

pub use engine::{MAX_HORIZON_YEARS, period_rate, project};
pub use solver::{present_value, sinking_fund_payment, solve_contribution, total_periods};
pub use types::{
    CalcError, ContributionFrequency, ContributionMode, ProjectionRequest, ProjectionResult,
    TargetSolveRequest, TargetSolveResult,
};
