use super::engine::{period_rate, round_to, validate_annual_rate};
use super::types::{CalcError, ContributionMode, TargetSolveRequest, TargetSolveResult};

const RATE_EPSILON: f64 = 1e-12;

/// Solves for the contribution that reaches `target_capital` after
/// `horizon_months`.
///
/// `Lump` returns the single deposit needed today (present value). Every other
/// mode returns the constant end-of-period payment from the sinking-fund
/// factor at the period-equivalent rate.
pub fn solve_contribution(request: &TargetSolveRequest) -> Result<TargetSolveResult, CalcError> {
    validate_request(request)?;

    let periods_per_year = request.contribution_mode.periods_per_year();
    let rate = period_rate(request.annual_rate, periods_per_year);
    let periods = total_periods(request.horizon_months, request.contribution_mode);

    let amount = match request.contribution_mode {
        ContributionMode::Lump => present_value(request.target_capital, rate, periods)?,
        _ => sinking_fund_payment(request.target_capital, rate, periods)?,
    };

    Ok(TargetSolveResult {
        periodic_amount: round_to(amount, 3),
        target_capital: round_to(request.target_capital, 2),
    })
}

/// Number of contribution periods in the horizon. May be fractional when the
/// horizon is not a whole number of periods.
pub fn total_periods(horizon_months: u32, mode: ContributionMode) -> f64 {
    horizon_months as f64 / 12.0 * mode.periods_per_year() as f64
}

fn validate_period_rate(rate: f64) -> Result<(), CalcError> {
    if !rate.is_finite() || rate <= -1.0 {
        return Err(CalcError::invalid("rate must be finite and > -1"));
    }
    Ok(())
}

/// Amount to invest now so that it grows to `target` after `periods` periods.
pub fn present_value(target: f64, rate: f64, periods: f64) -> Result<f64, CalcError> {
    validate_period_rate(rate)?;
    if periods == 0.0 {
        return Ok(target);
    }
    Ok(target / (1.0 + rate).powf(periods))
}

/// Ordinary-annuity payment that accumulates to `target` over `periods`.
pub fn sinking_fund_payment(target: f64, rate: f64, periods: f64) -> Result<f64, CalcError> {
    validate_period_rate(rate)?;
    if !periods.is_finite() || periods <= 0.0 {
        return Err(CalcError::invalid(
            "annuity needs at least one contribution period",
        ));
    }
    if rate.abs() < RATE_EPSILON {
        return Ok(target / periods);
    }

    let denom = (1.0 + rate).powf(periods) - 1.0;
    if denom.abs() < RATE_EPSILON {
        return Ok(target / periods);
    }
    Ok(target * rate / denom)
}

fn validate_request(request: &TargetSolveRequest) -> Result<(), CalcError> {
    if !request.target_capital.is_finite() || request.target_capital < 0.0 {
        return Err(CalcError::invalid("target_capital must be >= 0"));
    }
    if request.horizon_months == 0 {
        return Err(CalcError::invalid("horizon_months must be > 0"));
    }
    validate_annual_rate(request.annual_rate)
}
