use super::types::{CalcError, ProjectionRequest, ProjectionResult};

/// Longest projection accepted; keeps the period loop and the result bounded.
pub const MAX_HORIZON_YEARS: u32 = 1_000;

/// Runs the period-by-period accumulation and reports the portfolio value at
/// every year-end, rounded to cents.
///
/// Contributions are credited after the period's growth (end-of-period deposit)
/// and only during the first `contribution_years` years.
pub fn project(request: &ProjectionRequest) -> Result<ProjectionResult, CalcError> {
    validate_request(request)?;

    let periods_per_year = request.contribution_frequency.periods_per_year();
    let growth = 1.0 + period_rate(request.annual_rate, periods_per_year);
    let total_periods = checked_periods(request.horizon_years, periods_per_year)?;
    let contribution_periods = checked_periods(request.contribution_years, periods_per_year)?;

    let mut value = request.initial_capital;
    let mut year_end_values = Vec::with_capacity(request.horizon_years as usize);
    for period in 1..=total_periods {
        value *= growth;
        if period <= contribution_periods {
            value += request.periodic_contribution;
        }
        if period % periods_per_year == 0 {
            year_end_values.push(round_to(value, 2));
        }
    }

    Ok(ProjectionResult { year_end_values })
}

/// Per-period rate that compounds to `annual_rate` over `periods_per_year`
/// periods.
pub fn period_rate(annual_rate: f64, periods_per_year: u32) -> f64 {
    if periods_per_year <= 1 {
        return annual_rate;
    }
    (1.0 + annual_rate).powf(1.0 / periods_per_year as f64) - 1.0
}

fn checked_periods(years: u32, periods_per_year: u32) -> Result<u32, CalcError> {
    years
        .checked_mul(periods_per_year)
        .ok_or_else(|| CalcError::invalid("number of periods overflows"))
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub(crate) fn validate_annual_rate(annual_rate: f64) -> Result<(), CalcError> {
    if !annual_rate.is_finite() || annual_rate <= -1.0 {
        return Err(CalcError::invalid("annual_rate must be finite and > -1"));
    }
    Ok(())
}

fn validate_request(request: &ProjectionRequest) -> Result<(), CalcError> {
    if request.horizon_years == 0 {
        return Err(CalcError::invalid("horizon_years must be > 0"));
    }
    if request.horizon_years > MAX_HORIZON_YEARS {
        return Err(CalcError::invalid(format!(
            "horizon_years must be <= {MAX_HORIZON_YEARS}"
        )));
    }
    if !request.initial_capital.is_finite() || request.initial_capital < 0.0 {
        return Err(CalcError::invalid("initial_capital must be >= 0"));
    }
    if !request.periodic_contribution.is_finite() || request.periodic_contribution < 0.0 {
        return Err(CalcError::invalid("periodic_contribution must be >= 0"));
    }
    if request.contribution_years > request.horizon_years {
        return Err(CalcError::invalid(
            "contribution_years must be <= horizon_years",
        ));
    }
    validate_annual_rate(request.annual_rate)
}
