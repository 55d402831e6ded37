use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CalcError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CalcError::InvalidArgument(msg.into())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl ContributionFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            ContributionFrequency::Monthly => 12,
            ContributionFrequency::Quarterly => 4,
            ContributionFrequency::SemiAnnual => 2,
            ContributionFrequency::Annual => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContributionFrequency::Monthly => "monthly",
            ContributionFrequency::Quarterly => "quarterly",
            ContributionFrequency::SemiAnnual => "semi-annual",
            ContributionFrequency::Annual => "annual",
        }
    }
}

impl fmt::Display for ContributionFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses user-facing labels. English names are accepted in any casing, as are
/// the French labels (`mensuelle`, `trimestrielle`, ...).
impl FromStr for ContributionFrequency {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "monthly" | "mensuelle" => Ok(ContributionFrequency::Monthly),
            "quarterly" | "trimestrielle" => Ok(ContributionFrequency::Quarterly),
            "semiannual" | "semestrielle" => Ok(ContributionFrequency::SemiAnnual),
            "annual" | "annuelle" => Ok(ContributionFrequency::Annual),
            _ => Err(CalcError::invalid(format!(
                "unrecognized contribution frequency '{s}' (expected monthly, quarterly, semi-annual or annual)"
            ))),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionMode {
    Lump,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl ContributionMode {
    /// Lump and Annual both count one period per year; only the formula differs.
    pub fn periods_per_year(self) -> u32 {
        match self {
            ContributionMode::Lump | ContributionMode::Annual => 1,
            ContributionMode::Monthly => 12,
            ContributionMode::Quarterly => 4,
            ContributionMode::SemiAnnual => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContributionMode::Lump => "lump",
            ContributionMode::Monthly => "monthly",
            ContributionMode::Quarterly => "quarterly",
            ContributionMode::SemiAnnual => "semi-annual",
            ContributionMode::Annual => "annual",
        }
    }
}

impl fmt::Display for ContributionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContributionMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "lump" | "lumpsum" | "unique" => Ok(ContributionMode::Lump),
            "monthly" | "mensuelle" => Ok(ContributionMode::Monthly),
            "quarterly" | "trimestrielle" => Ok(ContributionMode::Quarterly),
            "semiannual" | "semestrielle" => Ok(ContributionMode::SemiAnnual),
            "annual" | "annuelle" => Ok(ContributionMode::Annual),
            _ => Err(CalcError::invalid(format!(
                "unrecognized contribution mode '{s}' (expected lump, monthly, quarterly, semi-annual or annual)"
            ))),
        }
    }
}

impl From<ContributionFrequency> for ContributionMode {
    fn from(value: ContributionFrequency) -> Self {
        match value {
            ContributionFrequency::Monthly => ContributionMode::Monthly,
            ContributionFrequency::Quarterly => ContributionMode::Quarterly,
            ContributionFrequency::SemiAnnual => ContributionMode::SemiAnnual,
            ContributionFrequency::Annual => ContributionMode::Annual,
        }
    }
}

fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRequest {
    pub initial_capital: f64,
    pub horizon_years: u32,
    pub annual_rate: f64,
    pub periodic_contribution: f64,
    pub contribution_frequency: ContributionFrequency,
    pub contribution_years: u32,
}

impl ProjectionRequest {
    /// Pure compound growth: no periodic contributions.
    pub fn lump_sum(initial_capital: f64, horizon_years: u32, annual_rate: f64) -> Self {
        Self {
            initial_capital,
            horizon_years,
            annual_rate,
            periodic_contribution: 0.0,
            contribution_frequency: ContributionFrequency::Annual,
            contribution_years: 0,
        }
    }

    pub fn total_contributed(&self) -> f64 {
        let deposits = u64::from(self.contribution_years.min(self.horizon_years))
            * u64::from(self.contribution_frequency.periods_per_year());
        self.initial_capital + self.periodic_contribution * deposits as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub year_end_values: Vec<f64>,
}

impl ProjectionResult {
    pub fn len(&self) -> usize {
        self.year_end_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.year_end_values.is_empty()
    }

    pub fn final_value(&self) -> Option<f64> {
        self.year_end_values.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetSolveRequest {
    pub target_capital: f64,
    pub horizon_months: u32,
    pub annual_rate: f64,
    pub contribution_mode: ContributionMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSolveResult {
    pub periodic_amount: f64,
    pub target_capital: f64,
}
