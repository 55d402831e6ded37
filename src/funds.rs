//! Compiled-in fund catalog.
//!
//! The calculation core never reads this table; callers resolve a fund name to
//! an annual rate and pass the rate in explicitly.

use serde::Serialize;

use crate::core::CalcError;

pub const DEFAULT_FUND: &str = "DIAMOND";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub name: &'static str,
    pub annual_rate: f64,
}

pub const FUNDS: &[Fund] = &[
    Fund {
        name: "DIAMOND",
        annual_rate: 0.08,
    },
    Fund {
        name: "SAPPHIRE",
        annual_rate: 0.09,
    },
    Fund {
        name: "DATE",
        annual_rate: 0.10,
    },
];

pub fn lookup(name: &str) -> Option<&'static Fund> {
    let name = name.trim();
    FUNDS.iter().find(|fund| fund.name.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRate {
    pub annual_rate: f64,
    pub fund: Option<&'static str>,
}

/// An explicit rate wins over a fund name; with neither, the default fund is
/// used. `explicit_rate_pct` is in percent.
pub fn resolve_rate(
    explicit_rate_pct: Option<f64>,
    fund: Option<&str>,
) -> Result<ResolvedRate, CalcError> {
    if let Some(pct) = explicit_rate_pct {
        if !pct.is_finite() || pct <= -100.0 {
            return Err(CalcError::invalid("annual rate must be > -100 percent"));
        }
        return Ok(ResolvedRate {
            annual_rate: pct / 100.0,
            fund: None,
        });
    }

    let name = fund.unwrap_or(DEFAULT_FUND);
    let fund = lookup(name).ok_or_else(|| {
        let known: Vec<&str> = FUNDS.iter().map(|f| f.name).collect();
        CalcError::invalid(format!(
            "unknown fund '{name}' (known funds: {})",
            known.join(", ")
        ))
    })?;
    Ok(ResolvedRate {
        annual_rate: fund.annual_rate,
        fund: Some(fund.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("sapphire").map(|f| f.annual_rate), Some(0.09));
        assert_eq!(lookup(" Date ").map(|f| f.name), Some("DATE"));
        assert!(lookup("EMERALD").is_none());
    }

    #[test]
    fn default_fund_is_in_catalog() {
        assert!(lookup(DEFAULT_FUND).is_some());
    }

    #[test]
    fn explicit_rate_overrides_fund() {
        let resolved = resolve_rate(Some(5.5), Some("DATE")).expect("valid");
        assert!((resolved.annual_rate - 0.055).abs() < 1e-12);
        assert_eq!(resolved.fund, None);
    }

    #[test]
    fn falls_back_to_default_fund() {
        let resolved = resolve_rate(None, None).expect("valid");
        assert_eq!(resolved.fund, Some("DIAMOND"));
        assert!((resolved.annual_rate - 0.08).abs() < 1e-12);
    }

    #[test]
    fn rejects_unknown_fund_and_invalid_rate() {
        let err = resolve_rate(None, Some("EMERALD")).expect_err("unknown fund");
        assert!(err.to_string().contains("EMERALD"));
        assert!(resolve_rate(Some(-100.0), None).is_err());
        assert!(resolve_rate(Some(f64::INFINITY), None).is_err());
    }
}
