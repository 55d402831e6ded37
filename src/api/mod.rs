use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    CalcError, ContributionFrequency, ContributionMode, ProjectionRequest, ProjectionResult,
    TargetSolveRequest, TargetSolveResult, project, solve_contribution, total_periods,
};
use crate::funds;
use crate::report::{self, ComparisonRow, ProjectionReport, SolveReport};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl From<CliFrequency> for ContributionFrequency {
    fn from(value: CliFrequency) -> Self {
        match value {
            CliFrequency::Monthly => ContributionFrequency::Monthly,
            CliFrequency::Quarterly => ContributionFrequency::Quarterly,
            CliFrequency::SemiAnnual => ContributionFrequency::SemiAnnual,
            CliFrequency::Annual => ContributionFrequency::Annual,
        }
    }
}

impl From<ContributionFrequency> for CliFrequency {
    fn from(value: ContributionFrequency) -> Self {
        match value {
            ContributionFrequency::Monthly => CliFrequency::Monthly,
            ContributionFrequency::Quarterly => CliFrequency::Quarterly,
            ContributionFrequency::SemiAnnual => CliFrequency::SemiAnnual,
            ContributionFrequency::Annual => CliFrequency::Annual,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliMode {
    Lump,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl From<CliMode> for ContributionMode {
    fn from(value: CliMode) -> Self {
        match value {
            CliMode::Lump => ContributionMode::Lump,
            CliMode::Monthly => ContributionMode::Monthly,
            CliMode::Quarterly => ContributionMode::Quarterly,
            CliMode::SemiAnnual => ContributionMode::SemiAnnual,
            CliMode::Annual => ContributionMode::Annual,
        }
    }
}

impl From<ContributionMode> for CliMode {
    fn from(value: ContributionMode) -> Self {
        match value {
            ContributionMode::Lump => CliMode::Lump,
            ContributionMode::Monthly => CliMode::Monthly,
            ContributionMode::Quarterly => CliMode::Quarterly,
            ContributionMode::SemiAnnual => CliMode::SemiAnnual,
            ContributionMode::Annual => CliMode::Annual,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(long, help = "Capital invested at the start")]
    pub initial_capital: f64,
    #[arg(long, help = "Projection length in years")]
    pub horizon_years: u32,
    #[arg(long, help = "Fund whose annual return is used, e.g. DIAMOND")]
    pub fund: Option<String>,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Annual return in percent, e.g. 8; overrides --fund"
    )]
    pub annual_rate: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    pub periodic_contribution: f64,
    #[arg(long, value_enum, default_value_t = CliFrequency::Monthly)]
    pub frequency: CliFrequency,
    #[arg(long, help = "Years during which contributions are made; defaults to the horizon")]
    pub contribution_years: Option<u32>,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Annual return in percent of a baseline scenario to compare against"
    )]
    pub baseline_rate: Option<f64>,
    #[arg(long, help = "Print the full report instead of the table only")]
    pub report: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[arg(long, help = "Capital to reach at the end of the horizon")]
    pub target_capital: f64,
    #[arg(long, help = "Savings horizon in months")]
    pub horizon_months: u32,
    #[arg(long, help = "Fund whose annual return is used, e.g. DIAMOND")]
    pub fund: Option<String>,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Annual return in percent, e.g. 8; overrides --fund"
    )]
    pub annual_rate: Option<f64>,
    #[arg(long, value_enum, default_value_t = CliMode::Monthly)]
    pub mode: CliMode,
    #[arg(long, help = "Print the full report instead of the amount only")]
    pub report: bool,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Not found")]
    NotFound,
}

impl From<CalcError> for ApiError {
    fn from(value: CalcError) -> Self {
        ApiError::BadRequest(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        };
        error_response(status, &self.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    initial_capital: Option<f64>,
    horizon_years: Option<u32>,
    fund: Option<String>,
    annual_rate: Option<f64>,
    periodic_contribution: Option<f64>,
    frequency: Option<String>,
    contribution_years: Option<u32>,
    baseline_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SolvePayload {
    target_capital: Option<f64>,
    horizon_months: Option<u32>,
    fund: Option<String>,
    annual_rate: Option<f64>,
    mode: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectPlan {
    pub request: ProjectionRequest,
    pub fund: Option<&'static str>,
    pub baseline_rate: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ProjectOutcome {
    pub result: ProjectionResult,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone)]
pub struct SolvePlan {
    pub request: TargetSolveRequest,
    pub fund: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    fund: Option<&'static str>,
    annual_rate: f64,
    baseline_rate: Option<f64>,
    frequency: ContributionFrequency,
    years: Vec<ComparisonRow>,
    final_value: f64,
    total_contributed: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveResponse {
    mode: ContributionMode,
    fund: Option<&'static str>,
    annual_rate: f64,
    periods: f64,
    periodic_amount: f64,
    target_capital: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn build_projection_plan(args: &ProjectArgs) -> Result<ProjectPlan, CalcError> {
    let resolved = funds::resolve_rate(args.annual_rate, args.fund.as_deref())?;

    let baseline_rate = match args.baseline_rate {
        Some(pct) if !pct.is_finite() || pct <= -100.0 => {
            return Err(CalcError::invalid("--baseline-rate must be > -100"));
        }
        Some(pct) => Some(pct / 100.0),
        None => None,
    };

    let request = ProjectionRequest {
        initial_capital: args.initial_capital,
        horizon_years: args.horizon_years,
        annual_rate: resolved.annual_rate,
        periodic_contribution: args.periodic_contribution,
        contribution_frequency: args.frequency.into(),
        contribution_years: args.contribution_years.unwrap_or(args.horizon_years),
    };

    Ok(ProjectPlan {
        request,
        fund: resolved.fund,
        baseline_rate,
    })
}

/// Runs the main projection and, when requested, the baseline scenario with
/// the same cash flows at the baseline rate.
pub fn run_projection(plan: &ProjectPlan) -> Result<ProjectOutcome, CalcError> {
    let result = project(&plan.request)?;
    let rows = match plan.baseline_rate {
        Some(rate) => {
            let baseline = project(&ProjectionRequest {
                annual_rate: rate,
                ..plan.request.clone()
            })?;
            report::compare(&result, &baseline)?
        }
        None => report::year_rows(&result),
    };
    Ok(ProjectOutcome { result, rows })
}

pub fn build_solve_plan(args: &SolveArgs) -> Result<SolvePlan, CalcError> {
    let resolved = funds::resolve_rate(args.annual_rate, args.fund.as_deref())?;
    Ok(SolvePlan {
        request: TargetSolveRequest {
            target_capital: args.target_capital,
            horizon_months: args.horizon_months,
            annual_rate: resolved.annual_rate,
            contribution_mode: args.mode.into(),
        },
        fund: resolved.fund,
    })
}

pub fn run_project_command(args: &ProjectArgs) -> Result<String, CalcError> {
    let plan = build_projection_plan(args)?;
    let outcome = run_projection(&plan)?;
    if args.report {
        return Ok(report::render_projection_report(&ProjectionReport {
            request: &plan.request,
            fund: plan.fund,
            baseline_rate: plan.baseline_rate,
            rows: &outcome.rows,
        }));
    }
    Ok(format!("{}\n", report::render_projection_table(&outcome.rows)))
}

pub fn run_solve_command(args: &SolveArgs) -> Result<String, CalcError> {
    let plan = build_solve_plan(args)?;
    let result = solve_contribution(&plan.request)?;
    if args.report {
        return Ok(report::render_solve_report(&SolveReport {
            request: &plan.request,
            fund: plan.fund,
            result: &result,
        }));
    }
    Ok(format!("{:.3}\n", result.periodic_amount))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/funds", get(funds_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route(
            "/api/solve",
            get(solve_get_handler).post(solve_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP API listening");
    info!("Local access: http://127.0.0.1:{port}/api/funds");

    axum::serve(listener, app).await
}

async fn funds_handler() -> Response {
    json_response(StatusCode::OK, funds::FUNDS)
}

async fn not_found_handler() -> Response {
    ApiError::NotFound.into_response()
}

async fn project_get_handler(
    payload: Result<Query<ProjectPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload),
        Err(rejection) => rejected_payload(rejection.body_text()),
    }
}

async fn project_post_handler(payload: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload),
        Err(rejection) => rejected_payload(rejection.body_text()),
    }
}

async fn solve_get_handler(payload: Result<Query<SolvePayload>, QueryRejection>) -> Response {
    match payload {
        Ok(Query(payload)) => solve_handler_impl(payload),
        Err(rejection) => rejected_payload(rejection.body_text()),
    }
}

async fn solve_post_handler(payload: Result<Json<SolvePayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => solve_handler_impl(payload),
        Err(rejection) => rejected_payload(rejection.body_text()),
    }
}

fn rejected_payload(reason: String) -> Response {
    warn!(%reason, "rejected malformed payload");
    ApiError::BadRequest(reason).into_response()
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    match project_response_from_payload(payload) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => {
            warn!(error = %err, "rejected projection request");
            err.into_response()
        }
    }
}

fn solve_handler_impl(payload: SolvePayload) -> Response {
    match solve_response_from_payload(payload) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => {
            warn!(error = %err, "rejected solve request");
            err.into_response()
        }
    }
}

fn project_response_from_payload(payload: ProjectPayload) -> Result<ProjectResponse, ApiError> {
    let args = project_args_from_payload(payload)?;
    let plan = build_projection_plan(&args)?;
    debug!(request = ?plan.request, baseline_rate = ?plan.baseline_rate, "running projection");
    let outcome = run_projection(&plan)?;
    Ok(build_project_response(&plan, outcome))
}

fn solve_response_from_payload(payload: SolvePayload) -> Result<SolveResponse, ApiError> {
    let args = solve_args_from_payload(payload)?;
    let plan = build_solve_plan(&args)?;
    debug!(request = ?plan.request, "solving target contribution");
    let result = solve_contribution(&plan.request)?;
    Ok(build_solve_response(&plan, result))
}

fn with_cache_control(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)).into_response())
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn project_args_from_json(json: &str) -> Result<ProjectArgs, ApiError> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| ApiError::BadRequest(format!("Invalid API JSON payload: {e}")))?;
    project_args_from_payload(payload)
}

fn project_args_from_payload(payload: ProjectPayload) -> Result<ProjectArgs, ApiError> {
    let mut args = default_project_args();

    if let Some(v) = payload.initial_capital {
        args.initial_capital = v;
    }
    if let Some(v) = payload.horizon_years {
        args.horizon_years = v;
    }
    if payload.fund.is_some() {
        args.fund = payload.fund;
    }
    if payload.annual_rate.is_some() {
        args.annual_rate = payload.annual_rate;
    }
    if let Some(v) = payload.periodic_contribution {
        args.periodic_contribution = v;
    }
    if let Some(v) = payload.frequency {
        args.frequency = v.parse::<ContributionFrequency>()?.into();
    }
    if payload.contribution_years.is_some() {
        args.contribution_years = payload.contribution_years;
    }
    if payload.baseline_rate.is_some() {
        args.baseline_rate = payload.baseline_rate;
    }

    Ok(args)
}

fn solve_args_from_payload(payload: SolvePayload) -> Result<SolveArgs, ApiError> {
    let mut args = default_solve_args();

    if let Some(v) = payload.target_capital {
        args.target_capital = v;
    }
    if let Some(v) = payload.horizon_months {
        args.horizon_months = v;
    }
    if payload.fund.is_some() {
        args.fund = payload.fund;
    }
    if payload.annual_rate.is_some() {
        args.annual_rate = payload.annual_rate;
    }
    if let Some(v) = payload.mode {
        args.mode = v.parse::<ContributionMode>()?.into();
    }

    Ok(args)
}

fn default_project_args() -> ProjectArgs {
    ProjectArgs {
        initial_capital: 1_000_000.0,
        horizon_years: 5,
        fund: None,
        annual_rate: None,
        periodic_contribution: 0.0,
        frequency: CliFrequency::Monthly,
        contribution_years: None,
        baseline_rate: None,
        report: false,
    }
}

fn default_solve_args() -> SolveArgs {
    SolveArgs {
        target_capital: 1_000_000.0,
        horizon_months: 60,
        fund: None,
        annual_rate: None,
        mode: CliMode::Monthly,
        report: false,
    }
}

fn build_project_response(plan: &ProjectPlan, outcome: ProjectOutcome) -> ProjectResponse {
    ProjectResponse {
        fund: plan.fund,
        annual_rate: plan.request.annual_rate,
        baseline_rate: plan.baseline_rate,
        frequency: plan.request.contribution_frequency,
        final_value: outcome.result.final_value().unwrap_or(plan.request.initial_capital),
        total_contributed: plan.request.total_contributed(),
        years: outcome.rows,
    }
}

fn build_solve_response(plan: &SolvePlan, result: TargetSolveResult) -> SolveResponse {
    SolveResponse {
        mode: plan.request.contribution_mode,
        fund: plan.fund,
        annual_rate: plan.request.annual_rate,
        periods: total_periods(plan.request.horizon_months, plan.request.contribution_mode),
        periodic_amount: result.periodic_amount,
        target_capital: result.target_capital,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{Request, Uri};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_project_args() -> ProjectArgs {
        default_project_args()
    }

    #[test]
    fn build_projection_plan_defaults_contribution_years_to_horizon() {
        let mut args = sample_project_args();
        args.horizon_years = 12;
        args.periodic_contribution = 100.0;

        let plan = build_projection_plan(&args).expect("valid args");
        assert_eq!(plan.request.contribution_years, 12);
        assert_eq!(plan.fund, Some("DIAMOND"));
        assert_approx(plan.request.annual_rate, 0.08);
    }

    #[test]
    fn build_projection_plan_converts_percent_rates() {
        let mut args = sample_project_args();
        args.annual_rate = Some(6.5);
        args.baseline_rate = Some(3.0);

        let plan = build_projection_plan(&args).expect("valid args");
        assert_approx(plan.request.annual_rate, 0.065);
        assert_approx(plan.baseline_rate.expect("baseline"), 0.03);
        assert_eq!(plan.fund, None);
    }

    #[test]
    fn build_projection_plan_rejects_invalid_baseline_rate() {
        let mut args = sample_project_args();
        args.baseline_rate = Some(-100.0);
        assert_eq!(
            build_projection_plan(&args).map(|plan| plan.baseline_rate),
            Err(CalcError::invalid("--baseline-rate must be > -100"))
        );
    }

    #[test]
    fn build_projection_plan_rejects_unknown_fund() {
        let mut args = sample_project_args();
        args.fund = Some("EMERALD".to_string());
        assert!(matches!(
            build_projection_plan(&args),
            Err(CalcError::InvalidArgument(_))
        ));
    }

    #[test]
    fn run_projection_with_baseline_reports_delta() {
        let mut args = sample_project_args();
        args.fund = Some("DATE".to_string());
        args.baseline_rate = Some(8.0);

        let plan = build_projection_plan(&args).expect("valid args");
        let outcome = run_projection(&plan).expect("valid projection");
        assert_eq!(outcome.rows.len(), 5);
        let first = outcome.rows[0];
        assert_approx(first.value, 1_100_000.0);
        assert_approx(first.baseline.expect("baseline"), 1_080_000.0);
        assert_approx(first.delta.expect("delta"), 20_000.0);
        assert!(outcome.rows.iter().all(|row| row.delta.expect("delta") > 0.0));
    }

    #[test]
    fn project_args_from_json_parses_web_keys() {
        let json = r#"{
            "initialCapital": 250000,
            "horizonYears": 10,
            "fund": "sapphire",
            "periodicContribution": 5000,
            "frequency": "Trimestrielle",
            "contributionYears": 4,
            "baselineRate": 5
        }"#;

        let args = project_args_from_json(json).expect("valid payload");
        assert_approx(args.initial_capital, 250_000.0);
        assert_eq!(args.horizon_years, 10);
        assert_eq!(args.fund.as_deref(), Some("sapphire"));
        assert_eq!(args.frequency, CliFrequency::Quarterly);
        assert_eq!(args.contribution_years, Some(4));
        assert_eq!(args.baseline_rate, Some(5.0));

        let plan = build_projection_plan(&args).expect("valid args");
        assert_eq!(plan.fund, Some("SAPPHIRE"));
        assert_eq!(
            plan.request.contribution_frequency,
            ContributionFrequency::Quarterly
        );
    }

    #[test]
    fn project_args_from_json_rejects_unknown_frequency() {
        let err = project_args_from_json(r#"{"frequency":"weekly"}"#).expect_err("bad frequency");
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(err.to_string().contains("weekly"));
    }

    #[test]
    fn solve_args_from_payload_parses_mode() {
        let payload = SolvePayload {
            target_capital: Some(500_000.0),
            horizon_months: Some(36),
            annual_rate: Some(7.0),
            mode: Some("Unique".to_string()),
            ..SolvePayload::default()
        };
        let args = solve_args_from_payload(payload).expect("valid payload");
        assert_eq!(args.mode, CliMode::Lump);
        assert_eq!(args.horizon_months, 36);

        let plan = build_solve_plan(&args).expect("valid args");
        assert_eq!(plan.request.contribution_mode, ContributionMode::Lump);
        assert_approx(plan.request.annual_rate, 0.07);
    }

    #[test]
    fn project_response_serialization_contains_expected_fields() {
        let response =
            project_response_from_payload(ProjectPayload::default()).expect("defaults are valid");
        assert_approx(response.final_value, 1_469_328.08);
        assert_approx(response.total_contributed, 1_000_000.0);

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"fund\":\"DIAMOND\""));
        assert!(json.contains("\"annualRate\""));
        assert!(json.contains("\"frequency\":\"monthly\""));
        assert!(json.contains("\"years\""));
        assert!(json.contains("\"finalValue\""));
        assert!(json.contains("\"totalContributed\""));
        assert!(!json.contains("\"delta\""));
    }

    #[test]
    fn solve_response_serialization_contains_expected_fields() {
        let response =
            solve_response_from_payload(SolvePayload::default()).expect("defaults are valid");
        assert_approx(response.periods, 60.0);
        assert_approx(response.periodic_amount, 13_709.025);

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"mode\":\"monthly\""));
        assert!(json.contains("\"periodicAmount\""));
        assert!(json.contains("\"targetCapital\""));
    }

    #[test]
    fn handlers_map_errors_to_bad_request() {
        let ok = project_handler_impl(ProjectPayload::default());
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(
            ok.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );

        let zero_horizon = project_handler_impl(ProjectPayload {
            horizon_years: Some(0),
            ..ProjectPayload::default()
        });
        assert_eq!(zero_horizon.status(), StatusCode::BAD_REQUEST);

        let zero_months = solve_handler_impl(SolvePayload {
            horizon_months: Some(0),
            ..SolvePayload::default()
        });
        assert_eq!(zero_months.status(), StatusCode::BAD_REQUEST);

        let bad_mode = solve_handler_impl(SolvePayload {
            mode: Some("weekly".to_string()),
            ..SolvePayload::default()
        });
        assert_eq!(bad_mode.status(), StatusCode::BAD_REQUEST);
    }

    fn assert_json_bad_request(response: &Response) {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .map(|v| v.as_bytes()),
            Some(&b"application/json"[..])
        );
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
    }

    async fn json_extraction<T: serde::de::DeserializeOwned>(
        body: &'static str,
    ) -> Result<Json<T>, JsonRejection> {
        let request = Request::builder()
            .method("POST")
            .uri("/api/project")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("valid request");
        Json::<T>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn malformed_json_body_is_a_json_bad_request() {
        let negative_horizon = json_extraction(r#"{"horizonYears":-1}"#).await;
        let response = project_post_handler(negative_horizon).await;
        assert_json_bad_request(&response);

        let truncated = json_extraction(r#"{"targetCapital": 10"#).await;
        let response = solve_post_handler(truncated).await;
        assert_json_bad_request(&response);
    }

    #[tokio::test]
    async fn malformed_query_string_is_a_json_bad_request() {
        let uri: Uri = "/api/project?horizonYears=ten".parse().expect("valid uri");
        let response = project_get_handler(Query::try_from_uri(&uri)).await;
        assert_json_bad_request(&response);

        let uri: Uri = "/api/solve?horizonMonths=-3".parse().expect("valid uri");
        let response = solve_get_handler(Query::try_from_uri(&uri)).await;
        assert_json_bad_request(&response);

        let uri: Uri = "/api/solve?horizonMonths=24&mode=annual"
            .parse()
            .expect("valid uri");
        let response = solve_get_handler(Query::try_from_uri(&uri)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = not_found_handler().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn run_commands_render_text_output() {
        let mut args = sample_project_args();
        args.horizon_years = 2;
        let table = run_project_command(&args).expect("valid args");
        assert!(table.contains("1,080,000.00"));
        assert!(table.contains("1,166,400.00"));

        args.report = true;
        let text = run_project_command(&args).expect("valid args");
        assert!(text.contains("Investment projection"));
        assert!(text.contains(report::DISCLAIMER));

        let solve = run_solve_command(&default_solve_args()).expect("valid args");
        assert_eq!(solve, "13709.025\n");
    }
}
