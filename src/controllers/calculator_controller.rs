use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::config::Config;
use crate::constants::{ModelConstants, DEFAULT_GRID_INTENSITY};
use crate::error::ModelError;
use crate::models::api::{
    CurveQuery, ErrorResponse, OfflineModeRequest, OfflineModeResponse, ProjectionRequest,
    ProjectionResponse, SpectrumQuery, YieldRequest,
};
use crate::models::currency::ExchangeRateStatus;
use crate::models::finance::{ScenarioName, ScenarioParameters};
use crate::models::impact::{ImpactResult, SiteInputs};
use crate::models::lifecycle::{ConvergencePoint, LifeCycleInputs, LifeCycleResult};
use crate::models::panel::{DesignOptimization, EfficiencyPoint, SpectralPoint, YieldResult};
use crate::services::design_optimizer::optimize_design;
use crate::services::financial_model::{project_cash_flow, DEFAULT_HORIZON_YEARS};
use crate::services::impact_service::compute_site_impact;
use crate::services::lifecycle_model::{compute_life_cycle, ConvergenceTrace};
use crate::services::optical_model::{compute_yield_at, efficiency_curve, spectral_response};
use crate::shared_state::AppState;

fn reject(e: ModelError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse { error: e.to_string() }),
    )
        .into_response()
}

fn respond<T: serde::Serialize>(result: Result<T, ModelError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => reject(e),
    }
}

// ─── Optical / energy yield ──────────────────────────────────────────────────

/// POST /api/yield
/// Evaluate one panel configuration
///
/// Runs the full optical chain on the 2.0 m × 1.2 m reference panel and
/// scales installation figures to the requested area.
#[utoipa::path(
    post,
    path = "/api/yield",
    request_body = YieldRequest,
    responses(
        (status = 200, description = "Optical, thermal and economic breakdown", body = YieldResult),
        (status = 422, description = "Input outside its physical domain", body = ErrorResponse)
    )
)]
pub async fn calculate_yield(
    State(config): State<Config>,
    Json(req): Json<YieldRequest>,
) -> impl IntoResponse {
    let grid = req.grid_intensity.unwrap_or(DEFAULT_GRID_INTENSITY);
    respond(compute_yield_at(&config.constants.optical, &req.panel, grid))
}

/// GET /api/yield/curve
/// Concentration sweep
///
/// Optical efficiency (percent) from 0 to 1000 ppm at a fixed thickness.
#[utoipa::path(
    get,
    path = "/api/yield/curve",
    params(CurveQuery),
    responses(
        (status = 200, description = "Efficiency frontier", body = Vec<EfficiencyPoint>),
        (status = 422, description = "Invalid thickness or step", body = ErrorResponse)
    )
)]
pub async fn get_efficiency_curve(
    State(config): State<Config>,
    Query(q): Query<CurveQuery>,
) -> impl IntoResponse {
    respond(efficiency_curve(
        &config.constants.optical,
        q.thickness_mm.unwrap_or(8.0),
        q.step_ppm.unwrap_or(20.0),
    ))
}

/// GET /api/yield/spectrum
/// Synthetic absorption and emission bands
#[utoipa::path(
    get,
    path = "/api/yield/spectrum",
    params(SpectrumQuery),
    responses(
        (status = 200, description = "Spectral response 300-600 nm", body = Vec<SpectralPoint>),
        (status = 422, description = "Invalid concentration", body = ErrorResponse)
    )
)]
pub async fn get_spectral_response(
    State(config): State<Config>,
    Query(q): Query<SpectrumQuery>,
) -> impl IntoResponse {
    respond(spectral_response(&config.constants.optical, q.concentration_ppm.unwrap_or(450.0)))
}

/// GET /api/yield/optimize
/// Search loading × thickness for the most profitable panel
#[utoipa::path(
    get,
    path = "/api/yield/optimize",
    responses(
        (status = 200, description = "Best candidate and evaluated grid", body = DesignOptimization)
    )
)]
pub async fn get_design_optimization(State(config): State<Config>) -> impl IntoResponse {
    respond(optimize_design(&config.constants.optical))
}

// ─── Financial projection ────────────────────────────────────────────────────

/// POST /api/finance/projection
/// Standard vs upgraded glazing cash flow
///
/// Every money figure (nominal series and present-valued NPV alike) is
/// converted with the same factor into the requested currency.
#[utoipa::path(
    post,
    path = "/api/finance/projection",
    request_body = ProjectionRequest,
    responses(
        (status = 200, description = "Cash-flow projection", body = ProjectionResponse),
        (status = 422, description = "Invalid area or horizon", body = ErrorResponse)
    )
)]
pub async fn project_finances(
    State(config): State<Config>,
    State(state): State<AppState>,
    Json(req): Json<ProjectionRequest>,
) -> impl IntoResponse {
    let mut financial = config.constants.financial.clone();
    if let Some(area) = req.area_m2 {
        financial.area_m2 = area;
    }
    let years = req.years.unwrap_or(DEFAULT_HORIZON_YEARS);

    match project_cash_flow(&financial, req.scenario, years) {
        Ok(projection) => {
            let rate = state.rate().inr_per_usd;
            let factor = req.currency.factor(rate);
            let body = ProjectionResponse {
                currency: req.currency,
                conversion_factor: factor,
                inr_per_usd: rate,
                projection: projection.converted(factor),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => reject(e),
    }
}

/// GET /api/finance/scenarios
/// Fixed scenario presets
#[utoipa::path(
    get,
    path = "/api/finance/scenarios",
    responses(
        (status = 200, description = "Inflation, degradation and discount per scenario", body = Vec<ScenarioParameters>)
    )
)]
pub async fn list_scenarios() -> impl IntoResponse {
    let presets: Vec<ScenarioParameters> = ScenarioName::ALL.iter().map(|s| s.parameters()).collect();
    Json(presets).into_response()
}

// ─── Life-cycle assessment ───────────────────────────────────────────────────

/// POST /api/lifecycle
/// Embodied carbon, energy payback and net lifetime offset
#[utoipa::path(
    post,
    path = "/api/lifecycle",
    request_body = LifeCycleInputs,
    responses(
        (status = 200, description = "Life-cycle assessment", body = LifeCycleResult),
        (status = 422, description = "Input outside its physical domain", body = ErrorResponse)
    )
)]
pub async fn assess_life_cycle(
    State(config): State<Config>,
    Json(inputs): Json<LifeCycleInputs>,
) -> impl IntoResponse {
    respond(compute_life_cycle(&config.constants.life_cycle, &inputs))
}

/// POST /api/lifecycle/convergence
/// Display sequence easing towards the analytic embodied carbon
#[utoipa::path(
    post,
    path = "/api/lifecycle/convergence",
    request_body = LifeCycleInputs,
    responses(
        (status = 200, description = "Animation frames", body = Vec<ConvergencePoint>),
        (status = 422, description = "Input outside its physical domain", body = ErrorResponse)
    )
)]
pub async fn get_convergence_trace(
    State(config): State<Config>,
    Json(inputs): Json<LifeCycleInputs>,
) -> impl IntoResponse {
    respond(
        compute_life_cycle(&config.constants.life_cycle, &inputs)
            .map(|r| ConvergenceTrace::for_result(&r).collect::<Vec<_>>()),
    )
}

// ─── Site feasibility ────────────────────────────────────────────────────────

/// POST /api/impact
/// Site-level energy, savings, carbon and payback
#[utoipa::path(
    post,
    path = "/api/impact",
    request_body = SiteInputs,
    responses(
        (status = 200, description = "Feasibility estimate in USD", body = ImpactResult),
        (status = 422, description = "Input outside its physical domain", body = ErrorResponse)
    )
)]
pub async fn estimate_impact(
    State(config): State<Config>,
    Json(inputs): Json<SiteInputs>,
) -> impl IntoResponse {
    respond(compute_site_impact(&config.constants.site_impact, &inputs))
}

// ─── Currency & settings ─────────────────────────────────────────────────────

/// GET /api/exchange-rate
/// Current INR-per-USD rate and whether it is live or the fallback
#[utoipa::path(
    get,
    path = "/api/exchange-rate",
    responses(
        (status = 200, description = "Sanitized exchange rate", body = ExchangeRateStatus)
    )
)]
pub async fn get_exchange_rate(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.rate()).into_response()
}

/// GET /api/constants
/// Active constant table
#[utoipa::path(
    get,
    path = "/api/constants",
    responses(
        (status = 200, description = "Versioned model constants", body = ModelConstants)
    )
)]
pub async fn get_constants(State(config): State<Config>) -> impl IntoResponse {
    Json(config.constants).into_response()
}

/// GET /api/settings/offline-mode
#[utoipa::path(
    get,
    path = "/api/settings/offline-mode",
    responses(
        (status = 200, description = "Whether live exchange-rate refresh is disabled", body = OfflineModeResponse)
    )
)]
pub async fn get_offline_mode(State(state): State<AppState>) -> impl IntoResponse {
    Json(OfflineModeResponse { offline_mode: state.is_offline() }).into_response()
}

/// POST /api/settings/offline-mode
#[utoipa::path(
    post,
    path = "/api/settings/offline-mode",
    request_body = OfflineModeRequest,
    responses(
        (status = 200, description = "Updated flag", body = OfflineModeResponse)
    )
)]
pub async fn set_offline_mode(
    State(state): State<AppState>,
    Json(req): Json<OfflineModeRequest>,
) -> impl IntoResponse {
    state.set_offline(req.enabled);
    info!(offline_mode = req.enabled, "offline mode changed");
    Json(OfflineModeResponse { offline_mode: req.enabled }).into_response()
}
