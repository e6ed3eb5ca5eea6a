use axum::{
    routing::{get, post},
    Router,
};
use crate::controllers::calculator_controller::{
    // Optical / energy yield
    calculate_yield, get_efficiency_curve, get_spectral_response, get_design_optimization,
    // Finance
    project_finances, list_scenarios,
    // Life cycle & site impact
    assess_life_cycle, get_convergence_trace, estimate_impact,
    // Currency, constants & settings
    get_exchange_rate, get_constants, get_offline_mode, set_offline_mode,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router.
/// Handlers extract `State<AppState>` and/or `State<Config>` via
/// `FromRef<SharedState>`, so a single `.with_state(shared)` covers both.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/yield",                   post(calculate_yield))
        .route("/yield/curve",             get(get_efficiency_curve))
        .route("/yield/spectrum",          get(get_spectral_response))
        .route("/yield/optimize",          get(get_design_optimization))
        .route("/finance/projection",      post(project_finances))
        .route("/finance/scenarios",       get(list_scenarios))
        .route("/lifecycle",               post(assess_life_cycle))
        .route("/lifecycle/convergence",   post(get_convergence_trace))
        .route("/impact",                  post(estimate_impact))
        .route("/exchange-rate",           get(get_exchange_rate))
        .route("/constants",               get(get_constants))
        .route("/settings/offline-mode",   get(get_offline_mode).post(set_offline_mode))
        .with_state(shared)
}
