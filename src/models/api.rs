use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::currency::{Currency, ExchangeRate};
use crate::models::finance::{CashFlowProjection, ScenarioName};
use crate::models::panel::PanelConfiguration;

// ─── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct YieldRequest {
    #[serde(flatten)]
    pub panel: PanelConfiguration,
    /// kgCO2/kWh; defaults to 0.45
    pub grid_intensity: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CurveQuery {
    /// Waveguide thickness (mm), default 8
    pub thickness_mm: Option<f64>,
    /// Sampling step (ppm), default 20
    pub step_ppm: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpectrumQuery {
    /// Luminophore loading (ppm), default 450
    pub concentration_ppm: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProjectionRequest {
    #[serde(default)]
    pub scenario: ScenarioName,
    /// Horizon in years, default 25
    pub years: Option<u32>,
    /// Overrides the configured installation area (m²)
    pub area_m2: Option<f64>,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OfflineModeRequest {
    pub enabled: bool,
}

// ─── Responses ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectionResponse {
    pub currency: Currency,
    /// Factor applied to every money figure (1 for USD)
    pub conversion_factor: f64,
    pub inr_per_usd: ExchangeRate,
    pub projection: CashFlowProjection,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OfflineModeResponse {
    pub offline_mode: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
