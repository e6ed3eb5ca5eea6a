use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::payback::Payback;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PanelConfiguration {
    /// Waveguide thickness (mm), > 0
    pub thickness_mm: f64,
    /// Luminophore loading (ppm), ≥ 0
    pub concentration_ppm: f64,
    /// Installed glazing area (m²), > 0
    pub area_m2: f64,
}

impl Default for PanelConfiguration {
    fn default() -> Self {
        Self {
            thickness_mm: 8.0,
            concentration_ppm: 450.0,
            area_m2: 10.0,
        }
    }
}

/// Full breakdown of one optical/energy evaluation.
///
/// Per-panel figures refer to the fixed 2.0 m × 1.2 m reference panel.
/// Installation figures scale the per-m² results by `area_m2`.
/// Money is in canonical USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct YieldResult {
    // ── Optical chain ────────────────────────────────────────────────────────
    /// Aperture area / edge area
    pub geometric_gain: f64,
    pub trapping_efficiency: f64,
    /// Stern-Volmer quenched quantum yield
    pub effective_quantum_yield: f64,
    pub reabsorption_probability: f64,
    pub scattering_loss: f64,
    pub transport_efficiency: f64,
    pub coupling_loss: f64,
    pub absorption_efficiency: f64,
    pub optical_efficiency: f64,
    /// True when a term left [0, 1] and was clamped
    pub efficiency_clamped: bool,

    // ── Reference panel (W) ──────────────────────────────────────────────────
    pub incident_power_w: f64,
    pub electrical_output_w: f64,
    pub heat_load_w: f64,
    pub temperature_rise_c: f64,
    pub shgc: f64,

    // ── Reference panel economics (USD) ──────────────────────────────────────
    pub manufacturing_cost: f64,
    pub sales_price: f64,
    pub company_profit: f64,
    /// Lifetime client return on the sales price; None when the price is zero
    pub client_roi_percent: Option<f64>,

    // ── Installation ─────────────────────────────────────────────────────────
    pub annual_energy_per_square_meter_kwh: f64,
    pub annual_energy_kwh: f64,
    pub annual_savings: f64,
    pub capex: f64,
    /// Capex / annual savings (cost basis)
    pub cost_payback: Payback,
    pub co2_offset_tonnes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EfficiencyPoint {
    pub concentration_ppm: f64,
    /// Percent
    pub optical_efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpectralPoint {
    pub wavelength_nm: u32,
    pub absorption: f64,
    pub emission: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DesignCandidate {
    pub concentration_ppm: f64,
    pub thickness_mm: f64,
    pub optical_efficiency: f64,
    pub electrical_output_w: f64,
    pub manufacturing_cost: f64,
    /// Lifetime savings minus manufacturing cost, per reference panel
    pub net_profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DesignOptimization {
    pub best: DesignCandidate,
    pub evaluated: Vec<DesignCandidate>,
}
