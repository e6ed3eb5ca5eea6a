use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::payback::Payback;

/// Site parameters for the feasibility estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SiteInputs {
    pub glass_area_m2: f64,
    /// Average daily peak sun hours
    pub sunlight_hours: f64,
    /// USD/kWh
    pub electricity_rate: f64,
}

impl Default for SiteInputs {
    fn default() -> Self {
        Self {
            glass_area_m2: 10_000.0,
            sunlight_hours: 5.5,
            electricity_rate: 0.18,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImpactResult {
    pub energy_generated_kwh: f64,
    /// Generation plus HVAC savings per year (USD)
    pub cost_savings: f64,
    pub carbon_offset_tonnes: f64,
    pub farmer_revenue: f64,
    pub capex: f64,
    pub payback: Payback,
}
