use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::DEFAULT_GRID_INTENSITY;
use crate::models::payback::Payback;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LifeCycleInputs {
    pub area_m2: f64,
    pub thickness_mm: f64,
    /// kgCO2/kWh of the displaced grid electricity
    pub grid_intensity: f64,
    pub transport_distance_km: f64,
    pub lifespan_years: u32,
}

impl Default for LifeCycleInputs {
    fn default() -> Self {
        Self {
            area_m2: 1000.0,
            thickness_mm: 8.0,
            grid_intensity: DEFAULT_GRID_INTENSITY,
            transport_distance_km: 500.0,
            lifespan_years: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MaterialMasses {
    pub glass_kg: f64,
    pub interlayer_kg: f64,
    pub frame_kg: f64,
}

impl MaterialMasses {
    pub fn total(&self) -> f64 {
        self.glass_kg + self.interlayer_kg + self.frame_kg
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LifeCycleResult {
    pub material_masses: MaterialMasses,
    pub total_mass_kg: f64,
    /// Cradle-to-gate material emissions
    pub material_carbon_kg: f64,
    pub transport_carbon_kg: f64,
    pub embodied_carbon_kg: f64,
    pub embodied_carbon_tonnes: f64,
    pub embodied_energy_mj: f64,
    pub embodied_energy_kwh: f64,
    pub annual_generation_kwh: f64,
    pub annual_offset_kg: f64,
    /// Embodied energy / annual generation (energy basis)
    pub energy_payback: Payback,
    /// Lifetime avoided emissions minus embodied carbon
    pub net_carbon_offset_tonnes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConvergencePoint {
    pub epoch: u32,
    pub carbon_tonnes: f64,
}
