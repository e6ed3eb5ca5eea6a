/// ============================================================
///  Shared constant table
///
///  Every calculator reads its literals from here. The table is
///  versioned and may be partially overridden from `config.json`;
///  any field left out keeps the reference value below.
/// ============================================================

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const CONSTANTS_VERSION: &str = "2026.1";

/// Substituted whenever the live INR-per-USD rate is missing or unusable.
pub const FALLBACK_EXCHANGE_RATE: f64 = 91.94;

/// Grid carbon intensity (kgCO2/kWh) used when a caller supplies none.
pub const DEFAULT_GRID_INTENSITY: f64 = 0.45;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ModelConstants {
    pub version: String,
    pub optical: OpticalConstants,
    pub financial: FinancialConstants,
    pub life_cycle: LifeCycleConstants,
    pub site_impact: SiteImpactConstants,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            version: CONSTANTS_VERSION.to_string(),
            optical: OpticalConstants::default(),
            financial: FinancialConstants::default(),
            life_cycle: LifeCycleConstants::default(),
            site_impact: SiteImpactConstants::default(),
        }
    }
}

// ─── Optical / energy yield ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct OpticalConstants {
    // ── Reference panel geometry (m) ─────────────────────────────────────────
    pub reference_length_m: f64,
    pub reference_width_m: f64,
    /// Mean photon path as a fraction of the panel diagonal
    pub mean_path_fraction: f64,

    // ── Waveguide ────────────────────────────────────────────────────────────
    pub refractive_index_air: f64,
    pub refractive_index_matrix: f64,

    // ── Luminophore ──────────────────────────────────────────────────────────
    /// Intrinsic quantum yield at infinite dilution
    pub intrinsic_quantum_yield: f64,
    /// Stern-Volmer quenching constant (1/ppm)
    pub stern_volmer_constant: f64,
    /// Re-absorption extinction (per ppm per m)
    pub extinction_coefficient: f64,
    /// Absorption/emission spectral overlap
    pub stokes_overlap_factor: f64,
    /// Rayleigh scattering loss per 1000 ppm
    pub scattering_loss_per_kppm: f64,
    /// Input absorption (per ppm per cm)
    pub molar_extinction: f64,
    /// Photon energy retained after the Stokes shift
    pub stokes_efficiency: f64,

    // ── Conversion ───────────────────────────────────────────────────────────
    pub pv_efficiency: f64,
    /// Standard test irradiance (W/m²)
    pub solar_irradiance_w_m2: f64,

    // ── Thermal ──────────────────────────────────────────────────────────────
    /// Empirical temperature rise per W/m² of heat load (K·m²/W)
    pub thermal_rise_factor: f64,
    pub clear_glass_shgc: f64,
    /// SHGC reduction per unit of absorption efficiency
    pub shgc_absorption_weight: f64,

    // ── Operation ────────────────────────────────────────────────────────────
    pub peak_sun_hours: f64,
    /// USD/kWh
    pub utility_rate: f64,
    pub service_life_years: f64,

    // ── Manufacturing (USD) ──────────────────────────────────────────────────
    pub glass_density_kg_m3: f64,
    pub base_glass_cost_per_m2: f64,
    pub dot_cost_per_kg: f64,
    pub edge_pv_cost_per_w: f64,
    pub overhead_per_m2: f64,
    pub sales_price_per_m2: f64,
}

impl Default for OpticalConstants {
    fn default() -> Self {
        Self {
            reference_length_m: 2.0,
            reference_width_m: 1.2,
            mean_path_fraction: 0.7,
            refractive_index_air: 1.0,
            refractive_index_matrix: 1.49,
            intrinsic_quantum_yield: 0.95,
            stern_volmer_constant: 0.0005,
            extinction_coefficient: 0.008,
            stokes_overlap_factor: 0.02,
            scattering_loss_per_kppm: 0.05,
            molar_extinction: 0.005,
            stokes_efficiency: 0.65,
            pv_efficiency: 0.22,
            solar_irradiance_w_m2: 1000.0,
            thermal_rise_factor: 0.035,
            clear_glass_shgc: 0.82,
            shgc_absorption_weight: 0.7,
            peak_sun_hours: 5.5,
            utility_rate: 0.18,
            service_life_years: 25.0,
            glass_density_kg_m3: 2500.0,
            base_glass_cost_per_m2: 25.0,
            dot_cost_per_kg: 500.0,
            edge_pv_cost_per_w: 0.35,
            overhead_per_m2: 45.0,
            sales_price_per_m2: 450.0,
        }
    }
}

impl OpticalConstants {
    pub fn aperture_area_m2(&self) -> f64 {
        self.reference_length_m * self.reference_width_m
    }

    pub fn perimeter_m(&self) -> f64 {
        2.0 * (self.reference_length_m + self.reference_width_m)
    }

    pub fn diagonal_m(&self) -> f64 {
        self.reference_length_m.hypot(self.reference_width_m)
    }

    /// Fraction of isotropic emission held by total internal reflection.
    pub fn trapping_efficiency(&self) -> f64 {
        let ratio = self.refractive_index_air / self.refractive_index_matrix;
        (1.0 - ratio * ratio).max(0.0).sqrt()
    }

    /// Loss across the two Fresnel interfaces between matrix and air.
    pub fn coupling_loss(&self) -> f64 {
        let n1 = self.refractive_index_air;
        let n2 = self.refractive_index_matrix;
        let reflectance = ((n2 - n1) / (n2 + n1)).powi(2);
        1.0 - (1.0 - reflectance).powi(2)
    }
}

// ─── Financial projection ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FinancialConstants {
    pub area_m2: f64,
    pub capex_standard_per_m2: f64,
    pub capex_upgraded_per_m2: f64,
    /// Average generation of the upgraded glazing (kWh/m²/yr)
    pub energy_yield_kwh_m2: f64,
    /// Year-1 utility tariff (USD/kWh)
    pub utility_rate: f64,
    pub shgc_standard: f64,
    pub shgc_upgraded: f64,
    pub cooling_load_factor: f64,
    pub cooling_area_factor: f64,
}

impl Default for FinancialConstants {
    fn default() -> Self {
        Self {
            area_m2: 10_000.0,
            capex_standard_per_m2: 180.0,
            capex_upgraded_per_m2: 450.0,
            energy_yield_kwh_m2: 120.0,
            utility_rate: 0.18,
            shgc_standard: 0.45,
            shgc_upgraded: 0.25,
            cooling_load_factor: 1500.0,
            cooling_area_factor: 10.0,
        }
    }
}

// ─── Life-cycle assessment ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LifeCycleConstants {
    /// Volume share of float glass in the laminate
    pub glass_volume_fraction: f64,
    /// Volume share of the PMMA interlayer
    pub interlayer_volume_fraction: f64,
    pub glass_density_kg_m3: f64,
    pub interlayer_density_kg_m3: f64,
    /// Aluminium framing per installed m²
    pub frame_mass_kg_m2: f64,

    // ── Embodied energy (MJ/kg) ──────────────────────────────────────────────
    pub glass_energy_mj_kg: f64,
    pub interlayer_energy_mj_kg: f64,
    pub frame_energy_mj_kg: f64,

    // ── Emission factors (kgCO2/kg) ──────────────────────────────────────────
    pub glass_carbon_kg_kg: f64,
    pub interlayer_carbon_kg_kg: f64,
    pub frame_carbon_kg_kg: f64,

    /// kgCO2 per tonne-km
    pub transport_carbon_factor: f64,
    /// Average generation (kWh/m²/yr)
    pub annual_yield_kwh_m2: f64,
    pub mj_per_kwh: f64,
}

impl Default for LifeCycleConstants {
    fn default() -> Self {
        Self {
            glass_volume_fraction: 0.95,
            interlayer_volume_fraction: 0.05,
            glass_density_kg_m3: 2500.0,
            interlayer_density_kg_m3: 1180.0,
            frame_mass_kg_m2: 5.0,
            glass_energy_mj_kg: 15.0,
            interlayer_energy_mj_kg: 80.0,
            frame_energy_mj_kg: 155.0,
            glass_carbon_kg_kg: 0.85,
            interlayer_carbon_kg_kg: 4.5,
            frame_carbon_kg_kg: 11.2,
            transport_carbon_factor: 0.06,
            annual_yield_kwh_m2: 120.0,
            mj_per_kwh: 3.6,
        }
    }
}

// ─── Site feasibility ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SiteImpactConstants {
    /// Normalised yield at the reference sun hours (kWh/m²/yr)
    pub annual_yield_kwh_m2: f64,
    pub reference_sun_hours: f64,
    /// HVAC energy avoided per m² (kWh/yr)
    pub hvac_savings_kwh_m2: f64,
    pub grid_carbon_kg_kwh: f64,
    /// Rice husk feedstock per m² of glass (kg)
    pub husk_kg_m2: f64,
    pub husk_price_per_kg: f64,
    pub capex_per_m2: f64,
}

impl Default for SiteImpactConstants {
    fn default() -> Self {
        Self {
            annual_yield_kwh_m2: 120.0,
            reference_sun_hours: 5.0,
            hvac_savings_kwh_m2: 25.0,
            grid_carbon_kg_kwh: DEFAULT_GRID_INTENSITY,
            husk_kg_m2: 8.0,
            husk_price_per_kg: 0.15,
            capex_per_m2: 450.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapping_efficiency_for_pmma() {
        let c = OpticalConstants::default();
        let eta = c.trapping_efficiency();
        assert!((eta - 0.7414).abs() < 1e-3, "trapping = {eta}");
    }

    #[test]
    fn test_coupling_loss_is_small_and_positive() {
        let loss = OpticalConstants::default().coupling_loss();
        // R ≈ 0.0387 per face
        assert!(loss > 0.07 && loss < 0.08, "coupling loss = {loss}");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "financial": { "area_m2": 500.0 } }"#;
        let c: ModelConstants = serde_json::from_str(json).unwrap();
        assert_eq!(c.financial.area_m2, 500.0);
        assert_eq!(c.financial.capex_upgraded_per_m2, 450.0);
        assert_eq!(c.optical, OpticalConstants::default());
        assert_eq!(c.version, CONSTANTS_VERSION);
    }

    #[test]
    fn test_reference_geometry() {
        let c = OpticalConstants::default();
        assert!((c.aperture_area_m2() - 2.4).abs() < 1e-12);
        assert!((c.perimeter_m() - 6.4).abs() < 1e-12);
    }
}
