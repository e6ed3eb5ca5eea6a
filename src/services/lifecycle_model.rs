/// ============================================================
///  Cradle-to-gate life-cycle assessment
///
///   1. Material masses – laminate volume split glass/interlayer,
///                        plus per-m² aluminium framing
///   2. Embodied carbon – Σ mass × emission factor + transport
///   3. Embodied energy – Σ mass × MJ/kg, converted to kWh
///   4. Operation       – fixed average yield × grid intensity
///   5. EPBT and net lifetime offset
/// ============================================================

use tracing::debug;

use crate::constants::LifeCycleConstants;
use crate::error::{require_non_negative, require_positive, ModelError};
use crate::models::lifecycle::{ConvergencePoint, LifeCycleInputs, LifeCycleResult, MaterialMasses};
use crate::models::payback::Payback;

pub fn compute_life_cycle(
    c: &LifeCycleConstants,
    inputs: &LifeCycleInputs,
) -> Result<LifeCycleResult, ModelError> {
    let area = require_positive("area_m2", inputs.area_m2)?;
    let thickness_mm = require_positive("thickness_mm", inputs.thickness_mm)?;
    let grid = require_non_negative("grid_intensity", inputs.grid_intensity)?;
    let distance_km = require_non_negative("transport_distance_km", inputs.transport_distance_km)?;

    // ── 1. Material masses ─────────────────────────────────────
    let volume = area * (thickness_mm / 1000.0);
    let masses = MaterialMasses {
        glass_kg: volume * c.glass_volume_fraction * c.glass_density_kg_m3,
        interlayer_kg: volume * c.interlayer_volume_fraction * c.interlayer_density_kg_m3,
        frame_kg: area * c.frame_mass_kg_m2,
    };
    let total_mass = masses.total();

    // ── 2. Embodied carbon ─────────────────────────────────────
    let material_carbon = masses.glass_kg * c.glass_carbon_kg_kg
        + masses.interlayer_kg * c.interlayer_carbon_kg_kg
        + masses.frame_kg * c.frame_carbon_kg_kg;
    let transport_carbon = total_mass * (distance_km / 1000.0) * c.transport_carbon_factor;
    let embodied_carbon = material_carbon + transport_carbon;

    // ── 3. Embodied energy ─────────────────────────────────────
    let embodied_mj = masses.glass_kg * c.glass_energy_mj_kg
        + masses.interlayer_kg * c.interlayer_energy_mj_kg
        + masses.frame_kg * c.frame_energy_mj_kg;
    let embodied_kwh = embodied_mj / require_positive("mj_per_kwh", c.mj_per_kwh)?;

    // ── 4. Operation ───────────────────────────────────────────
    let annual_generation = area * c.annual_yield_kwh_m2;
    let annual_offset = annual_generation * grid;

    // ── 5. Payback and net offset ──────────────────────────────
    let energy_payback = Payback::from_ratio(embodied_kwh, annual_generation);
    let lifetime_offset = annual_offset * inputs.lifespan_years as f64;
    let net_carbon_offset_tonnes = (lifetime_offset - embodied_carbon) / 1000.0;

    debug!(
        total_mass_kg = total_mass,
        embodied_carbon_kg = embodied_carbon,
        net_carbon_offset_tonnes,
        "life-cycle assessment complete"
    );

    Ok(LifeCycleResult {
        material_masses: masses,
        total_mass_kg: total_mass,
        material_carbon_kg: material_carbon,
        transport_carbon_kg: transport_carbon,
        embodied_carbon_kg: embodied_carbon,
        embodied_carbon_tonnes: embodied_carbon / 1000.0,
        embodied_energy_mj: embodied_mj,
        embodied_energy_kwh: embodied_kwh,
        annual_generation_kwh: annual_generation,
        annual_offset_kg: annual_offset,
        energy_payback,
        net_carbon_offset_tonnes,
    })
}

// ─── Convergence animation ───────────────────────────────────
pub const DEFAULT_EPOCHS: u32 = 50;

/// Display-only sequence easing from 1.5 × the analytic embodied carbon
/// down to the analytic value. It computes nothing the assessment has not
/// already produced; the last epoch is always exactly `target`.
#[derive(Debug, Clone)]
pub struct ConvergenceTrace {
    target: f64,
    current: f64,
    epoch: u32,
    epochs: u32,
}

impl ConvergenceTrace {
    pub fn new(target_tonnes: f64, epochs: u32) -> Self {
        Self {
            target: target_tonnes,
            current: target_tonnes * 1.5,
            epoch: 0,
            epochs,
        }
    }

    pub fn for_result(result: &LifeCycleResult) -> Self {
        Self::new(result.embodied_carbon_tonnes, DEFAULT_EPOCHS)
    }
}

impl Iterator for ConvergenceTrace {
    type Item = ConvergencePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.epoch >= self.epochs {
            return None;
        }
        self.epoch += 1;
        self.current = if self.epoch == self.epochs {
            self.target
        } else {
            let step = (-(self.epoch as f64) * 0.1).exp() * 0.25;
            (self.current - step).max(self.target)
        };
        Some(ConvergencePoint { epoch: self.epoch, carbon_tonnes: self.current })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.epochs - self.epoch) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ConvergenceTrace {}
