/// Grid search over luminophore loading and waveguide thickness.
///
/// Every candidate runs through the full yield engine; the winner is the
/// reference panel with the highest lifetime savings net of its
/// manufacturing cost.

use tracing::info;

use crate::constants::OpticalConstants;
use crate::error::ModelError;
use crate::models::panel::{DesignCandidate, DesignOptimization, PanelConfiguration};
use crate::services::optical_model::compute_yield;

pub const CONCENTRATION_RANGE_PPM: (f64, f64) = (50.0, 1000.0);
pub const CONCENTRATION_SAMPLES: usize = 20;
pub const THICKNESSES_MM: [f64; 6] = [4.0, 5.0, 6.0, 8.0, 10.0, 12.0];

pub fn optimize_design(constants: &OpticalConstants) -> Result<DesignOptimization, ModelError> {
    let aperture = constants.aperture_area_m2();
    let (lo, hi) = CONCENTRATION_RANGE_PPM;
    let spacing = (hi - lo) / (CONCENTRATION_SAMPLES - 1) as f64;

    let mut evaluated = Vec::with_capacity(CONCENTRATION_SAMPLES * THICKNESSES_MM.len());
    for i in 0..CONCENTRATION_SAMPLES {
        let concentration_ppm = lo + i as f64 * spacing;
        for &thickness_mm in &THICKNESSES_MM {
            let config = PanelConfiguration { thickness_mm, concentration_ppm, area_m2: aperture };
            let r = compute_yield(constants, &config)?;
            let lifetime_savings = r.annual_energy_per_square_meter_kwh
                * aperture
                * constants.utility_rate
                * constants.service_life_years;
            evaluated.push(DesignCandidate {
                concentration_ppm,
                thickness_mm,
                optical_efficiency: r.optical_efficiency,
                electrical_output_w: r.electrical_output_w,
                manufacturing_cost: r.manufacturing_cost,
                net_profit: lifetime_savings - r.manufacturing_cost,
            });
        }
    }

    // Strictly greater keeps the first candidate on ties.
    let best = evaluated
        .iter()
        .copied()
        .reduce(|best, c| if c.net_profit > best.net_profit { c } else { best })
        .ok_or_else(|| ModelError::invalid("candidates", 0.0, "search grid is empty"))?;

    info!(
        concentration_ppm = best.concentration_ppm,
        thickness_mm = best.thickness_mm,
        net_profit = best.net_profit,
        "design optimization complete"
    );

    Ok(DesignOptimization { best, evaluated })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_complete() {
        let out = optimize_design(&OpticalConstants::default()).unwrap();
        assert_eq!(out.evaluated.len(), 120);
        assert_eq!(out.evaluated.first().unwrap().concentration_ppm, 50.0);
        assert!((out.evaluated.last().unwrap().concentration_ppm - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_dominates_grid() {
        let out = optimize_design(&OpticalConstants::default()).unwrap();
        assert!(out.evaluated.iter().all(|c| c.net_profit <= out.best.net_profit));
        assert!(THICKNESSES_MM.contains(&out.best.thickness_mm));
    }
}
