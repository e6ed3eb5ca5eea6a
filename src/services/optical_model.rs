/// ============================================================
///  Luminescent Solar Concentrator Yield Engine
///
///  Algorithm pipeline (reference panel 2.0 m × 1.2 m):
///   1. Geometric gain    – aperture area / edge area
///   2. TIR trapping      – sqrt(1 − (n_air/n_matrix)²)
///   3. Quantum yield     – Stern-Volmer concentration quenching
///   4. Re-absorption     – Beer-Lambert over the mean photon path
///   5. Transport         – scattering × non-re-emitted re-absorption
///   6. Fresnel coupling  – two matrix/air interfaces
///   7. Input absorption  – Beer-Lambert across the thickness
///   8. Optical efficiency – product of 2..7, clamped to [0, 1]
///   9. Electrical output – irradiance × aperture × η_opt × η_stokes × η_pv
///  10. Thermal, cost and installation figures
/// ============================================================

use tracing::warn;

use crate::constants::{OpticalConstants, DEFAULT_GRID_INTENSITY};
use crate::error::{require_non_negative, require_positive, ModelError};
use crate::models::panel::{EfficiencyPoint, PanelConfiguration, SpectralPoint, YieldResult};
use crate::models::payback::Payback;

/// Upper end of the concentration sweep (ppm).
pub const CURVE_MAX_PPM: f64 = 1000.0;

const DAYS_PER_YEAR: f64 = 365.0;

/// Main entry point. Evaluates one panel configuration against the
/// reference constants, valuing the avoided grid carbon at the default
/// intensity.
pub fn compute_yield(
    constants: &OpticalConstants,
    config: &PanelConfiguration,
) -> Result<YieldResult, ModelError> {
    compute_yield_at(constants, config, DEFAULT_GRID_INTENSITY)
}

/// Same as [`compute_yield`] with an explicit grid carbon intensity (kgCO2/kWh).
pub fn compute_yield_at(
    c: &OpticalConstants,
    config: &PanelConfiguration,
    grid_intensity: f64,
) -> Result<YieldResult, ModelError> {
    let thickness_mm = require_positive("thickness_mm", config.thickness_mm)?;
    let conc = require_non_negative("concentration_ppm", config.concentration_ppm)?;
    let area_m2 = require_positive("area_m2", config.area_m2)?;
    let grid_intensity = require_non_negative("grid_intensity", grid_intensity)?;
    let aperture = require_positive("aperture_area_m2", c.aperture_area_m2())?;

    // ── 1. Geometric gain ──────────────────────────────────────
    // Always the fixed reference panel; the caller's area only scales
    // installation totals below.
    let thickness_m = thickness_mm / 1000.0;
    let edge_area = c.perimeter_m() * thickness_m;
    let geometric_gain = aperture / edge_area;
    if !geometric_gain.is_finite() {
        return Err(ModelError::invalid("thickness_mm", thickness_mm, "edge area underflows"));
    }

    // ── 2. Waveguide trapping ──────────────────────────────────
    let trapping = c.trapping_efficiency();

    // ── 3. Stern-Volmer quenching ──────────────────────────────
    let effective_qy = c.intrinsic_quantum_yield / (1.0 + c.stern_volmer_constant * conc);

    // ── 4. Self-absorption over the mean path ──────────────────
    let mean_path = c.mean_path_fraction * c.diagonal_m();
    let reabsorption = 1.0
        - (-c.extinction_coefficient * conc * mean_path * c.stokes_overlap_factor).exp();

    // ── 5. Transport ───────────────────────────────────────────
    // A photon is lost only if re-absorbed and then not re-emitted.
    let (scattering, scattering_clamped) =
        clamp_unit(c.scattering_loss_per_kppm * (conc / 1000.0));
    let (transport, transport_clamped) =
        clamp_unit((1.0 - scattering) * (1.0 - reabsorption * (1.0 - effective_qy)));

    // ── 6. Fresnel coupling ────────────────────────────────────
    let coupling_loss = c.coupling_loss();

    // ── 7. Input absorption ────────────────────────────────────
    let absorption = 1.0 - (-c.molar_extinction * conc * (thickness_mm / 10.0)).exp();

    // ── 8. Optical efficiency ──────────────────────────────────
    let (optical, optical_clamped) =
        clamp_unit(absorption * effective_qy * trapping * transport * (1.0 - coupling_loss));
    let efficiency_clamped = scattering_clamped || transport_clamped || optical_clamped;
    if efficiency_clamped {
        warn!(
            concentration_ppm = conc,
            thickness_mm,
            scattering_clamped,
            transport_clamped,
            optical_clamped,
            "optical term left [0, 1] and was clamped"
        );
    }

    // ── 9. Electrical output ───────────────────────────────────
    let incident = c.solar_irradiance_w_m2 * aperture;
    let electrical = incident * optical * c.stokes_efficiency * c.pv_efficiency;

    // ── 10a. Thermal ───────────────────────────────────────────
    // Whatever is not converted to electricity heats the pane.
    let heat_load = incident - electrical;
    let temperature_rise = (heat_load / aperture) * c.thermal_rise_factor;
    let shgc = c.clear_glass_shgc - absorption * c.shgc_absorption_weight;

    // ── 10b. Reference-panel economics ─────────────────────────
    let glass_mass = aperture * thickness_m * c.glass_density_kg_m3;
    let dot_mass = glass_mass * (conc / 1e6);
    let material_cost = aperture * c.base_glass_cost_per_m2 + dot_mass * c.dot_cost_per_kg;
    let pv_cost = electrical * c.edge_pv_cost_per_w;
    let overhead = aperture * c.overhead_per_m2;
    let manufacturing_cost = material_cost + pv_cost + overhead;
    // Loading and thickness are unbounded above; their product is not.
    if !manufacturing_cost.is_finite() {
        return Err(ModelError::invalid(
            "concentration_ppm",
            conc,
            "manufacturing cost overflows at this loading and thickness",
        ));
    }

    let sales_price = aperture * c.sales_price_per_m2;
    let company_profit = sales_price - manufacturing_cost;

    let panel_annual_kwh = electrical / 1000.0 * c.peak_sun_hours * DAYS_PER_YEAR;
    let lifetime_savings = panel_annual_kwh * c.utility_rate * c.service_life_years;
    let client_roi_percent = if sales_price > f64::EPSILON {
        Some((lifetime_savings - sales_price) / sales_price * 100.0)
    } else {
        None
    };

    // ── 10c. Installation ──────────────────────────────────────
    let annual_per_m2 = panel_annual_kwh / aperture;
    let annual_energy = annual_per_m2 * area_m2;
    let annual_savings = annual_energy * c.utility_rate;
    let capex = manufacturing_cost / aperture * area_m2;
    let cost_payback = Payback::from_ratio(capex, annual_savings);
    let co2_offset_tonnes = annual_energy * grid_intensity / 1000.0;
    if ![annual_energy, annual_savings, capex, co2_offset_tonnes]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(ModelError::invalid("area_m2", area_m2, "installation totals overflow"));
    }

    Ok(YieldResult {
        geometric_gain,
        trapping_efficiency: trapping,
        effective_quantum_yield: effective_qy,
        reabsorption_probability: reabsorption,
        scattering_loss: scattering,
        transport_efficiency: transport,
        coupling_loss,
        absorption_efficiency: absorption,
        optical_efficiency: optical,
        efficiency_clamped,
        incident_power_w: incident,
        electrical_output_w: electrical,
        heat_load_w: heat_load,
        temperature_rise_c: temperature_rise,
        shgc,
        manufacturing_cost,
        sales_price,
        company_profit,
        client_roi_percent,
        annual_energy_per_square_meter_kwh: annual_per_m2,
        annual_energy_kwh: annual_energy,
        annual_savings,
        capex,
        cost_payback,
        co2_offset_tonnes,
    })
}

// ─── Pareto frontier ─────────────────────────────────────────
/// Optical efficiency (percent) sampled every `step_ppm` from 0 to
/// [`CURVE_MAX_PPM`] at a fixed thickness.
pub fn efficiency_curve(
    constants: &OpticalConstants,
    thickness_mm: f64,
    step_ppm: f64,
) -> Result<Vec<EfficiencyPoint>, ModelError> {
    let step = require_positive("step_ppm", step_ppm)?;
    if step < 1.0 {
        return Err(ModelError::invalid("step_ppm", step, "must be at least 1 ppm"));
    }
    let samples = (CURVE_MAX_PPM / step).floor() as u32;

    (0..=samples)
        .map(|i| {
            let concentration_ppm = i as f64 * step;
            let config = PanelConfiguration {
                thickness_mm,
                concentration_ppm,
                area_m2: constants.aperture_area_m2(),
            };
            compute_yield(constants, &config).map(|r| EfficiencyPoint {
                concentration_ppm,
                optical_efficiency: r.optical_efficiency * 100.0,
            })
        })
        .collect()
}

// ─── Synthetic spectral response ─────────────────────────────
/// Gaussian absorption/emission bands for a given loading. Emission red
/// shifts 10 nm per 1000 ppm and is scaled down by quenching.
pub fn spectral_response(
    constants: &OpticalConstants,
    concentration_ppm: f64,
) -> Result<Vec<SpectralPoint>, ModelError> {
    let conc = require_non_negative("concentration_ppm", concentration_ppm)?;

    let peak_abs = 350.0;
    let peak_em = 460.0 + (conc / 1000.0) * 10.0;
    let abs_intensity = (0.2 + conc / 600.0).min(1.0);
    let qy_factor = 1.0 / (1.0 + constants.stern_volmer_constant * conc);
    let em_intensity = abs_intensity * 0.9 * qy_factor;

    Ok((300..=600)
        .step_by(10)
        .map(|nm| {
            let x = nm as f64;
            let abs = abs_intensity * gaussian(x, peak_abs, 30.0);
            let em = em_intensity * gaussian(x, peak_em, 35.0);
            SpectralPoint {
                wavelength_nm: nm,
                absorption: floor_noise(abs),
                emission: floor_noise(em),
            }
        })
        .collect())
}

// ─── Helpers ─────────────────────────────────────────────────
/// Clamps to [0, 1] and reports whether the value was outside.
#[inline]
fn clamp_unit(v: f64) -> (f64, bool) {
    let clamped = v.clamp(0.0, 1.0);
    (clamped, clamped != v)
}

#[inline]
fn gaussian(x: f64, centre: f64, sigma: f64) -> f64 {
    (-(x - centre).powi(2) / (2.0 * sigma * sigma)).exp()
}

#[inline]
fn floor_noise(v: f64) -> f64 {
    if v < 0.01 { 0.0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(thickness_mm: f64, concentration_ppm: f64) -> PanelConfiguration {
        PanelConfiguration { thickness_mm, concentration_ppm, area_m2: 10.0 }
    }

    #[test]
    fn test_reference_configuration() {
        let c = OpticalConstants::default();
        let r = compute_yield(&c, &panel(8.0, 450.0)).unwrap();
        // 2.4 m² / (6.4 m × 8 mm)
        assert!((r.geometric_gain - 46.875).abs() < 1e-9);
        assert!((r.effective_quantum_yield - 0.95 / 1.225).abs() < 1e-12);
        assert!((r.absorption_efficiency - (1.0 - (-1.8_f64).exp())).abs() < 1e-12);
        assert!(r.optical_efficiency > 0.38 && r.optical_efficiency < 0.46,
            "optical efficiency = {:.4}", r.optical_efficiency);
        assert!(!r.efficiency_clamped);
        assert_eq!(r.incident_power_w, 2400.0);
    }

    #[test]
    fn test_zero_concentration_produces_nothing() {
        let c = OpticalConstants::default();
        let r = compute_yield(&c, &panel(8.0, 0.0)).unwrap();
        assert_eq!(r.effective_quantum_yield, c.intrinsic_quantum_yield);
        assert_eq!(r.reabsorption_probability, 0.0);
        assert_eq!(r.absorption_efficiency, 0.0);
        assert_eq!(r.optical_efficiency, 0.0);
        assert_eq!(r.electrical_output_w, 0.0);
        assert_eq!(r.cost_payback, Payback::Never);
        assert!(r.capex > 0.0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let c = OpticalConstants::default();
        assert!(compute_yield(&c, &panel(0.0, 450.0)).is_err());
        assert!(compute_yield(&c, &panel(-2.0, 450.0)).is_err());
        assert!(compute_yield(&c, &panel(8.0, -1.0)).is_err());
        assert!(compute_yield(&c, &panel(8.0, f64::NAN)).is_err());
        let bad_area = PanelConfiguration { area_m2: 0.0, ..panel(8.0, 450.0) };
        assert!(compute_yield(&c, &bad_area).is_err());
    }

    #[test]
    fn test_efficiency_bounds_across_domain() {
        let c = OpticalConstants::default();
        for t in [1.0, 4.0, 8.0, 12.0, 50.0] {
            for conc in [0.0, 10.0, 100.0, 450.0, 1000.0, 5000.0, 50_000.0] {
                let r = compute_yield(&c, &panel(t, conc)).unwrap();
                assert!((0.0..=1.0).contains(&r.optical_efficiency),
                    "t={t} c={conc} eff={}", r.optical_efficiency);
                assert!(r.electrical_output_w <= r.incident_power_w);
                assert!(r.electrical_output_w >= 0.0);
            }
        }
    }

    #[test]
    fn test_overflowing_inputs_rejected_not_infinite() {
        let c = OpticalConstants::default();
        let huge_site = PanelConfiguration { area_m2: 1e300, ..panel(8.0, 1e300) };
        match compute_yield(&c, &huge_site) {
            Err(ModelError::InvalidInput { field, .. }) => assert_eq!(field, "area_m2"),
            Ok(r) => panic!("expected rejection, got capex {}", r.capex),
        }
        match compute_yield(&c, &panel(1e300, 1e300)) {
            Err(ModelError::InvalidInput { field, .. }) => assert_eq!(field, "concentration_ppm"),
            Ok(r) => panic!("expected rejection, got cost {}", r.manufacturing_cost),
        }
        assert!(compute_yield(&c, &panel(1e-320, 450.0)).is_err());

        // Extreme but representable loading still yields finite figures
        let r = compute_yield(&c, &panel(8.0, 1e300)).unwrap();
        assert!(r.manufacturing_cost.is_finite());
        assert!(r.capex.is_finite());
        assert_eq!(r.cost_payback, Payback::Never);
    }

    #[test]
    fn test_extreme_concentration_is_clamped() {
        let c = OpticalConstants::default();
        // Scattering alone exceeds 100 % above 20 000 ppm
        let r = compute_yield(&c, &panel(8.0, 50_000.0)).unwrap();
        assert!(r.efficiency_clamped);
        assert_eq!(r.scattering_loss, 1.0);
        assert_eq!(r.optical_efficiency, 0.0);
    }

    #[test]
    fn test_absorption_monotone_and_quenching() {
        let c = OpticalConstants::default();
        let mut last_abs = -1.0;
        let mut last_qy = f64::INFINITY;
        for step in 0..=50 {
            let r = compute_yield(&c, &panel(8.0, step as f64 * 20.0)).unwrap();
            assert!(r.absorption_efficiency > last_abs || step == 0);
            assert!(r.effective_quantum_yield <= last_qy);
            last_abs = r.absorption_efficiency;
            last_qy = r.effective_quantum_yield;
        }
    }

    fn local_maxima(curve: &[EfficiencyPoint]) -> usize {
        let diffs: Vec<f64> = curve
            .windows(2)
            .map(|w| w[1].optical_efficiency - w[0].optical_efficiency)
            .collect();
        diffs.windows(2).filter(|d| d[0] > 0.0 && d[1] < 0.0).count()
    }

    #[test]
    fn test_curve_is_unimodal() {
        let c = OpticalConstants::default();
        for t in [4.0, 8.0, 12.0] {
            let curve = efficiency_curve(&c, t, 20.0).unwrap();
            assert_eq!(curve.len(), 51);
            assert_eq!(curve.last().unwrap().concentration_ppm, 1000.0);
            let peaks = local_maxima(&curve);
            assert!(peaks <= 1, "thickness {t} mm has {peaks} local maxima");
        }
    }

    #[test]
    fn test_curve_is_unimodal_from_film_to_slab() {
        let c = OpticalConstants::default();
        for t in [0.01, 0.1, 0.5, 1.0, 2.0, 25.0, 100.0, 1_000.0, 1e4, 1e6] {
            let curve = efficiency_curve(&c, t, 1.0).unwrap();
            assert_eq!(curve.len(), 1001);
            let peaks = local_maxima(&curve);
            assert!(peaks <= 1, "thickness {t} mm has {peaks} local maxima");
        }
    }

    #[test]
    fn test_curve_peak_is_interior_at_8mm() {
        let c = OpticalConstants::default();
        let curve = efficiency_curve(&c, 8.0, 20.0).unwrap();
        let best = curve
            .iter()
            .max_by(|a, b| a.optical_efficiency.total_cmp(&b.optical_efficiency))
            .unwrap();
        assert!(best.concentration_ppm > 200.0 && best.concentration_ppm < 1000.0,
            "peak at {} ppm", best.concentration_ppm);
    }

    #[test]
    fn test_deterministic() {
        let c = OpticalConstants::default();
        let a = compute_yield(&c, &panel(6.0, 320.0)).unwrap();
        let b = compute_yield(&c, &panel(6.0, 320.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_roundtrip_through_json() {
        let c = OpticalConstants::default();
        let cfg = panel(10.0, 610.0);
        let encoded = serde_json::to_string(&cfg).unwrap();
        let decoded: PanelConfiguration = serde_json::from_str(&encoded).unwrap();
        assert_eq!(compute_yield(&c, &cfg).unwrap(), compute_yield(&c, &decoded).unwrap());
    }

    #[test]
    fn test_installation_scales_with_area() {
        let c = OpticalConstants::default();
        let small = compute_yield(&c, &panel(8.0, 450.0)).unwrap();
        let large = compute_yield(&c, &PanelConfiguration { area_m2: 100.0, ..panel(8.0, 450.0) }).unwrap();
        assert!((large.annual_energy_kwh / small.annual_energy_kwh - 10.0).abs() < 1e-9);
        assert!((large.capex / small.capex - 10.0).abs() < 1e-9);
        // Panel physics does not depend on installed area
        assert_eq!(large.geometric_gain, small.geometric_gain);
        assert_eq!(large.optical_efficiency, small.optical_efficiency);
        let (a, b) = (large.cost_payback.years().unwrap(), small.cost_payback.years().unwrap());
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_spectral_response_shape() {
        let c = OpticalConstants::default();
        let s = spectral_response(&c, 450.0).unwrap();
        assert_eq!(s.len(), 31);
        assert_eq!(s[0].wavelength_nm, 300);
        let abs_peak = s.iter().max_by(|a, b| a.absorption.total_cmp(&b.absorption)).unwrap();
        assert_eq!(abs_peak.wavelength_nm, 350);
        let em_peak = s.iter().max_by(|a, b| a.emission.total_cmp(&b.emission)).unwrap();
        assert!(em_peak.wavelength_nm >= 460 && em_peak.wavelength_nm <= 470);
        assert_eq!(s.last().unwrap().absorption, 0.0);
    }
}
