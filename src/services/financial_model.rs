/// ============================================================
///  25-year cash-flow projection: standard vs upgraded glazing
///
///  Year 0 books each installation's capital cost. From year 1 the
///  upgraded glazing earns generation revenue plus cooling savings at
///  the current tariff; the standard glazing earns nothing. After a
///  year is booked the tariff inflates and the generation degrades.
/// ============================================================

#[cfg(feature = "verbose_log")]
use tracing::debug;
use tracing::info;

use crate::constants::FinancialConstants;
use crate::error::{require_non_negative, require_positive, ModelError};
use crate::models::finance::{CashFlowProjection, CashFlowYear, ScenarioName};
use crate::models::payback::BreakEven;

pub const DEFAULT_HORIZON_YEARS: u32 = 25;
pub const MAX_HORIZON_YEARS: u32 = 100;

pub fn project_cash_flow(
    c: &FinancialConstants,
    scenario: ScenarioName,
    years: u32,
) -> Result<CashFlowProjection, ModelError> {
    let area = require_positive("area_m2", c.area_m2)?;
    let capex_std = require_non_negative("capex_standard_per_m2", c.capex_standard_per_m2)?;
    let capex_up = require_non_negative("capex_upgraded_per_m2", c.capex_upgraded_per_m2)?;
    let energy_yield = require_non_negative("energy_yield_kwh_m2", c.energy_yield_kwh_m2)?;
    let utility_rate = require_non_negative("utility_rate", c.utility_rate)?;
    let shgc_standard = require_unit("shgc_standard", c.shgc_standard)?;
    let shgc_upgraded = require_unit("shgc_upgraded", c.shgc_upgraded)?;
    let cooling_area = require_non_negative("cooling_area_factor", c.cooling_area_factor)?;
    let cooling_load = require_non_negative("cooling_load_factor", c.cooling_load_factor)?;
    if years > MAX_HORIZON_YEARS {
        return Err(ModelError::invalid("years", years as f64, "horizon exceeds 100 years"));
    }
    let params = scenario.parameters();

    let upgraded_capital = capex_up * area;
    let cum_standard = -(capex_std * area);
    let mut cum_upgraded = -upgraded_capital;
    // The standard installation has no recurring flow; its NPV stays at
    // its capital cost.
    let npv_standard = cum_standard;
    let mut npv_upgraded = cum_upgraded;

    let cooling_kwh = (shgc_standard - shgc_upgraded) * cooling_area * cooling_load;
    let mut tariff = utility_rate;
    let mut efficiency = 1.0;

    let mut series = Vec::with_capacity(years as usize + 1);
    series.push(row(0, cum_standard, cum_upgraded));

    for year in 1..=years {
        let cooling_savings = cooling_kwh * tariff;
        let generation_revenue = area * energy_yield * efficiency * tariff;
        let cash_flow = generation_revenue + cooling_savings;

        cum_upgraded += cash_flow;
        npv_upgraded += cash_flow / (1.0 + params.discount_rate).powi(year as i32);

        #[cfg(feature = "verbose_log")]
        debug!(year, tariff, efficiency, cash_flow, cum_upgraded, "projection year booked");

        tariff *= 1.0 + params.inflation_rate;
        efficiency *= 1.0 - params.degradation_rate;

        series.push(row(year, cum_standard, cum_upgraded));
    }

    let break_even = series
        .iter()
        .find(|y| y.cumulative_upgraded > y.cumulative_standard)
        .map_or(BreakEven::Never, |y| BreakEven::Year(y.year));

    let final_net = series.last().map_or(0.0, |y| y.net_benefit);
    let roi_percent = if upgraded_capital > f64::EPSILON {
        Some(final_net / upgraded_capital * 100.0)
    } else {
        None
    };

    let npv_delta = npv_upgraded - npv_standard;

    info!(
        scenario = %scenario,
        years,
        npv_delta,
        break_even = ?break_even,
        "cash-flow projection complete"
    );

    Ok(CashFlowProjection { scenario, series, npv_delta, roi_percent, break_even })
}

fn require_unit(field: &'static str, value: f64) -> Result<f64, ModelError> {
    let v = require_non_negative(field, value)?;
    if v > 1.0 {
        return Err(ModelError::invalid(field, v, "must not exceed 1"));
    }
    Ok(v)
}

fn row(year: u32, cumulative_standard: f64, cumulative_upgraded: f64) -> CashFlowYear {
    CashFlowYear {
        year,
        cumulative_standard,
        cumulative_upgraded,
        net_benefit: cumulative_upgraded - cumulative_standard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> CashFlowProjection {
        project_cash_flow(&FinancialConstants::default(), ScenarioName::Base, DEFAULT_HORIZON_YEARS).unwrap()
    }

    #[test]
    fn test_year_zero_is_capital_cost() {
        let p = base();
        assert_eq!(p.series.len(), 26);
        assert_eq!(p.series[0].year, 0);
        assert_eq!(p.series[0].cumulative_standard, -1_800_000.0);
        assert_eq!(p.series[0].cumulative_upgraded, -4_500_000.0);
        assert_eq!(p.series[0].net_benefit, -2_700_000.0);
    }

    #[test]
    fn test_first_year_uses_undegraded_rate() {
        let p = base();
        // 10 000 m² × 120 kWh × 0.18 + 0.2 × 10 × 1500 × 0.18
        let expected = 216_000.0 + 540.0;
        let booked = p.series[1].cumulative_upgraded - p.series[0].cumulative_upgraded;
        assert!((booked - expected).abs() < 1e-6, "year 1 flow = {booked}");
        // Standard glazing is a pure capital sink
        assert!(p.series.iter().all(|y| y.cumulative_standard == -1_800_000.0));
    }

    #[test]
    fn test_break_even_is_first_crossing() {
        let p = base();
        let year = p.break_even.year().expect("base scenario should break even");
        let idx = year as usize;
        assert!(p.series[idx].cumulative_upgraded > p.series[idx].cumulative_standard);
        assert!(p.series[..idx]
            .iter()
            .all(|y| y.cumulative_upgraded <= y.cumulative_standard));
        assert!(year > 0 && year < 25);
    }

    #[test]
    fn test_never_breaks_even_on_short_horizon() {
        let p = project_cash_flow(&FinancialConstants::default(), ScenarioName::Conservative, 3).unwrap();
        assert_eq!(p.break_even, BreakEven::Never);
        assert_eq!(p.series.len(), 4);
    }

    #[test]
    fn test_aggressive_beats_conservative() {
        let c = FinancialConstants::default();
        let cons = project_cash_flow(&c, ScenarioName::Conservative, 25).unwrap();
        let aggr = project_cash_flow(&c, ScenarioName::Aggressive, 25).unwrap();
        assert!(aggr.npv_delta > cons.npv_delta);
        assert!(aggr.roi_percent.unwrap() > cons.roi_percent.unwrap());
    }

    #[test]
    fn test_npv_below_nominal() {
        let p = base();
        let final_net = p.final_year().unwrap().net_benefit;
        assert!(p.npv_delta < final_net);
        let expected_roi = final_net / 4_500_000.0 * 100.0;
        assert!((p.roi_percent.unwrap() - expected_roi).abs() < 1e-9);
    }

    #[test]
    fn test_zero_upgrade_capex_has_no_roi() {
        let c = FinancialConstants { capex_upgraded_per_m2: 0.0, ..FinancialConstants::default() };
        let p = project_cash_flow(&c, ScenarioName::Base, 25).unwrap();
        assert_eq!(p.roi_percent, None);
        assert_eq!(p.break_even, BreakEven::Year(0));
    }

    #[test]
    fn test_invalid_area_rejected() {
        let c = FinancialConstants { area_m2: 0.0, ..FinancialConstants::default() };
        assert!(project_cash_flow(&c, ScenarioName::Base, 25).is_err());
        assert!(project_cash_flow(&FinancialConstants::default(), ScenarioName::Base, 500).is_err());
    }

    #[test]
    fn test_invalid_configured_rates_rejected() {
        let d = FinancialConstants::default();
        let cases = [
            ("utility_rate", FinancialConstants { utility_rate: -0.18, ..d.clone() }),
            ("energy_yield_kwh_m2", FinancialConstants { energy_yield_kwh_m2: f64::NAN, ..d.clone() }),
            ("shgc_upgraded", FinancialConstants { shgc_upgraded: 1.4, ..d.clone() }),
            ("cooling_load_factor", FinancialConstants { cooling_load_factor: -1.0, ..d.clone() }),
        ];
        for (expected, c) in cases {
            match project_cash_flow(&c, ScenarioName::Base, 25) {
                Err(ModelError::InvalidInput { field, .. }) => assert_eq!(field, expected),
                Ok(_) => panic!("{expected} should have been rejected"),
            }
        }
    }

    #[test]
    fn test_free_electricity_never_breaks_even() {
        let c = FinancialConstants { utility_rate: 0.0, ..FinancialConstants::default() };
        let p = project_cash_flow(&c, ScenarioName::Base, 25).unwrap();
        assert_eq!(p.break_even, BreakEven::Never);
        assert!(p.series.iter().all(|y| y.net_benefit.is_finite()));
    }

    #[test]
    fn test_conversion_scales_both_bases() {
        let p = base();
        let inr = p.converted(80.0);
        assert_eq!(inr.series[0].cumulative_upgraded, -360_000_000.0);
        assert!((inr.npv_delta - p.npv_delta * 80.0).abs() < 1e-3);
        assert_eq!(inr.break_even, p.break_even);
        assert_eq!(inr.roi_percent, p.roi_percent);
    }

    #[test]
    fn test_roundtrip_through_json() {
        let encoded = serde_json::to_string(&ScenarioName::Aggressive).unwrap();
        let decoded: ScenarioName = serde_json::from_str(&encoded).unwrap();
        let c = FinancialConstants::default();
        assert_eq!(
            project_cash_flow(&c, ScenarioName::Aggressive, 25).unwrap(),
            project_cash_flow(&c, decoded, 25).unwrap()
        );
    }
}
