use crate::constants::SiteImpactConstants;
use crate::error::{require_non_negative, require_positive, ModelError};
use crate::models::impact::{ImpactResult, SiteInputs};
use crate::models::payback::Payback;

/// Site feasibility estimate in canonical USD.
///
/// Generation scales the normalised yield by the site's sun hours; savings
/// add the avoided HVAC load at the same tariff. Payback is a simple,
/// undiscounted capex / annual savings.
pub fn compute_site_impact(
    c: &SiteImpactConstants,
    inputs: &SiteInputs,
) -> Result<ImpactResult, ModelError> {
    let area = require_positive("glass_area_m2", inputs.glass_area_m2)?;
    let sun_hours = require_non_negative("sunlight_hours", inputs.sunlight_hours)?;
    let rate = require_non_negative("electricity_rate", inputs.electricity_rate)?;
    let reference_hours = require_positive("reference_sun_hours", c.reference_sun_hours)?;

    let energy = area * c.annual_yield_kwh_m2 * (sun_hours / reference_hours);
    let direct_savings = energy * rate;
    let hvac_savings = area * c.hvac_savings_kwh_m2 * rate;
    let cost_savings = direct_savings + hvac_savings;

    let capex = area * c.capex_per_m2;

    Ok(ImpactResult {
        energy_generated_kwh: energy,
        cost_savings,
        carbon_offset_tonnes: energy * c.grid_carbon_kg_kwh / 1000.0,
        farmer_revenue: area * c.husk_kg_m2 * c.husk_price_per_kg,
        capex,
        payback: Payback::from_ratio(capex, cost_savings),
    })
}
