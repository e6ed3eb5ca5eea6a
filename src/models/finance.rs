use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::payback::BreakEven;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioName {
    Conservative,
    #[default]
    Base,
    Aggressive,
}

impl ScenarioName {
    pub const ALL: [ScenarioName; 3] = [
        ScenarioName::Conservative,
        ScenarioName::Base,
        ScenarioName::Aggressive,
    ];

    pub fn parameters(self) -> ScenarioParameters {
        match self {
            ScenarioName::Conservative => ScenarioParameters {
                name: self,
                label: "Conservative Warning".to_string(),
                inflation_rate: 0.02,
                degradation_rate: 0.007,
                discount_rate: 0.08,
            },
            ScenarioName::Base => ScenarioParameters {
                name: self,
                label: "Standard Projection".to_string(),
                inflation_rate: 0.035,
                degradation_rate: 0.005,
                discount_rate: 0.06,
            },
            ScenarioName::Aggressive => ScenarioParameters {
                name: self,
                label: "Optimistic Growth".to_string(),
                inflation_rate: 0.05,
                degradation_rate: 0.003,
                discount_rate: 0.04,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioName::Conservative => "conservative",
            ScenarioName::Base => "base",
            ScenarioName::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for ScenarioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(ScenarioName::Conservative),
            "base" => Ok(ScenarioName::Base),
            "aggressive" => Ok(ScenarioName::Aggressive),
            other => Err(format!("unknown scenario '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScenarioParameters {
    pub name: ScenarioName,
    pub label: String,
    /// Annual utility tariff escalation
    pub inflation_rate: f64,
    /// Annual generation loss
    pub degradation_rate: f64,
    pub discount_rate: f64,
}

/// One row of the projection. All three amounts are nominal (undiscounted).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CashFlowYear {
    pub year: u32,
    pub cumulative_standard: f64,
    pub cumulative_upgraded: f64,
    pub net_benefit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CashFlowProjection {
    pub scenario: ScenarioName,
    /// Nominal cumulative cash flows, year 0 first
    pub series: Vec<CashFlowYear>,
    /// Present-valued difference, upgraded minus standard
    pub npv_delta: f64,
    /// Final net benefit over upgraded capex; None when that capex is zero
    pub roi_percent: Option<f64>,
    pub break_even: BreakEven,
}

impl CashFlowProjection {
    /// Re-expresses every money figure in another currency. Nominal and
    /// present-valued amounts are scaled by the same factor; the ROI ratio
    /// and the break-even year are unit-free and stay as they are.
    pub fn converted(&self, factor: f64) -> Self {
        Self {
            scenario: self.scenario,
            series: self
                .series
                .iter()
                .map(|y| CashFlowYear {
                    year: y.year,
                    cumulative_standard: y.cumulative_standard * factor,
                    cumulative_upgraded: y.cumulative_upgraded * factor,
                    net_benefit: y.net_benefit * factor,
                })
                .collect(),
            npv_delta: self.npv_delta * factor,
            roi_percent: self.roi_percent,
            break_even: self.break_even,
        }
    }

    pub fn final_year(&self) -> Option<&CashFlowYear> {
        self.series.last()
    }
}
