use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Time to recover an outlay. `Never` replaces the infinite or NaN value a
/// bare division would produce when the recurring return is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Payback {
    Years(f64),
    Never,
}

impl Payback {
    /// `outlay / annual_return`, or `Never` when the return is not positive.
    pub fn from_ratio(outlay: f64, annual_return: f64) -> Self {
        if !(annual_return > f64::EPSILON) {
            return Payback::Never;
        }
        let years = outlay / annual_return;
        if years.is_finite() {
            Payback::Years(years)
        } else {
            Payback::Never
        }
    }

    pub fn years(&self) -> Option<f64> {
        match self {
            Payback::Years(y) => Some(*y),
            Payback::Never => None,
        }
    }
}

/// First projection year in which the upgraded installation is ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BreakEven {
    Year(u32),
    Never,
}

impl BreakEven {
    pub fn year(&self) -> Option<u32> {
        match self {
            BreakEven::Year(y) => Some(*y),
            BreakEven::Never => None,
        }
    }
}
