use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::FALLBACK_EXCHANGE_RATE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
}

impl Currency {
    /// Multiplier from canonical USD into this currency.
    pub fn factor(self, rate: ExchangeRate) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Inr => rate.value(),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Inr => "₹",
        }
    }
}

/// INR per one USD. Always positive and finite once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "f64", into = "f64")]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    /// Replaces a missing, NaN, infinite or non-positive rate with the fallback.
    pub fn sanitize(raw: Option<f64>) -> Self {
        match raw {
            Some(r) if r.is_finite() && r > 0.0 => ExchangeRate(r),
            _ => ExchangeRate::fallback(),
        }
    }

    pub fn fallback() -> Self {
        ExchangeRate(FALLBACK_EXCHANGE_RATE)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        ExchangeRate::fallback()
    }
}

impl From<f64> for ExchangeRate {
    fn from(raw: f64) -> Self {
        ExchangeRate::sanitize(Some(raw))
    }
}

impl From<ExchangeRate> for f64 {
    fn from(rate: ExchangeRate) -> Self {
        rate.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRateStatus {
    pub inr_per_usd: ExchangeRate,
    pub source: RateSource,
    pub updated_at: DateTime<Utc>,
}

impl ExchangeRateStatus {
    pub fn fallback() -> Self {
        Self {
            inr_per_usd: ExchangeRate::fallback(),
            source: RateSource::Fallback,
            updated_at: Utc::now(),
        }
    }
}

// ─── exchangerate-api wire types ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LatestRatesResponse {
    pub rates: LatestRates,
}

#[derive(Debug, Deserialize)]
pub struct LatestRates {
    #[serde(rename = "INR")]
    pub inr: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rates_fall_back() {
        for raw in [None, Some(f64::NAN), Some(0.0), Some(-3.0), Some(f64::INFINITY)] {
            assert_eq!(ExchangeRate::sanitize(raw).value(), FALLBACK_EXCHANGE_RATE);
        }
        assert_eq!(ExchangeRate::sanitize(Some(83.2)).value(), 83.2);
    }

    #[test]
    fn test_deserialize_sanitizes() {
        let rate: ExchangeRate = serde_json::from_str("-1.0").unwrap();
        assert_eq!(rate, ExchangeRate::fallback());
    }

    #[test]
    fn test_currency_factor() {
        let rate = ExchangeRate::sanitize(Some(80.0));
        assert_eq!(Currency::Usd.factor(rate), 1.0);
        assert_eq!(Currency::Inr.factor(rate), 80.0);
        let c: Currency = serde_json::from_str("\"INR\"").unwrap();
        assert_eq!(c, Currency::Inr);
    }

    #[test]
    fn test_parse_latest_rates() {
        let body = r#"{"base":"USD","rates":{"EUR":0.92,"INR":83.4}}"#;
        let parsed: LatestRatesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.rates.inr, Some(83.4));
    }
}
