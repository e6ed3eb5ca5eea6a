use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use axum::extract::FromRef;

use crate::config::Config;
use crate::models::currency::ExchangeRateStatus;

/// Caller-owned state of the service. The calculators themselves hold
/// nothing; only the exchange rate and the offline flag change at runtime.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Latest sanitized INR-per-USD rate
    pub rate: Arc<RwLock<ExchangeRateStatus>>,
    /// Offline mode flag, toggled at runtime via the API
    pub offline_mode: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(offline_mode_default: bool) -> Self {
        Self {
            rate: Arc::new(RwLock::new(ExchangeRateStatus::fallback())),
            offline_mode: Arc::new(AtomicBool::new(offline_mode_default)),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.offline_mode.load(Ordering::Relaxed)
    }

    pub fn set_offline(&self, value: bool) {
        self.offline_mode.store(value, Ordering::Relaxed);
    }

    pub fn rate(&self) -> ExchangeRateStatus {
        match self.rate.read() {
            Ok(r) => r.clone(),
            Err(_) => ExchangeRateStatus::fallback(),
        }
    }

    pub fn set_rate(&self, status: ExchangeRateStatus) {
        if let Ok(mut r) = self.rate.write() {
            *r = status;
        }
    }
}

/// Router state. Handlers extract `State<AppState>` and/or `State<Config>`.
#[derive(Clone, Debug)]
pub struct SharedState {
    pub app: AppState,
    pub config: Config,
}

impl FromRef<SharedState> for AppState {
    fn from_ref(shared: &SharedState) -> Self {
        shared.app.clone()
    }
}

impl FromRef<SharedState> for Config {
    fn from_ref(shared: &SharedState) -> Self {
        shared.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::currency::{ExchangeRate, RateSource};

    #[test]
    fn test_starts_on_fallback_rate() {
        let state = AppState::new(false);
        assert_eq!(state.rate().source, RateSource::Fallback);
        assert_eq!(state.rate().inr_per_usd, ExchangeRate::fallback());
    }

    #[test]
    fn test_rate_update_visible_to_clones() {
        let state = AppState::new(true);
        let clone = state.clone();
        clone.set_rate(ExchangeRateStatus {
            inr_per_usd: ExchangeRate::sanitize(Some(84.0)),
            source: RateSource::Live,
            updated_at: chrono::Utc::now(),
        });
        assert_eq!(state.rate().inr_per_usd.value(), 84.0);
        assert!(state.is_offline());
        clone.set_offline(false);
        assert!(!state.is_offline());
    }
}
