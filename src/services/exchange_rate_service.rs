use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::models::currency::{ExchangeRate, ExchangeRateStatus, LatestRatesResponse, RateSource};
use crate::shared_state::AppState;

pub const DEFAULT_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// Current INR-per-USD rate. Never fails: any transport, status or parse
/// problem is logged and answered with the fallback rate.
pub async fn fetch_rate(client: &reqwest::Client, endpoint: &str) -> ExchangeRateStatus {
    match request_rate(client, endpoint).await {
        Ok(Some(raw)) if raw.is_finite() && raw > 0.0 => ExchangeRateStatus {
            inr_per_usd: ExchangeRate::sanitize(Some(raw)),
            source: RateSource::Live,
            updated_at: Utc::now(),
        },
        Ok(raw) => {
            warn!(?raw, "exchange rate response carried no usable INR rate");
            ExchangeRateStatus::fallback()
        }
        Err(e) => {
            warn!(error = %e, endpoint, "failed to fetch exchange rate");
            ExchangeRateStatus::fallback()
        }
    }
}

async fn request_rate(client: &reqwest::Client, endpoint: &str) -> Result<Option<f64>, reqwest::Error> {
    let body = client
        .get(endpoint)
        .send()
        .await?
        .error_for_status()?
        .json::<LatestRatesResponse>()
        .await?;
    Ok(body.rates.inr)
}

/// Refreshes the shared rate forever. A failed refresh keeps the last live
/// rate rather than overwriting it with the fallback.
pub async fn run_refresher(state: AppState, endpoint: String, interval: Duration) {
    let client = match reqwest::Client::builder().timeout(Duration::from_secs(10)).build() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "could not build HTTP client; exchange rate stays at fallback");
            return;
        }
    };

    loop {
        refresh_once(&state, &client, &endpoint).await;
        tokio::time::sleep(interval).await;
    }
}

/// One refresher tick. Skipped entirely while offline.
pub async fn refresh_once(state: &AppState, client: &reqwest::Client, endpoint: &str) {
    if state.is_offline() {
        info!("offline mode: skipping exchange rate refresh");
        return;
    }
    let status = fetch_rate(client, endpoint).await;
    match status.source {
        RateSource::Live => {
            info!(inr_per_usd = status.inr_per_usd.value(), "exchange rate updated");
            state.set_rate(status);
        }
        RateSource::Fallback if state.rate().source == RateSource::Live => {
            warn!("keeping previous live exchange rate");
        }
        RateSource::Fallback => state.set_rate(status),
    }
}
