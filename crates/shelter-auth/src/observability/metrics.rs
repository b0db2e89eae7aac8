//! Prometheus metrics for authentication and authorization

use std::sync::OnceLock;

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::auth::{AuthError, Result};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

const METRIC_LOGINS: &str = "shelter_auth_logins_total";
const METRIC_REFRESHES: &str = "shelter_auth_token_refreshes_total";
const METRIC_DENIALS: &str = "shelter_auth_denials_total";

/// Initialize Prometheus metrics recorder.
pub fn init_metrics() -> Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| AuthError::Config(format!("Failed to install metrics recorder: {e}")))?;

    PROMETHEUS_HANDLE.set(handle).ok();

    describe_counter!(METRIC_LOGINS, "Login attempts by outcome");
    describe_counter!(METRIC_REFRESHES, "Access tokens minted from refresh tokens");
    describe_counter!(METRIC_DENIALS, "Authorization denials by check");

    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

/// Render metrics in Prometheus text format.
#[must_use]
pub fn render_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}

/// Record a login attempt; `outcome` is `success`, `invalid_credentials` or `inactive`.
pub fn record_login(outcome: &'static str) {
    counter!(METRIC_LOGINS, "outcome" => outcome).increment(1);
}

pub fn record_refresh() {
    counter!(METRIC_REFRESHES).increment(1);
}

/// Record a denied authorization check.
pub fn record_denial(check: &'static str) {
    counter!(METRIC_DENIALS, "check" => check).increment(1);
}
