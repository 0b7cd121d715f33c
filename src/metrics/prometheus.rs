use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus HTTP exporter on the given port.
/// After this call, any metrics recorded via the `metrics` crate
/// macros (counter!, histogram!) are automatically exported at /metrics.
/// Without it the recorders below are no-ops.
pub fn init_metrics_server(port: u16) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()?;
    Ok(())
}

// ── Fetch metrics ────────────────────────────────────────────────

pub fn record_fetch(source: &str, outcome: &str) {
    counter!("price_fetch_total", "source" => source.to_string(), "outcome" => outcome.to_string())
        .increment(1);
}

pub fn record_fetch_latency(source: &str, latency_ms: f64) {
    histogram!("price_fetch_latency_ms", "source" => source.to_string())
        .record(latency_ms);
}

// ── Detection metrics ────────────────────────────────────────────

pub fn record_spike(asset: &str) {
    counter!("price_spike_alerts_total", "asset" => asset.to_string())
        .increment(1);
}
