//! Prometheus metrics for the RPC surface.
//!
//! [`RpcMetrics`] owns a dedicated [`Registry`] that `GET /metrics` encodes
//! into the Prometheus text exposition format.

use prometheus::{
    register_histogram_with_registry, register_int_counter_vec_with_registry,
    register_int_counter_with_registry, register_int_gauge_with_registry, Encoder, Histogram,
    HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

pub struct RpcMetrics {
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Requests received, by action.
    pub requests: IntCounterVec,
    /// Submitted calls that committed.
    pub calls_confirmed: IntCounter,
    /// Submitted calls the ledger rejected.
    pub calls_failed: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    pub identity_count: IntGauge,
    pub nullifier_count: IntGauge,

    // ── Histograms ──────────────────────────────────────────────────────
    /// Time spent handling one request, in milliseconds.
    pub request_time_ms: Histogram,
}

impl RpcMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = register_int_counter_vec_with_registry!(
            Opts::new("zkid_rpc_requests_total", "RPC requests received"),
            &["action"],
            registry
        )?;

        let calls_confirmed = register_int_counter_with_registry!(
            Opts::new(
                "zkid_calls_confirmed_total",
                "Submitted calls committed to the ledger"
            ),
            registry
        )?;

        let calls_failed = register_int_counter_with_registry!(
            Opts::new(
                "zkid_calls_failed_total",
                "Submitted calls rejected by the ledger"
            ),
            registry
        )?;

        let identity_count = register_int_gauge_with_registry!(
            Opts::new("zkid_identity_count", "Registered identities"),
            registry
        )?;

        let nullifier_count = register_int_gauge_with_registry!(
            Opts::new("zkid_nullifier_count", "Spent nullifiers"),
            registry
        )?;

        // 0.1 ms → ~1.6 s.
        let request_time_ms = register_histogram_with_registry!(
            HistogramOpts::new("zkid_rpc_request_time_ms", "RPC handling time in milliseconds")
                .buckets(prometheus::exponential_buckets(0.1, 2.0, 15)?),
            registry
        )?;

        Ok(Self {
            registry,
            requests,
            calls_confirmed,
            calls_failed,
            identity_count,
            nullifier_count,
            request_time_ms,
        })
    }

    /// Encode every registered metric in text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
