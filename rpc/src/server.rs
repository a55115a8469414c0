//! Axum-based RPC server.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{info, info_span};
use zkid_ledger::IdentityLedger;
use zkid_store::LedgerStore;

use crate::error::RpcError;
use crate::handlers::{dispatch, RpcRequest};
use crate::metrics::RpcMetrics;
use crate::outcomes::OutcomeCache;

/// Shared state behind every handler.
pub struct RpcState<S> {
    pub ledger: Arc<IdentityLedger<S>>,
    pub metrics: RpcMetrics,
    outcomes: Mutex<OutcomeCache>,
}

impl<S: LedgerStore> RpcState<S> {
    pub fn new(ledger: Arc<IdentityLedger<S>>, outcome_capacity: usize) -> Result<Self, RpcError> {
        Ok(Self {
            ledger,
            metrics: RpcMetrics::new()?,
            outcomes: Mutex::new(OutcomeCache::new(outcome_capacity)),
        })
    }

    pub fn outcomes(&self) -> Result<MutexGuard<'_, OutcomeCache>, RpcError> {
        self.outcomes
            .lock()
            .map_err(|_| RpcError::Server("outcome cache poisoned".into()))
    }
}

/// Build the RPC router over `state`.
pub fn router<S: LedgerStore + 'static>(state: Arc<RpcState<S>>) -> Router {
    Router::new()
        .route("/", post(rpc_handler::<S>))
        .route("/metrics", get(metrics_handler::<S>))
        .with_state(state)
}

pub struct RpcServer<S> {
    pub port: u16,
    pub state: Arc<RpcState<S>>,
}

impl<S: LedgerStore + 'static> RpcServer<S> {
    pub fn new(port: u16, state: Arc<RpcState<S>>) -> Self {
        Self { port, state }
    }

    /// Bind `0.0.0.0:port` and serve until `shutdown` resolves.
    pub async fn start(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), RpcError> {
        let listener = TcpListener::bind(("0.0.0.0", self.port)).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), RpcError> {
        info!(addr = %listener.local_addr()?, "RPC server listening");
        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("RPC server stopped");
        Ok(())
    }
}

async fn rpc_handler<S: LedgerStore + 'static>(
    State(state): State<Arc<RpcState<S>>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, RpcError> {
    let request = RpcRequest::from_value(body)?;
    let action = request.action();
    state.metrics.requests.with_label_values(&[action]).inc();

    let started = Instant::now();
    let worker = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || {
        let span = info_span!("rpc", action);
        let _enter = span.enter();
        dispatch(&worker, request)
    })
    .await
    .map_err(|e| RpcError::Server(e.to_string()))?;

    state
        .metrics
        .request_time_ms
        .observe(started.elapsed().as_secs_f64() * 1_000.0);
    result.map(Json)
}

async fn metrics_handler<S: LedgerStore + 'static>(
    State(state): State<Arc<RpcState<S>>>,
) -> Result<Response, RpcError> {
    let info = state.ledger.deployment_info()?;
    state.metrics.identity_count.set(info.identities as i64);
    state.metrics.nullifier_count.set(info.nullifiers as i64);
    let body = state.metrics.encode()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}
