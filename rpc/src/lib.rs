//! JSON RPC server for the ZKID node.
//!
//! Every request is a `POST /` with a JSON body carrying an `action` field:
//! - `submit`: execute a signed call and return its outcome
//! - `receipt`: look up the outcome of a recently submitted call
//! - `deployment_info`: owner, verification keys and counters
//! - every ledger query (`identity`, `verification_level`, `verify_certificate`, ...)
//!
//! `GET /metrics` serves Prometheus text format.

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod outcomes;
pub mod server;

pub use error::RpcError;
pub use handlers::{dispatch, Command, RpcRequest, SubmitResponse};
pub use metrics::RpcMetrics;
pub use outcomes::OutcomeCache;
pub use server::{router, RpcServer, RpcState};
