//! # wc-server
//!
//! HTTP transport for weicopy: axum routes over the `wc-app` use cases,
//! plus the bootstrap that loads configuration, installs tracing and wires
//! the infrastructure adapters together.

pub mod bootstrap;
pub mod extract;
pub mod routes;
pub mod state;

pub use bootstrap::run::run;
pub use routes::router;
pub use state::AppState;
