//! # Ablage Host
//!
//! Serves the Ablage web UI and forwards its file store API (`/upload`, `/files`,
//! `/database_info`, `/download/{id}`) to a remote store, so the browser only ever talks
//! to one origin.
//!
//! The page logic itself (popovers, paginated listing, statistics, transfers) lives in
//! the `ablage-client` crate; this crate is the server around it.
//!
//! ## Core Components
//!
//! - [`config`]: layered configuration (embedded defaults, files, environment)
//! - [`error`]: error type and JSON error responses
//! - [`metrics`]: counters of forwarded requests
//! - [`middleware`]: security headers and caching policy
//! - [`routes`]: health endpoints, the forwarding handlers and the router
//! - [`state`]: shared state handed to every handler

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;
