//! Guardline Endpoint Prober
//!
//! HTTP-level smoke testing for the guard management backend and frontend.
//! Issues a fixed sequence of probes — read-only endpoint checks, a
//! dependent create/use/delete chain, and frontend route checks — classifies
//! every response, and renders a console summary plus a self-contained HTML
//! report.
//!
//! # Modules
//!
//! - [`result`] — Probe outcome classification and the append-only run log
//! - [`executor`] — Transport abstraction and the response classification ladder
//! - [`envelope`] — Fail-closed decoding of the backend's response envelopes
//! - [`chain`] — Captured-entity map that gates dependent probe steps
//! - [`session`] — Base-URL and bearer-token plumbing around the transport
//! - [`auth`] — Admin credential ladder and token capture
//! - [`routes`] — Read-only endpoint tables and frontend route checks
//! - [`sequencer`] — The dependent create/use/delete workflow
//! - [`diagnose`] — Per-failure diagnosis hints
//! - [`report`] — Summary tally and HTML report rendering
//! - [`runner`] — Top-to-bottom probe run driver

pub mod auth;
pub mod chain;
pub mod diagnose;
pub mod envelope;
pub mod executor;
pub mod report;
pub mod result;
pub mod routes;
pub mod runner;
pub mod sequencer;
pub mod session;

pub use executor::{HttpMethod, HttpTransport, Transport};
pub use report::ProbeReport;
pub use result::{ProbeLog, ProbeResult, ProbeStatus};
pub use runner::{run, ProbeConfig};
