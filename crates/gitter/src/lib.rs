//! Gitter webhook infrastructure adapter.
//!
//! Implements the [`notifier::WebhookTransport`] trait with an HTTPS client
//! built on `reqwest` and rustls.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** TLS, connection handling, request headers and body
//! decoding live here. The [`notifier`] crate sees only
//! [`notifier::WebhookTransport`], and classifies the returned status code
//! itself.
//!
//! ## Wire Contract
//!
//! - Method `POST`, `https` only (other schemes are refused before connecting).
//! - `Content-Type: application/json; charset=UTF-8`
//! - `Accept: application/json`
//! - Body: the UTF-8 JSON payload `{"message": ..., "status": ...}`.
//!
//! No retries and no timeouts unless [`WebhookClientConfig`] sets them.

mod client;
mod config;

pub use client::{GitterError, HttpsWebhookClient};
pub use config::WebhookClientConfig;
