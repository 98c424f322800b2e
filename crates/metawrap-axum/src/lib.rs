//! Axum/tower integration for the metawrap envelope.
//!
//! Two pieces:
//!
//! - [`EnvelopeLayer`]: buffers the request body, parses the
//!   `{metadata, body}` envelope, installs a [`metawrap::Carrier`] in the
//!   request extensions, and restores the body bytes for downstream
//!   handlers. Malformed envelopes are answered with 400, oversize bodies
//!   with 413.
//! - [`ExtractCarrier`]: handler-side extractor for the installed carrier.
//!
//! # Usage
//!
//! ```ignore
//! use axum::{routing::post, Router};
//! use metawrap::CarrierEnvelopeExt;
//! use metawrap_axum::{EnvelopeConfig, EnvelopeLayer, ExtractCarrier};
//!
//! async fn handler(ExtractCarrier(carrier): ExtractCarrier) -> String {
//!     let meta: MyMeta = carrier.metadata().unwrap();
//!     format!("hello {}", meta.name)
//! }
//!
//! let app = Router::new()
//!     .route("/", post(handler))
//!     .layer(EnvelopeLayer::new(EnvelopeConfig::default()));
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod extract;
pub mod layer;

pub use config::EnvelopeConfig;
pub use extract::ExtractCarrier;
pub use layer::{parse_into_carrier, EnvelopeLayer, EnvelopeService};
