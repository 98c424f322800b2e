//! Metawrap - a metadata envelope convention for JSON HTTP bodies.
//!
//! Defines a two-slot wrapper, `{ "metadata": <any>, "body": <any> }`, a
//! codec between that wire shape and caller-supplied types, and a
//! request-scoped [`Carrier`] that holds the parsed envelope for downstream
//! handlers.
//!
//! # Architecture
//!
//! ```text
//! request bytes ──► Envelope::from_slice ──► Carrier (attach) ──► handlers
//!                                                      │
//!                        metadata::<M>() / body::<B>() ◄┘ (typed access)
//!
//! encode(meta, body) / encode_from_carrier(carrier, body) ──► response bytes
//! ```
//!
//! The carrier is an immutable chain: every attachment derives a new value,
//! so handlers sharing an origin never observe each other's attachments.
//!
//! # Usage
//!
//! ```
//! use metawrap::{encode, Carrier, CarrierEnvelopeExt, Envelope};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
//! struct Meta {
//!     name: String,
//!     size: i64,
//! }
//!
//! # fn main() -> Result<(), metawrap::EnvelopeError> {
//! // Sender: wrap a body with metadata.
//! let bytes = encode(
//!     &Meta { name: "my metadata".into(), size: 24 },
//!     &serde_json::json!({"status": "good to go", "value": 32}),
//! )?;
//!
//! // Receiver: parse, stash on a carrier, read back typed.
//! let carrier = Carrier::new().attach(Envelope::from_slice(&bytes)?);
//! let meta: Meta = carrier.metadata()?;
//! assert_eq!(meta.size, 24);
//! # Ok(())
//! # }
//! ```
//!
//! The core performs no I/O beyond reading provided bytes, no logging, and
//! no transport handling; HTTP integration lives in the `metawrap-axum`
//! adapter crate.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod carrier;
pub mod codec;
pub mod envelope;
pub mod error;
pub mod store;

pub use carrier::Carrier;
pub use codec::{decode_parts, encode, encode_from_carrier};
pub use envelope::{Envelope, EnvelopeField};
pub use error::EnvelopeError;
pub use store::CarrierEnvelopeExt;
