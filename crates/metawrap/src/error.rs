//! Error taxonomy for envelope encoding, decoding, and carrier lookup.
//!
//! Every operation returns its error to the immediate caller; nothing is
//! retried or logged inside this crate.

use thiserror::Error;

use crate::envelope::EnvelopeField;

/// Errors produced by the envelope codec and carrier store.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The byte stream was not valid JSON, or the top-level value was not
    /// an object.
    #[error("malformed envelope: {0}")]
    Malformed(#[source] serde_json::Error),

    /// A slot held a value that could not be coerced into the caller's
    /// destination type. Names the offending slot.
    #[error("failed to decode {field}: {source}")]
    FieldDecode {
        field: EnvelopeField,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized into the wire format
    /// (e.g. a map with non-string keys, or a failing `Serialize` impl).
    #[error("failed to serialize envelope: {0}")]
    Serialization(#[source] serde_json::Error),

    /// No envelope is attached to the carrier.
    #[error("no envelope attached to carrier")]
    NotFound,
}

impl EnvelopeError {
    /// Returns true if this error indicates a missing envelope rather than
    /// a codec failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, EnvelopeError::NotFound)
    }
}
