//! The `{metadata, body}` envelope: the universal wrapper this crate defines
//! for JSON HTTP bodies.
//!
//! # Wire Format
//!
//! A UTF-8 JSON object with exactly two recognized top-level keys:
//!
//! ```json
//! { "metadata": <any>, "body": <any> }
//! ```
//!
//! Either key may be omitted, `null`, or any JSON value. Unrecognized keys
//! are ignored on decode. Serializing always emits both keys (`null` when a
//! slot is absent). There is no version field and no envelope-level error
//! field.

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EnvelopeError;

/// Identifies one of the two envelope slots, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeField {
    Metadata,
    Body,
}

impl fmt::Display for EnvelopeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeField::Metadata => f.write_str("metadata"),
            EnvelopeField::Body => f.write_str("body"),
        }
    }
}

/// The two-slot envelope.
///
/// Both slots hold untyped JSON values until a destination type is applied
/// via [`Envelope::decode_metadata`] / [`Envelope::decode_body`]. A missing
/// key and an explicit `null` both decode to `None`; field presence is
/// independent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Out-of-band metadata travelling alongside the payload.
    #[serde(default)]
    pub metadata: Option<Value>,
    /// The actual payload.
    #[serde(default)]
    pub body: Option<Value>,
}

impl Envelope {
    /// Creates an empty envelope with both slots absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an envelope from a byte slice.
    ///
    /// Fails with [`EnvelopeError::Malformed`] if the bytes are not valid
    /// JSON or the top-level value is not an object. Missing keys decode to
    /// absent slots, not an error.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        serde_json::from_slice(bytes).map_err(EnvelopeError::Malformed)
    }

    /// Parses an envelope from a byte stream.
    ///
    /// Same contract as [`Envelope::from_slice`]; read errors surface as
    /// [`EnvelopeError::Malformed`] since the stream cannot be a well-formed
    /// envelope either way.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, EnvelopeError> {
        serde_json::from_reader(reader).map_err(EnvelopeError::Malformed)
    }

    /// Serializes the envelope to its wire representation.
    pub fn to_vec(&self) -> Result<Vec<u8>, EnvelopeError> {
        serde_json::to_vec(self).map_err(EnvelopeError::Serialization)
    }

    /// Coerces the metadata slot into `T`.
    ///
    /// Coercion is structural: object keys are matched to `T`'s fields by
    /// name, and a per-field type mismatch fails with
    /// [`EnvelopeError::FieldDecode`] naming the slot. An absent or `null`
    /// slot yields `T::default()`.
    pub fn decode_metadata<T>(&self) -> Result<T, EnvelopeError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        decode_slot(&self.metadata, EnvelopeField::Metadata)
    }

    /// Coerces the body slot into `T`. Same contract as
    /// [`Envelope::decode_metadata`].
    pub fn decode_body<T>(&self) -> Result<T, EnvelopeError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        decode_slot(&self.body, EnvelopeField::Body)
    }

}

/// Decode one slot into the destination type, or its zero value when the
/// slot is absent.
fn decode_slot<T>(slot: &Option<Value>, field: EnvelopeField) -> Result<T, EnvelopeError>
where
    T: serde::de::DeserializeOwned + Default,
{
    match slot {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|source| EnvelopeError::FieldDecode { field, source }),
    }
}
