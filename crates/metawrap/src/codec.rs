//! Whole-envelope encode/decode helpers for HTTP bodies.
//!
//! The serving and client layers own the transport; these helpers only
//! produce outbound body bytes and consume inbound body bytes.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::carrier::Carrier;
use crate::envelope::Envelope;
use crate::error::EnvelopeError;
use crate::store::CarrierEnvelopeExt;

/// Serializes `{metadata, body}` to its wire representation.
///
/// Fails with [`EnvelopeError::Serialization`] when either value cannot be
/// converted to JSON (non-string map keys, failing `Serialize` impls).
pub fn encode<M, B>(metadata: &M, body: &B) -> Result<Vec<u8>, EnvelopeError>
where
    M: Serialize,
    B: Serialize,
{
    let envelope = Envelope {
        metadata: Some(serde_json::to_value(metadata).map_err(EnvelopeError::Serialization)?),
        body: Some(serde_json::to_value(body).map_err(EnvelopeError::Serialization)?),
    };
    envelope.to_vec()
}

/// Serializes an envelope reusing whatever metadata is attached to the
/// carrier (none when absent) combined with the supplied body.
///
/// The carrier itself is unaffected; this reads its envelope, it does not
/// re-associate anything.
pub fn encode_from_carrier<B>(carrier: &Carrier, body: &B) -> Result<Vec<u8>, EnvelopeError>
where
    B: Serialize,
{
    let mut envelope = carrier.envelope().cloned().unwrap_or_default();
    envelope.body = Some(serde_json::to_value(body).map_err(EnvelopeError::Serialization)?);
    envelope.to_vec()
}

/// Parses an envelope and decodes both slots in one step, the usual shape
/// for consuming a response body.
///
/// Absent slots yield the destination's `Default`; a slot mismatch fails
/// with [`EnvelopeError::FieldDecode`] naming the offending slot.
pub fn decode_parts<M, B>(bytes: &[u8]) -> Result<(M, B), EnvelopeError>
where
    M: DeserializeOwned + Default,
    B: DeserializeOwned + Default,
{
    let envelope = Envelope::from_slice(bytes)?;
    let metadata = envelope.decode_metadata()?;
    let body = envelope.decode_body()?;
    Ok((metadata, body))
}
