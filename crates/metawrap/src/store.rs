//! Envelope storage on a [`Carrier`].
//!
//! The envelope lives under a private key type, so no caller-visible key can
//! collide with it. At most one envelope is reachable at any point in the
//! chain; re-attaching shadows the previous one.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::carrier::Carrier;
use crate::envelope::Envelope;
use crate::error::EnvelopeError;

/// Private marker key for the envelope slot. Unexported on purpose.
struct EnvelopeKey;

/// Envelope accessors on a [`Carrier`].
pub trait CarrierEnvelopeExt {
    /// Returns a new carrier with `envelope` attached. Never fails.
    #[must_use]
    fn attach(&self, envelope: Envelope) -> Carrier;

    /// Replaces the metadata slot of the attached envelope (creating an
    /// empty envelope when none is attached) and returns the new carrier.
    ///
    /// Fails with [`EnvelopeError::Serialization`] when `metadata` cannot be
    /// converted to a JSON value; the body slot is never touched.
    fn attach_metadata<M: Serialize>(&self, metadata: &M) -> Result<Carrier, EnvelopeError>;

    /// The most recently attached envelope, or `None` when absent (or when
    /// the slot holds an unexpected type, treated as absent).
    fn envelope(&self) -> Option<&Envelope>;

    /// Decodes the attached envelope's metadata slot into `T`.
    ///
    /// Fails with [`EnvelopeError::NotFound`] when no envelope is attached;
    /// otherwise follows [`Envelope::decode_metadata`].
    fn metadata<T: DeserializeOwned + Default>(&self) -> Result<T, EnvelopeError>;

    /// Decodes the attached envelope's body slot into `T`. Same contract as
    /// [`CarrierEnvelopeExt::metadata`].
    fn body<T: DeserializeOwned + Default>(&self) -> Result<T, EnvelopeError>;
}

impl CarrierEnvelopeExt for Carrier {
    fn attach(&self, envelope: Envelope) -> Carrier {
        self.with_value::<EnvelopeKey, _>(envelope)
    }

    fn attach_metadata<M: Serialize>(&self, metadata: &M) -> Result<Carrier, EnvelopeError> {
        let mut envelope = self.envelope().cloned().unwrap_or_default();
        envelope.metadata =
            Some(serde_json::to_value(metadata).map_err(EnvelopeError::Serialization)?);
        Ok(self.attach(envelope))
    }

    fn envelope(&self) -> Option<&Envelope> {
        self.value::<EnvelopeKey, Envelope>()
    }

    fn metadata<T: DeserializeOwned + Default>(&self) -> Result<T, EnvelopeError> {
        self.envelope()
            .ok_or(EnvelopeError::NotFound)?
            .decode_metadata()
    }

    fn body<T: DeserializeOwned + Default>(&self) -> Result<T, EnvelopeError> {
        self.envelope().ok_or(EnvelopeError::NotFound)?.decode_body()
    }
}
