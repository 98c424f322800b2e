//! Carrier extractor for axum handlers.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use tracing::debug;

use metawrap::Carrier;

/// Extracts the [`Carrier`] installed by
/// [`EnvelopeLayer`](crate::EnvelopeLayer).
///
/// Infallible: when the layer did not run for this request (or the
/// extensions hold something unexpected), the handler gets an empty carrier
/// and observes `NotFound` on envelope access downstream.
#[derive(Debug, Clone)]
pub struct ExtractCarrier(pub Carrier);

#[async_trait]
impl<S> FromRequestParts<S> for ExtractCarrier
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let carrier = match parts.extensions.get::<Carrier>() {
            Some(carrier) => carrier.clone(),
            None => {
                debug!("no carrier in request extensions, handing out an empty one");
                Carrier::new()
            }
        };
        Ok(ExtractCarrier(carrier))
    }
}
