//! Envelope-parsing middleware.
//!
//! Buffers the request body, parses the `{metadata, body}` envelope, and
//! stashes it on a [`Carrier`] in the request extensions. The buffered bytes
//! are put back on the request afterwards, so downstream extractors and
//! handlers see the body untouched.
//!
//! Parse failures are answered directly with a 400 JSON error; oversize
//! bodies with 413. Methods that do not carry a request body pass through
//! without touching the extensions.

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderValue, Method, Request, StatusCode},
    response::Response,
};
use bytes::Bytes;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::{debug, warn};

use metawrap::{Carrier, CarrierEnvelopeExt, Envelope, EnvelopeError};

use crate::config::EnvelopeConfig;

/// Layer that installs [`EnvelopeService`] around an inner service.
#[derive(Clone, Default)]
pub struct EnvelopeLayer {
    config: Arc<EnvelopeConfig>,
}

impl EnvelopeLayer {
    #[must_use]
    pub fn new(config: EnvelopeConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for EnvelopeLayer {
    type Service = EnvelopeService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        EnvelopeService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Service that parses the envelope out of request bodies.
#[derive(Clone)]
pub struct EnvelopeService<S> {
    inner: S,
    config: Arc<EnvelopeConfig>,
}

impl<S> Service<Request<Body>> for EnvelopeService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let config = Arc::clone(&self.config);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if !has_request_body(req.method()) {
                debug!(method = %req.method(), "no request body expected, skipping envelope parse");
                return inner.call(req).await;
            }

            let (mut parts, body) = req.into_parts();

            let body_bytes = match to_bytes(body, config.max_body_size).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(error = %e, max = config.max_body_size, "failed to buffer request body");
                    return Ok(error_response(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        &format!("request body exceeds {} bytes", config.max_body_size),
                    ));
                }
            };

            let carrier = match parse_into_carrier(&body_bytes) {
                Ok(carrier) => carrier,
                Err(e) => {
                    warn!(error = %e, "rejecting request with malformed envelope");
                    return Ok(error_response(StatusCode::BAD_REQUEST, &e.to_string()));
                }
            };

            parts.extensions.insert(carrier);

            // Restore the buffered bytes so the body stays readable downstream.
            let req = Request::from_parts(parts, Body::from(body_bytes));
            inner.call(req).await
        })
    }
}

/// True for methods that conventionally carry a request body.
fn has_request_body(method: &Method) -> bool {
    method == Method::POST || method == Method::PUT || method == Method::PATCH
}

/// Parse the body bytes and attach the envelope to a fresh carrier.
///
/// Exported for integration testing.
pub fn parse_into_carrier(body: &Bytes) -> Result<Carrier, EnvelopeError> {
    let envelope = Envelope::from_slice(body)?;
    Ok(Carrier::new().attach(envelope))
}

/// Build a JSON error response in the shape `{"error": "..."}`.
fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message });

    let mut response = Response::new(Body::from(serde_json::to_vec(&body).unwrap_or_default()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    response
}
