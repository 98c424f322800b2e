//! End-to-end envelope flow through the axum adapter.
//!
//! Mirrors the reference usage: a client encodes `{metadata, body}` request
//! bytes, the middleware parses them onto a carrier, the handler reads both
//! slots typed and answers with an envelope that reuses the request
//! metadata. No sockets; the router is driven with `tower::ServiceExt`.

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        response::{IntoResponse, Response},
        routing::{get, post},
        Router,
    };
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use tower::ServiceExt;

    use metawrap::{decode_parts, encode, encode_from_carrier, CarrierEnvelopeExt};
    use metawrap_axum::{EnvelopeConfig, EnvelopeLayer, ExtractCarrier};

    use crate::init_tracing;

    #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
    struct Meta {
        name: String,
        size: i64,
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
    struct ReqBody {
        status: String,
        value: i64,
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
    struct RespBody {
        echoed: i64,
    }

    /// Reads both slots typed and answers with an envelope reusing the
    /// request metadata.
    async fn echo_handler(ExtractCarrier(carrier): ExtractCarrier) -> Response {
        let body: ReqBody = match carrier.body() {
            Ok(body) => body,
            Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        };
        // Typed metadata access must work too; unused beyond the check.
        if let Err(e) = carrier.metadata::<Meta>() {
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }

        match encode_from_carrier(&carrier, &RespBody { echoed: body.value }) {
            Ok(bytes) => bytes.into_response(),
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        }
    }

    /// Reports whether a carrier reached the handler at all.
    async fn probe_handler(ExtractCarrier(carrier): ExtractCarrier) -> Response {
        match carrier.envelope() {
            Some(_) => "attached".into_response(),
            None => "absent".into_response(),
        }
    }

    fn app() -> Router {
        Router::new()
            .route("/echo", post(echo_handler))
            .route("/probe", get(probe_handler).post(probe_handler))
            .layer(EnvelopeLayer::new(EnvelopeConfig::default()))
    }

    fn post_request(uri: &str, bytes: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::from(bytes))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_end_to_end_round_trip() {
        init_tracing();

        let meta = Meta {
            name: "my metadata".into(),
            size: 24,
        };
        let body = ReqBody {
            status: "good to go".into(),
            value: 32,
        };
        let bytes = encode(&meta, &body).unwrap();

        let response = app().oneshot(post_request("/echo", bytes)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (resp_meta, resp_body): (Meta, RespBody) =
            decode_parts(&body_bytes(response).await).unwrap();
        // Metadata travels back untouched, body is the handler's own.
        assert_eq!(resp_meta, meta);
        assert_eq!(resp_body, RespBody { echoed: 32 });
    }

    #[tokio::test]
    async fn test_missing_metadata_decodes_to_zero_value() {
        init_tracing();

        let bytes = serde_json::to_vec(&json!({
            "body": {"status": "ok", "value": 1}
        }))
        .unwrap();

        let response = app().oneshot(post_request("/echo", bytes)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (resp_meta, resp_body): (Meta, RespBody) =
            decode_parts(&body_bytes(response).await).unwrap();
        assert_eq!(resp_meta, Meta::default(), "absent metadata round-trips as zero value");
        assert_eq!(resp_body.echoed, 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_with_400() {
        init_tracing();

        let response = app()
            .oneshot(post_request("/echo", b"not json".to_vec()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(error["error"].as_str().unwrap().contains("malformed envelope"));
    }

    #[tokio::test]
    async fn test_top_level_array_is_rejected_with_400() {
        init_tracing();

        let response = app()
            .oneshot(post_request("/echo", b"[1,2,3]".to_vec()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_requests_pass_through_without_carrier() {
        init_tracing();

        let request = Request::builder()
            .method(Method::GET)
            .uri("/probe")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"absent");
    }

    #[tokio::test]
    async fn test_post_installs_carrier() {
        init_tracing();

        let bytes = serde_json::to_vec(&json!({"metadata": null, "body": null})).unwrap();
        let response = app().oneshot(post_request("/probe", bytes)).await.unwrap();
        assert_eq!(body_bytes(response).await, b"attached");
    }

    #[tokio::test]
    async fn test_oversize_body_is_rejected_with_413() {
        init_tracing();

        let app = Router::new()
            .route("/echo", post(echo_handler))
            .layer(EnvelopeLayer::new(EnvelopeConfig { max_body_size: 64 }));

        let huge = serde_json::to_vec(&json!({
            "metadata": null,
            "body": {"padding": "x".repeat(256)}
        }))
        .unwrap();

        let response = app.oneshot(post_request("/echo", huge)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_handler_still_sees_raw_body() {
        init_tracing();

        // The layer buffers and restores the bytes, so a plain axum body
        // extractor keeps working behind it.
        async fn raw_handler(body: axum::body::Bytes) -> Response {
            body.len().to_string().into_response()
        }

        let app = Router::new()
            .route("/raw", post(raw_handler))
            .layer(EnvelopeLayer::new(EnvelopeConfig::default()));

        let bytes = serde_json::to_vec(&json!({"metadata": 1, "body": 2})).unwrap();
        let expected_len = bytes.len().to_string();
        let response = app.oneshot(post_request("/raw", bytes)).await.unwrap();
        assert_eq!(body_bytes(response).await, expected_len.as_bytes());
    }
}
