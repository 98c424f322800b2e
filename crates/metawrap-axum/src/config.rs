//! Layer configuration.

/// Limits applied while buffering request bodies.
#[derive(Debug, Clone)]
pub struct EnvelopeConfig {
    /// Maximum request body size in bytes; larger bodies are rejected with
    /// 413 before parsing.
    pub max_body_size: usize,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            // 1 MiB
            max_body_size: 1024 * 1024,
        }
    }
}
