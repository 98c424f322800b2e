//! # Metawrap Test Suite
//!
//! Unified test crate for cross-crate flows:
//!
//! ```text
//! tests/src/
//! └── integration/      # Envelope flows through the axum adapter
//!     └── e2e_envelope.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p metawrap-tests
//!
//! # By category
//! cargo test -p metawrap-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
