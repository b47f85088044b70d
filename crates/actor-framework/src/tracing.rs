//! # Observability & Tracing
//!
//! One-call setup for structured logging across every actor and client.
//!
//! Actors log their lifecycle (`Actor started`, `Shutdown`) and each request
//! with an `entity_type` field and the document id; clients wrap their calls in
//! `#[instrument]` spans. Verbosity is controlled by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run                          # one line per write
//! RUST_LOG=debug cargo run                         # payloads, gets and lists
//! RUST_LOG=lesson_booking=debug,tower_http=info cargo run
//! ```
//!
//! With `RUST_LOG=info` a successful booking reads roughly:
//!
//! ```text
//! INFO http.request: started processing request method=POST uri=/order
//! INFO http.request:place_order: Action ok entity_type="Lesson" id=lesson_1
//! INFO http.request:place_order: Created entity_type="Order" id=order_1 size=1
//! ```

/// Installs the global `tracing` subscriber.
///
/// Compact format with module targets hidden (`entity_type` identifies the
/// actor). Safe to call more than once: later calls are ignored, which keeps
/// tests that share a process from panicking.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
