//! Relay operations: authenticated enqueue, unauthenticated dequeue
//!
//! Dequeue carries no credential check. Polling trading clients cannot send
//! custom credentials, so the read path stays open; closing it would break
//! existing consumers.

pub mod auth;
pub mod error;
pub mod service;

pub use auth::AuthGate;
pub use error::{ErrorBody, RelayError};
pub use service::{EnqueueReceipt, RelayService};
