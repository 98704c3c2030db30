//! Signal relay: per-account FIFO queues of trading signals over a plain
//! key-value store, fed by webhooks and drained by a polling trading client.

pub mod config;
pub mod core;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod queue;
pub mod relay;
pub mod store;
