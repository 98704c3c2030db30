//! Shared data models spanning the relay layers.

pub mod account;
pub mod signal;

pub use account::{AccountKey, DEFAULT_ACCOUNT};
pub use signal::{generate_signal_id, Signal, RECEIVED_AT_FIELD, SIGNAL_ID_FIELD};
