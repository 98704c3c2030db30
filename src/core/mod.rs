//! Core application primitives (HTTP surface and wiring)

pub mod http;

pub use http::*;
