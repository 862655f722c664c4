//! HTTP client building for outbound calls to Zoom.

mod client;

pub use client::{ClientBuilder, HttpClientConfig};
