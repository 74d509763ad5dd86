//! REST transport - reqwest-backed remote collections.
//!
//! Requires the `http` feature.
//!
//! Non-2xx responses become [`TransportError::Status`](crate::TransportError)
//! with the `message` (or `error`) field of a JSON error body. Connection
//! failures and timeouts become `Unreachable`, undecodable bodies `Decode`.

mod client;
mod collection;

pub use client::RestClient;
pub use collection::RestCollection;
