//! keeper-rest - HTTP-backed resource client.

mod client;
mod http;

pub use client::RestService;
pub use http::RestTransport;
