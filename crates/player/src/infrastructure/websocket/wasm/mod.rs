//! Browser bridge transport using web-sys

mod client;

pub use client::BridgeClient;
