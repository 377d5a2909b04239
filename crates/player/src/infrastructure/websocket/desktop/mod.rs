//! Desktop bridge transport using tokio-tungstenite

mod client;

pub use client::BridgeClient;
