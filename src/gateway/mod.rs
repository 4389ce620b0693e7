pub mod client;
pub mod types;

pub use client::{GatewayClient, GatewayError, RetryPolicy};
pub use types::{ApplicationSummary, GatewayResponse, Screen, SessionRequest};
