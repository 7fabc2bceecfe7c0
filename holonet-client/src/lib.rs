//! # Holonet Client
//!
//! Access layer over the upstream catalog: every request passes through one
//! TTL cache, one token-bucket rate limiter and a retry loop with exponential
//! backoff. On top of single fetches it assembles full collections and
//! resolves cross references between entities.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod config;
mod fetcher;
mod rate_limit;
mod resolver;

pub use client::HolonetClient;
pub use config::ClientConfig;
