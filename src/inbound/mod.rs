//! Inbound adapters: entry points that drive the domain.

pub mod http;
