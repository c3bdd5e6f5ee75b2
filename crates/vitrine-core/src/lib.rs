//! Ambient service plumbing shared across Vitrine services: tracing setup,
//! health endpoints, serialization helpers, and HTTP middleware.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
