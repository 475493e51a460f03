//! Shared plumbing for Cinenight services: health checks, request tracing,
//! log initialisation and wire-format helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
