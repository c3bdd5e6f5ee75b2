//! Domain types shared across all Vitrine services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod auth;
pub mod id;
pub mod pagination;
pub mod role;
