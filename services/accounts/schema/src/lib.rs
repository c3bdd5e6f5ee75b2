//! sea-orm entity models for the accounts service.
//!
//! Column names, lengths, uniqueness, and cascade rules live here and in the
//! companion migration crate; domain types carry no persistence metadata.

pub mod addresses;
pub mod orders;
pub mod product_reports;
pub mod products;
pub mod user_verifications;
pub mod users;
