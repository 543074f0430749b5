//! Domain models for Siteforge.
//!
//! These are the core types shared across all crates.

pub mod client;
pub mod document;
pub mod template;
