//! Shared collection and identifier types.

pub mod collections;
pub mod identifiers;
