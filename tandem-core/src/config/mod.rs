//! Configuration types
//!
//! Board-agnostic configuration structures, deserializable with `serde`
//! when the `serde` feature is enabled.

pub mod types;

pub use types::*;
