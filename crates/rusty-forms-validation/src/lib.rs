//! rusty-forms validation core
//!
//! Pure Rust validation predicates compatible with both std and no_std environments.
//! Used by the server-side validator and, through the same engine, by the WASM
//! client-side validator.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod email;
pub mod numeric;
pub mod phone;
pub mod string;

// Re-export all validators
pub use email::*;
pub use numeric::*;
pub use phone::*;
pub use string::*;
