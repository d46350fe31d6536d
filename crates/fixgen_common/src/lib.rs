//! Shared foundational types used across the fixgen workspace.
//!
//! Currently this is the interned identifier type used for signal and
//! module names.

#![warn(missing_docs)]

pub mod ident;

pub use ident::{Ident, Interner};
