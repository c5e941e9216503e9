//! Hunger Box Core - Shared types library.
//!
//! This crate provides the common domain types used by the Hunger Box
//! ordering site.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! session handling. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, contact numbers,
//!   prices, counters, and menu categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
