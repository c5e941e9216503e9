//! Core types for Hunger Box.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod counter;
pub mod id;
pub mod price;

pub use contact::{ContactNumber, ContactNumberError};
pub use counter::{Category, Counter};
pub use id::*;
pub use price::Price;
