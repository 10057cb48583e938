//! Core types for Orchard.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod card;
pub mod email;
pub mod id;

pub use card::{CardNumber, CardNumberError};
pub use email::{Email, EmailError};
pub use id::*;
