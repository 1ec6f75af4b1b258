//! Core types for Shoptill.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod password;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use password::PasswordChecks;
pub use status::*;
