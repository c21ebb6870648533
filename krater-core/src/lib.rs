//! # Krater Core
//!
//! Core traits and utilities for the Krater post-quantum cryptography library.
//!
//! This crate provides:
//! - Common error types
//! - The [`Kem`] trait implemented by the key encapsulation mechanisms
//! - Re-exports of the constant-time and secret-hygiene crates used
//!   throughout the workspace

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::Kem;

/// Re-export of zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export of subtle for constant-time operations.
pub use subtle;
