//! # Krater
//!
//! ML-KEM (FIPS 203), the module-lattice key encapsulation mechanism, in
//! pure Rust: deterministic key generation from a 64-byte seed,
//! encapsulation of a 32-byte shared secret, and decapsulation with
//! implicit rejection, for all three parameter sets (ML-KEM-512, -768,
//! -1024).
//!
//! The implementation lives in [`ml_kem`] and exposes two API levels:
//!
//! - [`ml_kem::MlKemKey`] — a variant-selected key object. Material is
//!   installed exactly once (parse or generate), the public matrix is kept
//!   expanded across operations, and secrets are erased on drop. This is
//!   the right level for hosts that hold keys and perform many operations.
//! - `MlKem512` / `MlKem768` / `MlKem1024` — byte-oriented KEM types
//!   implementing the [`traits::Kem`] trait, for one-shot use against
//!   serialised keys.
//!
//! ## Features
//!
//! - `std` (default): standard library support; without it the crates
//!   build on `core` + `alloc`
//! - `ml-kem` (default): the ML-KEM implementation itself (disable for an
//!   error-types-and-traits-only build)
//!
//! ## Example
//!
//! ```ignore
//! use krater::ml_kem::{MlKemKey, Variant};
//!
//! let mut key = MlKemKey::new(Variant::MlKem768);
//! key.generate(&mut rng, None, None)?;
//!
//! let mut ct = [0u8; 1088];
//! let mut ss_sender = [0u8; 32];
//! key.encapsulate_random(&mut rng, &mut ct, &mut ss_sender)?;
//!
//! let mut ss_receiver = [0u8; 32];
//! key.decapsulate(&ct, &mut ss_receiver, &mut rng)?;
//! assert_eq!(ss_sender, ss_receiver);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use krater_core::{Error, Result};

/// Core traits for cryptographic primitives.
pub mod traits {
    pub use krater_core::Kem;
}

/// ML-KEM (FIPS 203) key encapsulation mechanism.
#[cfg(feature = "ml-kem")]
pub mod ml_kem {
    pub use krater_core::Kem;
    pub use krater_ml_kem::*;
}
