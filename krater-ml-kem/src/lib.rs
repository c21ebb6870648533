//! # ML-KEM (FIPS 203)
//!
//! Implementation of the Module-Lattice-Based Key Encapsulation Mechanism
//! as specified in [FIPS 203](https://csrc.nist.gov/pubs/fips/203/final).
//!
//! ## Parameter Sets
//!
//! | Parameter Set | Security Level | Public Key | Private Key | Ciphertext |
//! |---------------|----------------|------------|-------------|------------|
//! | ML-KEM-512    | 1 (128-bit)    | 800 bytes  | 1632 bytes  | 768 bytes  |
//! | ML-KEM-768    | 3 (192-bit)    | 1184 bytes | 2400 bytes  | 1088 bytes |
//! | ML-KEM-1024   | 5 (256-bit)    | 1568 bytes | 3168 bytes  | 1568 bytes |
//!
//! ## Two API levels
//!
//! [`MlKemKey`] is the runtime-polymorphic key object: variant selected at
//! construction, material installed exactly once by parsing or generation,
//! pre-expanded matrix retained for repeated operations, secrets erased on
//! drop. The `MlKem512`/`MlKem768`/`MlKem1024` types are byte-oriented
//! front ends over it implementing the workspace [`Kem`] trait.
//!
//! ## Example
//!
//! ```ignore
//! use krater_ml_kem::{Kem, MlKem768};
//!
//! let (dk, ek) = MlKem768::keygen(&mut rng)?;
//! let (ct, ss_sender) = MlKem768::encaps(&ek, &mut rng)?;
//! let ss_receiver = MlKem768::decaps(&dk, &ct)?;
//! assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod encode;
mod hash;
mod k_pke;
mod kem;
mod key;
mod matrix;
mod ntt;
mod params;
mod poly;
mod polyvec;
mod reduce;
mod sample;

/// ML-KEM-512 KEM types.
pub mod ml_kem_512;
/// ML-KEM-768 KEM types.
pub mod ml_kem_768;
/// ML-KEM-1024 KEM types.
pub mod ml_kem_1024;

pub use key::{MlKemKey, Selection};
pub use krater_core::Kem;
pub use ml_kem_1024::MlKem1024;
pub use ml_kem_512::MlKem512;
pub use ml_kem_768::MlKem768;
pub use params::{
    Variant, VariantInfo, ML_KEM_1024, ML_KEM_512, ML_KEM_768, SEED_BYTES, SHARED_SECRET_BYTES,
};
