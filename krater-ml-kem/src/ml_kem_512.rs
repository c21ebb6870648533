//! ML-KEM-512 front end (NIST security category 1).
//!
//! Byte-oriented KEM types over the [`MlKemKey`] engine, implementing the
//! workspace [`Kem`] trait. The smallest parameter set; note that its
//! secret vector is sampled with eta1 = 3, unlike the larger variants.

use crate::key::MlKemKey;
use crate::params::{Variant, ML_KEM_512, SHARED_SECRET_BYTES};
use krater_core::{Error, Kem, Result};
use rand_core::CryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Decapsulation key size in bytes.
pub const DECAPSULATION_KEY_SIZE: usize = ML_KEM_512.prvkey_bytes;
/// Encapsulation key size in bytes.
pub const ENCAPSULATION_KEY_SIZE: usize = ML_KEM_512.pubkey_bytes;
/// Ciphertext size in bytes.
pub const CIPHERTEXT_SIZE: usize = ML_KEM_512.ctext_bytes;

/// ML-KEM-512 decapsulation key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DecapsulationKey {
    bytes: [u8; DECAPSULATION_KEY_SIZE],
}

impl DecapsulationKey {
    /// Create a decapsulation key from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != DECAPSULATION_KEY_SIZE {
            return Err(Error::InvalidKeyLength {
                expected: DECAPSULATION_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut key = [0u8; DECAPSULATION_KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self { bytes: key })
    }

    /// Get the key as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// ML-KEM-512 encapsulation key.
#[derive(Clone)]
pub struct EncapsulationKey {
    bytes: [u8; ENCAPSULATION_KEY_SIZE],
}

impl EncapsulationKey {
    /// Create an encapsulation key from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ENCAPSULATION_KEY_SIZE {
            return Err(Error::InvalidKeyLength {
                expected: ENCAPSULATION_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut key = [0u8; ENCAPSULATION_KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self { bytes: key })
    }

    /// Get the key as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// ML-KEM-512 ciphertext.
#[derive(Clone)]
pub struct Ciphertext {
    bytes: [u8; CIPHERTEXT_SIZE],
}

impl Ciphertext {
    /// Create a ciphertext from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != CIPHERTEXT_SIZE {
            return Err(Error::InvalidCiphertextLength {
                expected: CIPHERTEXT_SIZE,
                actual: bytes.len(),
            });
        }
        let mut ct = [0u8; CIPHERTEXT_SIZE];
        ct.copy_from_slice(bytes);
        Ok(Self { bytes: ct })
    }

    /// Get the ciphertext as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// ML-KEM-512 shared secret.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; SHARED_SECRET_BYTES],
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// ML-KEM-512 key encapsulation mechanism.
pub struct MlKem512;

impl Kem for MlKem512 {
    type DecapsulationKey = DecapsulationKey;
    type EncapsulationKey = EncapsulationKey;
    type Ciphertext = Ciphertext;
    type SharedSecret = SharedSecret;

    const DECAPSULATION_KEY_SIZE: usize = DECAPSULATION_KEY_SIZE;
    const ENCAPSULATION_KEY_SIZE: usize = ENCAPSULATION_KEY_SIZE;
    const CIPHERTEXT_SIZE: usize = CIPHERTEXT_SIZE;
    const SHARED_SECRET_SIZE: usize = SHARED_SECRET_BYTES;

    fn keygen(
        rng: &mut impl CryptoRng,
    ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)> {
        let mut key = MlKemKey::new(Variant::MlKem512);
        key.generate(rng, None, None)?;

        let mut dk = [0u8; DECAPSULATION_KEY_SIZE];
        key.encode_private_key(&mut dk)?;
        let mut ek = [0u8; ENCAPSULATION_KEY_SIZE];
        key.encode_public_key(&mut ek)?;

        Ok((DecapsulationKey { bytes: dk }, EncapsulationKey { bytes: ek }))
    }

    fn encaps(
        ek: &Self::EncapsulationKey,
        rng: &mut impl CryptoRng,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)> {
        let mut key = MlKemKey::new(Variant::MlKem512);
        key.parse_public_key(&ek.bytes)?;

        let mut ct = [0u8; CIPHERTEXT_SIZE];
        let mut ss = [0u8; SHARED_SECRET_BYTES];
        key.encapsulate_random(rng, &mut ct, &mut ss)?;

        Ok((Ciphertext { bytes: ct }, SharedSecret { bytes: ss }))
    }

    fn decaps(dk: &Self::DecapsulationKey, ct: &Self::Ciphertext) -> Result<Self::SharedSecret> {
        let mut key = MlKemKey::new(Variant::MlKem512);
        key.parse_private_key(&dk.bytes)?;

        let mut ss = [0u8; SHARED_SECRET_BYTES];
        key.decapsulate_validated(&ct.bytes, &mut ss)?;
        Ok(SharedSecret { bytes: ss })
    }
}
