//! FIPS 203 hash adapter for ML-KEM.
//!
//! A uniform facade over the four symmetric oracles the core consumes:
//!
//! - H = SHA3-256: public key hashing
//! - G = SHA3-512: seed and key derivation, split as (32, 32)
//! - J = SHAKE256: implicit rejection KDF
//! - PRF = SHAKE256 over seed || counter: CBD sampling input
//! - XOF = SHAKE128 with streaming squeeze: uniform rejection sampling
//!
//! Every function is written against a fallible oracle contract
//! (`Error::OracleFailure` is reserved for a backend that can fail); the
//! bundled `sha3` backend cannot, but callers — in particular decapsulation,
//! which must mask oracle failure behind the implicit-rejection key — do not
//! rely on that.

use crate::params::{PKHASH_BYTES, RANDOM_BYTES, SHARED_SECRET_BYTES};
use krater_core::Result;
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Digest, Sha3_256, Sha3_512, Shake128, Shake256,
};

/// H: SHA3-256 of a variable-length input.
pub(crate) fn hash_h(input: &[u8]) -> Result<[u8; PKHASH_BYTES]> {
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, input);
    let mut output = [0u8; PKHASH_BYTES];
    output.copy_from_slice(&hasher.finalize());
    Ok(output)
}

/// G: SHA3-512 of a variable-length input, 64 bytes of output.
///
/// Callers split the result as two 32-byte halves: (rho, sigma) in key
/// generation, (K, r) in encapsulation and decapsulation.
pub(crate) fn hash_g(input: &[u8]) -> Result<[u8; 64]> {
    let mut hasher = Sha3_512::new();
    Digest::update(&mut hasher, input);
    let mut output = [0u8; 64];
    output.copy_from_slice(&hasher.finalize());
    Ok(output)
}

/// J: SHAKE256 of z || ciphertext, producing the 32-byte implicit-rejection
/// secret. Computed on every decapsulation, success or not.
pub(crate) fn kdf(
    z: &[u8; RANDOM_BYTES],
    ctext: &[u8],
) -> Result<[u8; SHARED_SECRET_BYTES]> {
    let mut hasher = Shake256::default();
    hasher.update(z);
    hasher.update(ctext);
    let mut reader = hasher.finalize_xof();
    let mut output = [0u8; SHARED_SECRET_BYTES];
    reader.read(&mut output);
    Ok(output)
}

/// PRF: SHAKE256 of seed || counter, squeezed to `out.len()` bytes.
///
/// The single counter byte provides domain separation between the CBD
/// samples drawn from one seed.
pub(crate) fn prf(out: &mut [u8], seed: &[u8; RANDOM_BYTES], counter: u8) -> Result<()> {
    let mut hasher = Shake256::default();
    hasher.update(seed);
    hasher.update(&[counter]);
    let mut reader = hasher.finalize_xof();
    reader.read(out);
    Ok(())
}

/// XOF for uniform sampling: SHAKE128 absorbed once over rho and a
/// two-byte matrix cell index, then squeezed incrementally.
///
/// Rejection sampling may request arbitrarily many blocks, so the reader is
/// retained between [`Xof::squeeze`] calls rather than re-finalised.
pub(crate) struct Xof {
    reader: sha3::Shake128Reader,
}

impl Xof {
    /// Absorb `rho || index[0] || index[1]`.
    ///
    /// The two index bytes are appended exactly in the order given; the
    /// matrix layer decides which cell index order to use (see
    /// `matrix::Matrix::expand` for the transposed-storage convention).
    pub fn new(rho: &[u8; RANDOM_BYTES], index: [u8; 2]) -> Result<Self> {
        let mut hasher = Shake128::default();
        hasher.update(rho);
        hasher.update(&index);
        Ok(Self {
            reader: hasher.finalize_xof(),
        })
    }

    /// Squeeze the next `out.len()` bytes of the stream.
    pub fn squeeze(&mut self, out: &mut [u8]) -> Result<()> {
        self.reader.read(out);
        Ok(())
    }
}
