//! Cryptographic primitive traits.

use crate::Result;
use rand_core::CryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key Encapsulation Mechanism (KEM) trait.
///
/// This trait defines the interface for key encapsulation mechanisms
/// as specified in NIST post-quantum cryptography standards.
///
/// # Example
///
/// ```ignore
/// use krater_core::Kem;
///
/// let (dk, ek) = MyKem::keygen(&mut rng)?;
/// let (ct, ss_sender) = MyKem::encaps(&ek, &mut rng)?;
/// let ss_receiver = MyKem::decaps(&dk, &ct)?;
/// ```
pub trait Kem {
    /// Decapsulation key (private key).
    type DecapsulationKey: Zeroize + ZeroizeOnDrop;

    /// Encapsulation key (public key).
    type EncapsulationKey: Clone;

    /// Ciphertext produced by encapsulation.
    type Ciphertext: Clone;

    /// Shared secret produced by encapsulation/decapsulation.
    type SharedSecret: Zeroize + ZeroizeOnDrop + AsRef<[u8]>;

    /// Size of the decapsulation key in bytes.
    const DECAPSULATION_KEY_SIZE: usize;

    /// Size of the encapsulation key in bytes.
    const ENCAPSULATION_KEY_SIZE: usize;

    /// Size of the ciphertext in bytes.
    const CIPHERTEXT_SIZE: usize;

    /// Size of the shared secret in bytes.
    const SHARED_SECRET_SIZE: usize;

    /// Generate a new key pair.
    fn keygen(rng: &mut impl CryptoRng)
        -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)>;

    /// Encapsulate a shared secret using the encapsulation key.
    fn encaps(
        ek: &Self::EncapsulationKey,
        rng: &mut impl CryptoRng,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)>;

    /// Decapsulate a shared secret using the decapsulation key.
    ///
    /// # Security
    ///
    /// Implementations MUST use implicit rejection to prevent
    /// chosen-ciphertext attacks. Invalid ciphertexts should
    /// produce a pseudorandom shared secret derived from the
    /// private key and ciphertext.
    fn decaps(dk: &Self::DecapsulationKey, ct: &Self::Ciphertext) -> Result<Self::SharedSecret>;
}
