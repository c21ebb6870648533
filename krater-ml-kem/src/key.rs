//! The ML-KEM key object: lifecycle, wire codec, and the public
//! operations of the core.
//!
//! A key is born empty, holding only its variant selector. It becomes a
//! public key when parsing or generation installs (t, m, rho, pkhash), and
//! a private key when (s, z) are installed alongside. Installed material is
//! immutable: a second install attempt fails with [`Error::ImmutableKey`].
//! On drop, s and z are erased before their storage is released.
//!
//! Rank is selected at runtime, but the three ranks dispatch to monomorphic
//! code paths over `KeyData<K>` so the compiler sees fixed-size arrays in
//! every inner loop.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use crate::hash::hash_h;
use crate::kem;
use crate::matrix::Matrix;
use crate::params::{
    variant_info, Variant, MAX_PUBKEY_BYTES, PKHASH_BYTES, RANDOM_BYTES, SEED_BYTES,
    SHARED_SECRET_BYTES,
};
use crate::polyvec::PolyVec;
use krater_core::{Error, Result};
use rand_core::CryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// The private half of a key: the secret vector s (NTT domain) and the
/// implicit-rejection secret z. Erased on drop.
pub(crate) struct PrivateData<const K: usize> {
    /// Secret vector, held in the NTT domain.
    pub s: PolyVec<K>,
    /// Implicit-rejection secret, stored verbatim from the seed.
    pub z: [u8; RANDOM_BYTES],
}

impl<const K: usize> Clone for PrivateData<K> {
    fn clone(&self) -> Self {
        Self {
            s: self.s.clone(),
            z: self.z,
        }
    }
}

impl<const K: usize> Zeroize for PrivateData<K> {
    fn zeroize(&mut self) {
        self.s.zeroize();
        self.z.zeroize();
    }
}

impl<const K: usize> Drop for PrivateData<K> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<const K: usize> ZeroizeOnDrop for PrivateData<K> {}

/// Monomorphic key material for the variant of rank K.
///
/// The public vector t and the matrix m are kept expanded (16 bits per
/// coefficient) so repeated operations skip decoding and matrix expansion.
pub(crate) struct KeyData<const K: usize> {
    /// Public matrix seed.
    pub rho: [u8; RANDOM_BYTES],
    /// SHA3-256 hash of the encoded public key.
    pub pkhash: [u8; PKHASH_BYTES],
    /// Public vector, NTT domain.
    pub t: PolyVec<K>,
    /// Pre-expanded matrix (transposed storage, see [`crate::matrix`]).
    pub m: Matrix<K>,
    /// Private material, present only for private keys.
    pub secret: Option<PrivateData<K>>,
}

impl<const K: usize> KeyData<K> {
    /// Serialise the public key: ByteEncode_12(t) || rho.
    pub fn encode_public(&self, out: &mut [u8]) {
        let vinfo = variant_info::<K>();
        debug_assert_eq!(out.len(), vinfo.pubkey_bytes);
        let (t_out, rho_out) = out.split_at_mut(vinfo.vector_bytes);
        self.t.encode_12(t_out);
        rho_out.copy_from_slice(&self.rho);
    }

    /// Serialise the private key:
    /// ByteEncode_12(s) || public key || pkhash || z.
    pub fn encode_private(&self, out: &mut [u8]) -> Result<()> {
        let vinfo = variant_info::<K>();
        debug_assert_eq!(out.len(), vinfo.prvkey_bytes);
        let Some(prv) = self.secret.as_ref() else {
            return Err(Error::MissingKeyMaterial);
        };
        let (s_out, rest) = out.split_at_mut(vinfo.vector_bytes);
        prv.s.encode_12(s_out);
        let (pub_out, rest) = rest.split_at_mut(vinfo.pubkey_bytes);
        self.encode_public(pub_out);
        let (hash_out, z_out) = rest.split_at_mut(PKHASH_BYTES);
        hash_out.copy_from_slice(&self.pkhash);
        z_out.copy_from_slice(&prv.z);
        Ok(())
    }

    /// Parse a public key: decode and validate t, keep rho, recompute the
    /// key hash, and pre-expand the matrix.
    pub fn parse_public(bytes: &[u8]) -> Result<Box<Self>> {
        let vinfo = variant_info::<K>();
        debug_assert_eq!(bytes.len(), vinfo.pubkey_bytes);
        let (t_bytes, rho_bytes) = bytes.split_at(vinfo.vector_bytes);
        let t = PolyVec::<K>::decode_12(t_bytes)?;
        let mut rho = [0u8; RANDOM_BYTES];
        rho.copy_from_slice(rho_bytes);
        let pkhash = hash_h(bytes)?;
        let m = Matrix::<K>::expand(&rho)?;
        Ok(Box::new(Self {
            rho,
            pkhash,
            t,
            m,
            secret: None,
        }))
    }

    /// Parse a private key: decode and validate s, parse the embedded
    /// public key, cross-check the embedded key hash byte for byte, and
    /// keep z.
    pub fn parse_private(bytes: &[u8]) -> Result<Box<Self>> {
        let vinfo = variant_info::<K>();
        debug_assert_eq!(bytes.len(), vinfo.prvkey_bytes);
        let (s_bytes, rest) = bytes.split_at(vinfo.vector_bytes);
        let s = PolyVec::<K>::decode_12(s_bytes)?;
        let (pub_bytes, rest) = rest.split_at(vinfo.pubkey_bytes);
        let mut key = Self::parse_public(pub_bytes)?;
        let (hash_bytes, z_bytes) = rest.split_at(PKHASH_BYTES);
        if key.pkhash[..] != *hash_bytes {
            return Err(Error::EncodingError);
        }
        let mut z = [0u8; RANDOM_BYTES];
        z.copy_from_slice(z_bytes);
        key.secret = Some(PrivateData { s, z });
        Ok(key)
    }

    /// Copy the key material, with or without the private half.
    pub fn duplicate(&self, with_secret: bool) -> Box<Self> {
        Box::new(Self {
            rho: self.rho,
            pkhash: self.pkhash,
            t: self.t.clone(),
            m: self.m.clone(),
            secret: if with_secret {
                self.secret.clone()
            } else {
                None
            },
        })
    }
}

/// What [`MlKemKey::duplicate`] should carry over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Only the variant; the copy is an empty key.
    Neither,
    /// The public material.
    Public,
    /// Public and private material.
    Keypair,
}

enum Material {
    None,
    Rank2(Box<KeyData<2>>),
    Rank3(Box<KeyData<3>>),
    Rank4(Box<KeyData<4>>),
}

/// Run `$body` against the rank-monomorphic key data, or fail if the key
/// is still empty.
macro_rules! with_material {
    ($key:expr, $data:ident => $body:expr) => {
        match &$key.material {
            Material::None => Err(Error::MissingKeyMaterial),
            Material::Rank2($data) => $body,
            Material::Rank3($data) => $body,
            Material::Rank4($data) => $body,
        }
    };
}

/// An ML-KEM key for one of the three FIPS 203 parameter sets.
///
/// ```ignore
/// let mut key = MlKemKey::new(Variant::MlKem768);
/// key.generate(&mut rng, None, None)?;
/// let mut ct = [0u8; 1088];
/// let mut ss = [0u8; 32];
/// key.encapsulate_random(&mut rng, &mut ct, &mut ss)?;
/// ```
pub struct MlKemKey {
    variant: Variant,
    material: Material,
}

impl MlKemKey {
    /// Create an empty key bound to `variant`. Material is installed by
    /// exactly one of the parse or generate operations.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            material: Material::None,
        }
    }

    /// The parameter set this key is bound to.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Whether public material is installed.
    pub fn has_public(&self) -> bool {
        !matches!(self.material, Material::None)
    }

    /// Whether private material is installed.
    pub fn has_private(&self) -> bool {
        with_material!(self, data => Ok(data.secret.is_some())).unwrap_or(false)
    }

    /// SHA3-256 hash of the encoded public key, if material is installed.
    pub fn public_key_hash(&self) -> Option<&[u8; PKHASH_BYTES]> {
        with_material!(self, data => Ok(&data.pkhash)).ok()
    }

    fn ensure_empty(&self) -> Result<()> {
        if self.has_public() {
            return Err(Error::ImmutableKey);
        }
        Ok(())
    }

    /// Install public material from its wire encoding.
    pub fn parse_public_key(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_empty()?;
        let vinfo = self.variant.info();
        if bytes.len() != vinfo.pubkey_bytes {
            return Err(Error::InvalidKeyLength {
                expected: vinfo.pubkey_bytes,
                actual: bytes.len(),
            });
        }
        self.material = match self.variant {
            Variant::MlKem512 => Material::Rank2(KeyData::parse_public(bytes)?),
            Variant::MlKem768 => Material::Rank3(KeyData::parse_public(bytes)?),
            Variant::MlKem1024 => Material::Rank4(KeyData::parse_public(bytes)?),
        };
        Ok(())
    }

    /// Install a full keypair from its private wire encoding.
    pub fn parse_private_key(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_empty()?;
        let vinfo = self.variant.info();
        if bytes.len() != vinfo.prvkey_bytes {
            return Err(Error::InvalidKeyLength {
                expected: vinfo.prvkey_bytes,
                actual: bytes.len(),
            });
        }
        self.material = match self.variant {
            Variant::MlKem512 => Material::Rank2(KeyData::parse_private(bytes)?),
            Variant::MlKem768 => Material::Rank3(KeyData::parse_private(bytes)?),
            Variant::MlKem1024 => Material::Rank4(KeyData::parse_private(bytes)?),
        };
        Ok(())
    }

    /// Generate a keypair deterministically from a 64-byte seed (d || z).
    ///
    /// If `pub_out` is given it receives the encoded public key, saving a
    /// later [`Self::encode_public_key`] call.
    pub fn generate_from_seed(
        &mut self,
        seed: &[u8],
        pub_out: Option<&mut [u8]>,
    ) -> Result<()> {
        self.ensure_empty()?;
        if seed.len() != SEED_BYTES {
            return Err(Error::InvalidLength {
                expected: SEED_BYTES,
                actual: seed.len(),
            });
        }
        let vinfo = self.variant.info();
        if let Some(ref out) = pub_out {
            if out.len() != vinfo.pubkey_bytes {
                return Err(Error::InvalidLength {
                    expected: vinfo.pubkey_bytes,
                    actual: out.len(),
                });
            }
        }

        let mut d = Zeroizing::new([0u8; RANDOM_BYTES]);
        d.copy_from_slice(&seed[..RANDOM_BYTES]);
        let mut z = Zeroizing::new([0u8; RANDOM_BYTES]);
        z.copy_from_slice(&seed[RANDOM_BYTES..]);

        let mut local = [0u8; MAX_PUBKEY_BYTES];
        let buf: &mut [u8] = match pub_out {
            Some(out) => out,
            None => &mut local[..vinfo.pubkey_bytes],
        };

        self.material = match self.variant {
            Variant::MlKem512 => Material::Rank2(kem::generate(&d, &z, buf)?),
            Variant::MlKem768 => Material::Rank3(kem::generate(&d, &z, buf)?),
            Variant::MlKem1024 => Material::Rank4(kem::generate(&d, &z, buf)?),
        };
        Ok(())
    }

    /// Generate a keypair from fresh entropy, optionally exporting the seed
    /// (for escrow or test reproduction) and the encoded public key.
    pub fn generate(
        &mut self,
        rng: &mut impl CryptoRng,
        seed_out: Option<&mut [u8]>,
        pub_out: Option<&mut [u8]>,
    ) -> Result<()> {
        self.ensure_empty()?;
        if let Some(ref out) = seed_out {
            if out.len() != SEED_BYTES {
                return Err(Error::InvalidLength {
                    expected: SEED_BYTES,
                    actual: out.len(),
                });
            }
        }
        let mut seed = Zeroizing::new([0u8; SEED_BYTES]);
        rng.fill_bytes(seed.as_mut());
        if let Some(out) = seed_out {
            out.copy_from_slice(seed.as_ref());
        }
        self.generate_from_seed(seed.as_ref(), pub_out)
    }

    /// Serialise the public key into `out` (exact length required).
    pub fn encode_public_key(&self, out: &mut [u8]) -> Result<()> {
        let vinfo = self.variant.info();
        if out.len() != vinfo.pubkey_bytes {
            return Err(Error::InvalidKeyLength {
                expected: vinfo.pubkey_bytes,
                actual: out.len(),
            });
        }
        with_material!(self, data => {
            data.encode_public(out);
            Ok(())
        })
    }

    /// Serialise the private key into `out` (exact length required).
    pub fn encode_private_key(&self, out: &mut [u8]) -> Result<()> {
        let vinfo = self.variant.info();
        if out.len() != vinfo.prvkey_bytes {
            return Err(Error::InvalidKeyLength {
                expected: vinfo.prvkey_bytes,
                actual: out.len(),
            });
        }
        with_material!(self, data => data.encode_private(out))
    }

    /// Deterministic encapsulation with caller-supplied entropy (32 bytes).
    pub fn encapsulate(&self, entropy: &[u8], ctext: &mut [u8], secret: &mut [u8]) -> Result<()> {
        let vinfo = self.variant.info();
        if entropy.len() != RANDOM_BYTES {
            return Err(Error::InvalidLength {
                expected: RANDOM_BYTES,
                actual: entropy.len(),
            });
        }
        if ctext.len() != vinfo.ctext_bytes {
            return Err(Error::InvalidCiphertextLength {
                expected: vinfo.ctext_bytes,
                actual: ctext.len(),
            });
        }
        if secret.len() != SHARED_SECRET_BYTES {
            return Err(Error::InvalidLength {
                expected: SHARED_SECRET_BYTES,
                actual: secret.len(),
            });
        }
        let mut ent = Zeroizing::new([0u8; RANDOM_BYTES]);
        ent.copy_from_slice(entropy);
        with_material!(self, data => kem::encapsulate(ctext, secret, &ent, data))
    }

    /// Encapsulation with entropy drawn from `rng`.
    pub fn encapsulate_random(
        &self,
        rng: &mut impl CryptoRng,
        ctext: &mut [u8],
        secret: &mut [u8],
    ) -> Result<()> {
        let mut entropy = Zeroizing::new([0u8; RANDOM_BYTES]);
        rng.fill_bytes(entropy.as_mut());
        self.encapsulate(entropy.as_ref(), ctext, secret)
    }

    /// Decapsulate `ctext` into `secret`.
    ///
    /// On any length or structural error of the ciphertext the output
    /// buffer is filled with random bytes before the error is returned, so
    /// a caller that ignores the status never releases a predictable
    /// secret. Hosts that pre-validate lengths can use the front-end KEM
    /// types instead and skip the randomisation.
    pub fn decapsulate(
        &self,
        ctext: &[u8],
        secret: &mut [u8],
        rng: &mut impl CryptoRng,
    ) -> Result<()> {
        let vinfo = self.variant.info();
        if secret.len() != SHARED_SECRET_BYTES {
            return Err(Error::InvalidLength {
                expected: SHARED_SECRET_BYTES,
                actual: secret.len(),
            });
        }
        if ctext.len() != vinfo.ctext_bytes {
            rng.fill_bytes(secret);
            return Err(Error::InvalidCiphertextLength {
                expected: vinfo.ctext_bytes,
                actual: ctext.len(),
            });
        }
        match self.decapsulate_validated(ctext, secret) {
            Ok(()) => Ok(()),
            Err(err) => {
                rng.fill_bytes(secret);
                Err(err)
            }
        }
    }

    /// Decapsulation for callers that have already validated the
    /// ciphertext length (the variant front ends).
    pub(crate) fn decapsulate_validated(&self, ctext: &[u8], secret: &mut [u8]) -> Result<()> {
        with_material!(self, data => kem::decapsulate(secret, ctext, data))
    }

    /// Copy this key, carrying over as much of `selection` as the key
    /// actually holds (a public-only key yields a public copy even when a
    /// keypair was requested).
    pub fn duplicate(&self, selection: Selection) -> MlKemKey {
        let clamped = if !self.has_public() {
            Selection::Neither
        } else if selection == Selection::Keypair && !self.has_private() {
            Selection::Public
        } else {
            selection
        };
        let material = match clamped {
            Selection::Neither => Material::None,
            Selection::Public | Selection::Keypair => {
                let with_secret = clamped == Selection::Keypair;
                match &self.material {
                    Material::None => Material::None,
                    Material::Rank2(data) => Material::Rank2(data.duplicate(with_secret)),
                    Material::Rank3(data) => Material::Rank3(data.duplicate(with_secret)),
                    Material::Rank4(data) => Material::Rank4(data.duplicate(with_secret)),
                }
            }
        };
        MlKemKey {
            variant: self.variant,
            material,
        }
    }

    /// Public keys are equal iff their SHA3-256 key hashes match. Empty
    /// keys compare unequal to everything.
    pub fn public_eq(&self, other: &MlKemKey) -> bool {
        match (self.public_key_hash(), other.public_key_hash()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
