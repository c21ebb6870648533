//! The ML-KEM Fujisaki-Okamoto wrapper (FIPS 203 Algorithms 16-18).
//!
//! Key generation, encapsulation and decapsulation with implicit rejection.
//! Decapsulation never reports a decryption failure: a ciphertext that does
//! not re-encrypt to itself yields the pseudorandom key J(z || ct) through
//! a bytewise masked merge, with both candidate secrets always computed.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use crate::hash::{hash_g, hash_h, kdf};
use crate::k_pke::{decrypt_cpa, encrypt_cpa};
use crate::key::{KeyData, PrivateData};
use crate::matrix::Matrix;
use crate::params::{
    variant_info, MAX_CTEXT_BYTES, PKHASH_BYTES, RANDOM_BYTES, SHARED_SECRET_BYTES,
};
use crate::polyvec::PolyVec;
use crate::sample::sample_cbd_vector;
use krater_core::{Error, Result};
use subtle::{ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

/// ML-KEM key generation from the seed halves d and z.
///
/// The d seed is salted with the single rank byte before hashing, which
/// separates the domains of variants sharing a seed. The encoded public key
/// is written to `pub_out` (it is needed for the key hash in any case), and
/// z is stored verbatim as the implicit-rejection secret.
pub(crate) fn generate<const K: usize>(
    d: &[u8; RANDOM_BYTES],
    z: &[u8; RANDOM_BYTES],
    pub_out: &mut [u8],
) -> Result<Box<KeyData<K>>> {
    let vinfo = variant_info::<K>();
    debug_assert_eq!(pub_out.len(), vinfo.pubkey_bytes);

    let mut augmented = Zeroizing::new([0u8; RANDOM_BYTES + 1]);
    augmented[..RANDOM_BYTES].copy_from_slice(d);
    augmented[RANDOM_BYTES] = K as u8;
    let hashed = Zeroizing::new(hash_g(augmented.as_ref())?);

    let mut rho = [0u8; RANDOM_BYTES];
    rho.copy_from_slice(&hashed[..RANDOM_BYTES]);
    let mut sigma = Zeroizing::new([0u8; RANDOM_BYTES]);
    sigma.copy_from_slice(&hashed[RANDOM_BYTES..]);

    let mut key = Box::new(KeyData::<K> {
        rho,
        pkhash: [0u8; PKHASH_BYTES],
        t: PolyVec::default(),
        m: Matrix::expand(&rho)?,
        secret: Some(PrivateData {
            s: PolyVec::default(),
            z: *z,
        }),
    });

    let mut counter = 0u8;
    {
        let Some(prv) = key.secret.as_mut() else {
            return Err(Error::MissingKeyMaterial);
        };
        sample_cbd_vector(&mut prv.s, vinfo.eta1, &sigma, &mut counter)?;
        prv.s.ntt();
    }

    let mut e = Zeroizing::new(PolyVec::<K>::default());
    sample_cbd_vector(&mut e, vinfo.eta1, &sigma, &mut counter)?;
    e.ntt();

    {
        let Some(prv) = key.secret.as_ref() else {
            return Err(Error::MissingKeyMaterial);
        };
        let mut t = key.m.mul_transpose(&prv.s);
        t.add_assign(&e);
        key.t = t;
    }

    key.encode_public(pub_out);
    key.pkhash = hash_h(pub_out)?;
    Ok(key)
}

/// Deterministic encapsulation: derive (K, r) = G(entropy || pkhash),
/// encrypt the entropy under r, and hand K to the caller.
pub(crate) fn encapsulate<const K: usize>(
    ctext: &mut [u8],
    secret: &mut [u8],
    entropy: &[u8; RANDOM_BYTES],
    key: &KeyData<K>,
) -> Result<()> {
    debug_assert_eq!(secret.len(), SHARED_SECRET_BYTES);

    let mut input = Zeroizing::new([0u8; RANDOM_BYTES + PKHASH_BYTES]);
    input[..RANDOM_BYTES].copy_from_slice(entropy);
    input[RANDOM_BYTES..].copy_from_slice(&key.pkhash);
    let kr = Zeroizing::new(hash_g(input.as_ref())?);

    let mut r = Zeroizing::new([0u8; RANDOM_BYTES]);
    r.copy_from_slice(&kr[SHARED_SECRET_BYTES..]);
    encrypt_cpa(ctext, entropy, &r, key)?;

    secret.copy_from_slice(&kr[..SHARED_SECRET_BYTES]);
    Ok(())
}

/// Decapsulation with implicit rejection.
///
/// The failure key J(z || ct) is derived before anything else: if the KDF
/// itself is unavailable there is no unpredictable output to fall back to,
/// so that single failure aborts. Any later oracle failure (G, or the PRF
/// inside the re-encryption) is masked by releasing the failure key and
/// reporting success, which keeps failure causes indistinguishable to the
/// peer. The final selection is a bytewise masked merge; both candidate
/// secrets are always fully computed and no branch depends on secret data.
pub(crate) fn decapsulate<const K: usize>(
    secret: &mut [u8],
    ctext: &[u8],
    key: &KeyData<K>,
) -> Result<()> {
    let vinfo = variant_info::<K>();
    debug_assert_eq!(secret.len(), SHARED_SECRET_BYTES);
    debug_assert_eq!(ctext.len(), vinfo.ctext_bytes);
    let Some(prv) = key.secret.as_ref() else {
        return Err(Error::MissingKeyMaterial);
    };

    let failure_key = Zeroizing::new(kdf(&prv.z, ctext)?);

    let mut decrypted = Zeroizing::new([0u8; SHARED_SECRET_BYTES + PKHASH_BYTES]);
    {
        let (m_prime, pkhash_out) = decrypted.split_at_mut(SHARED_SECRET_BYTES);
        decrypt_cpa(m_prime, ctext, &prv.s);
        pkhash_out.copy_from_slice(&key.pkhash);
    }

    let mut ctext_prime = Zeroizing::new([0u8; MAX_CTEXT_BYTES]);
    let derived = hash_g(decrypted.as_ref()).map(Zeroizing::new).and_then(|kr| {
        let mut r_prime = Zeroizing::new([0u8; RANDOM_BYTES]);
        r_prime.copy_from_slice(&kr[SHARED_SECRET_BYTES..]);
        encrypt_cpa(
            &mut ctext_prime[..vinfo.ctext_bytes],
            &decrypted[..SHARED_SECRET_BYTES],
            &r_prime,
            key,
        )?;
        Ok(kr)
    });

    let kr = match derived {
        Ok(kr) => kr,
        Err(_) => {
            secret.copy_from_slice(failure_key.as_ref());
            return Ok(());
        }
    };

    let accept = ctext.ct_eq(&ctext_prime[..vinfo.ctext_bytes]);
    for i in 0..SHARED_SECRET_BYTES {
        secret[i] = u8::conditional_select(&failure_key[i], &kr[i], accept);
    }
    Ok(())
}
