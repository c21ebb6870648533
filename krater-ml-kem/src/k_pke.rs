//! K-PKE: the IND-CPA encryption core (FIPS 203 Algorithms 14 and 15).
//!
//! K-PKE on its own is not CCA secure; the Fujisaki-Okamoto transform in
//! [`crate::kem`] builds the full mechanism on top of it. Both operations
//! run against a parsed key object that already holds the expanded matrix
//! and the t vector, so no per-call matrix expansion is needed.

use crate::encode::{byte_decode, byte_decode_1, byte_encode, byte_encode_1};
use crate::key::KeyData;
use crate::ntt::inverse_ntt;
use crate::params::{variant_info, RANDOM_BYTES, SHARED_SECRET_BYTES};
use crate::poly::Poly;
use crate::polyvec::PolyVec;
use crate::sample::{cbd_2, sample_cbd_vector};
use krater_core::Result;
use zeroize::Zeroizing;

/// Encrypt a 256-bit message under the public material of `key` with
/// explicit randomness `r`, writing the ciphertext to `out`.
///
/// The PRF counter starts at 0 and increases monotonically across the y,
/// e1 and e2 derivations. The y scratch vector is reused for e1, and its
/// first slot again for e2 and mu, to keep the stack footprint at two
/// vectors plus one scalar.
///
/// When invoked from decapsulation the message and randomness are secret;
/// everything here is constant-time with respect to them.
pub(crate) fn encrypt_cpa<const K: usize>(
    out: &mut [u8],
    message: &[u8],
    r: &[u8; RANDOM_BYTES],
    key: &KeyData<K>,
) -> Result<()> {
    let vinfo = variant_info::<K>();
    debug_assert_eq!(out.len(), vinfo.ctext_bytes);
    debug_assert_eq!(message.len(), SHARED_SECRET_BYTES);
    let (u_out, v_out) = out.split_at_mut(vinfo.u_vector_bytes);

    let mut counter = 0u8;

    let mut y = Zeroizing::new(PolyVec::<K>::default());
    sample_cbd_vector(&mut y, vinfo.eta1, r, &mut counter)?;
    y.ntt();

    let mut v = Zeroizing::new(key.t.inner_product(&y));
    inverse_ntt(&mut v);

    let mut u = Zeroizing::new(key.m.mul(&y));
    u.inverse_ntt();

    // y is no longer needed; its storage now carries e1.
    sample_cbd_vector(&mut y, 2, r, &mut counter)?;
    u.add_assign(&y);
    u.compress(vinfo.du);
    u.encode(u_out, vinfo.du);

    // e2 reuses the first slot.
    y.polys[0] = cbd_2(r, counter)?;
    v.add_assign(&y.polys[0]);

    // mu = Decompress_1(ByteDecode_1(message)), same slot again.
    byte_decode_1(&mut y.polys[0], message);
    y.polys[0].decompress(1);
    v.add_assign(&y.polys[0]);

    v.compress(vinfo.dv);
    byte_encode(v_out, &v, vinfo.dv);
    Ok(())
}

/// Decrypt a ciphertext with the secret vector `s`, writing the 32-byte
/// message to `out`.
///
/// The ciphertext contents feed arithmetic on secret intermediates, so the
/// whole path is constant-time; a syntactically valid ciphertext of the
/// right length always takes the same instruction trace.
pub(crate) fn decrypt_cpa<const K: usize>(out: &mut [u8], ctext: &[u8], s: &PolyVec<K>) {
    let vinfo = variant_info::<K>();
    debug_assert_eq!(out.len(), SHARED_SECRET_BYTES);
    debug_assert_eq!(ctext.len(), vinfo.ctext_bytes);
    let (u_bytes, v_bytes) = ctext.split_at(vinfo.u_vector_bytes);

    let mut u = PolyVec::<K>::decode(u_bytes, vinfo.du);
    u.decompress(vinfo.du);
    u.ntt();

    let mut v = Zeroizing::new(Poly::default());
    byte_decode(&mut v, v_bytes, vinfo.dv);
    v.decompress(vinfo.dv);

    let mut mask = Zeroizing::new(s.inner_product(&u));
    inverse_ntt(&mut mask);
    v.sub_assign(&mask);
    v.compress(1);
    byte_encode_1(out, &v);
}
