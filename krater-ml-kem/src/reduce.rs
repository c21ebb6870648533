//! Modular arithmetic for ML-KEM.
//!
//! Remainders modulo q are computed in constant time via Barrett reduction
//! followed by [`reduce_once`]. Coefficients are unsigned 16-bit values in
//! canonical form `[0, q)` on entry and exit of every public operation.

use crate::params::Q;
use subtle::ConstantTimeLess;

/// q as u32, for intermediate products.
pub(crate) const Q32: u32 = Q as u32;

/// Barrett shift: 2 * ceil(log2(q)) = 24.
const BARRETT_SHIFT: u32 = 24;

/// Barrett multiplier: floor(2^24 / q) = 5039.
const BARRETT_MULTIPLIER: u64 = (1 << BARRETT_SHIFT) as u64 / Q as u64;

/// (q - 1) / 2, the rounding threshold used by [`compress`].
const HALF_Q: u32 = (Q as u32 - 1) / 2;

/// 128^-1 mod q, the final scaling factor of the inverse NTT.
pub(crate) const INVERSE_DEGREE: u16 = 3303;

/// Reduce `0 <= x < 2q` to `x mod q`.
///
/// Subtracts q and selects between `x` and `x - q` through an all-bits mask
/// built from the sign bit of the subtraction; no data-dependent branch.
#[inline]
pub(crate) fn reduce_once(x: u16) -> u16 {
    debug_assert!(x < 2 * Q);
    let subtracted = x.wrapping_sub(Q);
    let mask = 0u16.wrapping_sub(subtracted >> 15);
    (mask & x) | (!mask & subtracted)
}

/// Constant-time reduction of `x mod q` via Barrett reduction.
///
/// The input must be less than `q + 2q^2`, which in particular covers the
/// product of any two reduced values (and of any two 12-bit values, since
/// `q * (2q + 1) > 2^24`).
#[inline]
pub(crate) fn barrett_reduce(x: u32) -> u16 {
    debug_assert!(x < Q32 + 2 * Q32 * Q32);
    let product = u64::from(x) * BARRETT_MULTIPLIER;
    let quotient = (product >> BARRETT_SHIFT) as u32;
    let remainder = x - quotient * Q32;
    reduce_once(remainder as u16)
}

/// Compress_d (FIPS 203 §4.2.1): `round(2^bits / q * x) mod 2^bits`.
///
/// Barrett-reduces `x << bits`; because both the quotient and the remainder
/// are needed, the reduction is written out instead of calling
/// [`barrett_reduce`]. The quotient is then incremented, in constant time,
/// once when the remainder passes (q-1)/2 and again when it passes
/// (q-1)/2 + q, which rounds to the nearest multiple.
#[inline]
pub(crate) fn compress(x: u16, bits: usize) -> u16 {
    debug_assert!(x < Q);
    let shifted = u32::from(x) << bits;
    let product = u64::from(shifted) * BARRETT_MULTIPLIER;
    let mut quotient = (product >> BARRETT_SHIFT) as u32;
    let remainder = shifted - quotient * Q32;

    quotient += u32::from(HALF_Q.ct_lt(&remainder).unwrap_u8());
    quotient += u32::from((Q32 + HALF_Q).ct_lt(&remainder).unwrap_u8());
    (quotient & ((1 << bits) - 1)) as u16
}

/// Decompress_d (FIPS 203 §4.2.1): `round(q / 2^bits * x)`.
///
/// `2^bits` being the divisor allows the rounding to use only shifts.
#[inline]
pub(crate) fn decompress(x: u16, bits: usize) -> u16 {
    debug_assert!(u32::from(x) < (1 << bits));
    let product = u32::from(x) * Q32 + (1 << (bits - 1));
    (product >> bits) as u16
}
