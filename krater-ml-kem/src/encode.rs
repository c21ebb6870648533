//! ByteEncode_d / ByteDecode_d (FIPS 203 Algorithms 5 and 6).
//!
//! 256 coefficients of d bits each pack into 32*d bytes, little-endian
//! within each byte, LSB-first bit order. The generic paths cover
//! 2 <= d < 12; d = 1 (message bits) and d = 12 (lossless key material)
//! have dedicated routines, and the 12-bit decoder validates every field
//! against q.

use crate::params::{N, Q, SCALAR_BYTES};
use crate::poly::Poly;
use krater_core::{Error, Result};
use subtle::{Choice, ConstantTimeLess};

/// ByteEncode_d for 2 <= d < 12: pack `s` into `out` (32*bits bytes).
pub(crate) fn byte_encode(out: &mut [u8], s: &Poly, bits: usize) {
    debug_assert!((2..12).contains(&bits));
    debug_assert_eq!(out.len(), bits * N / 8);

    let mut acc: u32 = 0;
    let mut acc_bits = 0;
    let mut pos = 0;
    for &c in s.coeffs.iter() {
        debug_assert!(u32::from(c) < (1 << bits));
        acc |= u32::from(c) << acc_bits;
        acc_bits += bits;
        while acc_bits >= 8 {
            out[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    debug_assert_eq!(pos, out.len());
}

/// ByteDecode_d for 2 <= d < 12.
///
/// Every parsed field is below 2^11 < q, so the coefficient-range invariant
/// holds without a validity check (unlike [`byte_decode_12`]).
pub(crate) fn byte_decode(s: &mut Poly, bytes: &[u8], bits: usize) {
    debug_assert!((2..12).contains(&bits));
    debug_assert_eq!(bytes.len(), bits * N / 8);

    let mask = (1u32 << bits) - 1;
    let mut acc: u32 = 0;
    let mut acc_bits = 0;
    let mut pos = 0;
    for c in s.coeffs.iter_mut() {
        while acc_bits < bits {
            acc |= u32::from(bytes[pos]) << acc_bits;
            pos += 1;
            acc_bits += 8;
        }
        *c = (acc & mask) as u16;
        acc >>= bits;
        acc_bits -= bits;
    }
}

/// ByteEncode_12: lossless packing, two coefficients per three bytes.
pub(crate) fn byte_encode_12(out: &mut [u8], s: &Poly) {
    debug_assert_eq!(out.len(), SCALAR_BYTES);
    for (chunk, pair) in out.chunks_exact_mut(3).zip(s.coeffs.chunks_exact(2)) {
        let (c0, c1) = (pair[0], pair[1]);
        chunk[0] = c0 as u8;
        chunk[1] = ((c0 >> 8) | (c1 << 4)) as u8;
        chunk[2] = (c1 >> 4) as u8;
    }
}

/// ByteDecode_12: the inverse of [`byte_encode_12`].
///
/// Fails with [`Error::EncodingError`] if any 12-bit field is >= q. The
/// scan accumulates validity in constant time so the position of an invalid
/// field is not observable; wire key material is public, but the caller's
/// error is independent of where the defect sits.
pub(crate) fn byte_decode_12(s: &mut Poly, bytes: &[u8]) -> Result<()> {
    debug_assert_eq!(bytes.len(), SCALAR_BYTES);
    let mut all_valid = Choice::from(1u8);
    for (chunk, pair) in bytes.chunks_exact(3).zip(s.coeffs.chunks_exact_mut(2)) {
        let b0 = u16::from(chunk[0]);
        let b1 = u16::from(chunk[1]);
        let b2 = u16::from(chunk[2]);
        let c0 = b0 | ((b1 & 0x0f) << 8);
        let c1 = (b1 >> 4) | (b2 << 4);
        all_valid &= c0.ct_lt(&Q);
        all_valid &= c1.ct_lt(&Q);
        pair[0] = c0;
        pair[1] = c1;
    }
    if bool::from(all_valid) {
        Ok(())
    } else {
        Err(Error::EncodingError)
    }
}

/// ByteEncode_1: one bit per coefficient, 32 bytes total.
pub(crate) fn byte_encode_1(out: &mut [u8], s: &Poly) {
    debug_assert_eq!(out.len(), N / 8);
    for (byte, group) in out.iter_mut().zip(s.coeffs.chunks_exact(8)) {
        let mut b = 0u8;
        for (j, &c) in group.iter().enumerate() {
            b |= ((c & 1) as u8) << j;
        }
        *byte = b;
    }
}

/// ByteDecode_1: expands 32 bytes into 256 single-bit coefficients.
pub(crate) fn byte_decode_1(s: &mut Poly, bytes: &[u8]) {
    debug_assert_eq!(bytes.len(), N / 8);
    for (&byte, group) in bytes.iter().zip(s.coeffs.chunks_exact_mut(8)) {
        for (j, c) in group.iter_mut().enumerate() {
            *c = u16::from((byte >> j) & 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(bits: usize) -> Poly {
        let mut poly = Poly::default();
        let limit = if bits == 12 { u32::from(Q) } else { 1 << bits };
        for (i, c) in poly.coeffs.iter_mut().enumerate() {
            *c = ((i as u32 * 89 + 3) % limit) as u16;
        }
        poly
    }

    #[test]
    fn generic_roundtrip_all_widths() {
        for bits in 2..12 {
            let poly = sample(bits);
            let mut bytes = vec![0u8; bits * N / 8];
            byte_encode(&mut bytes, &poly, bits);
            let mut back = Poly::default();
            byte_decode(&mut back, &bytes, bits);
            assert_eq!(poly.coeffs, back.coeffs, "d = {bits}");
        }
    }

    #[test]
    fn twelve_bit_roundtrip() {
        let poly = sample(12);
        let mut bytes = [0u8; SCALAR_BYTES];
        byte_encode_12(&mut bytes, &poly);
        let mut back = Poly::default();
        byte_decode_12(&mut back, &bytes).unwrap();
        assert_eq!(poly.coeffs, back.coeffs);
    }

    #[test]
    fn twelve_bit_accepts_q_minus_one() {
        let mut poly = Poly::default();
        poly.coeffs = [Q - 1; N];
        let mut bytes = [0u8; SCALAR_BYTES];
        byte_encode_12(&mut bytes, &poly);
        let mut back = Poly::default();
        assert!(byte_decode_12(&mut back, &bytes).is_ok());
        assert!(back.coeffs.iter().all(|&c| c == Q - 1));
    }

    #[test]
    fn twelve_bit_rejects_q_and_above() {
        // First field = q = 3329 = 0xd01: b0 = 0x01, low nibble of b1 = 0x0d.
        let mut bytes = [0u8; SCALAR_BYTES];
        bytes[0] = 0x01;
        bytes[1] = 0x0d;
        let mut poly = Poly::default();
        assert_eq!(
            byte_decode_12(&mut poly, &bytes),
            Err(Error::EncodingError)
        );

        // Second field = 0xfff via the high nibble of b1 and b2.
        let mut bytes = [0u8; SCALAR_BYTES];
        bytes[1] = 0xf0;
        bytes[2] = 0xff;
        assert_eq!(
            byte_decode_12(&mut poly, &bytes),
            Err(Error::EncodingError)
        );

        // Invalid field in the middle of the buffer.
        let mut bytes = [0u8; SCALAR_BYTES];
        bytes[192] = 0x01;
        bytes[193] = 0x0d;
        assert_eq!(
            byte_decode_12(&mut poly, &bytes),
            Err(Error::EncodingError)
        );
    }

    #[test]
    fn one_bit_roundtrip() {
        let mut poly = Poly::default();
        for (i, c) in poly.coeffs.iter_mut().enumerate() {
            *c = ((i * 5 + 1) % 2) as u16;
        }
        let mut bytes = [0u8; N / 8];
        byte_encode_1(&mut bytes, &poly);
        let mut back = Poly::default();
        byte_decode_1(&mut back, &bytes);
        assert_eq!(poly.coeffs, back.coeffs);
    }

    #[test]
    fn one_bit_encode_uses_lsb_first_order() {
        let mut poly = Poly::default();
        poly.coeffs[0] = 1;
        poly.coeffs[9] = 1;
        let mut bytes = [0u8; N / 8];
        byte_encode_1(&mut bytes, &poly);
        assert_eq!(bytes[0], 0b0000_0001);
        assert_eq!(bytes[1], 0b0000_0010);
    }

    #[test]
    fn generic_encode_uses_lsb_first_order() {
        // d = 10: coefficient 0 occupies the low 10 bits of the stream.
        let mut poly = Poly::default();
        poly.coeffs[0] = 0x3ff;
        let mut bytes = vec![0u8; 10 * N / 8];
        byte_encode(&mut bytes, &poly, 10);
        assert_eq!(bytes[0], 0xff);
        assert_eq!(bytes[1], 0x03);
    }
}
