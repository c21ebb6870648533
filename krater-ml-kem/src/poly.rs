//! Polynomial arithmetic for ML-KEM.
//!
//! [`Poly`] represents an element of R_q = Z_q\[X\]/(X^256 + 1) as 256
//! unsigned 16-bit coefficients. On entry and exit of every public operation
//! each coefficient lies in `[0, q)`. Whether a polynomial is in the natural
//! or the NTT domain is not stored; it is determined by context and
//! documented per operation.

use crate::ntt::MOD_ROOTS;
use crate::params::{N, Q};
use crate::reduce::{barrett_reduce, compress, decompress, reduce_once};
use zeroize::Zeroize;

/// A polynomial in R_q, in either the natural or the NTT domain.
#[derive(Clone, Zeroize)]
pub(crate) struct Poly {
    /// The 256 coefficients, each in `[0, q)`.
    pub coeffs: [u16; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self { coeffs: [0u16; N] }
    }
}

impl Poly {
    /// Coefficient-wise addition modulo q, updating `self` in place.
    pub fn add_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *a = reduce_once(*a + b);
        }
    }

    /// Coefficient-wise subtraction modulo q (q is added before reducing),
    /// updating `self` in place.
    pub fn sub_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *a = reduce_once(*a + Q - b);
        }
    }

    /// In-place lossy rounding of every coefficient to `bits` bits.
    pub fn compress(&mut self, bits: usize) {
        for c in self.coeffs.iter_mut() {
            *c = compress(*c, bits);
        }
    }

    /// In-place approximate recovery of coefficients from `bits`-bit
    /// compression.
    pub fn decompress(&mut self, bits: usize) {
        for c in self.coeffs.iter_mut() {
            *c = decompress(*c, bits);
        }
    }
}

/// NTT-domain multiplication: `out = lhs * rhs`.
///
/// Both inputs must be in the NTT domain. Consecutive coefficient pairs are
/// elements of GF(q)\[X\]/(X^2 - MOD_ROOTS\[i\]); each output pair costs
/// three Barrett reductions. The output is a distinct polynomial, so
/// aliasing with an input is ruled out by construction.
pub(crate) fn multiply_ntt(out: &mut Poly, lhs: &Poly, rhs: &Poly) {
    for i in 0..N / 2 {
        let a0 = u32::from(lhs.coeffs[2 * i]);
        let a1 = u32::from(lhs.coeffs[2 * i + 1]);
        let b0 = u32::from(rhs.coeffs[2 * i]);
        let b1 = u32::from(rhs.coeffs[2 * i + 1]);

        let real = a0 * b0 + u32::from(barrett_reduce(a1 * b1)) * u32::from(MOD_ROOTS[i]);
        out.coeffs[2 * i] = barrett_reduce(real);
        out.coeffs[2 * i + 1] = barrett_reduce(a0 * b1 + a1 * b0);
    }
}

/// NTT-domain multiply-accumulate: `out += lhs * rhs`.
pub(crate) fn multiply_add_ntt(out: &mut Poly, lhs: &Poly, rhs: &Poly) {
    let mut product = Poly::default();
    multiply_ntt(&mut product, lhs, rhs);
    out.add_assign(&product);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ntt::{inverse_ntt, ntt};

    fn sample(seed: u16) -> Poly {
        let mut poly = Poly::default();
        for (i, c) in poly.coeffs.iter_mut().enumerate() {
            *c = ((i as u32 * 31 + u32::from(seed) * 97 + 5) % u32::from(Q)) as u16;
        }
        poly
    }

    #[test]
    fn add_then_sub_is_identity() {
        let mut a = sample(1);
        let b = sample(2);
        let original = a.clone();

        a.add_assign(&b);
        assert!(a.coeffs.iter().all(|&c| c < Q));
        a.sub_assign(&b);

        assert_eq!(a.coeffs, original.coeffs);
    }

    #[test]
    fn sub_wraps_modulo_q() {
        let mut a = Poly::default();
        let mut b = Poly::default();
        b.coeffs[0] = 1;
        a.sub_assign(&b);
        assert_eq!(a.coeffs[0], Q - 1);
    }

    #[test]
    fn multiply_matches_schoolbook() {
        // inverse_ntt(multiply_ntt(ntt(a), ntt(b))) equals the polynomial
        // product in Z_q[X]/(X^256 + 1).
        let a = sample(3);
        let b = sample(4);

        let mut school = [0u64; 2 * N];
        for i in 0..N {
            for j in 0..N {
                school[i + j] += u64::from(a.coeffs[i]) * u64::from(b.coeffs[j]);
            }
        }
        let mut expected = [0u16; N];
        for i in 0..N {
            // X^256 = -1
            let folded =
                (school[i] % u64::from(Q) + u64::from(Q) - school[i + N] % u64::from(Q))
                    % u64::from(Q);
            expected[i] = folded as u16;
        }

        let mut fa = a.clone();
        let mut fb = b.clone();
        ntt(&mut fa);
        ntt(&mut fb);
        let mut product = Poly::default();
        multiply_ntt(&mut product, &fa, &fb);
        inverse_ntt(&mut product);

        assert_eq!(product.coeffs, expected);
    }

    #[test]
    fn multiply_add_accumulates() {
        let a = sample(5);
        let b = sample(6);
        let mut fa = a.clone();
        let mut fb = b.clone();
        ntt(&mut fa);
        ntt(&mut fb);

        let mut once = Poly::default();
        multiply_ntt(&mut once, &fa, &fb);
        let mut twice = once.clone();
        twice.add_assign(&once);

        let mut acc = Poly::default();
        multiply_add_ntt(&mut acc, &fa, &fb);
        multiply_add_ntt(&mut acc, &fa, &fb);
        assert_eq!(acc.coeffs, twice.coeffs);
    }

    #[test]
    fn compress_decompress_stay_in_range() {
        for bits in [1usize, 4, 5, 10, 11] {
            let mut poly = sample(7);
            poly.compress(bits);
            assert!(poly.coeffs.iter().all(|&c| u32::from(c) < (1 << bits)));
            poly.decompress(bits);
            assert!(poly.coeffs.iter().all(|&c| c < Q));
        }
    }

    #[test]
    fn zeroize_clears_coefficients() {
        let mut poly = sample(8);
        poly.zeroize();
        assert!(poly.coeffs.iter().all(|&c| c == 0));
    }
}
