//! Vectors of K polynomials, K in {2, 3, 4}.
//!
//! Each operation iterates the corresponding scalar operation; the rank is
//! a const generic so the three variants get monomorphic inner loops.

use crate::encode::{byte_decode, byte_decode_12, byte_encode, byte_encode_12};
use crate::ntt::{inverse_ntt, ntt};
use crate::params::{N, SCALAR_BYTES};
use crate::poly::{multiply_add_ntt, multiply_ntt, Poly};
use krater_core::Result;
use zeroize::Zeroize;

/// A vector of K polynomials (the s, e, t, y, e1 and u vectors of ML-KEM).
#[derive(Clone)]
pub(crate) struct PolyVec<const K: usize> {
    /// The K component polynomials.
    pub polys: [Poly; K],
}

impl<const K: usize> Default for PolyVec<K> {
    fn default() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::default()),
        }
    }
}

impl<const K: usize> Zeroize for PolyVec<K> {
    fn zeroize(&mut self) {
        for poly in self.polys.iter_mut() {
            poly.zeroize();
        }
    }
}

impl<const K: usize> PolyVec<K> {
    /// Component-wise addition modulo q, in place.
    pub fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            a.add_assign(b);
        }
    }

    /// Forward NTT of every component, in place.
    pub fn ntt(&mut self) {
        for poly in self.polys.iter_mut() {
            ntt(poly);
        }
    }

    /// Inverse NTT of every component, in place.
    pub fn inverse_ntt(&mut self) {
        for poly in self.polys.iter_mut() {
            inverse_ntt(poly);
        }
    }

    /// In-place compression of every component to `bits` bits.
    pub fn compress(&mut self, bits: usize) {
        for poly in self.polys.iter_mut() {
            poly.compress(bits);
        }
    }

    /// In-place decompression of every component from `bits` bits.
    pub fn decompress(&mut self, bits: usize) {
        for poly in self.polys.iter_mut() {
            poly.decompress(bits);
        }
    }

    /// ByteEncode_d of every component into `out` (K * 32 * bits bytes).
    pub fn encode(&self, out: &mut [u8], bits: usize) {
        let stride = bits * N / 8;
        for (poly, chunk) in self.polys.iter().zip(out.chunks_exact_mut(stride)) {
            byte_encode(chunk, poly, bits);
        }
    }

    /// ByteDecode_d of every component from `bytes`.
    pub fn decode(bytes: &[u8], bits: usize) -> Self {
        let stride = bits * N / 8;
        let mut out = Self::default();
        for (poly, chunk) in out.polys.iter_mut().zip(bytes.chunks_exact(stride)) {
            byte_decode(poly, chunk, bits);
        }
        out
    }

    /// Lossless 12-bit encoding into `out` (K * 384 bytes).
    pub fn encode_12(&self, out: &mut [u8]) {
        for (poly, chunk) in self.polys.iter().zip(out.chunks_exact_mut(SCALAR_BYTES)) {
            byte_encode_12(chunk, poly);
        }
    }

    /// Lossless 12-bit decoding; fails if any coefficient field is >= q.
    pub fn decode_12(bytes: &[u8]) -> Result<Self> {
        let mut out = Self::default();
        for (poly, chunk) in out.polys.iter_mut().zip(bytes.chunks_exact(SCALAR_BYTES)) {
            byte_decode_12(poly, chunk)?;
        }
        Ok(out)
    }

    /// Inner product in the NTT domain: sum of component-wise products.
    ///
    /// The output is a fresh polynomial, so it cannot alias the inputs.
    pub fn inner_product(&self, rhs: &Self) -> Poly {
        let mut out = Poly::default();
        multiply_ntt(&mut out, &self.polys[0], &rhs.polys[0]);
        for i in 1..K {
            multiply_add_ntt(&mut out, &self.polys[i], &rhs.polys[i]);
        }
        out
    }
}
