//! The public matrix and its products.
//!
//! # Transposed storage
//!
//! FIPS 203 samples its matrix as `A[i][j] = SampleNTT(rho || j || i)`,
//! with the COLUMN index absorbed first. This implementation appends the
//! cell indices in storage order instead, `rho || i || j`, which means the
//! stored matrix is the transpose of FIPS 203's A. Both key generation
//! (t = A s + e = mT s + e) and encryption (u = AT y = m y) then run off
//! the same stored matrix through the two product routines below, and the
//! externally observable key and ciphertext bytes are unchanged. Naively
//! transcribing FIPS 203 indices on top of this storage order will produce
//! a correct-looking but mis-shaped matrix; keep the convention in mind
//! when comparing against the standard.

use crate::hash::Xof;
use crate::params::RANDOM_BYTES;
use crate::poly::{multiply_add_ntt, multiply_ntt, Poly};
use crate::polyvec::PolyVec;
use crate::sample::sample_uniform;
use krater_core::Result;

/// A K x K matrix of polynomials, row-major, always in the NTT domain.
///
/// Semantically the transpose of FIPS 203's A; see the module notes.
#[derive(Clone)]
pub(crate) struct Matrix<const K: usize> {
    cells: [[Poly; K]; K],
}

impl<const K: usize> Default for Matrix<K> {
    fn default() -> Self {
        Self {
            cells: core::array::from_fn(|_| core::array::from_fn(|_| Poly::default())),
        }
    }
}

impl<const K: usize> Matrix<K> {
    /// Expand the matrix from the public seed rho.
    ///
    /// Cell (i, j) is rejection-sampled from an independent SHAKE128 stream
    /// absorbed over `rho || i || j` (storage order; see the module notes).
    pub fn expand(rho: &[u8; RANDOM_BYTES]) -> Result<Self> {
        let mut matrix = Self::default();
        for i in 0..K {
            for j in 0..K {
                let mut xof = Xof::new(rho, [i as u8, j as u8])?;
                matrix.cells[i][j] = sample_uniform(&mut xof)?;
            }
        }
        Ok(matrix)
    }

    /// Matrix-vector product `m * a` in the NTT domain.
    ///
    /// With the transposed storage this computes FIPS 203's `AT * a`
    /// (the u vector of encryption). The output is freshly allocated and
    /// never aliases the inputs.
    pub fn mul(&self, a: &PolyVec<K>) -> PolyVec<K> {
        let mut out = PolyVec::default();
        for i in 0..K {
            multiply_ntt(&mut out.polys[i], &self.cells[i][0], &a.polys[0]);
            for j in 1..K {
                multiply_add_ntt(&mut out.polys[i], &self.cells[i][j], &a.polys[j]);
            }
        }
        out
    }

    /// Transposed product `mT * a` in the NTT domain.
    ///
    /// With the transposed storage this computes FIPS 203's `A * a`
    /// (the t vector of key generation). The output never aliases the
    /// inputs.
    pub fn mul_transpose(&self, a: &PolyVec<K>) -> PolyVec<K> {
        let mut out = PolyVec::default();
        for i in 0..K {
            multiply_ntt(&mut out.polys[i], &self.cells[0][i], &a.polys[0]);
            for j in 1..K {
                multiply_add_ntt(&mut out.polys[i], &self.cells[j][i], &a.polys[j]);
            }
        }
        out
    }
}
