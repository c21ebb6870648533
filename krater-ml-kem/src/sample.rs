//! Sampling for ML-KEM: uniform rejection sampling from the SHAKE128 XOF
//! (FIPS 203 Algorithm 7) and centred binomial sampling from SHAKE256
//! output (FIPS 203 Algorithm 8).

use crate::hash::{prf, Xof};
use crate::params::{N, Q, RANDOM_BYTES};
use crate::poly::Poly;
use crate::polyvec::PolyVec;
use crate::reduce::reduce_once;
use krater_core::Result;
use zeroize::Zeroize;

/// Rejection-sampling block size in bytes.
///
/// Must be a multiple of 3; 168 matches the SHAKE128 rate, so each squeeze
/// consumes exactly one Keccak permutation worth of output.
const SAMPLE_BLOCK_BYTES: usize = 168;

/// Uniformly sample a polynomial in the NTT domain from an XOF stream.
///
/// Each 3 squeezed bytes yield two 12-bit candidates; candidates >= q are
/// rejected. The input is public (the matrix seed rho), so neither the
/// loop count nor the rejection pattern needs to be constant-time.
pub(crate) fn sample_uniform(xof: &mut Xof) -> Result<Poly> {
    let mut poly = Poly::default();
    let mut done = 0;
    let mut block = [0u8; SAMPLE_BLOCK_BYTES];

    while done < N {
        xof.squeeze(&mut block)?;
        for chunk in block.chunks_exact(3) {
            if done == N {
                break;
            }
            let d1 = u16::from(chunk[0]) | (u16::from(chunk[1] & 0x0f) << 8);
            let d2 = u16::from(chunk[1] >> 4) | (u16::from(chunk[2]) << 4);
            if d1 < Q {
                poly.coeffs[done] = d1;
                done += 1;
            }
            if d2 < Q && done < N {
                poly.coeffs[done] = d2;
                done += 1;
            }
        }
    }
    Ok(poly)
}

/// CBD(2): each coefficient is the difference of two 2-bit sums, taken
/// modulo q by adding q before a final reduction. Consumes 128 PRF bytes.
pub(crate) fn cbd_2(seed: &[u8; RANDOM_BYTES], counter: u8) -> Result<Poly> {
    let mut buf = [0u8; 2 * N / 4];
    prf(&mut buf, seed, counter)?;

    let mut poly = Poly::default();
    for i in (0..N).step_by(2) {
        let mut byte = buf[i / 2];

        let mut value = Q + u16::from(byte & 1) + u16::from((byte >> 1) & 1);
        value -= u16::from((byte >> 2) & 1) + u16::from((byte >> 3) & 1);
        poly.coeffs[i] = reduce_once(value);

        byte >>= 4;
        let mut value = Q + u16::from(byte & 1) + u16::from((byte >> 1) & 1);
        value -= u16::from((byte >> 2) & 1) + u16::from((byte >> 3) & 1);
        poly.coeffs[i + 1] = reduce_once(value);
    }
    buf.zeroize();
    Ok(poly)
}

/// CBD(3): difference of two 3-bit sums. Consumes 192 PRF bytes; three
/// bytes yield four coefficients of six bits each.
pub(crate) fn cbd_3(seed: &[u8; RANDOM_BYTES], counter: u8) -> Result<Poly> {
    #[inline]
    fn bit(b: u8, n: u8) -> u16 {
        u16::from((b >> n) & 1)
    }

    let mut buf = [0u8; 6 * N / 8];
    prf(&mut buf, seed, counter)?;

    let mut poly = Poly::default();
    let mut i = 0;
    for chunk in buf.chunks_exact(3) {
        let (b1, b2, b3) = (chunk[0], chunk[1], chunk[2]);

        let mut value = Q + bit(b1, 0) + bit(b1, 1) + bit(b1, 2);
        value -= bit(b1, 3) + bit(b1, 4) + bit(b1, 5);
        poly.coeffs[i] = reduce_once(value);

        let mut value = Q + bit(b1, 6) + bit(b1, 7) + bit(b2, 0);
        value -= bit(b2, 1) + bit(b2, 2) + bit(b2, 3);
        poly.coeffs[i + 1] = reduce_once(value);

        let mut value = Q + bit(b2, 4) + bit(b2, 5) + bit(b2, 6);
        value -= bit(b2, 7) + bit(b3, 0) + bit(b3, 1);
        poly.coeffs[i + 2] = reduce_once(value);

        let mut value = Q + bit(b3, 2) + bit(b3, 3) + bit(b3, 4);
        value -= bit(b3, 5) + bit(b3, 6) + bit(b3, 7);
        poly.coeffs[i + 3] = reduce_once(value);

        i += 4;
    }
    buf.zeroize();
    Ok(poly)
}

/// Sample a vector of CBD(eta) polynomials, incrementing `counter` once per
/// slot. The counter MUST continue monotonically across successive calls
/// that share one seed (y, then e1, then e2 in encryption).
pub(crate) fn sample_cbd_vector<const K: usize>(
    out: &mut PolyVec<K>,
    eta: usize,
    seed: &[u8; RANDOM_BYTES],
    counter: &mut u8,
) -> Result<()> {
    debug_assert!(eta == 2 || eta == 3);
    for poly in out.polys.iter_mut() {
        *poly = match eta {
            3 => cbd_3(seed, *counter)?,
            _ => cbd_2(seed, *counter)?,
        };
        *counter += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered(c: u16) -> i32 {
        if c > Q / 2 {
            i32::from(c) - i32::from(Q)
        } else {
            i32::from(c)
        }
    }

    #[test]
    fn uniform_sampling_is_deterministic_and_in_range() {
        let rho = [0x42u8; 32];
        let a = sample_uniform(&mut Xof::new(&rho, [0, 0]).unwrap()).unwrap();
        let b = sample_uniform(&mut Xof::new(&rho, [0, 0]).unwrap()).unwrap();
        assert_eq!(a.coeffs, b.coeffs);
        assert!(a.coeffs.iter().all(|&c| c < Q));
        // A uniform polynomial has essentially no zero coefficients.
        assert!(a.coeffs.iter().filter(|&&c| c != 0).count() > 200);
    }

    #[test]
    fn uniform_sampling_separates_cells() {
        let rho = [0x42u8; 32];
        let a = sample_uniform(&mut Xof::new(&rho, [0, 0]).unwrap()).unwrap();
        let b = sample_uniform(&mut Xof::new(&rho, [0, 1]).unwrap()).unwrap();
        let c = sample_uniform(&mut Xof::new(&rho, [1, 0]).unwrap()).unwrap();
        assert_ne!(a.coeffs, b.coeffs);
        assert_ne!(a.coeffs, c.coeffs);
        assert_ne!(b.coeffs, c.coeffs);
    }

    #[test]
    fn cbd_2_range_and_determinism() {
        let seed = [0x17u8; 32];
        let a = cbd_2(&seed, 0).unwrap();
        let b = cbd_2(&seed, 0).unwrap();
        assert_eq!(a.coeffs, b.coeffs);
        for &c in a.coeffs.iter() {
            assert!(c < Q);
            assert!(centered(c).abs() <= 2, "coefficient {c} outside [-2, 2]");
        }
        assert_ne!(a.coeffs, cbd_2(&seed, 1).unwrap().coeffs);
    }

    #[test]
    fn cbd_3_range() {
        let seed = [0x23u8; 32];
        let a = cbd_3(&seed, 7).unwrap();
        for &c in a.coeffs.iter() {
            assert!(c < Q);
            assert!(centered(c).abs() <= 3, "coefficient {c} outside [-3, 3]");
        }
    }

    #[test]
    fn cbd_distributions_are_roughly_centred() {
        let seed = [0x5cu8; 32];
        for eta in [2usize, 3] {
            let poly = match eta {
                3 => cbd_3(&seed, 0).unwrap(),
                _ => cbd_2(&seed, 0).unwrap(),
            };
            let sum: i32 = poly.coeffs.iter().map(|&c| centered(c)).sum();
            // Mean is 0 with variance eta/2 per coefficient; a drift beyond
            // 100 over 256 samples would indicate a bit-ordering bug.
            assert!(sum.abs() < 100, "eta={eta}: sum {sum}");
        }
    }

    #[test]
    fn vector_sampling_threads_the_counter() {
        let seed = [0x91u8; 32];
        let mut counter = 0u8;
        let mut vec: PolyVec<3> = PolyVec::default();
        sample_cbd_vector(&mut vec, 2, &seed, &mut counter).unwrap();
        assert_eq!(counter, 3);

        // Slot i must equal the scalar sample with counter value i.
        for (i, poly) in vec.polys.iter().enumerate() {
            assert_eq!(poly.coeffs, cbd_2(&seed, i as u8).unwrap().coeffs);
        }

        // A second vector continues the counter without overlap.
        let mut vec2: PolyVec<3> = PolyVec::default();
        sample_cbd_vector(&mut vec2, 2, &seed, &mut counter).unwrap();
        assert_eq!(counter, 6);
        assert_ne!(vec.polys[0].coeffs, vec2.polys[0].coeffs);
    }
}
