//! ML-KEM parameter sets as defined in FIPS 203.

/// Polynomial ring dimension (n).
pub const N: usize = 256;

/// Modulus (q).
pub const Q: u16 = 3329;

/// Length of the seeds d, z, rho, sigma and of the encapsulation entropy.
pub const RANDOM_BYTES: usize = 32;

/// Length of the SHA3-256 hash of the encoded public key.
pub const PKHASH_BYTES: usize = 32;

/// Length of the keygen seed d || z.
pub const SEED_BYTES: usize = 2 * RANDOM_BYTES;

/// Shared secret size in bytes.
pub const SHARED_SECRET_BYTES: usize = 32;

/// Wire size of one losslessly encoded polynomial (12 bits per coefficient).
pub const SCALAR_BYTES: usize = 3 * N / 2;

/// Largest public key across the three variants, for stack scratch.
pub(crate) const MAX_PUBKEY_BYTES: usize = 4 * SCALAR_BYTES + RANDOM_BYTES;

/// Largest ciphertext across the three variants, for stack scratch.
pub(crate) const MAX_CTEXT_BYTES: usize = 1568;

/// Per-variant fixed parameters and derived wire sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantInfo {
    /// Canonical algorithm name, e.g. `"ML-KEM-768"`.
    pub name: &'static str,
    /// Module rank k (the vector length).
    pub rank: usize,
    /// Bit width for lossy compression of the ciphertext u vector.
    pub du: usize,
    /// Bit width for lossy compression of the ciphertext v scalar.
    pub dv: usize,
    /// CBD parameter for the secret vector s and keygen noise e.
    pub eta1: usize,
    /// Claimed classical security strength in bits.
    pub secbits: u32,
    /// Wire size of one encoded vector (rank polynomials, 12-bit).
    pub vector_bytes: usize,
    /// Wire size of the encoded public key.
    pub pubkey_bytes: usize,
    /// Wire size of the encoded private key.
    pub prvkey_bytes: usize,
    /// Wire size of a ciphertext.
    pub ctext_bytes: usize,
    /// Wire size of the compressed u vector (first ciphertext segment).
    pub u_vector_bytes: usize,
}

const fn vinfo(
    name: &'static str,
    rank: usize,
    du: usize,
    dv: usize,
    eta1: usize,
    secbits: u32,
) -> VariantInfo {
    let vector_bytes = rank * SCALAR_BYTES;
    let pubkey_bytes = vector_bytes + RANDOM_BYTES;
    let u_vector_bytes = rank * (N / 8) * du;
    VariantInfo {
        name,
        rank,
        du,
        dv,
        eta1,
        secbits,
        vector_bytes,
        pubkey_bytes,
        prvkey_bytes: vector_bytes + pubkey_bytes + PKHASH_BYTES + RANDOM_BYTES,
        ctext_bytes: u_vector_bytes + (N / 8) * dv,
        u_vector_bytes,
    }
}

/// ML-KEM-512 parameters (NIST security category 1).
pub const ML_KEM_512: VariantInfo = vinfo("ML-KEM-512", 2, 10, 4, 3, 128);

/// ML-KEM-768 parameters (NIST security category 3).
pub const ML_KEM_768: VariantInfo = vinfo("ML-KEM-768", 3, 10, 4, 2, 192);

/// ML-KEM-1024 parameters (NIST security category 5).
pub const ML_KEM_1024: VariantInfo = vinfo("ML-KEM-1024", 4, 11, 5, 2, 256);

/// ML-KEM parameter set selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// ML-KEM-512 (rank 2).
    MlKem512,
    /// ML-KEM-768 (rank 3).
    MlKem768,
    /// ML-KEM-1024 (rank 4).
    MlKem1024,
}

impl Variant {
    /// The fixed parameters of this variant.
    pub const fn info(self) -> &'static VariantInfo {
        match self {
            Variant::MlKem512 => &ML_KEM_512,
            Variant::MlKem768 => &ML_KEM_768,
            Variant::MlKem1024 => &ML_KEM_1024,
        }
    }

    /// Module rank k of this variant.
    pub const fn rank(self) -> usize {
        self.info().rank
    }
}

/// Parameters for the variant of rank `K`.
pub(crate) const fn variant_info<const K: usize>() -> &'static VariantInfo {
    match K {
        2 => &ML_KEM_512,
        3 => &ML_KEM_768,
        4 => &ML_KEM_1024,
        _ => panic!("unsupported module rank"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_sizes_match_fips_203() {
        assert_eq!(ML_KEM_512.pubkey_bytes, 800);
        assert_eq!(ML_KEM_512.prvkey_bytes, 1632);
        assert_eq!(ML_KEM_512.ctext_bytes, 768);

        assert_eq!(ML_KEM_768.pubkey_bytes, 1184);
        assert_eq!(ML_KEM_768.prvkey_bytes, 2400);
        assert_eq!(ML_KEM_768.ctext_bytes, 1088);

        assert_eq!(ML_KEM_1024.pubkey_bytes, 1568);
        assert_eq!(ML_KEM_1024.prvkey_bytes, 3168);
        assert_eq!(ML_KEM_1024.ctext_bytes, 1568);
    }

    #[test]
    fn u_vector_bytes_are_the_first_segment() {
        for info in [ML_KEM_512, ML_KEM_768, ML_KEM_1024] {
            assert_eq!(
                info.ctext_bytes - info.u_vector_bytes,
                (N / 8) * info.dv,
                "{}: v scalar segment size",
                info.name
            );
        }
    }

    #[test]
    fn variant_selectors_agree_with_records() {
        assert_eq!(Variant::MlKem512.info().rank, 2);
        assert_eq!(Variant::MlKem768.info().rank, 3);
        assert_eq!(Variant::MlKem1024.info().rank, 4);
        assert_eq!(Variant::MlKem512.info().eta1, 3);
        assert_eq!(Variant::MlKem768.info().eta1, 2);
        assert_eq!(Variant::MlKem1024.info().eta1, 2);
        assert_eq!(variant_info::<2>().name, "ML-KEM-512");
        assert_eq!(variant_info::<3>().name, "ML-KEM-768");
        assert_eq!(variant_info::<4>().name, "ML-KEM-1024");
    }

    #[test]
    fn max_sizes_cover_all_variants() {
        for info in [ML_KEM_512, ML_KEM_768, ML_KEM_1024] {
            assert!(info.pubkey_bytes <= MAX_PUBKEY_BYTES);
            assert!(info.ctext_bytes <= MAX_CTEXT_BYTES);
        }
    }
}
