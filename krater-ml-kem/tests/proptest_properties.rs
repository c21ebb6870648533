//! Property-based tests for ML-KEM using proptest.
//!
//! These tests verify fundamental cryptographic properties:
//! - Basic properties: roundtrip (encaps/decaps), key sizes, ciphertext size
//! - Determinism: same seed produces same keys
//! - Wire codec: encode/parse round trips at the key-object level

use krater_ml_kem::{MlKemKey, Selection, Variant};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generate arbitrary 32-byte seeds for testing
fn arb_seed() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

/// Generate arbitrary 64-byte keygen seeds (d || z)
fn arb_keygen_seed() -> impl Strategy<Value = [u8; 64]> {
    (arb_seed(), arb_seed()).prop_map(|(d, z)| {
        let mut seed = [0u8; 64];
        seed[..32].copy_from_slice(&d);
        seed[32..].copy_from_slice(&z);
        seed
    })
}

fn arb_variant() -> impl Strategy<Value = Variant> {
    prop_oneof![
        Just(Variant::MlKem512),
        Just(Variant::MlKem768),
        Just(Variant::MlKem1024),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Encapsulation followed by decapsulation recovers the shared secret,
    /// for every variant and any seed/entropy pair.
    #[test]
    fn encaps_decaps_roundtrip(
        variant in arb_variant(),
        seed in arb_keygen_seed(),
        entropy in arb_seed(),
    ) {
        let info = variant.info();
        let mut key = MlKemKey::new(variant);
        key.generate_from_seed(&seed, None).unwrap();

        let mut ct = vec![0u8; info.ctext_bytes];
        let mut ss_enc = [0u8; 32];
        key.encapsulate(&entropy, &mut ct, &mut ss_enc).unwrap();

        let mut ss_dec = [0u8; 32];
        let mut rng = StdRng::seed_from_u64(0);
        key.decapsulate(&ct, &mut ss_dec, &mut rng).unwrap();
        prop_assert_eq!(ss_enc, ss_dec);
    }

    /// The same seed produces byte-identical keys.
    #[test]
    fn keygen_determinism(variant in arb_variant(), seed in arb_keygen_seed()) {
        let info = variant.info();
        let mut a = MlKemKey::new(variant);
        let mut b = MlKemKey::new(variant);
        a.generate_from_seed(&seed, None).unwrap();
        b.generate_from_seed(&seed, None).unwrap();

        let mut enc_a = vec![0u8; info.prvkey_bytes];
        let mut enc_b = vec![0u8; info.prvkey_bytes];
        a.encode_private_key(&mut enc_a).unwrap();
        b.encode_private_key(&mut enc_b).unwrap();
        prop_assert_eq!(enc_a, enc_b);
    }

    /// Wire round trips preserve both encodings and key equality.
    #[test]
    fn wire_roundtrip(variant in arb_variant(), seed in arb_keygen_seed()) {
        let info = variant.info();
        let mut key = MlKemKey::new(variant);
        key.generate_from_seed(&seed, None).unwrap();

        let mut pub_bytes = vec![0u8; info.pubkey_bytes];
        key.encode_public_key(&mut pub_bytes).unwrap();
        let mut prv_bytes = vec![0u8; info.prvkey_bytes];
        key.encode_private_key(&mut prv_bytes).unwrap();

        let mut parsed_pub = MlKemKey::new(variant);
        parsed_pub.parse_public_key(&pub_bytes).unwrap();
        prop_assert!(key.public_eq(&parsed_pub));

        let mut parsed_prv = MlKemKey::new(variant);
        parsed_prv.parse_private_key(&prv_bytes).unwrap();
        prop_assert!(key.public_eq(&parsed_prv));

        let mut reencoded = vec![0u8; info.prvkey_bytes];
        parsed_prv.encode_private_key(&mut reencoded).unwrap();
        prop_assert_eq!(prv_bytes, reencoded);
    }

    /// A corrupted ciphertext is implicitly rejected: decapsulation
    /// succeeds but yields a different, deterministic secret.
    #[test]
    fn implicit_rejection(
        variant in arb_variant(),
        seed in arb_keygen_seed(),
        entropy in arb_seed(),
        corrupt_index in any::<prop::sample::Index>(),
        corrupt_mask in 1u8..=255,
    ) {
        let info = variant.info();
        let mut key = MlKemKey::new(variant);
        key.generate_from_seed(&seed, None).unwrap();

        let mut ct = vec![0u8; info.ctext_bytes];
        let mut ss_enc = [0u8; 32];
        key.encapsulate(&entropy, &mut ct, &mut ss_enc).unwrap();

        let idx = corrupt_index.index(ct.len());
        ct[idx] ^= corrupt_mask;

        let mut rng = StdRng::seed_from_u64(1);
        let mut ss_bad = [0u8; 32];
        key.decapsulate(&ct, &mut ss_bad, &mut rng).unwrap();
        prop_assert_ne!(ss_enc, ss_bad);

        let mut ss_bad2 = [0u8; 32];
        key.decapsulate(&ct, &mut ss_bad2, &mut rng).unwrap();
        prop_assert_eq!(ss_bad, ss_bad2);
    }

    /// Duplicated keys agree with their source on every operation.
    #[test]
    fn duplicate_agrees_with_source(
        variant in arb_variant(),
        seed in arb_keygen_seed(),
        entropy in arb_seed(),
    ) {
        let info = variant.info();
        let mut key = MlKemKey::new(variant);
        key.generate_from_seed(&seed, None).unwrap();
        let copy = key.duplicate(Selection::Keypair);

        let mut ct = vec![0u8; info.ctext_bytes];
        let mut ss_enc = [0u8; 32];
        key.encapsulate(&entropy, &mut ct, &mut ss_enc).unwrap();

        let mut ss_dec = [0u8; 32];
        let mut rng = StdRng::seed_from_u64(2);
        copy.decapsulate(&ct, &mut ss_dec, &mut rng).unwrap();
        prop_assert_eq!(ss_enc, ss_dec);
        prop_assert!(key.public_eq(&copy));
    }
}
