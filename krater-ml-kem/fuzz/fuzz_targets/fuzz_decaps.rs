//! Fuzz target for ML-KEM decapsulation.
//!
//! Exercises implicit rejection: corrupted ciphertexts must decapsulate
//! to a deterministic pseudorandom secret, never panic, and never leak
//! the legitimate secret.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;

use krater_ml_kem::{MlKemKey, Variant};

#[derive(Debug, Arbitrary)]
struct DecapsInput {
    seed: [u8; 64],
    entropy: [u8; 32],
    corrupt_byte: u8,
    corrupt_index: usize,
    variant: u8,
}

fuzz_target!(|input: DecapsInput| {
    let variant = match input.variant % 3 {
        0 => Variant::MlKem512,
        1 => Variant::MlKem768,
        _ => Variant::MlKem1024,
    };
    let info = variant.info();
    let mut rng = StdRng::from_seed(input.entropy);

    let mut key = MlKemKey::new(variant);
    key.generate_from_seed(&input.seed, None).unwrap();

    let mut ct = vec![0u8; info.ctext_bytes];
    let mut ss_enc = [0u8; 32];
    key.encapsulate(&input.entropy, &mut ct, &mut ss_enc).unwrap();

    // Valid ciphertext decapsulates to the encapsulated secret.
    let mut ss_dec = [0u8; 32];
    key.decapsulate(&ct, &mut ss_dec, &mut rng).unwrap();
    assert_eq!(ss_enc, ss_dec, "valid decaps should recover shared secret");

    // Corrupt one byte: implicit rejection, still deterministic.
    let idx = input.corrupt_index % ct.len();
    ct[idx] ^= input.corrupt_byte | 1;

    let mut ss_bad = [0u8; 32];
    key.decapsulate(&ct, &mut ss_bad, &mut rng).unwrap();
    assert_ne!(ss_enc, ss_bad, "corrupted ciphertext must be rejected");

    let mut ss_bad2 = [0u8; 32];
    key.decapsulate(&ct, &mut ss_bad2, &mut rng).unwrap();
    assert_eq!(ss_bad, ss_bad2, "implicit rejection must be deterministic");

    // Truncated ciphertext: error, with the output randomised.
    let mut ss_err = [0u8; 32];
    assert!(key
        .decapsulate(&ct[..ct.len() - 1], &mut ss_err, &mut rng)
        .is_err());
});
