//! Fuzz target for the key wire codec.
//!
//! Arbitrary byte strings must never panic the parsers; valid encodings
//! must round-trip.

#![no_main]

use libfuzzer_sys::fuzz_target;

use krater_ml_kem::{MlKemKey, Variant};

fuzz_target!(|data: &[u8]| {
    for variant in [Variant::MlKem512, Variant::MlKem768, Variant::MlKem1024] {
        let mut key = MlKemKey::new(variant);
        if key.parse_public_key(data).is_ok() {
            let mut out = vec![0u8; variant.info().pubkey_bytes];
            key.encode_public_key(&mut out).unwrap();
            assert_eq!(data, &out[..], "public key must re-encode identically");
        }

        let mut key = MlKemKey::new(variant);
        if key.parse_private_key(data).is_ok() {
            let mut out = vec![0u8; variant.info().prvkey_bytes];
            key.encode_private_key(&mut out).unwrap();
            assert_eq!(data, &out[..], "private key must re-encode identically");
        }
    }
});
