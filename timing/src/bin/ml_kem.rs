//! Constant-time verification for ML-KEM decapsulation.
//!
//! Decapsulation runs decrypt, re-encrypt and a masked merge on every
//! input, so its timing must not depend on whether the ciphertext is
//! legitimate. Each harness holds one [`MlKemKey`] with its pre-expanded
//! matrix and times `decapsulate` against two ciphertext classes: the
//! genuine encapsulation output, and the same bytes with the compressed
//! v scalar disturbed (which flips the implicit-rejection path). Both the
//! smallest and the largest rank are measured, since the three parameter
//! sets share the merge code but run different vector lengths.
//!
//! Run with: `cargo run --release -p krater-timing --bin ml_kem`

use dudect_bencher::rand::Rng;
use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use krater_ml_kem::{MlKemKey, Variant};

/// Timed decapsulations per harness invocation.
const SAMPLES: usize = 8_192;

/// A keypair plus one ciphertext of each class.
struct Harness {
    key: MlKemKey,
    ct_accept: Vec<u8>,
    ct_reject: Vec<u8>,
}

impl Harness {
    fn new(variant: Variant) -> Self {
        let info = variant.info();
        let mut rng = rand::rng();

        let mut key = MlKemKey::new(variant);
        key.generate(&mut rng, None, None).expect("keygen failed");

        let mut ct_accept = vec![0u8; info.ctext_bytes];
        let mut secret = [0u8; 32];
        key.encapsulate_random(&mut rng, &mut ct_accept, &mut secret)
            .expect("encaps failed");

        // Disturb the v segment: the re-encryption then disagrees and the
        // merge must select the rejection key, in the same time.
        let mut ct_reject = ct_accept.clone();
        ct_reject[info.u_vector_bytes] ^= 0x01;
        ct_reject[info.ctext_bytes - 1] ^= 0x80;

        Self {
            key,
            ct_accept,
            ct_reject,
        }
    }

    fn run(&self, runner: &mut CtRunner, rng: &mut BenchRng) {
        for _ in 0..SAMPLES {
            let (class, ct) = if rng.gen::<bool>() {
                (Class::Left, &self.ct_accept)
            } else {
                (Class::Right, &self.ct_reject)
            };
            runner.run_one(class, || {
                let mut decap_rng = rand::rng();
                let mut secret = [0u8; 32];
                self.key
                    .decapsulate(ct, &mut secret, &mut decap_rng)
                    .expect("decaps failed");
                secret
            });
        }
    }
}

/// ML-KEM-512 decapsulation: accepted vs rejected ciphertext timing.
fn bench_decaps_512(runner: &mut CtRunner, rng: &mut BenchRng) {
    Harness::new(Variant::MlKem512).run(runner, rng);
}

/// ML-KEM-1024 decapsulation: accepted vs rejected ciphertext timing.
fn bench_decaps_1024(runner: &mut CtRunner, rng: &mut BenchRng) {
    Harness::new(Variant::MlKem1024).run(runner, rng);
}

ctbench_main!(bench_decaps_512, bench_decaps_1024);
