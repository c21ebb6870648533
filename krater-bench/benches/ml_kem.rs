//! ML-KEM Benchmarks
//!
//! Benchmarks for all ML-KEM variants using the Criterion framework, at
//! both API levels: the byte-oriented KEM front ends (which re-parse the
//! key per operation) and the retained [`MlKemKey`] object (which keeps
//! the expanded matrix across operations).

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use krater_core::Kem;
use krater_ml_kem::{MlKem1024, MlKem512, MlKem768, MlKemKey, Variant};
use rand::rng;

/// Benchmark key generation for all ML-KEM variants.
fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM KeyGen");
    group.throughput(Throughput::Elements(1));

    group.bench_function("ML-KEM-512", |b| {
        b.iter(|| {
            let mut rng = rng();
            black_box(MlKem512::keygen(&mut rng).unwrap())
        })
    });
    group.bench_function("ML-KEM-768", |b| {
        b.iter(|| {
            let mut rng = rng();
            black_box(MlKem768::keygen(&mut rng).unwrap())
        })
    });
    group.bench_function("ML-KEM-1024", |b| {
        b.iter(|| {
            let mut rng = rng();
            black_box(MlKem1024::keygen(&mut rng).unwrap())
        })
    });

    group.finish();
}

/// Benchmark encapsulation for all ML-KEM variants.
fn bench_encaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM Encaps");
    group.throughput(Throughput::Elements(1));

    let (_, ek_512) = MlKem512::keygen(&mut rng()).unwrap();
    let (_, ek_768) = MlKem768::keygen(&mut rng()).unwrap();
    let (_, ek_1024) = MlKem1024::keygen(&mut rng()).unwrap();

    group.bench_function("ML-KEM-512", |b| {
        b.iter(|| {
            let mut thread_rng = rng();
            black_box(MlKem512::encaps(&ek_512, &mut thread_rng).unwrap())
        })
    });
    group.bench_function("ML-KEM-768", |b| {
        b.iter(|| {
            let mut thread_rng = rng();
            black_box(MlKem768::encaps(&ek_768, &mut thread_rng).unwrap())
        })
    });
    group.bench_function("ML-KEM-1024", |b| {
        b.iter(|| {
            let mut thread_rng = rng();
            black_box(MlKem1024::encaps(&ek_1024, &mut thread_rng).unwrap())
        })
    });

    group.finish();
}

/// Benchmark decapsulation for all ML-KEM variants.
fn bench_decaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM Decaps");
    group.throughput(Throughput::Elements(1));

    let mut rng = rng();

    let (dk_512, ek_512) = MlKem512::keygen(&mut rng).unwrap();
    let (ct_512, _) = MlKem512::encaps(&ek_512, &mut rng).unwrap();

    let (dk_768, ek_768) = MlKem768::keygen(&mut rng).unwrap();
    let (ct_768, _) = MlKem768::encaps(&ek_768, &mut rng).unwrap();

    let (dk_1024, ek_1024) = MlKem1024::keygen(&mut rng).unwrap();
    let (ct_1024, _) = MlKem1024::encaps(&ek_1024, &mut rng).unwrap();

    group.bench_function("ML-KEM-512", |b| {
        b.iter(|| black_box(MlKem512::decaps(&dk_512, &ct_512).unwrap()))
    });
    group.bench_function("ML-KEM-768", |b| {
        b.iter(|| black_box(MlKem768::decaps(&dk_768, &ct_768).unwrap()))
    });
    group.bench_function("ML-KEM-1024", |b| {
        b.iter(|| black_box(MlKem1024::decaps(&dk_1024, &ct_1024).unwrap()))
    });

    group.finish();
}

/// Benchmark operations on a retained key object, where the matrix is
/// expanded once instead of per call.
fn bench_retained_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM Retained Key");
    group.throughput(Throughput::Elements(1));

    let mut rng = rng();
    let mut key = MlKemKey::new(Variant::MlKem768);
    key.generate(&mut rng, None, None).unwrap();

    let mut ct = [0u8; 1088];
    let mut ss = [0u8; 32];
    key.encapsulate_random(&mut rng, &mut ct, &mut ss).unwrap();

    group.bench_function("ML-KEM-768 encapsulate", |b| {
        b.iter(|| {
            let mut thread_rng = rand::rng();
            let mut ct = [0u8; 1088];
            let mut ss = [0u8; 32];
            key.encapsulate_random(&mut thread_rng, &mut ct, &mut ss)
                .unwrap();
            black_box(ss)
        })
    });
    group.bench_function("ML-KEM-768 decapsulate", |b| {
        b.iter(|| {
            let mut thread_rng = rand::rng();
            let mut out = [0u8; 32];
            key.decapsulate(&ct, &mut out, &mut thread_rng).unwrap();
            black_box(out)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_keygen,
    bench_encaps,
    bench_decaps,
    bench_retained_key,
);

criterion_main!(benches);
