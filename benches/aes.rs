//! Benchmarks for the AES block cipher core
//!
//! Covers key expansion and single-block encryption/decryption for
//! AES-128, AES-192, and AES-256 with whichever backend the dispatcher
//! selects on the host.

use aes_core::Aes;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const KEY_SIZES: [usize; 3] = [16, 24, 32];

fn variant_label(key_len: usize) -> &'static str {
    match key_len {
        16 => "aes128",
        24 => "aes192",
        _ => "aes256",
    }
}

/// Benchmark key expansion (both schedules, backend selection included)
fn bench_key_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("aes_key_expansion");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for key_len in KEY_SIZES {
        let mut key = vec![0u8; key_len];
        rng.fill(&mut key[..]);

        group.bench_function(variant_label(key_len), |b| {
            b.iter(|| {
                let cipher = Aes::new(black_box(&key)).unwrap();
                black_box(cipher);
            });
        });
    }

    group.finish();
}

/// Benchmark single block encryption
fn bench_block_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("aes_block_encrypt");
    group.throughput(Throughput::Bytes(16));

    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for key_len in KEY_SIZES {
        let mut key = vec![0u8; key_len];
        rng.fill(&mut key[..]);
        let cipher = Aes::new(&key).unwrap();

        group.bench_function(variant_label(key_len), |b| {
            let mut block = [0u8; 16];
            rng.fill(&mut block);

            b.iter(|| {
                let mut data = block;
                cipher.encrypt_block(black_box(&mut data)).unwrap();
                black_box(data);
            });
        });
    }

    group.finish();
}

/// Benchmark single block decryption
fn bench_block_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("aes_block_decrypt");
    group.throughput(Throughput::Bytes(16));

    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for key_len in KEY_SIZES {
        let mut key = vec![0u8; key_len];
        rng.fill(&mut key[..]);
        let cipher = Aes::new(&key).unwrap();

        group.bench_function(variant_label(key_len), |b| {
            let mut block = [0u8; 16];
            rng.fill(&mut block);
            cipher.encrypt_block(&mut block).unwrap(); // Pre-encrypt

            b.iter(|| {
                let mut data = block;
                cipher.decrypt_block(black_box(&mut data)).unwrap();
                black_box(data);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_key_expansion,
    bench_block_encrypt,
    bench_block_decrypt
);
criterion_main!(benches);
