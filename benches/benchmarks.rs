//! Benchmarks for galois-field arithmetic.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use galois_field::{gf, FieldOps, GaloisField, Polynomial};

// A large prime that still leaves room in i64 products.
const P: u64 = 998244353;

/// GF(2^8) with the AES polynomial x^8 + x^4 + x^3 + x + 1.
fn aes_field() -> Arc<GaloisField> {
    let irr = Polynomial::new([(0, 1), (1, 1), (3, 1), (4, 1), (8, 1)]);
    Arc::new(GaloisField::extension(2, 8, irr).unwrap())
}

fn dense(degree: usize, seed: i64) -> Polynomial {
    (0..=degree).map(|i| (i, seed + i as i64)).collect()
}

fn bench_prime_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("GF(p) Operations");

    let field = Arc::new(GaloisField::prime(P).unwrap());
    let a = field.from_int(123456789);
    let b = field.from_int(987654321);

    group.bench_function("add", |bencher| {
        bencher.iter(|| black_box(&a).try_add(black_box(&b)))
    });

    group.bench_function("mul", |bencher| {
        bencher.iter(|| black_box(&a).try_mul(black_box(&b)))
    });

    group.bench_function("inverse", |bencher| bencher.iter(|| black_box(&a).inverse()));

    group.bench_function("div", |bencher| {
        bencher.iter(|| black_box(&a).try_div(black_box(&b)))
    });

    group.bench_function("pow_large", |bencher| {
        bencher.iter(|| black_box(&a).pow(P - 2))
    });

    group.finish();
}

fn bench_aes_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("GF(2^8) Operations");

    let field = aes_field();
    let a = field
        .element(Polynomial::new([(0, 1), (1, 1), (4, 1), (6, 1)]))
        .unwrap();
    let b = field
        .element(Polynomial::new([(1, 1), (3, 1), (6, 1), (7, 1)]))
        .unwrap();

    group.bench_function("add", |bencher| {
        bencher.iter(|| black_box(&a).try_add(black_box(&b)))
    });

    group.bench_function("mul", |bencher| {
        bencher.iter(|| black_box(&a).try_mul(black_box(&b)))
    });

    group.bench_function("inverse", |bencher| bencher.iter(|| black_box(&a).inverse()));

    group.bench_function("div", |bencher| {
        bencher.iter(|| black_box(&a).try_div(black_box(&b)))
    });

    group.finish();
}

fn bench_extension_degree(c: &mut Criterion) {
    let mut group = c.benchmark_group("GF(p^m) by degree");

    for m in [2usize, 4, 8, 16] {
        let Some(irr) = gf::find_irreducible(101, m) else {
            continue;
        };
        let field = Arc::new(GaloisField::extension(101, m, irr).unwrap());
        let a = field.element(dense(m - 1, 3)).unwrap();
        let b = field.element(dense(m - 1, 7)).unwrap();

        group.bench_with_input(BenchmarkId::new("mul", m), &m, |bencher, _| {
            bencher.iter(|| black_box(&a).try_mul(black_box(&b)))
        });

        group.bench_with_input(BenchmarkId::new("inverse", m), &m, |bencher, _| {
            bencher.iter(|| black_box(&a).inverse())
        });
    }

    group.finish();
}

fn bench_poly_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("Polynomial Operations");

    for size in [16usize, 64, 256] {
        let a = dense(size - 1, 1);
        let b = dense(size - 1, 5);
        let modulus = dense(size / 2, 2);

        group.bench_with_input(BenchmarkId::new("mul_dense", size), &size, |bencher, _| {
            bencher.iter(|| black_box(&a).mul(black_box(&b), P))
        });

        group.bench_with_input(BenchmarkId::new("rem_dense", size), &size, |bencher, _| {
            bencher.iter(|| black_box(&a).rem(black_box(&modulus), P))
        });
    }

    // Sparse, high degree: cost tracks the number of terms.
    let sparse_a = Polynomial::new([(0, 1), (1000, 3), (5000, 7)]);
    let sparse_b = Polynomial::new([(2, 5), (4000, 1)]);
    group.bench_function("mul_sparse_5000", |bencher| {
        bencher.iter(|| black_box(&sparse_a).mul(black_box(&sparse_b), P))
    });

    group.bench_function("is_irreducible_deg8", |bencher| {
        let poly = Polynomial::new([(0, 1), (1, 1), (3, 1), (4, 1), (8, 1)]);
        bencher.iter(|| black_box(&poly).is_irreducible(2))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_prime_field,
    bench_aes_field,
    bench_extension_degree,
    bench_poly_operations,
);
criterion_main!(benches);
