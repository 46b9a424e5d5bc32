#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::OsRng;
use sidh_p751_arith::{ExtensionFieldElement, PrimeFieldElement};

fn prime_field_mul(c: &mut Criterion) {
    c.bench_function("fp751_mul_reduce", |b| {
        let x = PrimeFieldElement::random(&mut OsRng);
        let y = PrimeFieldElement::random(&mut OsRng);
        b.iter(|| black_box(&x) * black_box(&y))
    });
}

fn prime_field_inv(c: &mut Criterion) {
    c.bench_function("fp751_inv", |b| {
        let x = PrimeFieldElement::random(&mut OsRng);
        b.iter(|| black_box(&x).inv())
    });
}

fn extension_field_mul(c: &mut Criterion) {
    c.bench_function("fp751x2_mul", |b| {
        let x = ExtensionFieldElement::random(&mut OsRng);
        let y = ExtensionFieldElement::random(&mut OsRng);
        b.iter(|| black_box(&x) * black_box(&y))
    });
}

fn extension_field_square(c: &mut Criterion) {
    c.bench_function("fp751x2_square", |b| {
        let x = ExtensionFieldElement::random(&mut OsRng);
        b.iter(|| black_box(&x).square())
    });
}

fn extension_field_inv(c: &mut Criterion) {
    c.bench_function("fp751x2_inv", |b| {
        let x = ExtensionFieldElement::random(&mut OsRng);
        b.iter(|| black_box(&x).inv())
    });
}

criterion_group!(
    field,
    prime_field_mul,
    prime_field_inv,
    extension_field_mul,
    extension_field_square,
    extension_field_inv
);
criterion_main!(field);
