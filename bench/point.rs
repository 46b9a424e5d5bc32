#![allow(missing_docs)]
#![allow(non_snake_case)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::OsRng;
use sidh_p751_arith::{ExtensionFieldElement, ProjectiveCurveParameters, ProjectivePoint};

fn random_curve() -> ProjectiveCurveParameters {
    ProjectiveCurveParameters::new(
        ExtensionFieldElement::random(&mut OsRng),
        ExtensionFieldElement::random(&mut OsRng),
    )
}

fn random_point() -> ProjectivePoint {
    ProjectivePoint::new(
        ExtensionFieldElement::random(&mut OsRng),
        ExtensionFieldElement::random(&mut OsRng),
    )
}

fn point_addition(c: &mut Criterion) {
    c.bench_function("point_addition", |b| {
        let (xP, xQ, xR) = (random_point(), random_point(), random_point());
        b.iter(|| ProjectivePoint::add(black_box(&xP), black_box(&xQ), black_box(&xR)))
    });
}

fn point_double(c: &mut Criterion) {
    c.bench_function("point_double", |b| {
        let consts = random_curve().cached_constants();
        let xP = random_point();
        b.iter(|| black_box(&xP).double(&consts))
    });
}

fn point_triple(c: &mut Criterion) {
    c.bench_function("point_triple", |b| {
        let consts = random_curve().cached_constants();
        let xP = random_point();
        b.iter(|| black_box(&xP).triple(&consts))
    });
}

fn point_pow2k(c: &mut Criterion) {
    c.bench_function("point_pow2k_32", |b| {
        let consts = random_curve().cached_constants();
        let xP = random_point();
        b.iter(|| black_box(&xP).pow2k_cached(&consts, 32))
    });
}

fn point_ladder(c: &mut Criterion) {
    c.bench_function("point_ladder_372_bits", |b| {
        let consts = random_curve().cached_constants();
        let xP = random_point();
        let bits: Vec<bool> = (0..372).map(|i| i % 3 == 0).collect();
        b.iter(|| black_box(&xP).mul_bits_be(&consts, bits.iter().copied()))
    });
}

criterion_group!(
    point,
    point_addition,
    point_double,
    point_triple,
    point_pow2k,
    point_ladder
);
criterion_main!(point);
