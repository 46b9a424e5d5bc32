//! Serial (non-vectorized) implementations of the modular kernel.

pub mod u64;
