//! Backends for the modular kernel.
//!
//! Only the portable `serial::u64` backend exists today. A hand-tuned
//! backend must provide the same functions with the same numeric-range
//! contracts; nothing above this module depends on how they are computed.

pub mod serial;
