//! Shared foundation: errors, configuration, randomness and core value types.

/// Configuration loaded from JSON or built in code.
pub mod config;
/// Geometry re-exports, canvas and colour types.
pub mod core;
/// Crate error type.
pub mod error;
/// Seeded random stream helpers.
pub mod random;
