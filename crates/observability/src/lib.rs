//! Tracing/logging setup shared by binaries and examples.

pub mod tracing;

pub use self::tracing::init;
