//! Shared utilities.
//!
//! Test helpers for running shell stubs in place of the real toolchain.

#[cfg(test)]
pub mod testutil;
