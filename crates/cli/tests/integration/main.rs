//! Integration tests that drive the `toncli` binary against stub toolchains.

#![cfg(unix)]

mod build_tests;
mod common;
mod run_tests;
mod sendboc_tests;
