//! toncli-lib: build, run and deploy pipeline for TON smart contracts.
//!
//! The crate coordinates three external tools and the files that flow between them:
//! - `func` compiles FunC sources into Fift scripts ([`stage::compile`])
//! - `fift` runs those scripts and serializes BOC files ([`stage::interpret`])
//! - `lite-client` sends BOC files to the network ([`stage::submit`])
//!
//! [`pipeline::Pipeline`] sequences the stages for one top-level action, and
//! [`procs`] locates declared procedures and tests inside generated scripts.

pub mod artifacts;
pub mod config;
pub mod consts;
pub mod network;
pub mod pipeline;
pub mod platform;
pub mod process;
pub mod procs;
pub mod project;
pub mod retry;
pub mod stage;
pub mod util;
