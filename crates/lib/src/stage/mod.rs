//! The pipeline stages: compile (`func`), interpret (`fift`) and submit (`lite-client`).
//!
//! Each stage receives the [`Config`](crate::config::Config) explicitly and
//! reports failures through [`StageError`]. Stages never retry each other;
//! only the submit stage retries its own network call.

pub mod compile;
pub mod glue;
pub mod interpret;
pub mod submit;
mod types;

pub use types::{RunOptions, StageError};
