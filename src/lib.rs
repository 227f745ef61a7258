// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod classify;
pub mod columns;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod file;
pub mod normalize;
pub mod progress;
pub mod question;
pub mod reclean;
pub mod report;
pub mod runner;
pub mod sample;
pub mod source;
pub mod validate;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
pub use question::{ChallengeType, QuestionRecord};
