//! Sitemill Core - Fundamental types
//!
//! This crate provides the core types used throughout sitemill:
//! - `File`: the unit of work flowing through the pipeline
//! - `JsonView`: explicit lazily-parsed accessor over a file's JSON content
//! - `SharedData`: injected process-wide data cache
//! - `Phase`: the lifecycle points a host pipeline exposes
//! - `MiddlewareError`: structured errors shared across the workspace

mod error;
mod file;
mod json_view;
mod phase;
mod shared;

pub use error::MiddlewareError;
pub use file::File;
pub use json_view::{JsonView, ParseHook};
pub use phase::Phase;
pub use shared::SharedData;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{File, JsonView, MiddlewareError, Phase, SharedData};
}
