//! Sitemill Pipeline
//!
//! Provides the capability interface a host pipeline must implement
//! (`HookRegistry`) and a reference `Pipeline` host used by tests and by
//! embedders that do not bring their own. Hosts sequence handlers across
//! phases and files; handlers themselves run to completion synchronously.

mod registry;

pub use registry::{Handler, HookRegistry, Pipeline};

/// Re-export core types for host authors
pub mod prelude {
    pub use crate::{Handler, HookRegistry, Pipeline};
    pub use sitemill_core::prelude::*;
}
