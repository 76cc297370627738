//! Pipeline lifecycle phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named point in the host pipeline where registered handlers run
/// against a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    OnLoad,
    PostRender,
    PreWrite,
    PostWrite,
}

impl Phase {
    /// Host-facing name of the phase, matching the hook method it maps to.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::OnLoad => "onLoad",
            Phase::PostRender => "postRender",
            Phase::PreWrite => "preWrite",
            Phase::PostWrite => "postWrite",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(Phase::OnLoad.as_str(), "onLoad");
        assert_eq!(Phase::PreWrite.as_str(), "preWrite");
    }

    #[test]
    fn test_display_matches_hook_name() {
        assert_eq!(Phase::PostRender.to_string(), "postRender");
    }
}
