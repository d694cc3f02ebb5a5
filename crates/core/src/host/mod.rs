//! Build-host collaborator.
//!
//! Generation never touches the filesystem or a build graph directly. It asks
//! a [`BuildHost`] to glob for artifacts, to register declarations, and to
//! surface diagnostics:
//!
//! ```text
//! ┌──────────────────┐  glob(pattern)   ┌───────────────────────┐
//! │  generate_module │ ───────────────▶ │  BuildHost            │
//! │  (parse, reduce) │  register(decl)  │  (FsBuildHost,        │
//! │                  │ ───────────────▶ │   MemoryBuildHost)    │
//! └──────────────────┘  report(diag)    └───────────────────────┘
//! ```

pub mod fs;
pub mod glob;
pub mod graph;
pub mod memory;

pub use fs::FsBuildHost;
pub use graph::BuildGraph;
pub use memory::MemoryBuildHost;

use crate::error::HostError;
use crate::model::Declaration;
use serde::Serialize;
use std::fmt;

pub trait BuildHost {
    /// All paths relative to the host root that match `pattern`.
    ///
    /// `*` never crosses a `/`. No match is `Ok(vec![])`.
    fn glob(&self, pattern: &str) -> Result<Vec<String>, HostError>;

    /// Inserts a node keyed by its name. Fails on duplicate names.
    fn register(&mut self, declaration: Declaration) -> Result<(), HostError>;

    /// Surfaces an error attributed to a meta-module.
    fn report(&mut self, diagnostic: Diagnostic);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Name of the meta-module the error is attributed to.
    pub module: String,
    /// Offending artifact path, if the error concerns a single path.
    pub path: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn module_error(module: &str, message: impl fmt::Display) -> Self {
        Self {
            module: module.to_string(),
            path: None,
            message: message.to_string(),
        }
    }

    pub fn path_error(module: &str, path: &str, message: impl fmt::Display) -> Self {
        Self {
            module: module.to_string(),
            path: Some(path.to_string()),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module {:?}: {}", self.module, self.message)
    }
}
