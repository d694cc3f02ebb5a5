//! Generates build declarations for prebuilt API directories.
//!
//! A `prebuilt_apis` directory holds stub jars and API signature files:
//!
//! ```text
//! <dir>/<version>/<scope>/<module>.jar          -> sdk_<scope>_<version>_<module>
//! <dir>/<version>/<scope>/api/<module>.txt      -> <module>.api.<scope>.<version>
//!                                                  <module>.api.<scope>.latest
//! ```

pub mod config;
pub mod error;
pub mod generate;
pub mod host;
pub mod latest;
pub mod logging;
pub mod model;
pub mod path;

pub use config::{BuildDescription, PrebuiltApisConfig};
pub use error::Result;
pub use generate::{GenerationReport, generate_all, generate_module};
pub use host::{BuildGraph, BuildHost, Diagnostic, FsBuildHost, MemoryBuildHost};
