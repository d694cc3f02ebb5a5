use thiserror::Error;

/// A single artifact path that violates the api-file grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid version {version:?} found in path: {path:?}")]
    InvalidVersion { version: String, path: String },
    #[error("invalid scope {scope:?} found in path: {path:?}")]
    InvalidScope { scope: String, path: String },
    #[error("malformed api file path: {0:?}")]
    Malformed(String),
}

/// Failures raised by a [`BuildHost`](crate::host::BuildHost).
#[derive(Error, Debug)]
pub enum HostError {
    #[error("invalid glob pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("module {0:?} already exists")]
    DuplicateName(String),
}

/// Errors that abort generation for a whole meta-module.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("failed to glob {kind} files under {dir:?}: {source}")]
    Glob {
        kind: ArtifactKind,
        dir: String,
        #[source]
        source: HostError,
    },
    #[error("no {} file found under {dir:?}", .kind.singular())]
    NoFiles { kind: ArtifactKind, dir: String },
    #[error("failed to register declaration: {0}")]
    Registration(#[from] HostError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate prebuilt_apis module name: {0:?}")]
    DuplicateModule(String),
}

/// Which of the two artifact globs an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Jar,
    ApiFile,
}

impl ArtifactKind {
    fn singular(self) -> &'static str {
        match self {
            ArtifactKind::Jar => "jar",
            ArtifactKind::ApiFile => "api",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Jar => f.write_str("jar"),
            ArtifactKind::ApiFile => f.write_str("api txt"),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
