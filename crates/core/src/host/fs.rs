//! Filesystem-backed build host.
//!
//! Globs are answered by walking, with `walkdir`, only the directory named by
//! the pattern's literal prefix, bounded to the depth of the pattern, so a
//! prebuilt tree is never walked deeper than the directory convention
//! requires. Symlinks are followed; prebuilt trees often link their jars in.

use super::glob::PathPattern;
use super::{BuildGraph, BuildHost, Diagnostic};
use crate::error::HostError;
use crate::model::Declaration;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use walkdir::WalkDir;

pub struct FsBuildHost {
    root: PathBuf,
    graph: BuildGraph,
    diagnostics: Vec<Diagnostic>,
}

impl FsBuildHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            graph: BuildGraph::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn graph(&self) -> &BuildGraph {
        &self.graph
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (BuildGraph, Vec<Diagnostic>) {
        (self.graph, self.diagnostics)
    }

    /// `path` relative to the root, `/`-separated.
    fn relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let segments: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        Some(segments.join("/"))
    }
}

impl BuildHost for FsBuildHost {
    fn glob(&self, pattern: &str) -> Result<Vec<String>, HostError> {
        let pattern = PathPattern::new(pattern)?;

        // Only the part of the tree the pattern can reach is walked.
        let base = pattern
            .base()
            .iter()
            .fold(self.root.clone(), |dir, segment| dir.join(segment));
        if !pattern.base().is_empty() && !base.is_dir() {
            return Ok(Vec::new());
        }
        let depth = pattern.depth() - pattern.base().len();

        let mut matches = Vec::new();
        for entry in WalkDir::new(&base)
            .follow_links(true)
            .min_depth(depth)
            .max_depth(depth)
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(relative) = self.relative(entry.path()) {
                if pattern.is_match(&relative) {
                    matches.push(relative);
                }
            }
        }

        // Directory iteration order is platform dependent.
        matches.sort();
        debug!(
            "Globbed {} paths under {}",
            matches.len(),
            self.root.display()
        );
        Ok(matches)
    }

    fn register(&mut self, declaration: Declaration) -> Result<(), HostError> {
        self.graph.insert(declaration)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        error!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}
