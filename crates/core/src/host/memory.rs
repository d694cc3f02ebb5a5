use super::glob::PathPattern;
use super::{BuildGraph, BuildHost, Diagnostic};
use crate::error::HostError;
use crate::model::Declaration;

/// Build host over a fixed list of file paths.
///
/// `glob` answers in the order the files were given, which lets callers
/// reproduce any filesystem scan order.
#[derive(Debug, Default)]
pub struct MemoryBuildHost {
    files: Vec<String>,
    graph: BuildGraph,
    diagnostics: Vec<Diagnostic>,
}

impl MemoryBuildHost {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn graph(&self) -> &BuildGraph {
        &self.graph
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl BuildHost for MemoryBuildHost {
    fn glob(&self, pattern: &str) -> Result<Vec<String>, HostError> {
        let pattern = PathPattern::new(pattern)?;
        Ok(self
            .files
            .iter()
            .filter(|f| pattern.is_match(f))
            .cloned()
            .collect())
    }

    fn register(&mut self, declaration: Declaration) -> Result<(), HostError> {
        self.graph.insert(declaration)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
