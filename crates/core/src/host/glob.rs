use crate::error::HostError;
use globset::{GlobBuilder, GlobMatcher};

/// A compiled path pattern in which `*` matches within a single segment.
#[derive(Debug, Clone)]
pub struct PathPattern {
    matcher: GlobMatcher,
    depth: usize,
    base: Vec<String>,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Result<Self, HostError> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| HostError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;

        let segments: Vec<&str> = pattern.split('/').collect();
        let dirs = &segments[..segments.len() - 1];
        let base = dirs
            .iter()
            .take_while(|segment| !segment.contains(['*', '?', '[', '{']))
            .map(|segment| segment.to_string())
            .collect();

        Ok(Self {
            matcher: glob.compile_matcher(),
            depth: segments.len(),
            base,
        })
    }

    /// Leading directory segments free of wildcards. Every match lies below
    /// them.
    pub fn base(&self) -> &[String] {
        &self.base
    }

    /// Number of path segments a match has. Patterns here never use `**`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

/// Joins a module directory and a pattern relative to it.
pub fn under_dir(dir: &str, pattern: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        pattern.to_string()
    } else {
        format!("{dir}/{pattern}")
    }
}
