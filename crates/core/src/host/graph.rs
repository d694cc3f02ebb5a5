//! In-memory build graph keyed by declaration name.

use crate::error::HostError;
use crate::model::Declaration;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

/// Declarations in registration order; names are unique.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BuildGraph {
    nodes: IndexMap<String, Declaration>,
}

impl BuildGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, declaration: Declaration) -> Result<(), HostError> {
        match self.nodes.entry(declaration.name().to_string()) {
            Entry::Occupied(entry) => Err(HostError::DuplicateName(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(declaration);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.nodes.values()
    }
}
