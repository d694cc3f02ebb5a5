use crate::model::{ApiFileIdentity, FileGroupDecl, LATEST};
use std::collections::BTreeMap;

/// Tracks the highest API version seen per `(module, scope)`.
///
/// Keys are the composite string `module.scope`, so iteration follows the
/// byte order of that string.
#[derive(Debug, Default)]
pub struct LatestIndex {
    entries: BTreeMap<String, ApiFileIdentity>,
}

impl LatestIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `api`, keeping the existing entry unless `api` is strictly newer.
    pub fn observe(&mut self, api: &ApiFileIdentity) {
        let key = api.latest_key();
        match self.entries.get_mut(&key) {
            Some(current) if api.version > current.version => *current = api.clone(),
            Some(_) => {}
            None => {
                self.entries.insert(key, api.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ApiFileIdentity> {
        self.entries.get(key)
    }

    /// Consumes the index, yielding one `latest` file group per key in
    /// sorted key order.
    pub fn into_filegroups(self) -> impl Iterator<Item = FileGroupDecl> {
        self.entries
            .into_values()
            .map(|api| FileGroupDecl::new(&api.module, api.scope, LATEST, &api.path))
    }
}

impl<'a> FromIterator<&'a ApiFileIdentity> for LatestIndex {
    fn from_iter<I: IntoIterator<Item = &'a ApiFileIdentity>>(iter: I) -> Self {
        let mut index = LatestIndex::new();
        for api in iter {
            index.observe(api);
        }
        index
    }
}
