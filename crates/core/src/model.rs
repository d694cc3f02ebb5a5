//! Identities parsed out of artifact paths and the declarations generated
//! from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compatibility tag carried by every generated import.
// TODO: derive this from the import's scope once the sdk_version migration lands.
pub const PLACEHOLDER_SDK_VERSION: &str = "current";

/// Literal version token used for the per-key alias file groups.
pub const LATEST: &str = "latest";

/// Visibility tier of a prebuilt API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Public,
    System,
    Test,
    /// Only valid for stub jars.
    Core,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Public => "public",
            Scope::System => "system",
            Scope::Test => "test",
            Scope::Core => "core",
        }
    }

    /// Scopes accepted in `<version>/<scope>/<module>.jar`.
    pub fn from_jar_segment(segment: &str) -> Option<Self> {
        match segment {
            "public" => Some(Scope::Public),
            "system" => Some(Scope::System),
            "test" => Some(Scope::Test),
            "core" => Some(Scope::Core),
            _ => None,
        }
    }

    /// Scopes accepted in `<version>/<scope>/api/<module>.txt`.
    pub fn from_api_segment(segment: &str) -> Option<Self> {
        match Self::from_jar_segment(segment) {
            Some(Scope::Core) | None => None,
            scope => scope,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stub jar found at `<version>/<scope>/<module>.jar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarIdentity {
    pub module: String,
    /// Opaque; only echoed into the import name.
    pub version: String,
    pub scope: Scope,
    pub path: String,
}

impl JarIdentity {
    pub fn import_name(&self) -> String {
        import_name(&self.module, self.scope, &self.version)
    }
}

/// An API signature file found at `<version>/<scope>/api/<module>.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFileIdentity {
    pub module: String,
    pub version: u64,
    pub scope: Scope,
    pub path: String,
}

impl ApiFileIdentity {
    pub fn filegroup_name(&self) -> String {
        filegroup_name(&self.module, self.scope, &self.version.to_string())
    }

    /// Key under which the latest version of this file is tracked.
    pub fn latest_key(&self) -> String {
        format!("{}.{}", self.module, self.scope)
    }
}

pub fn import_name(module: &str, scope: Scope, version: &str) -> String {
    format!("sdk_{scope}_{version}_{module}")
}

pub fn filegroup_name(module: &str, scope: Scope, version: &str) -> String {
    format!("{module}.api.{scope}.{version}")
}

/// A build-graph node synthesized from one artifact path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Declaration {
    Import(ImportDecl),
    FileGroup(FileGroupDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Import(d) => &d.name,
            Declaration::FileGroup(d) => &d.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Import(_) => "java_import",
            Declaration::FileGroup(_) => "filegroup",
        }
    }

    /// Paths referenced by this declaration.
    pub fn sources(&self) -> &[String] {
        match self {
            Declaration::Import(d) => &d.jars,
            Declaration::FileGroup(d) => &d.srcs,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub name: String,
    pub jars: Vec<String>,
    pub sdk_version: String,
    pub installable: bool,
}

impl ImportDecl {
    pub fn for_jar(jar: &JarIdentity) -> Self {
        Self {
            name: jar.import_name(),
            jars: vec![jar.path.clone()],
            sdk_version: PLACEHOLDER_SDK_VERSION.to_string(),
            installable: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileGroupDecl {
    pub name: String,
    pub srcs: Vec<String>,
}

impl FileGroupDecl {
    pub fn new(module: &str, scope: Scope, version: &str, path: &str) -> Self {
        Self {
            name: filegroup_name(module, scope, version),
            srcs: vec![path.to_string()],
        }
    }
}
