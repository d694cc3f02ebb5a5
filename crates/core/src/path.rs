//! Path grammars of a prebuilt API directory.
//!
//! ```text
//! <version>/<scope>/<module>.jar
//! <version>/<scope>/api/<module>.txt
//! ```
//!
//! Both parsers take a `/`-separated path relative to the module directory.

use crate::error::PathError;
use crate::model::{ApiFileIdentity, JarIdentity, Scope};
use std::convert::Infallible;

/// Glob selecting stub jars under a module directory.
pub const JAR_GLOB: &str = "*/*/*.jar";

/// Glob selecting API signature files under a module directory.
pub const API_FILE_GLOB: &str = "*/*/api/*.txt";

/// Result of matching one path against a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<T, E = PathError> {
    Parsed(T),
    /// The path is not ours; ignore it without reporting.
    Skip,
    /// The path is ours but malformed; report it.
    Invalid(E),
}

impl<T, E> ParseOutcome<T, E> {
    pub fn parsed(self) -> Option<T> {
        match self {
            ParseOutcome::Parsed(value) => Some(value),
            _ => None,
        }
    }
}

/// Parses `<version>/<scope>/<module>.jar`.
///
/// Unknown scopes are skipped rather than rejected, since unrelated jars are
/// allowed to live in the same tree. A jar can never be `Invalid`.
pub fn parse_jar_path(path: &str) -> ParseOutcome<JarIdentity, Infallible> {
    let [version, scope, file] = match split_segments::<3>(path) {
        Some(segments) => segments,
        None => return ParseOutcome::Skip,
    };

    let Some(scope) = Scope::from_jar_segment(scope) else {
        return ParseOutcome::Skip;
    };

    let module = file.strip_suffix(".jar").unwrap_or(file);
    if module.is_empty() {
        return ParseOutcome::Skip;
    }

    ParseOutcome::Parsed(JarIdentity {
        module: module.to_string(),
        version: version.to_string(),
        scope,
        path: path.to_string(),
    })
}

/// Parses `<version>/<scope>/api/<module>.txt`.
///
/// Every path under the api glob is expected to conform, so violations are
/// `Invalid` rather than `Skip`.
pub fn parse_api_file_path(path: &str) -> ParseOutcome<ApiFileIdentity> {
    // The third segment is the literal "api" guaranteed by the glob.
    let [version, scope, _, file] = match split_segments::<4>(path) {
        Some(segments) => segments,
        None => return ParseOutcome::Invalid(PathError::Malformed(path.to_string())),
    };

    let Ok(version_num) = version.parse::<u64>() else {
        return ParseOutcome::Invalid(PathError::InvalidVersion {
            version: version.to_string(),
            path: path.to_string(),
        });
    };

    let Some(scope_kind) = Scope::from_api_segment(scope) else {
        return ParseOutcome::Invalid(PathError::InvalidScope {
            scope: scope.to_string(),
            path: path.to_string(),
        });
    };

    ParseOutcome::Parsed(ApiFileIdentity {
        module: file.strip_suffix(".txt").unwrap_or(file).to_string(),
        version: version_num,
        scope: scope_kind,
        path: path.to_string(),
    })
}

fn split_segments<const N: usize>(path: &str) -> Option<[&str; N]> {
    let segments: Vec<&str> = path.split('/').collect();
    segments.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jar_path() {
        let jar = parse_jar_path("28/public/android.jar").parsed().unwrap();
        assert_eq!(jar.module, "android");
        assert_eq!(jar.version, "28");
        assert_eq!(jar.scope, Scope::Public);
        assert_eq!(jar.path, "28/public/android.jar");
    }

    #[test]
    fn test_parse_jar_path_accepts_core_and_opaque_versions() {
        let jar = parse_jar_path("current/core/core-oj.jar").parsed().unwrap();
        assert_eq!(jar.module, "core-oj");
        assert_eq!(jar.version, "current");
        assert_eq!(jar.scope, Scope::Core);
    }

    #[test]
    fn test_parse_jar_path_skips_unknown_scope() {
        assert_eq!(parse_jar_path("28/tools/lint.jar"), ParseOutcome::Skip);
        assert_eq!(parse_jar_path("28/Public/android.jar"), ParseOutcome::Skip);
        assert_eq!(parse_jar_path("28/public/extra/android.jar"), ParseOutcome::Skip);
    }

    #[test]
    fn test_parse_jar_path_skips_empty_module_name() {
        assert_eq!(parse_jar_path("28/public/.jar"), ParseOutcome::Skip);
    }

    #[test]
    fn test_parse_api_file_path() {
        let api = parse_api_file_path("28/system/api/android.txt")
            .parsed()
            .unwrap();
        assert_eq!(api.module, "android");
        assert_eq!(api.version, 28);
        assert_eq!(api.scope, Scope::System);
        assert_eq!(api.path, "28/system/api/android.txt");
    }

    #[test]
    fn test_parse_api_file_path_rejects_non_integer_version() {
        let outcome = parse_api_file_path("P/public/api/android.txt");
        assert_eq!(
            outcome,
            ParseOutcome::Invalid(PathError::InvalidVersion {
                version: "P".to_string(),
                path: "P/public/api/android.txt".to_string(),
            })
        );
        assert!(matches!(
            parse_api_file_path("-1/public/api/android.txt"),
            ParseOutcome::Invalid(PathError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_parse_api_file_path_rejects_core_scope() {
        let outcome = parse_api_file_path("28/core/api/android.txt");
        assert_eq!(
            outcome,
            ParseOutcome::Invalid(PathError::InvalidScope {
                scope: "core".to_string(),
                path: "28/core/api/android.txt".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_api_file_path_checks_version_before_scope() {
        assert!(matches!(
            parse_api_file_path("x/bogus/api/android.txt"),
            ParseOutcome::Invalid(PathError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_parse_api_file_path_rejects_wrong_depth() {
        assert_eq!(
            parse_api_file_path("28/public/android.txt"),
            ParseOutcome::Invalid(PathError::Malformed("28/public/android.txt".to_string()))
        );
    }
}
