//! Declaration generation for `prebuilt_apis` meta-modules.
//!
//! Each meta-module runs two passes over its directory:
//! 1. API files: one file group per `<ver>/<scope>/api/<module>.txt`, then one
//!    `<module>.api.<scope>.latest` group per `(module, scope)` in sorted order
//! 2. Stub jars: one import per `<ver>/<scope>/<module>.jar`
//!
//! Parsing is fanned out with rayon; registration stays sequential in glob
//! order so the generated graph does not depend on thread scheduling.

use crate::config::{BuildDescription, PrebuiltApisConfig};
use crate::error::{ArtifactKind, GenerateError, Result};
use crate::host::glob::under_dir;
use crate::host::{BuildHost, Diagnostic};
use crate::latest::LatestIndex;
use crate::model::{Declaration, FileGroupDecl, ImportDecl};
use crate::path::{API_FILE_GLOB, JAR_GLOB, ParseOutcome, parse_api_file_path, parse_jar_path};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Counts gathered while generating one meta-module.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub module: String,
    /// Jar paths matched by the jar glob
    pub jars: usize,
    pub imports: usize,
    /// Jars ignored because they do not follow the stub jar layout
    pub skipped_jars: usize,
    /// Paths matched by the api glob
    pub api_files: usize,
    pub filegroups: usize,
    /// Api paths reported as malformed
    pub rejected_api_files: usize,
    pub latest_aliases: usize,
}

impl GenerationReport {
    fn new(module: &str) -> Self {
        Self {
            module: module.to_string(),
            ..Self::default()
        }
    }

    pub fn declarations(&self) -> usize {
        self.imports + self.filegroups + self.latest_aliases
    }
}

/// Runs every enabled meta-module in description order.
///
/// Stops at the first module whose generation fails.
pub fn generate_all(
    host: &mut dyn BuildHost,
    description: &BuildDescription,
) -> Result<Vec<GenerationReport>> {
    description
        .enabled()
        .map(|config| generate_module(&mut *host, config))
        .collect()
}

pub fn generate_module(
    host: &mut dyn BuildHost,
    config: &PrebuiltApisConfig,
) -> Result<GenerationReport> {
    let mut report = GenerationReport::new(&config.name);

    prebuilt_api_files(host, config, &mut report)?;
    prebuilt_sdk_stubs(host, config, &mut report)?;

    info!(
        "Generated {} declarations for {}: {} imports, {} file groups, {} latest aliases ({} jars skipped, {} api files rejected)",
        report.declarations(),
        config.name,
        report.imports,
        report.filegroups,
        report.latest_aliases,
        report.skipped_jars,
        report.rejected_api_files
    );

    Ok(report)
}

fn prebuilt_api_files(
    host: &mut dyn BuildHost,
    config: &PrebuiltApisConfig,
    report: &mut GenerationReport,
) -> Result<()> {
    let files = glob_module_dir(host, config, ArtifactKind::ApiFile, API_FILE_GLOB)?;
    report.api_files = files.len();

    let outcomes: Vec<_> = files
        .par_iter()
        .map(|path| parse_api_file_path(path))
        .collect();

    let mut latest = LatestIndex::new();
    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            ParseOutcome::Parsed(api) => {
                let group = FileGroupDecl::new(
                    &api.module,
                    api.scope,
                    &api.version.to_string(),
                    &api.path,
                );
                debug!("Registering file group {}", group.name);
                host.register(Declaration::FileGroup(group))?;
                report.filegroups += 1;
                latest.observe(&api);
            }
            ParseOutcome::Invalid(err) => {
                host.report(Diagnostic::path_error(&config.name, path, &err));
                report.rejected_api_files += 1;
            }
            ParseOutcome::Skip => debug!("Skipping api file {}", path),
        }
    }

    for group in latest.into_filegroups() {
        debug!("Registering {} -> {}", group.name, group.srcs.join(", "));
        host.register(Declaration::FileGroup(group))?;
        report.latest_aliases += 1;
    }

    Ok(())
}

fn prebuilt_sdk_stubs(
    host: &mut dyn BuildHost,
    config: &PrebuiltApisConfig,
    report: &mut GenerationReport,
) -> Result<()> {
    let files = glob_module_dir(host, config, ArtifactKind::Jar, JAR_GLOB)?;
    report.jars = files.len();

    let outcomes: Vec<_> = files.par_iter().map(|path| parse_jar_path(path)).collect();

    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            ParseOutcome::Parsed(jar) => {
                let import = ImportDecl::for_jar(&jar);
                debug!("Registering import {}", import.name);
                host.register(Declaration::Import(import))?;
                report.imports += 1;
            }
            ParseOutcome::Skip => {
                debug!("Skipping jar {}: not a prebuilt stub jar", path);
                report.skipped_jars += 1;
            }
        }
    }

    Ok(())
}

/// Globs `pattern` under the module directory and returns the matches
/// relative to it. An empty match set is fatal.
fn glob_module_dir(
    host: &mut dyn BuildHost,
    config: &PrebuiltApisConfig,
    kind: ArtifactKind,
    pattern: &str,
) -> Result<Vec<String>> {
    let prefix = config.dir_prefix();
    let dir = if prefix.is_empty() {
        "./".to_string()
    } else {
        prefix.clone()
    };

    let files = match host.glob(&under_dir(&config.module_dir(), pattern)) {
        Ok(files) => files,
        Err(source) => return Err(fatal(host, config, GenerateError::Glob { kind, dir, source })),
    };

    if files.is_empty() {
        return Err(fatal(host, config, GenerateError::NoFiles { kind, dir }));
    }

    Ok(files
        .into_iter()
        .map(|f| {
            if f.starts_with(&prefix) {
                f[prefix.len()..].to_string()
            } else {
                f
            }
        })
        .collect())
}

fn fatal(host: &mut dyn BuildHost, config: &PrebuiltApisConfig, err: GenerateError) -> GenerateError {
    host.report(Diagnostic::module_error(&config.name, &err));
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use crate::host::MemoryBuildHost;

    fn sdk() -> PrebuiltApisConfig {
        PrebuiltApisConfig::new("sdk", "prebuilts/sdk")
    }

    fn names(host: &MemoryBuildHost) -> Vec<String> {
        host.graph().names().map(str::to_string).collect()
    }

    #[test]
    fn test_end_to_end() {
        let mut host = MemoryBuildHost::new([
            "prebuilts/sdk/0/public/foo.jar",
            "prebuilts/sdk/1/public/api/foo.txt",
            "prebuilts/sdk/3/public/api/foo.txt",
        ]);

        let report = generate_module(&mut host, &sdk()).unwrap();

        assert_eq!(
            names(&host),
            vec![
                "foo.api.public.1",
                "foo.api.public.3",
                "foo.api.public.latest",
                "sdk_public_0_foo",
            ]
        );

        let graph = host.graph();
        match graph.get("sdk_public_0_foo").unwrap() {
            Declaration::Import(import) => {
                assert_eq!(import.jars, vec!["0/public/foo.jar".to_string()]);
                assert_eq!(import.sdk_version, "current");
                assert!(!import.installable);
            }
            other => panic!("Expected import, got {:?}", other),
        }
        assert_eq!(
            graph.get("foo.api.public.latest").unwrap().sources(),
            ["3/public/api/foo.txt".to_string()]
        );

        assert_eq!(report.imports, 1);
        assert_eq!(report.filegroups, 2);
        assert_eq!(report.latest_aliases, 1);
        assert_eq!(report.declarations(), 4);
        assert!(host.diagnostics().is_empty());
    }

    #[test]
    fn test_latest_picks_numeric_maximum() {
        let mut host = MemoryBuildHost::new([
            "prebuilts/sdk/1/system/api/m.txt",
            "prebuilts/sdk/5/system/api/m.txt",
            "prebuilts/sdk/3/system/api/m.txt",
            "prebuilts/sdk/10/public/m.jar",
        ]);

        generate_module(&mut host, &sdk()).unwrap();

        assert_eq!(
            host.graph().get("m.api.system.latest").unwrap().sources(),
            ["5/system/api/m.txt".to_string()]
        );
    }

    #[test]
    fn test_latest_order_ignores_scan_order() {
        let forward = [
            "a/1/public/x.jar",
            "a/1/public/api/a.txt",
            "a/1/public/api/z.txt",
        ];
        let reversed = [
            "a/1/public/api/z.txt",
            "a/1/public/api/a.txt",
            "a/1/public/x.jar",
        ];
        let config = PrebuiltApisConfig::new("sdk", "a");

        for files in [forward, reversed] {
            let mut host = MemoryBuildHost::new(files);
            generate_module(&mut host, &config).unwrap();
            let latest: Vec<_> = names(&host)
                .into_iter()
                .filter(|n| n.ends_with(".latest"))
                .collect();
            assert_eq!(latest, vec!["a.api.public.latest", "z.api.public.latest"]);
        }
    }

    #[test]
    fn test_unknown_jar_scope_is_skipped_silently() {
        let mut host = MemoryBuildHost::new([
            "prebuilts/sdk/28/public/api/android.txt",
            "prebuilts/sdk/28/public/android.jar",
            "prebuilts/sdk/tools/lib/lint.jar",
        ]);

        let report = generate_module(&mut host, &sdk()).unwrap();

        assert_eq!(report.jars, 2);
        assert_eq!(report.imports, 1);
        assert_eq!(report.skipped_jars, 1);
        assert!(host.diagnostics().is_empty());
        assert!(!names(&host).iter().any(|n| n.contains("lint")));
    }

    #[test]
    fn test_jar_without_module_name_is_skipped() {
        let mut host = MemoryBuildHost::new([
            "s/28/public/.jar",
            "s/28/public/a.jar",
            "s/28/public/api/a.txt",
        ]);

        let report = generate_module(&mut host, &PrebuiltApisConfig::new("sdk", "s")).unwrap();

        assert_eq!(
            names(&host),
            vec!["a.api.public.28", "a.api.public.latest", "sdk_public_28_a"]
        );
        assert_eq!(report.skipped_jars, 1);
        assert!(host.diagnostics().is_empty());
    }

    #[test]
    fn test_module_dir_is_normalized() {
        let files = ["sdk/1/public/foo.jar", "sdk/1/public/api/foo.txt"];

        for dir in ["./sdk", "sdk/", "./sdk/", "sdk//"] {
            let mut host = MemoryBuildHost::new(files);
            generate_module(&mut host, &PrebuiltApisConfig::new("sdk", dir)).unwrap();
            assert_eq!(
                host.graph().get("sdk_public_1_foo").unwrap().sources(),
                ["1/public/foo.jar".to_string()]
            );
        }
    }

    #[test]
    fn test_invalid_api_files_are_reported_and_siblings_continue() {
        let mut host = MemoryBuildHost::new([
            "prebuilts/sdk/28/public/api/android.txt",
            "prebuilts/sdk/P/public/api/android.txt",
            "prebuilts/sdk/28/core/api/android.txt",
            "prebuilts/sdk/28/public/android.jar",
        ]);

        let report = generate_module(&mut host, &sdk()).unwrap();

        assert_eq!(report.api_files, 3);
        assert_eq!(report.filegroups, 1);
        assert_eq!(report.rejected_api_files, 2);
        assert_eq!(
            names(&host),
            vec![
                "android.api.public.28",
                "android.api.public.latest",
                "sdk_public_28_android",
            ]
        );

        let diagnostics = host.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].module, "sdk");
        assert_eq!(
            diagnostics[0].path.as_deref(),
            Some("P/public/api/android.txt")
        );
        assert_eq!(
            diagnostics[0].message,
            "invalid version \"P\" found in path: \"P/public/api/android.txt\""
        );
        assert_eq!(
            diagnostics[1].message,
            "invalid scope \"core\" found in path: \"28/core/api/android.txt\""
        );
    }

    #[test]
    fn test_no_jar_files_is_fatal() {
        let mut host = MemoryBuildHost::new(["prebuilts/sdk/28/public/api/android.txt"]);

        let err = generate_module(&mut host, &sdk()).unwrap_err();

        assert!(matches!(
            err,
            GenerateError::NoFiles {
                kind: ArtifactKind::Jar,
                ..
            }
        ));
        assert_eq!(err.to_string(), "no jar file found under \"prebuilts/sdk/\"");
        assert!(
            !host
                .graph()
                .declarations()
                .any(|d| matches!(d, Declaration::Import(_)))
        );
        assert_eq!(host.diagnostics().len(), 1);
        assert_eq!(host.diagnostics()[0].path, None);
    }

    #[test]
    fn test_no_api_files_is_fatal_and_stops_the_jar_pass() {
        let mut host = MemoryBuildHost::new(["prebuilts/sdk/28/public/android.jar"]);

        let err = generate_module(&mut host, &sdk()).unwrap_err();

        assert_eq!(err.to_string(), "no api file found under \"prebuilts/sdk/\"");
        assert!(host.graph().is_empty());
    }

    #[test]
    fn test_module_at_root() {
        let mut host = MemoryBuildHost::new(["28/public/android.jar", "28/public/api/android.txt"]);

        generate_module(&mut host, &PrebuiltApisConfig::new("sdk", "")).unwrap();

        assert_eq!(
            host.graph().get("sdk_public_28_android").unwrap().sources(),
            ["28/public/android.jar".to_string()]
        );
    }

    #[test]
    fn test_duplicate_names_fail_registration() {
        let mut host = MemoryBuildHost::new([
            "a/28/public/android.jar",
            "a/28/public/api/android.txt",
            "b/28/public/android.jar",
            "b/28/public/api/android.txt",
        ]);
        let description = BuildDescription {
            modules: vec![
                PrebuiltApisConfig::new("sdk_a", "a"),
                PrebuiltApisConfig::new("sdk_b", "b"),
            ],
        };

        let err = generate_all(&mut host, &description).unwrap_err();

        assert!(matches!(
            err,
            GenerateError::Registration(HostError::DuplicateName(name)) if name == "android.api.public.28"
        ));
    }

    #[test]
    fn test_generate_all_skips_disabled_modules() {
        let mut host = MemoryBuildHost::new([
            "a/28/public/android.jar",
            "a/28/public/api/android.txt",
        ]);
        let mut disabled = PrebuiltApisConfig::new("empty", "missing");
        disabled.enabled = false;
        let description = BuildDescription {
            modules: vec![disabled, PrebuiltApisConfig::new("sdk", "a")],
        };

        let reports = generate_all(&mut host, &description).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].module, "sdk");
    }
}
