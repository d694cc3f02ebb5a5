use crate::Target;
use prebuilt_apis_core::{FsBuildHost, generate_all};
use tracing::info;

pub fn run(target: Target) -> Result<(), Box<dyn std::error::Error>> {
    let description = target.description()?;
    let mut host = FsBuildHost::new(&target.root);

    let outcome = generate_all(&mut host, &description);
    let (graph, diagnostics) = host.into_parts();

    for diagnostic in &diagnostics {
        match &diagnostic.path {
            Some(path) => println!("{}: {}", path, diagnostic),
            None => println!("{}", diagnostic),
        }
    }

    let reports = outcome?;
    if !diagnostics.is_empty() {
        return Err(format!("{} problem(s) found", diagnostics.len()).into());
    }

    for report in &reports {
        println!(
            "{}: {} imports, {} file groups, {} latest aliases ({} jars skipped)",
            report.module,
            report.imports,
            report.filegroups,
            report.latest_aliases,
            report.skipped_jars
        );
    }
    info!("Checked {} declarations", graph.len());
    Ok(())
}
