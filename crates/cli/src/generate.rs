use crate::{OutputFormat, Target};
use prebuilt_apis_core::model::Declaration;
use prebuilt_apis_core::{FsBuildHost, generate_all};
use tabled::{Table, Tabled};
use tracing::{error, info};

#[derive(Tabled)]
struct DeclarationRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Sources")]
    sources: String,
}

impl From<&Declaration> for DeclarationRow {
    fn from(declaration: &Declaration) -> Self {
        Self {
            name: declaration.name().to_string(),
            kind: declaration.kind(),
            sources: declaration.sources().join(", "),
        }
    }
}

pub fn run(target: Target, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let description = target.description()?;
    let mut host = FsBuildHost::new(&target.root);

    info!("Generating prebuilt APIs under {}...", target.root.display());
    if let Err(e) = generate_all(&mut host, &description) {
        error!("Generation failed: {}", e);
        return Err(e.into());
    }

    let declarations: Vec<&Declaration> = host.graph().declarations().collect();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&declarations)?),
        OutputFormat::Table => {
            let rows: Vec<DeclarationRow> = declarations.into_iter().map(Into::into).collect();
            println!("{}", Table::new(rows));
        }
    }

    for diagnostic in host.diagnostics() {
        eprintln!("warning: {}", diagnostic);
    }

    Ok(())
}
