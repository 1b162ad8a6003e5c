use clap::{Parser, Subcommand};
use seerflow::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Inspect, validate, and repackage seerflow workflow files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a .seer.json bundle and print an import preview
    Inspect {
        /// Path to the workflow export file
        path: PathBuf,
    },
    /// Check a bundle's structure and every reference in its spec
    Validate {
        /// Path to the workflow export file
        path: PathBuf,
    },
    /// Wrap a bare WorkflowSpec JSON file into an export bundle
    Export {
        /// Path to the spec JSON file
        spec_path: PathBuf,
        /// Workflow name to record in the bundle
        #[arg(short, long)]
        name: String,
        /// Optional workflow description
        #[arg(short, long)]
        description: Option<String>,
        /// Where to write the bundle (defaults to <name>.seer.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Inspect { path } => inspect(&path),
        Command::Validate { path } => validate(&path),
        Command::Export {
            spec_path,
            name,
            description,
            out,
        } => export(&spec_path, &name, description.as_deref(), out),
    }
}

fn inspect(path: &PathBuf) {
    let preview = seerflow::bundle::parse_bundle_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Import rejected: {}", e)));

    println!("Workflow: {}", preview.name);
    if let Some(description) = &preview.description {
        println!("Description: {}", description);
    }
    println!("Nodes: {}", preview.node_count);
    println!("Triggers: {}", preview.trigger_count);
    if let Some(metadata) = &preview.bundle().metadata {
        println!("Exported at: {}", metadata.exported_at.to_rfc3339());
    }
}

fn validate(path: &PathBuf) {
    let preview = seerflow::bundle::parse_bundle_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Import rejected: {}", e)));

    match seerflow::spec::validate(&preview.bundle().workflow.spec) {
        Ok(()) => {
            let graph = spec_to_graph(&preview.bundle().workflow.spec);
            println!(
                "'{}' is valid: {} nodes, {} edges",
                preview.name,
                preview.node_count,
                graph.edges.len()
            );
        }
        Err(e) => exit_with_error(&format!("Spec validation failed: {}", e)),
    }
}

fn export(spec_path: &PathBuf, name: &str, description: Option<&str>, out: Option<PathBuf>) {
    let spec_json = fs::read_to_string(spec_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read spec file '{}': {}",
            spec_path.display(),
            e
        ))
    });
    let spec: WorkflowSpec = serde_json::from_str(&spec_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse spec JSON: {}", e)));

    let bundle = export_bundle(name, description, &spec, Vec::new());
    let out_path = out.unwrap_or_else(|| PathBuf::from(format!("{}.seer.json", name)));
    bundle
        .save(&out_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));
    println!("Wrote '{}'", out_path.display());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}
