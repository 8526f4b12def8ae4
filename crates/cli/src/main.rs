//! API Catalog CLI
//!
//! Command-line interface for compiling Smithy service models into the
//! catalog consumed by the API explorer.

use anyhow::{Context, Result};
use api_catalog_common::{Catalog, Operation, Resource};
use api_catalog_parser::{
    compile_catalog, compile_source, DirectorySource, FileListSource, SchemaSource, SmithyParser,
};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "api-catalog")]
#[command(version, about = "Compile Smithy service models into an API explorer catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile schema documents into a single catalog file
    #[command(after_help = "EXAMPLES:\n  \
        # Compile every model in a directory\n  \
        api-catalog compile --spec-dir ./models --output ./catalog.json\n\n  \
        # Compile selected models\n  \
        api-catalog compile --specs dynamodb.json,sqs.json\n\n  \
        # Filter services by name and print to stdout\n  \
        api-catalog compile --spec-dir ./models --filter s3,dynamodb --output -")]
    Compile {
        /// Comma-separated list of schema file paths
        #[arg(short, long, value_delimiter = ',', conflicts_with = "spec_dir")]
        specs: Option<Vec<PathBuf>>,

        /// Directory containing schema files (alternative to --specs)
        #[arg(long, conflicts_with = "specs")]
        spec_dir: Option<PathBuf>,

        /// Comma-separated list of service names to include (filters discovered specs)
        #[arg(long, value_delimiter = ',')]
        filter: Option<Vec<String>>,

        /// Output file, or "-" for stdout
        #[arg(short, long, default_value = "./catalog.json")]
        output: PathBuf,

        /// Write single-line JSON instead of pretty-printed output
        #[arg(long)]
        compact: bool,
    },

    /// Compile one schema document and display its service tree
    #[command(after_help = "EXAMPLES:\n  \
        # Show services and resources\n  \
        api-catalog inspect --spec dynamodb.json\n\n  \
        # Include operations and their ids\n  \
        api-catalog inspect --spec dynamodb.json --operations")]
    Inspect {
        /// Path to the schema file
        #[arg(short, long)]
        spec: PathBuf,

        /// List operations under each service and resource
        #[arg(long)]
        operations: bool,
    },
}

/// Options for the compile command
struct CompileConfig<'a> {
    spec_paths: Option<&'a [PathBuf]>,
    spec_dir: Option<&'a Path>,
    filter: Option<&'a [String]>,
    output: &'a Path,
    compact: bool,
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        eprintln!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Compile {
            specs,
            spec_dir,
            filter,
            output,
            compact,
        } => {
            compile_command(CompileConfig {
                spec_paths: specs.as_deref(),
                spec_dir: spec_dir.as_deref(),
                filter: filter.as_deref(),
                output: output.as_path(),
                compact,
                verbose: cli.verbose,
            })?;
        }
        Commands::Inspect { spec, operations } => {
            inspect_command(spec.as_path(), operations, cli.verbose)?;
        }
    }

    Ok(())
}

fn compile_command(config: CompileConfig) -> Result<()> {
    let source: Box<dyn SchemaSource> = if let Some(dir) = config.spec_dir {
        eprintln!(
            "{} Scanning directory for specs: {}",
            "→".cyan(),
            dir.display()
        );
        let mut source = DirectorySource::new(dir);
        if let Some(filter) = config.filter {
            source = source.with_filter(filter.to_vec());
        }

        let discovered = source
            .discover()
            .with_context(|| format!("Failed to scan {}", dir.display()))?;
        if config.verbose {
            for path in &discovered {
                eprintln!("  Found: {}", path.display());
            }
        }
        eprintln!("{} Discovered {} spec files", "✓".green(), discovered.len());
        if discovered.is_empty() {
            anyhow::bail!("No spec files found");
        }

        Box::new(FileListSource::new(discovered))
    } else if let Some(paths) = config.spec_paths {
        if config.filter.is_some() {
            eprintln!(
                "{} --filter only applies to --spec-dir, ignoring it",
                "⚠".yellow()
            );
        }
        Box::new(FileListSource::new(paths.to_vec()))
    } else {
        anyhow::bail!("Either --specs or --spec-dir must be provided");
    };

    eprintln!("{} Compiling service models...", "→".cyan());
    let catalog = compile_source(&*source).context("Failed to compile catalog")?;

    if config.verbose {
        for service in &catalog.services {
            eprintln!(
                "  {} ({}): {} resources, {} operations",
                service.name.yellow(),
                service.short_name,
                service.resources.len(),
                service.operations.len()
            );
        }
    }

    eprintln!(
        "{} Total: {} services, {} resources, {} operations",
        "✓".green().bold(),
        catalog.services.len(),
        catalog.resource_count(),
        catalog.operation_count()
    );

    write_catalog(&catalog, config.output, !config.compact)?;

    if config.output != Path::new("-") {
        eprintln!("\n{}", "✓ Compilation complete!".green().bold());
        eprintln!("  📄 {}", config.output.display());
    }

    Ok(())
}

fn write_catalog(catalog: &Catalog, output: &Path, pretty: bool) -> Result<()> {
    let mut json = catalog
        .to_json(pretty)
        .context("Failed to serialize catalog")?;
    json.push('\n');

    if output == Path::new("-") {
        std::io::stdout()
            .write_all(json.as_bytes())
            .context("Failed to write catalog to stdout")?;
        return Ok(());
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(())
}

fn inspect_command(spec_path: &Path, show_operations: bool, verbose: bool) -> Result<()> {
    println!("{} Parsing spec file: {}", "→".cyan(), spec_path.display());

    let parser = SmithyParser::from_file(spec_path).context("Failed to load Smithy spec")?;
    if verbose {
        println!("  Short name: {}", parser.short_name());
        println!("  Shapes: {}", parser.model().shapes.len());
    }

    let catalog =
        compile_catalog(&[parser.into_schema_file()]).context("Failed to compile Smithy spec")?;

    println!("\n{}", "✓ Parse successful!".green().bold());
    for service in &catalog.services {
        println!("\n{}", "Service:".bold());
        println!("  Name: {}", service.name.yellow());
        println!("  Node: {}", service.node_id);
        if let Some(class_name) = &service.class_name {
            println!("  SDK id: {}", class_name.yellow());
        }
        println!("  Resources: {}", service.resources.len());
        println!("  Operations: {}", service.operations.len());

        if show_operations {
            print_operations(&service.operations, 1);
        }
        for resource in &service.resources {
            print_resource(resource, 1, show_operations);
        }
    }

    Ok(())
}

fn print_resource(resource: &Resource, depth: usize, show_operations: bool) {
    let indent = "  ".repeat(depth);
    println!(
        "{}• {} ({})",
        indent,
        resource.name.cyan(),
        resource.node_id
    );
    if show_operations {
        print_operations(&resource.operations, depth + 1);
    }
    for child in &resource.resources {
        print_resource(child, depth + 1, show_operations);
    }
}

fn print_operations(operations: &[Operation], depth: usize) {
    let indent = "  ".repeat(depth);
    for operation in operations {
        println!(
            "{}- {} [{}]",
            indent,
            operation.method_name,
            operation.operation_id.dimmed()
        );
    }
}
