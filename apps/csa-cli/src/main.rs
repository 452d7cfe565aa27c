use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use csa_bootstrap::{
    BootstrapOutcome, BootstrapResult, SelectionMode, bootstrap, bootstrap_to_file,
    load_overrides, request_from_files, validate_topology_file,
};
use csa_templates::{PlantProfile, list_templates, select_template_for_plant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "csa")]
#[command(about = "CSA bootstrap - draft control system topologies from plant inputs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a draft topology from an equipment list and instrument database
    Bootstrap {
        /// Equipment list (QMD with YAML front matter, or YAML)
        equipment: PathBuf,
        /// Instrument database YAML
        instruments: PathBuf,
        /// Project name recorded in the topology metadata
        #[arg(long)]
        project: String,
        /// Architecture template name
        #[arg(long, default_value = "centralized")]
        template: String,
        /// Template version recorded on the outcome
        #[arg(long, default_value = "1.0")]
        template_version: String,
        /// strict: unknown template is an error; lenient: fall back to centralized
        #[arg(long, default_value = "lenient")]
        mode: SelectionMode,
        /// Override file (YAML, or JSON by extension)
        #[arg(long)]
        overrides: Option<PathBuf>,
        /// Write the topology YAML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the architecture template catalog
    Templates {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Recommend a template for a plant
    SelectTemplate {
        /// Total IO point count
        #[arg(long)]
        io: u32,
        /// Number of VFDs
        #[arg(long)]
        vfd: u32,
        /// Longest cable run in metres
        #[arg(long)]
        distance: u32,
        /// Plant has SIL-rated safety functions
        #[arg(long)]
        safety: bool,
        /// Plant includes vendor-controlled packages
        #[arg(long)]
        vendor_packages: bool,
    },
    /// Validate and lint a topology file
    Validate {
        /// Path to the topology YAML or JSON file
        path: PathBuf,
        /// Treat lint warnings as failures
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Bootstrap {
            equipment,
            instruments,
            project,
            template,
            template_version,
            mode,
            overrides,
            output,
            json,
        } => cmd_bootstrap(BootstrapArgs {
            equipment: &equipment,
            instruments: &instruments,
            project: &project,
            template,
            template_version,
            mode,
            overrides: overrides.as_deref(),
            output: output.as_deref(),
            json,
        }),
        Commands::Templates { json } => cmd_templates(json),
        Commands::SelectTemplate {
            io,
            vfd,
            distance,
            safety,
            vendor_packages,
        } => {
            cmd_select_template(PlantProfile {
                io_count: io,
                vfd_count: vfd,
                max_distance_m: distance,
                has_safety: safety,
                has_vendor_packages: vendor_packages,
            });
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { path, strict } => cmd_validate(&path, strict),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

struct BootstrapArgs<'a> {
    equipment: &'a Path,
    instruments: &'a Path,
    project: &'a str,
    template: String,
    template_version: String,
    mode: SelectionMode,
    overrides: Option<&'a Path>,
    output: Option<&'a Path>,
    json: bool,
}

fn cmd_bootstrap(args: BootstrapArgs<'_>) -> BootstrapResult<ExitCode> {
    let mut request = request_from_files(args.equipment, args.instruments, args.project)?
        .with_template(args.template)
        .with_template_version(args.template_version)
        .with_mode(args.mode);
    if let Some(path) = args.overrides {
        request = request.with_overrides(load_overrides(path)?);
        tracing::debug!(path = %path.display(), "overrides loaded");
    }

    let outcome = match args.output {
        Some(path) => bootstrap_to_file(&request, path)?,
        None => bootstrap(&request)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        if args.output.is_none() {
            print!("{}", outcome.topology_yaml);
        }
        print_review(&outcome);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_review(outcome: &BootstrapOutcome) {
    eprintln!(
        "✓ Topology drafted from '{}' ({} controller(s), {} device(s), {} link(s))",
        outcome.template_used,
        outcome.topology.controllers().len(),
        outcome.topology.devices().len(),
        outcome.topology.links().len()
    );
    if !outcome.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &outcome.warnings {
            eprintln!("  - {warning}");
        }
    }
    if !outcome.suggestions.is_empty() {
        eprintln!("Review:");
        for suggestion in &outcome.suggestions {
            eprintln!("  - {suggestion}");
        }
    }
    eprintln!("Fingerprint: {}", outcome.fingerprint);
}

fn cmd_templates(json: bool) -> BootstrapResult<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(list_templates())?);
        return Ok(ExitCode::SUCCESS);
    }
    println!("Architecture templates:");
    for template in list_templates() {
        println!("  {} (v{}) - {}", template.name, template.version, template.description);
        println!("      {}", template.use_case);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_select_template(profile: PlantProfile) {
    let name = select_template_for_plant(&profile);
    println!("{name}");
}

fn cmd_validate(path: &Path, strict: bool) -> BootstrapResult<ExitCode> {
    println!("Validating topology: {}", path.display());
    let (topology, report) = validate_topology_file(path)?;
    println!(
        "✓ '{}' is structurally valid: {}",
        topology.metadata().project_name,
        report.summary()
    );
    for warning in &report.warnings {
        println!("  ⚠ {warning}");
    }
    if report.passes(strict) {
        Ok(ExitCode::SUCCESS)
    } else {
        println!("✗ {} lint warning(s) in strict mode", report.warnings.len());
        Ok(ExitCode::FAILURE)
    }
}
