//! Quill CLI - render, validate and preview node trees

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use quill::catalog::{NodeValidator, Severity};
use quill::dashboard::{Dashboard, SharedDashboard};
use quill::error::{FixSuggestion, QuillError, Result};
use quill::node::{parse_forest, ActionLog, Node};
use quill::tui::PreviewSource;
use quill::{bootstrap, QuillConfig, Renderer};

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Quill - declarative node renderer for the article dashboard")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./quill.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a node file (JSON or YAML, one node or a list)
    Render {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = RenderFormat::Text)]
        format: RenderFormat,
    },

    /// Check a node file against the catalog
    Validate { file: PathBuf },

    /// Print the merged catalog
    Catalog {
        #[arg(short, long, value_enum, default_value_t = CatalogFormat::Table)]
        format: CatalogFormat,
    },

    /// Compare catalog types with registered components
    Coverage,

    /// Render the sample dashboard
    Demo {
        #[arg(short, long, value_enum, default_value_t = RenderFormat::Text)]
        format: RenderFormat,
    },

    /// Interactive terminal preview (sample dashboard when no file is given)
    Preview { file: Option<PathBuf> },
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderFormat {
    Html,
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum CatalogFormat {
    Table,
    Json,
    Yaml,
}

fn main() {
    let cli = Cli::parse();

    let config = QuillConfig::load(cli.config.as_deref()).and_then(QuillConfig::with_env);
    init_tracing(cli.verbose, config.as_ref().ok().and_then(|c| c.log.as_deref()));

    let result = config.and_then(|config| run(cli.command, &config));

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins, then `QUILL_LOG`, then the config file, then `warn`
fn init_tracing(verbose: bool, configured: Option<&str>) {
    let directive = if verbose {
        "quill=debug".to_string()
    } else {
        std::env::var("QUILL_LOG")
            .ok()
            .or_else(|| configured.map(str::to_string))
            .unwrap_or_else(|| "warn".to_string())
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: &QuillConfig) -> Result<()> {
    let renderer = bootstrap(config)?;
    match command {
        Commands::Render { file, format } => {
            let nodes = read_nodes(&file)?;
            if config.dev_mode {
                report_issues(&renderer, &nodes)?;
            }
            print_render(&renderer, &nodes, format);
            Ok(())
        }
        Commands::Validate { file } => validate(&renderer, &file),
        Commands::Catalog { format } => print_catalog(&renderer, format),
        Commands::Coverage => coverage(&renderer),
        Commands::Demo { format } => {
            let tree = Dashboard::sample().tree();
            print_render(&renderer, &[tree], format);
            Ok(())
        }
        Commands::Preview { file } => {
            let source = match file {
                Some(file) => PreviewSource::Nodes(read_nodes(&file)?),
                None => PreviewSource::Dashboard(SharedDashboard::new(Dashboard::sample())),
            };
            quill::tui::run(renderer, source)
        }
    }
}

fn read_nodes(file: &Path) -> Result<Vec<Node>> {
    if !file.exists() {
        return Err(QuillError::NodeFileNotFound {
            path: file.to_path_buf(),
        });
    }
    let content = fs::read_to_string(file)?;
    parse_forest(&content)
}

fn print_render(renderer: &Renderer, nodes: &[Node], format: RenderFormat) {
    // Nothing handles actions outside the preview; the log just absorbs them
    let output = renderer.render(nodes, ActionLog::new().handler());
    match format {
        RenderFormat::Html => println!("{}", output.to_html()),
        RenderFormat::Text => println!("{}", output.to_plain_text()),
        RenderFormat::Json => match serde_json::to_string_pretty(&output.to_value()) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "could not serialize host output"),
        },
    }
}

fn validator(renderer: &Renderer) -> NodeValidator {
    match renderer.registry().catalog() {
        Some(catalog) => NodeValidator::new(std::sync::Arc::clone(catalog)),
        None => NodeValidator::new(quill::catalog::standard_catalog()),
    }
}

/// Print issues to stderr; errors are reported but never block rendering
fn report_issues(renderer: &Renderer, nodes: &[Node]) -> Result<()> {
    let report = validator(renderer).validate(nodes)?;
    for issue in &report.issues {
        eprintln!("{} {}", "warning:".yellow(), issue);
    }
    Ok(())
}

fn validate(renderer: &Renderer, file: &Path) -> Result<()> {
    let nodes = read_nodes(file)?;
    let report = validator(renderer).validate(&nodes)?;

    for issue in &report.issues {
        let label = match issue.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        println!("{} {}", label, issue);
        if let Some(hint) = issue.suggestion() {
            println!("    {} {}", "→".cyan(), hint);
        }
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();
    if errors == 0 {
        println!(
            "{} '{}' is valid ({} nodes, {} warning(s))",
            "✓".green(),
            file.display(),
            report.node_count,
            warnings
        );
    }
    report.into_result().map(|_| ())
}

fn print_catalog(renderer: &Renderer, format: CatalogFormat) -> Result<()> {
    let Some(catalog) = renderer.registry().catalog() else {
        println!("{}", "No catalog configured".yellow());
        return Ok(());
    };

    let serialize_error = |e: String| QuillError::CatalogParse {
        path: PathBuf::from(&catalog.id),
        details: e,
    };
    match format {
        CatalogFormat::Json => {
            let json = serde_json::to_string_pretty(catalog.as_ref()).map_err(|e| serialize_error(e.to_string()))?;
            println!("{}", json);
        }
        CatalogFormat::Yaml => {
            let yaml = serde_yaml::to_string(catalog.as_ref()).map_err(|e| serialize_error(e.to_string()))?;
            print!("{}", yaml);
        }
        CatalogFormat::Table => {
            println!(
                "{} {} v{} ({} components)",
                "Catalog".cyan().bold(),
                catalog.id.cyan(),
                catalog.version,
                catalog.len()
            );
            for entry in catalog.components.values() {
                let required = entry.required_properties();
                println!(
                    "  {:<16} {:<11} {}",
                    entry.node_type.bold(),
                    entry.category.dimmed(),
                    entry.description
                );
                if !required.is_empty() {
                    println!("  {:<16} {:<11} requires: {}", "", "", required.join(", "));
                }
            }
        }
    }
    Ok(())
}

fn coverage(renderer: &Renderer) -> Result<()> {
    let registry = renderer.registry();
    let report = registry.validate_catalog_coverage();

    println!("{} {} registered components", "→".cyan(), registry.len());
    for node_type in registry.types() {
        if let Some(entry) = registry.entry(node_type) {
            println!("  {:<16} priority {:>3}  {}", node_type, entry.priority, entry.source);
        }
    }

    if report.is_complete() {
        println!("{} catalog and registry agree", "✓".green());
        return Ok(());
    }
    for node_type in &report.missing {
        println!("{} '{}' is documented but has no component", "warning:".yellow(), node_type);
    }
    for node_type in &report.extra {
        println!("{} '{}' is registered but undocumented", "warning:".yellow(), node_type);
    }
    Ok(())
}
