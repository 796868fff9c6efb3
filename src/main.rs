use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use toolwire::tools::ToolCatalog;
use toolwire::types::{TypeRegistry, parse_type, resolve};
use toolwire::wire::get_wire_type_info;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging(level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolwire")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolwire.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.unwrap_or("info")))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::List { toolkit } => handle_list_command(toolkit.as_deref(), cli, config),
        Commands::Show { name } => handle_show_command(name, cli, config),
        Commands::Export { output, llm } => handle_export_command(output.as_ref(), *llm, cli, config),
        Commands::Resolve { expr } => handle_resolve_command(expr, cli, config),
        Commands::Classify { expr } => handle_classify_command(expr, cli, config),
    }
}

fn catalog_path(cli: &Cli, config: &Config) -> Option<PathBuf> {
    cli.catalog.clone().or_else(|| config.catalog.path.clone())
}

fn load_catalog(cli: &Cli, config: &Config) -> Result<ToolCatalog> {
    let path = catalog_path(cli, config)
        .ok_or_else(|| eyre!("No catalog file configured; pass --catalog or set catalog.path"))?;
    info!("Loading catalog from: {}", path.display());
    let catalog = ToolCatalog::from_file_with_toolkit(&path, &config.catalog.default_toolkit)
        .context(format!("Failed to load catalog from {}", path.display()))?;
    info!("Loaded {} tools", catalog.len());
    Ok(catalog)
}

/// Named types from the catalog when one is configured, otherwise none
fn load_registry(cli: &Cli, config: &Config) -> Result<TypeRegistry> {
    if catalog_path(cli, config).is_none() {
        return Ok(TypeRegistry::new());
    }
    Ok(load_catalog(cli, config)?.types().clone())
}

fn render_json<T: Serialize>(value: &T, config: &Config) -> Result<String> {
    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.context("Failed to serialize JSON")
}

fn handle_list_command(toolkit: Option<&str>, cli: &Cli, config: &Config) -> Result<()> {
    info!("Listing tools - toolkit: {:?}", toolkit);
    let catalog = load_catalog(cli, config)?;

    let tools: Vec<_> = match toolkit {
        Some(t) => catalog.by_toolkit(t),
        None => catalog.all().collect(),
    };

    if tools.is_empty() {
        println!("{}", "No tools found".yellow());
        return Ok(());
    }

    for tool in tools {
        let name = if tool.is_deprecated() {
            format!("{} (deprecated)", tool.fully_qualified_name).as_str().dimmed().to_string()
        } else {
            tool.fully_qualified_name.green().to_string()
        };
        println!("{}  {}", name, tool.description);
        if cli.is_verbose() {
            for param in &tool.input.parameters {
                let marker = if param.required { "*" } else { " " };
                println!("    {}{}: {}", marker, param.name, param.value_schema.val_type);
            }
        }
    }
    Ok(())
}

fn handle_show_command(name: &str, cli: &Cli, config: &Config) -> Result<()> {
    info!("Showing tool: {}", name);
    let catalog = load_catalog(cli, config)?;
    let tool = catalog.find(name).ok_or_else(|| eyre!("Tool not found: {}", name))?;
    println!("{}", render_json(tool, config)?);
    Ok(())
}

fn handle_export_command(output: Option<&PathBuf>, llm: bool, cli: &Cli, config: &Config) -> Result<()> {
    info!("Exporting catalog (llm: {}) to {:?}", llm, output);
    let catalog = load_catalog(cli, config)?;

    let rendered = if llm {
        render_json(&catalog.to_llm_schemas(), config)?
    } else {
        render_json(&catalog.to_json()?, config)?
    };

    match output {
        Some(path) => {
            fs::write(path, rendered).context(format!("Failed to write {}", path.display()))?;
            println!("{} {} tools to {}", "Exported".green(), catalog.len(), path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn handle_resolve_command(expr: &str, cli: &Cli, config: &Config) -> Result<()> {
    info!("Resolving type expression: {}", expr);
    let registry = load_registry(cli, config)?;
    let annotation = parse_type(expr, &registry).context("Failed to parse type expression")?;
    let resolved = resolve(&annotation);

    println!("{} {}", "Effective type:".green(), resolved.effective);
    match &resolved.description {
        Some(d) => println!("{} {}", "Description:".green(), d),
        None => println!("{} {}", "Description:".green(), "(none)".dimmed()),
    }
    Ok(())
}

fn handle_classify_command(expr: &str, cli: &Cli, config: &Config) -> Result<()> {
    info!("Classifying type expression: {}", expr);
    let registry = load_registry(cli, config)?;
    let annotation = parse_type(expr, &registry).context("Failed to parse type expression")?;
    let resolved = resolve(&annotation);
    let mut schema = get_wire_type_info(resolved.effective)
        .context("Failed to classify type")?
        .into_value_schema();
    if schema.description.is_none() {
        schema.description = resolved.description;
    }
    println!("{}", render_json(&schema, config)?);
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging at the configured level
    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
