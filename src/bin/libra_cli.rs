//! LIBRA Command Line Interface
//!
//! Inspects LIBRA output files and checks plot requests without a dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Catalog the headers of an output file
//! libra_cli catalog --file outputs.csv
//!
//! # Canonical column name of a selection
//! libra_cli compose "Battery Market" demand US LFP
//!
//! # Sibling names of a stack plot
//! libra_cli stack HydroPyro throughput US Hydro
//!
//! # Dropdown options for a variable
//! libra_cli options --file outputs.csv --module "Minerals Market" --variable price
//!
//! # Validate the predefined plots named in config/libra.yaml
//! libra_cli definitions
//!
//! # List exogenous inputs of an equations export
//! libra_cli equations --file Equations.txt
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use libra_viz::catalog::{read_headers_from_path, CatalogBuilder};
use libra_viz::config::ConfigLoader;
use libra_viz::equations::{parse_equations, InputValue};
use libra_viz::plot::{load_line_definitions, load_stack_definitions, PlotParameters, PlotRequest};
use libra_viz::selector::{
    all_dimension_options, default_title, default_y_label, module_options, run_options,
    variable_options,
};
use libra_viz::{PlotLabels, StackPlotParameters};

#[derive(Parser)]
#[command(name = "libra_cli")]
#[command(version = "0.1.0")]
#[command(about = "Inspect LIBRA output headers and validate plot requests")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,

    /// Configuration directory (default: LIBRA_CONFIG_DIR or ./config)
    #[arg(long, global = true, env = "LIBRA_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the catalog of an output file's headers
    Catalog {
        /// Output CSV file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Compose the canonical name of a line plot selection
    Compose {
        module: String,
        variable: String,
        /// Array values, in position order
        values: Vec<String>,
    },

    /// Expand a stack plot selection into its sibling names
    Stack {
        module: String,
        variable: String,
        /// Array values; the last one selects the stacked dimension
        values: Vec<String>,
    },

    /// Show the dropdown options for an output file
    Options {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long)]
        module: Option<String>,

        /// Requires --module
        #[arg(long, requires = "module")]
        variable: Option<String>,
    },

    /// Load and validate predefined plot definitions
    Definitions {
        /// Line plot CSV (defaults to the file named in libra.yaml)
        #[arg(long)]
        line: Option<PathBuf>,

        /// Stack plot CSV (defaults to the file named in libra.yaml)
        #[arg(long)]
        stack: Option<PathBuf>,
    },

    /// List the exogenous inputs of an equations export
    Equations {
        #[arg(short, long)]
        file: PathBuf,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    let result = match cli.command {
        Commands::Catalog { file } => cmd_catalog(file, format),
        Commands::Compose {
            module,
            variable,
            values,
        } => cmd_compose(cli.config_dir, module, variable, values, format),
        Commands::Stack {
            module,
            variable,
            values,
        } => cmd_stack(cli.config_dir, module, variable, values, format),
        Commands::Options {
            file,
            module,
            variable,
        } => cmd_options(file, module, variable, format),
        Commands::Definitions { line, stack } => {
            cmd_definitions(cli.config_dir, line, stack, format)
        }
        Commands::Equations { file } => cmd_equations(file, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if format == OutputFormat::Json {
                let err = serde_json::json!({ "error": format!("{:#}", e) });
                println!("{}", err);
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn config_loader(config_dir: Option<PathBuf>) -> ConfigLoader {
    match config_dir {
        Some(dir) => ConfigLoader::new(dir.to_string_lossy()),
        None => ConfigLoader::from_env(),
    }
}

fn request(module: String, variable: String, values: Vec<String>) -> PlotRequest {
    let title = default_title(&module, &variable, &values);
    let y_label = default_y_label(&module, &variable);
    PlotRequest::new(module, variable, title, y_label).with_array_values(values)
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_catalog(file: PathBuf, format: OutputFormat) -> Result<()> {
    let headers = read_headers_from_path(&file)
        .with_context(|| format!("Failed to read headers from {}", file.display()))?;
    let report = CatalogBuilder::build_with_report(&headers);

    if format == OutputFormat::Json {
        return print_json(&report);
    }

    let catalog = &report.catalog;
    println!("{}: {}", "Runs".cyan().bold(), catalog.runs().join(", "));
    for (module, variables) in catalog.variables_by_module() {
        println!("{} ({} variables)", module.bold(), variables.len());
        for variable in variables {
            match catalog.dims(module, variable) {
                Some(dims) => println!("  {}[{}]", variable, dims.join(", ")),
                None => println!("  {}", variable),
            }
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "{} {} malformed headers:",
            "Skipped".yellow(),
            report.skipped.len()
        );
        for skipped in &report.skipped {
            println!("  {}", skipped);
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ComposeOutput<'a> {
    parameters: &'a PlotParameters,
    labels: PlotLabels,
}

fn cmd_compose(
    config_dir: Option<PathBuf>,
    module: String,
    variable: String,
    values: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    let config = config_loader(config_dir).load()?;
    let params = PlotParameters::build(request(module, variable, values))?;
    match format {
        OutputFormat::Json => print_json(&ComposeOutput {
            parameters: &params,
            labels: PlotLabels::from_parameters(&params, &config),
        }),
        OutputFormat::Text => {
            println!("{}", params.full_name());
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct StackOutput<'a> {
    #[serde(flatten)]
    stack: &'a StackPlotParameters,
    labels: PlotLabels,
    fill_colors: Vec<String>,
}

fn cmd_stack(
    config_dir: Option<PathBuf>,
    module: String,
    variable: String,
    values: Vec<String>,
    format: OutputFormat,
) -> Result<()> {
    let config = config_loader(config_dir).load()?;
    let stack = StackPlotParameters::build(request(module, variable, values))?;
    let fill_colors = stack.fill_colors(&config)?;
    match format {
        OutputFormat::Json => print_json(&StackOutput {
            stack: &stack,
            labels: PlotLabels::from_parameters(stack.parameters(), &config),
            fill_colors,
        }),
        OutputFormat::Text => {
            println!("{} {}", "Stacked over".cyan().bold(), stack.stack_kind());
            for (series, fill) in stack.series().zip(&fill_colors) {
                println!("  {:<12} {:<24} {}", series.label, fill, series.full_name);
            }
            Ok(())
        }
    }
}

fn cmd_options(
    file: PathBuf,
    module: Option<String>,
    variable: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let headers = read_headers_from_path(&file)
        .with_context(|| format!("Failed to read headers from {}", file.display()))?;
    let catalog = CatalogBuilder::build(&headers);

    let output = match (module, variable) {
        (Some(module), Some(variable)) => {
            serde_json::to_value(all_dimension_options(&catalog, &module, &variable))?
        }
        (Some(module), None) => serde_json::to_value(variable_options(&catalog, &module))?,
        _ => serde_json::json!({
            "runs": run_options(&catalog),
            "modules": module_options(&catalog),
        }),
    };

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Text => {
            println!("{}", serde_yaml::to_string(&output)?);
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct DefinitionsSummary {
    line: Vec<String>,
    stack: Vec<Vec<String>>,
}

fn cmd_definitions(
    config_dir: Option<PathBuf>,
    line: Option<PathBuf>,
    stack: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let loader = config_loader(config_dir);
    let config = loader.load()?;

    let lines = match line {
        Some(path) => load_line_definitions(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => loader.load_line_definitions(&config)?,
    };
    let stacks = match stack {
        Some(path) => load_stack_definitions(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => loader.load_stack_definitions(&config)?,
    };

    let summary = DefinitionsSummary {
        line: lines.iter().map(|p| p.full_name().to_string()).collect(),
        stack: stacks.iter().map(|s| s.sibling_names().to_vec()).collect(),
    };

    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            println!("{} {} line plots", "OK".green().bold(), summary.line.len());
            for name in &summary.line {
                println!("  {}", name);
            }
            println!("{} {} stack plots", "OK".green().bold(), summary.stack.len());
            for siblings in &summary.stack {
                println!("  {}", siblings.join(" | "));
            }
            Ok(())
        }
    }
}

fn cmd_equations(file: PathBuf, format: OutputFormat) -> Result<()> {
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let modules = parse_equations(&text)?;

    if format == OutputFormat::Json {
        return print_json(&modules);
    }

    for module in &modules {
        println!("{}", module.module.cyan().bold());
        for (input, name) in module.inputs.iter().zip(module.full_names()) {
            match &input.value {
                InputValue::Constant(value) => println!("  {} = {}", name, value),
                InputValue::Graph(points) => {
                    println!("  {} = GRAPH(TIME) [{} points]", name, points.len())
                }
            }
        }
    }
    Ok(())
}
