//! sqlshim CLI - resolve dialect expressions and schema names
//!
//! Usage:
//!   sqlshim resolve <operation> [operands...] [--dialect <dialect>]
//!   sqlshim name [--kind <kind>] [--custom <name>] [--default-schema <schema>] [--env <env>]
//!   sqlshim list
//!   sqlshim vars
//!
//! Examples:
//!   sqlshim resolve cents-to-dollars price --dialect postgres
//!   sqlshim resolve date-truncate month created_at
//!   sqlshim name --kind model-like --custom marketing --env prod

use clap::{Parser, Subcommand};
use sqlshim::config::{Settings, SettingsError};
use sqlshim::naming::ResourceClassification;
use sqlshim::{DialectTag, TemplateRegistry};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlshim")]
#[command(about = "sqlshim - dialect-aware SQL expression templates and schema naming")]
#[command(version)]
struct Cli {
    /// Project file (defaults to $SQLSHIM_CONFIG, ./sqlshim.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an operation for a dialect
    Resolve {
        /// Operation name (see `sqlshim list`)
        operation: String,

        /// Operands, in the operation's order
        operands: Vec<String>,

        /// Target dialect (defaults to the project warehouse, then bigquery)
        #[arg(short, long)]
        dialect: Option<String>,
    },

    /// Compute the schema name for a resource
    Name {
        /// Resource classification
        #[arg(short, long, default_value = "model-like")]
        kind: ResourceClassification,

        /// Custom schema name
        #[arg(long)]
        custom: Option<String>,

        /// Default schema (defaults to the project setting)
        #[arg(long)]
        default_schema: Option<String>,

        /// Environment (defaults to the project setting)
        #[arg(short, long)]
        env: Option<String>,
    },

    /// List operations and the dialects with specific templates
    List,

    /// Print project variables as JSON
    Vars,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Resolve {
            operation,
            operands,
            dialect,
        } => cmd_resolve(&settings, &operation, &operands, dialect),
        Commands::Name {
            kind,
            custom,
            default_schema,
            env,
        } => cmd_name(&settings, kind, custom, default_schema, env),
        Commands::List => cmd_list(),
        Commands::Vars => cmd_vars(&settings),
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "sqlshim=debug" } else { "sqlshim=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

fn cmd_resolve(
    settings: &Settings,
    operation: &str,
    operands: &[String],
    dialect: Option<String>,
) -> ExitCode {
    match resolve_expression(settings, operation, operands, dialect) {
        Ok(sql) => {
            println!("{}", sql);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Resolution error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn resolve_expression(
    settings: &Settings,
    operation: &str,
    operands: &[String],
    dialect: Option<String>,
) -> sqlshim::Result<String> {
    let tag = settings.target_dialect(dialect.as_deref())?;
    debug!(operation, dialect = %tag, "resolving");

    Ok(TemplateRegistry::shared().resolve(operation, &tag, operands)?)
}

fn cmd_name(
    settings: &Settings,
    kind: ResourceClassification,
    custom: Option<String>,
    default_schema: Option<String>,
    env: Option<String>,
) -> ExitCode {
    match resolve_schema(settings, kind, custom, default_schema, env) {
        Ok(Some(name)) => {
            println!("{}", name);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("No schema name: {} resources need a custom name", kind);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Naming error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn resolve_schema(
    settings: &Settings,
    kind: ResourceClassification,
    custom: Option<String>,
    default_schema: Option<String>,
    env: Option<String>,
) -> sqlshim::Result<Option<String>> {
    let context = settings.naming_context_with(default_schema.as_deref(), env.as_deref())?;
    debug!(%kind, default_schema = %context.default_schema, "naming");

    Ok(settings.naming.resolve(kind, custom.as_deref(), &context)?)
}

fn cmd_list() -> ExitCode {
    let registry = TemplateRegistry::shared();

    for operation in registry.operations() {
        let arity = registry.arity(operation).unwrap_or_default();
        let dialects: Vec<&str> = registry
            .dialects_for(operation)
            .into_iter()
            .map(DialectTag::as_str)
            .collect();
        let dialects = if dialects.is_empty() {
            "fallback only".to_string()
        } else {
            dialects.join(", ")
        };
        println!("{:<20} arity {}  [{}]", operation, arity, dialects);
    }

    ExitCode::SUCCESS
}

fn cmd_vars(settings: &Settings) -> ExitCode {
    match serde_json::to_string_pretty(&settings.vars) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing vars: {}", e);
            ExitCode::FAILURE
        }
    }
}
