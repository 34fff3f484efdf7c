use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser as ClapParser, Subcommand};
use searchql::cli::{self, Backend, CheckOptions, CliError, SearchCommand};
use searchql::{Compiler, SearchConfig};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "searchql")]
#[command(about = "searchql - compile free-text search queries into backend filters")]
#[command(version)]
struct Cli {
    /// TOML configuration file (fields, aliases, limits)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log compile and execution details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query and print its tree and lowered predicate
    Check {
        /// The search query to compile
        query: String,

        /// Backend to lower the query for
        #[arg(short, long, value_enum, default_value_t = Backend::Filter)]
        backend: Backend,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Parse an order parameter such as "match(2001,1001)"
    Order {
        /// The order parameter
        param: String,
    },

    /// Run a query against a JSON array of documents
    Search {
        /// The search query
        query: String,

        /// File holding a JSON array of documents (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Order parameter: asc, desc or match(id, ...)
        #[arg(short, long)]
        order: Option<String>,

        /// Field to sort matches by
        #[arg(short, long)]
        sort: Option<String>,

        /// Number of matches to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Maximum number of matches to return
        #[arg(short, long)]
        limit: Option<usize>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'searchql docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("searchql={}", log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        warn!(error = %e, "command failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::default(),
    };
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Check {
            query,
            backend,
            pretty,
        } => {
            let options = CheckOptions { query, backend };
            let result = cli::execute_check(&Compiler::new(&config), &options)?;
            println!("{}", cli::to_json(&result, pretty)?);
        }
        Commands::Order { param } => match cli::execute_order(&param)? {
            Some(directive) => println!("{}", cli::to_json(&directive, false)?),
            None => println!("no directive"),
        },
        Commands::Search {
            query,
            input,
            order,
            sort,
            skip,
            limit,
            pretty,
        } => {
            let command = SearchCommand {
                query,
                input: read_input(input)?,
                order,
                sort,
                skip,
                limit,
            };
            let result = cli::execute_search(&config, &command)?;
            println!("{}", cli::to_json(&result, pretty)?);
        }
        Commands::Docs => print!("{}", cli::get_docs_overview()),
        Commands::Doc { category } => print!("{}", cli::get_doc_category(&category)?),
    }
    Ok(())
}

fn read_input(path: Option<PathBuf>) -> Result<Option<String>, CliError> {
    match path {
        Some(path) => Ok(Some(fs::read_to_string(path)?)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}
