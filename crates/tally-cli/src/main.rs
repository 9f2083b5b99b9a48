//! Tally CLI - numeric formula evaluation tool

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tally_formula::shunting::render;
use tally_formula::{builtin_registry, FormulaParser, ParserConfig};

#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about = "Numeric formula evaluator")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single formula
    Eval {
        /// Formula, e.g. "MAX(X;2)*1.5"
        formula: String,

        #[command(flatten)]
        options: EvalOptions,

        /// Print the infix and postfix atoms
        #[arg(short, long)]
        trace: bool,
    },

    /// Evaluate one formula per line from a file or stdin
    Batch {
        /// Input file (default: stdin)
        input: Option<PathBuf>,

        #[command(flatten)]
        options: EvalOptions,
    },

    /// List the builtin functions
    Functions,
}

#[derive(Args)]
struct EvalOptions {
    /// Variable binding NAME=VALUE (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    /// Decimal separator character
    #[arg(short, long)]
    separator: Option<char>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Eval {
            formula,
            options,
            trace,
        } => eval(&formula, &options, trace),
        Commands::Batch { input, options } => batch(input.as_deref(), &options),
        Commands::Functions => {
            list_functions();
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Build a parser from the config file, separator override and bindings
fn build_parser(options: &EvalOptions) -> Result<FormulaParser> {
    let mut config = match &options.config {
        Some(path) => load_config(path)?,
        None => ParserConfig::default(),
    };
    if let Some(separator) = options.separator {
        config.decimal_separator = separator;
    }

    let mut parser = FormulaParser::with_config(config).context("Invalid configuration")?;

    for binding in &options.vars {
        let (name, value) = parse_binding(binding, parser.config().decimal_separator)?;
        log::debug!("binding {name} = {value}");
        parser.variables_mut().set(name, value);
    }

    Ok(parser)
}

fn load_config(path: &Path) -> Result<ParserConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config '{}'", path.display()))
}

/// Parse `NAME=VALUE`, accepting the decimal separator in VALUE
fn parse_binding(binding: &str, separator: char) -> Result<(&str, f64)> {
    let (name, value) = binding
        .split_once('=')
        .with_context(|| format!("Expected NAME=VALUE, got '{binding}'"))?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("Invalid variable name '{name}'");
    }
    let value: f64 = value
        .trim()
        .replace(separator, ".")
        .parse()
        .with_context(|| format!("Invalid value for {name}: '{value}'"))?;
    Ok((name, value))
}

fn eval(formula: &str, options: &EvalOptions, trace: bool) -> Result<ExitCode> {
    let mut parser = build_parser(options)?;
    let value = parser.result(formula);

    if trace {
        eprintln!("infix:   {}", render(parser.infix()));
        eprintln!("postfix: {}", render(parser.postfix()));
        if let Some(expr) = parser.trace() {
            eprintln!("trace:   {expr}");
        }
    }

    if parser.error() {
        eprintln!("error: {}", parser.error_message());
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", parser.format_value(value));
    Ok(ExitCode::SUCCESS)
}

fn batch(input: Option<&Path>, options: &EvalOptions) -> Result<ExitCode> {
    let mut parser = build_parser(options)?;

    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut errors = 0usize;

    for line in reader.lines() {
        let line = line.context("Failed to read input")?;
        let formula = line.trim();
        if formula.is_empty() || formula.starts_with('#') {
            continue;
        }

        let value = parser.result(formula);
        let written = if parser.error() {
            errors += 1;
            writeln!(out, "error: {}", parser.error_message())
        } else {
            writeln!(out, "{}", parser.format_value(value))
        };
        written.context("Failed to write to stdout")?;
    }

    if errors > 0 {
        log::warn!("{errors} formulas failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn list_functions() {
    let registry = builtin_registry();
    for name in registry.names() {
        if let Some(def) = registry.get(name) {
            let arity = match def.max_args {
                Some(max) if max == def.min_args => max.to_string(),
                Some(max) => format!("{}-{}", def.min_args, max),
                None => format!("{}+", def.min_args),
            };
            let volatile = if def.volatile { " (volatile)" } else { "" };
            println!("{name}\t{arity}{volatile}");
        }
    }
}
