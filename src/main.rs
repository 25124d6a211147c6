use anyhow::{Context, Result};
use clap::Parser;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use sqlscrub::dialect::DEFAULT_COMPAT_LEVEL;
use sqlscrub::{Destination, ParseError, ScrubError, Scrubber, TSqlTokenizer, TokenStream};

#[derive(Parser)]
#[command(name = "sqlscrub")]
#[command(author, version, about = "Remove comments from T-SQL scripts", long_about = None)]
struct Cli {
    /// The T-SQL script to clean
    #[arg(short, long)]
    source: PathBuf,

    /// Where to write the cleaned script ("-" for stdout)
    #[arg(short, long, required_unless_present = "check")]
    dest: Option<PathBuf>,

    /// SQL Server compatibility level (80, 90, 100, 110, 120, 130, 140)
    #[arg(
        short,
        long = "compat-level",
        env = "SQLSCRUB_COMPAT_LEVEL",
        default_value_t = DEFAULT_COMPAT_LEVEL
    )]
    compat_level: u32,

    /// Treat "..." as string literals (SET QUOTED_IDENTIFIER OFF)
    #[arg(long)]
    no_quoted_identifiers: bool,

    /// Only check that the script tokenizes cleanly; write nothing
    #[arg(long)]
    check: bool,

    /// Dump the token stream as JSON to stderr
    #[arg(long)]
    dump_tokens: bool,

    /// Print a summary of what was removed
    #[arg(long)]
    stats: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over --verbose
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Source script loaded for scrubbing, kept around for diagnostics
struct ScriptState {
    source: String,
    files: SimpleFiles<String, String>,
    file_id: usize,
}

impl ScriptState {
    fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {:?}", path))?;

        let mut files = SimpleFiles::new();
        let file_id = files.add(path.display().to_string(), source.clone());

        Ok(Self {
            source,
            files,
            file_id,
        })
    }

    fn report_errors(&self, errors: &[ParseError]) -> Result<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        for error in errors {
            let diagnostic = error.to_diagnostic(self.file_id);
            codespan_reporting::term::emit(&mut writer.lock(), &config, &self.files, &diagnostic)?;
        }
        Ok(())
    }
}

fn run(cli: &Cli) -> Result<()> {
    let tokenizer = TSqlTokenizer::new().with_quoted_identifiers(!cli.no_quoted_identifiers);
    let scrubber = Scrubber::with_tokenizer(tokenizer);

    if cli.dump_tokens || cli.check {
        let state = ScriptState::load(&cli.source)?;

        if cli.dump_tokens {
            dump_tokens(&scrubber.tokenize(&state.source, cli.compat_level))?;
        }

        if cli.check {
            let stream = scrubber
                .check_text(&state.source, cli.compat_level)
                .or_else(|e| fail_with_diagnostics(&state, e))?;
            println!(
                "{}: {} tokens, no errors ({})",
                "success".green().bold(),
                stream.len(),
                stream.version()
            );
            return Ok(());
        }
    }

    let destination = cli
        .dest
        .as_deref()
        .map(Destination::from_path)
        .context("no destination given")?;

    let report = match scrubber.scrub_file(&cli.source, &destination, cli.compat_level) {
        Ok(report) => report,
        Err(e @ ScrubError::Parse { .. }) => {
            let state = ScriptState::load(&cli.source)?;
            return fail_with_diagnostics(&state, e);
        }
        Err(e) => return Err(e.into()),
    };

    if cli.stats {
        eprintln!("{}: {}", "stats".blue().bold(), report);
    }

    Ok(())
}

fn fail_with_diagnostics<T>(state: &ScriptState, error: ScrubError) -> Result<T> {
    state.report_errors(error.parse_errors())?;
    Err(error.into())
}

fn dump_tokens(stream: &TokenStream) -> Result<()> {
    eprintln!("{}", serde_json::to_string_pretty(stream)?);
    Ok(())
}
