use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use env_logger::Builder;
use kwic::engine::Backend;
use kwic::index::{write_flat, BuildOptions, FlatIndex, IndexMode, RotationIndex};
use kwic::output::{self, Verbosity};
use kwic::query::{SearchOutcome, SearchQuery, Searchable, Searcher};
use kwic::repl::Console;
use kwic::utils::progress::Spinner;
use kwic::utils::{read_lines, split_lines, AppConfig};
use kwic::{selfcheck, utils};
use log::LevelFilter;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use termcolor::ColorChoice;

/// Inputs with more lines than this get a progress spinner
const SPINNER_LINES: usize = 10_000;

#[derive(Parser)]
#[command(name = "kwic", version)]
#[command(about = "Keyword-in-context index: every circular word shift of every line, sorted")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    build: BuildArgs,

    /// Print 1-based numbered rotations with a summary
    #[arg(short, long)]
    verbose: bool,

    /// Write the rotations to a flat file instead of stdout
    #[arg(short, long, value_name = "OUT")]
    output: Option<PathBuf>,

    /// When to color output
    #[arg(long, value_name = "WHEN", value_parser = ["auto", "always", "never"], global = true)]
    color: Option<String>,

    /// Raise log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    debug: u8,
}

/// Where the lines to rotate come from
#[derive(Args)]
#[group(multiple = false)]
struct InputArgs {
    /// Text to rotate, one line per newline
    #[arg(short = 'p', long = "input", value_name = "TEXT")]
    text: Option<String>,

    /// File to rotate, one line per line
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Interactive console
    #[arg(short = 'i', long = "console")]
    console: bool,
}

/// Options shared by every command that builds an index
#[derive(Args)]
struct BuildArgs {
    /// Merge all lines into one sorted sequence
    #[arg(short, long)]
    merge: bool,

    /// Rotation backend
    #[arg(long, value_enum, value_name = "E")]
    engine: Option<Backend>,

    /// Detach a trailing URL from each line as its marker
    #[arg(long, overrides_with = "no_urls")]
    urls: bool,

    /// Keep trailing URLs as ordinary words
    #[arg(long, overrides_with = "urls")]
    no_urls: bool,
}

/// Where the rotations to search come from
#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Text to index and search
    #[arg(short = 'p', long = "input", value_name = "TEXT")]
    text: Option<String>,

    /// File to index and search
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Previously written flat file to search
    #[arg(long, value_name = "FILE")]
    flat: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search rotations by keywords or a regex
    Search {
        /// Keywords (all must match), or the pattern with --regex
        #[arg(required = true)]
        query: Vec<String>,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        build: BuildArgs,

        /// Treat the query as one regular expression
        #[arg(long)]
        regex: bool,

        /// Let line markers (URLs, `<None>`) satisfy the query
        #[arg(long)]
        all: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the config file location and effective configuration
    Config {
        /// Write the configuration file if it does not exist yet
        #[arg(long)]
        init: bool,
    },
    /// Run the built-in calibration checks
    Selfcheck,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn setup_logging(debug: u8) {
    let level = match debug {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = Builder::from_default_env();
    // RUST_LOG wins unless -d was given
    if debug > 0 || std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }
    builder
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    match cli.command {
        Some(Commands::Search {
            query,
            source,
            build,
            regex,
            all,
            json,
        }) => {
            let choice = color_choice(cli.color.as_deref(), &config);
            search(&config, query, source, build, regex, all, json, choice)
        }
        Some(Commands::Config { init }) => show_config(&config, init),
        Some(Commands::Selfcheck) => run_selfcheck(),
        None => rotate(&config, cli),
    }
}

/// `auto` only colors when stdout is a terminal
fn color_choice(when: Option<&str>, config: &AppConfig) -> ColorChoice {
    match output::color_choice(when, config.color) {
        ColorChoice::Auto if !io::stdout().is_terminal() => ColorChoice::Never,
        choice => choice,
    }
}

fn build_options(config: &AppConfig, args: &BuildArgs) -> BuildOptions {
    let mut options = config.build_options();
    if args.merge {
        options.mode = IndexMode::Merged;
    }
    if let Some(engine) = args.engine {
        options.backend = engine;
    }
    if args.urls {
        options.extract_urls = true;
    }
    if args.no_urls {
        options.extract_urls = false;
    }
    options
}

fn load_file(path: &Path) -> Result<Vec<String>> {
    read_lines(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn build_index(lines: Vec<String>, options: BuildOptions) -> RotationIndex {
    let silent = lines.len() < SPINNER_LINES || !io::stderr().is_terminal();
    let spinner = Spinner::start("Rotating lines...", silent);
    let index = RotationIndex::build(&lines, options);
    spinner.finish();
    index
}

fn rotate(config: &AppConfig, cli: Cli) -> Result<ExitCode> {
    let options = build_options(config, &cli.build);
    let verbosity = Verbosity::from_flag(cli.verbose || config.verbose);
    let choice = color_choice(cli.color.as_deref(), config);

    let input = cli.input;
    let lines = if let Some(text) = input.text {
        split_lines(&text)
    } else if let Some(path) = input.file {
        load_file(&path)?
    } else if input.console || io::stdin().is_terminal() {
        let mut console = Console::new(options, verbosity);
        let mut stdout = output::stdout(choice);
        console.run(io::stdin().lock(), &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    } else {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        split_lines(&text)
    };

    let index = build_index(lines, options);

    match cli.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let written = write_flat(&index, BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} rotations to {}", written, path.display());
        }
        None => {
            let mut stdout = output::stdout(choice);
            output::write_index(&mut stdout, &index, verbosity)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[allow(clippy::too_many_arguments)]
fn search(
    config: &AppConfig,
    query: Vec<String>,
    source: SourceArgs,
    build: BuildArgs,
    regex: bool,
    all: bool,
    json: bool,
    choice: ColorChoice,
) -> Result<ExitCode> {
    let options = build_options(config, &build);
    let query = if regex {
        SearchQuery::pattern(query.join(" "))
    } else {
        SearchQuery::Keywords(query)
    };

    let flat;
    let index;
    let target: &dyn Searchable = if let Some(path) = &source.flat {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        flat = FlatIndex::read(BufReader::new(file))
            .with_context(|| format!("Failed to read {}", path.display()))?;
        &flat
    } else {
        let lines = match (source.text, source.file) {
            (Some(text), _) => split_lines(&text),
            (None, Some(path)) => load_file(&path)?,
            (None, None) => Vec::new(),
        };
        index = build_index(lines, options.clone());
        &index
    };

    let searcher = Searcher::with_backend(target, options.backend, options.parallel_threshold);
    let outcome = searcher.run(&query, all).context("Search failed")?;

    if json {
        output::write_matches_json(&mut io::stdout().lock(), &outcome)?;
    } else {
        let mut stdout = output::stdout(choice);
        output::write_matches(&mut stdout, target, &outcome)?;
    }

    Ok(match outcome {
        SearchOutcome::Found(_) => ExitCode::SUCCESS,
        SearchOutcome::NoMatch => ExitCode::from(1),
    })
}

fn show_config(config: &AppConfig, init: bool) -> Result<ExitCode> {
    let path = utils::get_config_path()?;
    if init && !path.exists() {
        config.save().context("Failed to save configuration")?;
        println!("Created {}", path.display());
    } else {
        println!("Config: {}", path.display());
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(ExitCode::SUCCESS)
}

fn run_selfcheck() -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    let mut write_error = None;
    let report = selfcheck::run_with(|check, result| {
        let line = match result {
            Ok(()) => writeln!(stdout, "ok      {}", check.name),
            Err(reason) => writeln!(stdout, "FAILED  {}: {}", check.name, reason),
        };
        if let Err(e) = line
            && write_error.is_none()
        {
            write_error = Some(e);
        }
    });
    drop(stdout);
    if let Some(e) = write_error {
        return Err(e.into());
    }

    println!(
        "{} passed, {} failed, {} total",
        report.passed,
        report.failed.len(),
        report.total()
    );

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
