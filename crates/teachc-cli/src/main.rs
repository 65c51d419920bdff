//! teachc CLI - front end for the lex/parse/compile pipeline.
//!
//! Three subcommands drive `teachc-driver` straight from files on disk:
//! `lex` prints a token stream, `parse` prints a reduction trace and the
//! resulting AST, and `compile` runs the whole pipeline and prints the
//! emitted quadruples. All three exit non-zero and print every diagnostic,
//! in source order, on failure; none of them panic on malformed input.

mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use error::{CliError, Result};
use teachc_driver::{compile as run_compile, Diagnostic, LexSession, ParseSession};
use teachc_par::LrMode;

/// teachc - a teaching compiler front end: lexer, LR parser, IR emitter.
#[derive(Parser, Debug)]
#[command(name = "teachc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lex, parse, and compile toy sources through a table-driven LR pipeline", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true, env = "TEACHC_VERBOSE")]
    verbose: bool,

    /// Path to a teachc.toml config file
    #[arg(short, long, global = true, env = "TEACHC_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "TEACHC_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a source file and print its token stream
    Lex(LexCommand),
    /// Parse a source file against a grammar and print the trace and AST
    Parse(ParseCommand),
    /// Run the full lex -> parse -> IR pipeline and print the quadruples
    Compile(CompileCommand),
}

#[derive(Parser, Debug)]
struct LexCommand {
    /// Source file to scan
    source: PathBuf,

    /// Lexical rule file (regex / token-kind / priority per line)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Include trivia tokens (whitespace, newlines, comments) in the output
    #[arg(long, default_value_t = false)]
    keep_trivia: bool,
}

#[derive(Parser, Debug)]
struct ParseCommand {
    /// Source file to parse
    source: PathBuf,

    /// Grammar file
    #[arg(long)]
    grammar: Option<PathBuf>,

    /// Which LR table to build
    #[arg(long, value_enum)]
    lr_mode: Option<LrModeArg>,
}

#[derive(Parser, Debug)]
struct CompileCommand {
    /// Source file to compile
    source: PathBuf,

    /// Lexical rule file
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Grammar file
    #[arg(long)]
    grammar: Option<PathBuf>,

    /// Which LR table to build
    #[arg(long, value_enum)]
    lr_mode: Option<LrModeArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LrModeArg {
    Slr1,
    Lr1,
}

impl From<LrModeArg> for LrMode {
    fn from(value: LrModeArg) -> Self {
        match value {
            LrModeArg::Slr1 => LrMode::Lr0Slr1,
            LrModeArg::Lr1 => LrMode::CanonicalLr1,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.verbose, cli.no_color) {
        eprintln!("{err}");
        std::process::exit(1);
    }
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    let subscriber = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .ok();
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Lex(args) => run_lex(args, &config),
        Commands::Parse(args) => run_parse(args, &config),
        Commands::Compile(args) => run_compile_command(args, &config),
    }
}

fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadSource {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve_lr_mode(flag: Option<LrModeArg>, config: &Config) -> LrMode {
    if let Some(flag) = flag {
        return flag.into();
    }
    match config.lr_mode.as_deref() {
        Some("lr1") => LrMode::CanonicalLr1,
        _ => LrMode::Lr0Slr1,
    }
}

fn run_lex(args: LexCommand, config: &Config) -> Result<()> {
    let rules_path = args.rules.or_else(|| config.rules_file.clone());
    let rules_path = rules_path.ok_or_else(|| CliError::ReadSource {
        path: PathBuf::from("<none>"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no --rules given and none set in teachc.toml"),
    })?;

    let source_text = read_file(&args.source)?;
    let rules_text = read_file(&rules_path)?;

    let session = LexSession::load(&rules_text)?;
    let (tokens, errors) = session.scan(&source_text);

    for token in &tokens {
        if !args.keep_trivia
            && matches!(
                token.kind,
                teachc_lex::TokenKind::Whitespace | teachc_lex::TokenKind::Newline | teachc_lex::TokenKind::Comment
            )
        {
            continue;
        }
        println!("{}:{} {:?} {:?}", token.line, token.column, token.kind, token.lexeme);
    }

    for error in &errors {
        println!("{}:{}: unexpected character {:?}", error.line, error.column, error.bad_character);
    }

    if !errors.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_parse(args: ParseCommand, config: &Config) -> Result<()> {
    let grammar_path = args.grammar.or_else(|| config.grammar_file.clone());
    let grammar_path = grammar_path.ok_or_else(|| CliError::ReadSource {
        path: PathBuf::from("<none>"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no --grammar given and none set in teachc.toml"),
    })?;
    let rules_path = config.rules_file.clone().ok_or_else(|| CliError::ReadSource {
        path: PathBuf::from("<none>"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no rules_file set in teachc.toml for parse"),
    })?;

    let source_text = read_file(&args.source)?;
    let rules_text = read_file(&rules_path)?;
    let grammar_text = read_file(&grammar_path)?;
    let mode = resolve_lr_mode(args.lr_mode, config);

    let lexer = LexSession::load(&rules_text)?;
    let (tokens, lex_errors) = lexer.scan(&source_text);

    let parser = ParseSession::load(&grammar_text, mode)?;
    let outcome = parser.parse(&tokens);

    for step in &outcome.trace {
        println!(
            "#{} stack={:?} input={:?} action={:?}",
            step.index,
            step.stack_symbols.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            step.remaining_input,
            step.action
        );
    }

    match &outcome.ast {
        Some(ast) => println!("ast root: {}", ast.nodes[ast.root].label.as_str()),
        None => println!("ast: none (parse did not recover)"),
    }

    let diagnostics: Vec<Diagnostic> = lex_errors
        .into_iter()
        .map(Diagnostic::Lex)
        .chain(outcome.errors.into_iter().map(Diagnostic::Parse))
        .collect();
    for diagnostic in &diagnostics {
        println!("{}:{}: {:?}", diagnostic.line(), diagnostic.column(), diagnostic);
    }
    if !diagnostics.is_empty() && outcome.ast.is_none() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_compile_command(args: CompileCommand, config: &Config) -> Result<()> {
    let rules_path = args.rules.or_else(|| config.rules_file.clone());
    let rules_path = rules_path.ok_or_else(|| CliError::ReadSource {
        path: PathBuf::from("<none>"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no --rules given and none set in teachc.toml"),
    })?;
    let grammar_path = args.grammar.or_else(|| config.grammar_file.clone());
    let grammar_path = grammar_path.ok_or_else(|| CliError::ReadSource {
        path: PathBuf::from("<none>"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no --grammar given and none set in teachc.toml"),
    })?;

    let source_text = read_file(&args.source)?;
    let rules_text = read_file(&rules_path)?;
    let grammar_text = read_file(&grammar_path)?;
    let mode = resolve_lr_mode(args.lr_mode, config);

    let outcome = run_compile(&source_text, &rules_text, &grammar_text, mode)?;

    for quad in &outcome.quads {
        println!("{quad}");
    }
    for diagnostic in &outcome.diagnostics {
        println!("{}:{}: {:?}", diagnostic.line(), diagnostic.column(), diagnostic);
    }
    if !outcome.diagnostics.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lex_subcommand_with_rules_flag() {
        let cli = Cli::parse_from(["teachc", "lex", "a.src", "--rules", "a.rules"]);
        match cli.command {
            Commands::Lex(args) => {
                assert_eq!(args.source, PathBuf::from("a.src"));
                assert_eq!(args.rules, Some(PathBuf::from("a.rules")));
                assert!(!args.keep_trivia);
            }
            _ => panic!("expected Lex command"),
        }
    }

    #[test]
    fn parses_parse_subcommand_with_lr_mode() {
        let cli = Cli::parse_from(["teachc", "parse", "a.src", "--grammar", "a.grammar", "--lr-mode", "lr1"]);
        match cli.command {
            Commands::Parse(args) => {
                assert_eq!(args.grammar, Some(PathBuf::from("a.grammar")));
                assert!(matches!(args.lr_mode, Some(LrModeArg::Lr1)));
            }
            _ => panic!("expected Parse command"),
        }
    }

    #[test]
    fn parses_compile_subcommand() {
        let cli = Cli::parse_from(["teachc", "compile", "a.src", "--rules", "a.rules", "--grammar", "a.grammar"]);
        assert!(matches!(cli.command, Commands::Compile(_)));
    }

    #[test]
    fn global_verbose_flag_is_recognized() {
        let cli = Cli::parse_from(["teachc", "--verbose", "lex", "a.src"]);
        assert!(cli.verbose);
    }
}
