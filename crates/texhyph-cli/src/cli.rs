use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use texhyph::engine::{DEFAULT_LEFT_MARGIN, DEFAULT_RIGHT_MARGIN};
use texhyph::hyphenator::DEFAULT_DELIMITER;

use crate::commands::{CompileArgs, FileArgs, WordsArgs, run_compile, run_file, run_words};
use crate::error::Result;
use crate::logging::{self, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "hyphenate",
    about = "Hyphenate words with TeX patterns (bundled Bulgarian set by default)",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Pattern file, one pattern per line.
    #[arg(long, global = true, env = "TEXHYPH_PATTERNS", conflicts_with = "store")]
    pub patterns: Option<PathBuf>,

    /// Serialized store written by `compile`.
    #[arg(long, global = true, env = "TEXHYPH_STORE")]
    pub store: Option<PathBuf>,

    /// Read and write stores without zlib compression.
    #[arg(long, global = true, env = "TEXHYPH_NO_COMPRESSION")]
    pub no_compression: bool,

    /// Treat the first line of a pattern file as a pattern.
    #[arg(long, global = true, env = "TEXHYPH_KEEP_HEADER")]
    pub keep_header: bool,

    /// Parse every pattern up front.
    #[arg(long, global = true, env = "TEXHYPH_EAGER")]
    pub eager: bool,

    #[arg(long, global = true, env = "TEXHYPH_DELIMITER", default_value = DEFAULT_DELIMITER)]
    pub delimiter: String,

    #[arg(long, global = true, env = "TEXHYPH_LEFT_MARGIN", default_value_t = DEFAULT_LEFT_MARGIN)]
    pub left_margin: usize,

    #[arg(long, global = true, env = "TEXHYPH_RIGHT_MARGIN", default_value_t = DEFAULT_RIGHT_MARGIN)]
    pub right_margin: usize,

    #[arg(
        long,
        global = true,
        env = "TEXHYPH_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Hyphenate the given words, one result per line.
    Words(WordsArgs),

    /// Hyphenate a word list into `<path>.hyphenated`.
    File(FileArgs),

    /// Build a store from a pattern file and serialize it.
    Compile(CompileArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.global.log_format);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Run a parsed command, writing its report to `out`.
pub fn execute(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Words(args) => run_words(&cli.global, &args, out),
        Commands::File(args) => run_file(&cli.global, &args, out),
        Commands::Compile(args) => run_compile(&cli.global, &args, out),
    }
}
