use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use texhyph::{
    HyphenationEngine, Hyphenator, PatternStore, SourceOptions, StoreOptions, bulgarian,
    pattern_lines,
};

use crate::cli::GlobalArgs;
use crate::error::{CliError, Result};
use crate::util::{output_path, read_bytes, read_string, write_bytes};

#[derive(Debug, Clone, Args)]
pub struct WordsArgs {
    #[arg(required = true)]
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct FileArgs {
    /// Word list, one word per line.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct CompileArgs {
    /// Pattern file to compile.
    pub patterns: PathBuf,

    #[arg(short, long)]
    pub output: PathBuf,
}

// ---------------------------------------------------------------------------
// Store and hyphenator assembly
// ---------------------------------------------------------------------------

fn store_options(global: &GlobalArgs) -> StoreOptions {
    if global.eager {
        StoreOptions::eager()
    } else {
        StoreOptions::lazy()
    }
}

fn source_options(global: &GlobalArgs) -> SourceOptions {
    SourceOptions {
        skip_header: !global.keep_header,
    }
}

fn store_from_pattern_file(path: &std::path::Path, global: &GlobalArgs) -> Result<PatternStore> {
    let text = read_string(path)?;
    let lines = pattern_lines(&text, source_options(global));
    Ok(PatternStore::from_patterns(lines, store_options(global))?)
}

/// Build the store named by the global options.
///
/// A serialized store wins over a pattern file; with neither, the bundled
/// Bulgarian patterns are used.
pub fn load_store(global: &GlobalArgs) -> Result<PatternStore> {
    if let Some(path) = &global.store {
        let bytes = read_bytes(path)?;
        let store = PatternStore::from_bytes(&bytes, !global.no_compression)?;
        if global.eager {
            let evicted = store.materialize_all();
            if evicted > 0 {
                tracing::warn!(evicted, path = %path.display(), "store held unparsable patterns");
            }
        }
        return Ok(store);
    }

    if let Some(path) = &global.patterns {
        return store_from_pattern_file(path, global);
    }

    Ok(PatternStore::from_patterns(
        bulgarian::patterns(),
        store_options(global),
    )?)
}

pub fn build_hyphenator(global: &GlobalArgs) -> Result<Hyphenator> {
    let engine = HyphenationEngine::new(load_store(global)?)
        .with_margins(global.left_margin, global.right_margin);
    Ok(Hyphenator::new(engine).with_delimiter(global.delimiter.clone()))
}

fn log_cache_stats(hyph: &Hyphenator) {
    let stats = hyph.engine().cache_stats();
    tracing::info!(
        hits = stats.hits,
        misses = stats.misses,
        entries = stats.entries,
        "word cache"
    );
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

pub fn run_words(global: &GlobalArgs, args: &WordsArgs, out: &mut impl Write) -> Result<()> {
    let hyph = build_hyphenator(global)?;
    for word in &args.words {
        writeln!(out, "{}", hyph.hyphenate(word))?;
    }
    log_cache_stats(&hyph);
    Ok(())
}

/// Hyphenate every line of the word list. Results are joined by newlines in
/// input order and written next to the input, one output line per input
/// line; blank lines stay blank.
pub fn run_file(global: &GlobalArgs, args: &FileArgs, out: &mut impl Write) -> Result<()> {
    let hyph = build_hyphenator(global)?;
    let text = read_string(&args.path)?;

    let results: Vec<String> = text.lines().map(|line| hyph.hyphenate(line)).collect();

    let output = output_path(&args.path);
    write_bytes(&output, results.join("\n").as_bytes())?;
    tracing::info!(lines = results.len(), output = %output.display(), "hyphenated word list");
    log_cache_stats(&hyph);

    writeln!(out, "{}", output.display())?;
    Ok(())
}

pub fn run_compile(global: &GlobalArgs, args: &CompileArgs, out: &mut impl Write) -> Result<()> {
    if args.patterns == args.output {
        return Err(CliError::invalid(format!(
            "output would overwrite the pattern file {}",
            args.patterns.display()
        )));
    }

    let store = store_from_pattern_file(&args.patterns, global)?;
    let bytes = store.serialize(!global.no_compression)?;
    write_bytes(&args.output, &bytes)?;
    tracing::info!(
        patterns = store.len(),
        bytes = bytes.len(),
        compressed = !global.no_compression,
        "compiled store"
    );

    writeln!(
        out,
        "compiled {} patterns into {}",
        store.len(),
        args.output.display()
    )?;
    Ok(())
}
