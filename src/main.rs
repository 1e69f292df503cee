use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use syntrec::corpus::{expand_line, write_document, MalformedTermPolicy};
use syntrec::TermCodec;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "syntrec", about = "Decode syntactic terms and generate wildcard templates")]
struct Cli {
    /// Log per-document details (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a term and print its canonical encoding and tree outline.
    Decode {
        /// Encoded term, e.g. `gene:1:express:0:cell`.
        term: String,
    },
    /// Print the generalized templates of a term, one per line.
    Templates {
        /// Encoded term.
        term: String,
        /// Maximum generalization depth (integer or `unbounded`).
        #[arg(long)]
        max_depth: String,
    },
    /// Append templates to every document line of a term file.
    Expand {
        /// Term file (`<document_id> <term> <term> ...` per line).
        input: PathBuf,
        /// Maximum generalization depth (integer or `unbounded`).
        #[arg(long)]
        max_depth: String,
        /// What a malformed term does: skip-term, skip-document or abort.
        #[arg(long, default_value_t = MalformedTermPolicy::SkipTerm)]
        on_error: MalformedTermPolicy,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Decode { term } => run_decode(&term)?,
        Commands::Templates { term, max_depth } => run_templates(&term, &max_depth)?,
        Commands::Expand {
            input,
            max_depth,
            on_error,
        } => run_expand(input, &max_depth, on_error)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run_decode(term: &str) -> Result<()> {
    let tree = syntrec::decode(term).with_context(|| format!("failed to decode '{}'", term))?;

    println!("{}", tree);
    print!("{}", tree.outline());
    Ok(())
}

fn codec_for(max_depth: &str) -> Result<TermCodec> {
    TermCodec::from_depth_str(max_depth)
        .with_context(|| format!("invalid --max-depth '{}'", max_depth))
}

fn run_templates(term: &str, max_depth: &str) -> Result<()> {
    let codec = codec_for(max_depth)?;
    let tree = codec
        .decode(term)
        .with_context(|| format!("failed to decode '{}'", term))?;

    for template in codec.generalize(&tree) {
        println!("{}", template);
    }
    Ok(())
}

fn run_expand(
    input_path: PathBuf,
    max_depth: &str,
    policy: MalformedTermPolicy,
) -> Result<()> {
    let codec = codec_for(max_depth)?;
    let reader = BufReader::new(File::open(&input_path).with_context(|| {
        format!("failed to open term file {}", input_path.display())
    })?);
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    let mut written = 0usize;
    let mut dropped = 0usize;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!("failed to read line {} of {}", line_no + 1, input_path.display())
        })?;
        if line.trim().is_empty() {
            continue;
        }

        match expand_line(&codec, &line, policy)
            .with_context(|| format!("malformed term on line {}", line_no + 1))?
        {
            Some(document) => {
                write_document(&mut writer, &document)?;
                written += 1;
            }
            None => dropped += 1,
        }
    }
    writer.flush()?;

    info!(
        input = %input_path.display(),
        max_depth = %codec.depth(),
        %policy,
        written,
        dropped,
        "expansion finished"
    );
    Ok(())
}
