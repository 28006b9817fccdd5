//! mutsim - Point Mutation Simulator
//!
//! Applies one substitution, insertion or deletion to a nucleotide sequence
//! and reports the effect on the translated protein.
//!
//! ## Usage
//!
//! ```bash
//! mutsim -s ATGTTTAAA substitute --position 6 --base T
//! mutsim --fasta genes.fa --record NM_000518.5 -g 1 insert --position 10 --bases GG
//! mutsim -s ATGTTTAAA -g 2 delete --position 3
//! mutsim codes
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use tracing::info;

use mutsim::genetic_code::GeneticCodes;
use mutsim::logging::init_logging;
use mutsim::mutation::Mutation;
use mutsim::render::{write_code_list, write_record_header, write_report, RenderOptions};
use mutsim::sequence::validate;
use mutsim::simulate::simulate;
use mutsim::source::{FastaSource, SequenceFetcher, SequenceRecord};

/// Where the input sequence comes from.
#[derive(ClapArgs, Debug)]
struct InputArgs {
    /// Nucleotide sequence (IUPAC codes, case-insensitive)
    #[arg(short = 's', long = "sequence", conflicts_with = "fasta")]
    sequence: Option<String>,

    /// FASTA file to read the sequence from
    #[arg(long = "fasta")]
    fasta: Option<PathBuf>,

    /// Record id to pick from the FASTA file (default: first record)
    #[arg(long = "record", requires = "fasta")]
    record: Option<String>,
}

/// The mutation to apply, or another action.
#[derive(Subcommand, Debug)]
enum Command {
    /// Replace one base
    Substitute {
        /// 0-based position of the base to replace
        #[arg(short = 'p', long = "position")]
        position: usize,
        /// New base
        #[arg(short = 'b', long = "base")]
        base: String,
    },
    /// Insert one or more bases before a position
    Insert {
        /// 0-based insertion point (the sequence length appends)
        #[arg(short = 'p', long = "position")]
        position: usize,
        /// Bases to insert
        #[arg(short = 'b', long = "bases")]
        bases: String,
    },
    /// Remove one base
    Delete {
        /// 0-based position of the base to remove
        #[arg(short = 'p', long = "position")]
        position: usize,
    },
    /// List the available genetic code tables
    Codes,
}

/// mutsim - simulate a point mutation and report its effect on the protein
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    input: InputArgs,

    /// Genetic code for translation (NCBI id, 1-33, default: 1 = Standard)
    #[arg(
        short = 'g',
        long = "genetic-code",
        default_value = "1",
        value_parser = clap::value_parser!(u8).range(1..=33),
        global = true
    )]
    genetic_code: u8,

    /// Output file. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-", global = true)]
    output: String,

    /// Wrap sequences in the report to this many columns
    #[arg(short = 'w', long = "width", value_parser = clap::value_parser!(u16).range(10..), global = true)]
    width: Option<u16>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Command {
    fn to_mutation(&self) -> Result<Option<Mutation>> {
        let mutation = match self {
            Command::Substitute { position, base } => Mutation::substitution(*position, base)
                .with_context(|| format!("Invalid base '{}'", base))?,
            Command::Insert { position, bases } => Mutation::insertion(*position, bases)
                .with_context(|| format!("Invalid bases '{}'", bases))?,
            Command::Delete { position } => Mutation::deletion(*position),
            Command::Codes => return Ok(None),
        };
        Ok(Some(mutation))
    }
}

/// Resolves the input sequence and, for FASTA input, the record it came from.
fn load_input(input: &InputArgs) -> Result<(mutsim::Sequence, Option<SequenceRecord>)> {
    if let Some(raw) = &input.sequence {
        let sequence = validate(raw.trim()).context("Invalid sequence")?;
        if sequence.is_empty() {
            bail!("Empty sequence");
        }
        return Ok((sequence, None));
    }

    let Some(path) = &input.fasta else {
        bail!("No input sequence: use -s/--sequence or --fasta");
    };

    let source = FastaSource::new(path);
    let record = match &input.record {
        Some(id) => source.fetch(id),
        None => source.first(),
    }
    .with_context(|| format!("Could not load sequence from {}", path.display()))?;

    Ok((record.sequence.clone(), Some(record)))
}

fn open_output(output: &str) -> Result<Box<dyn Write>> {
    if output == "-" {
        Ok(Box::new(BufWriter::new(io::stdout().lock())))
    } else {
        let file = File::create(output)
            .with_context(|| format!("Failed to create output file {}", output))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let Some(mutation) = args.command.to_mutation()? else {
        let mut out = open_output(&args.output)?;
        write_code_list(&mut out, GeneticCodes::ncbi().all())?;
        out.flush()?;
        return Ok(());
    };

    let (sequence, record) = load_input(&args.input)?;
    let report = simulate(&sequence, &mutation, args.genetic_code)?;

    let options = RenderOptions {
        width: args.width.map(usize::from),
    };
    let mut out = open_output(&args.output)?;
    if let Some(record) = &record {
        write_record_header(&mut out, record)?;
    }
    write_report(&mut out, &report, options)?;
    out.flush()?;

    if args.output != "-" {
        info!(output = %args.output, "report written");
    }

    Ok(())
}
