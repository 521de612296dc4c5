//! Command-line interface for star-solver.
//!
//! Available commands:
//!
//! - **call**: call diplotypes for a single-sample VCF
//! - **definitions**: list or inspect an allele definition library
//!
//! ## Usage
//!
//! ```text
//! # Call diplotypes against a definition library
//! star-solver call sample.vcf -d definitions/
//!
//! # Keep every candidate instead of only the top scorers
//! star-solver call sample.vcf -d definitions/ --all-candidates
//!
//! # Score missing positions as reference
//! star-solver call sample.vcf -d definitions/ --assume-reference
//!
//! # JSON output for scripting
//! star-solver call sample.vcf -d definitions/ --format json
//!
//! # Inspect one gene's definition
//! star-solver definitions -d definitions/ --gene CYP2C19
//! ```

use clap::{Parser, Subcommand};

pub mod call;
pub mod definitions;

#[derive(Parser)]
#[command(name = "star-solver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Call star-allele diplotypes for pharmacogenes from a single-sample VCF")]
#[command(
    long_about = "star-solver matches the genotypes observed in a single-sample VCF against a library of star-allele definitions.\n\nFor every gene in the library it reports:\n- Ranked diplotype calls with specificity scores\n- The variants the call was based on\n- Positions missing from the VCF and the haplotypes those made uncallable"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Call diplotypes for a single-sample VCF
    Call(call::CallArgs),

    /// List or inspect allele definitions
    Definitions(definitions::DefinitionsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
