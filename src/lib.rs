//! # star-solver
//!
//! A library for calling star-allele diplotypes from single-sample variant
//! calls.
//!
//! Pharmacogenes are described by *named alleles* (star alleles such as `*1`
//! or `*17`): named combinations of alleles at the genomic positions a gene
//! depends on. Given a library of such definitions and the genotypes a sample
//! carries at those positions, `star-solver` pairs two named alleles against
//! the two chromosomal strands of the sample, scores every consistent pair by
//! how specifically it pins the sample down, and reports the ranked
//! *diplotypes* per gene together with diagnostic context: which positions
//! were missing from the input, and which haplotypes that made uncallable.
//!
//! ## Features
//!
//! - **Phasing-aware matching**: phased genotypes keep their strand
//!   assignment; unphased heterozygotes are expanded over both orderings
//! - **Missing-data handling**: haplotypes invalidated by missing positions
//!   are dropped and reported, optionally assuming reference instead
//! - **Specificity scoring**: narrow haplotypes outrank the permissive
//!   reference, with deterministic tie-breaking
//! - **Stable output**: identical inputs produce identical gene calls
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use star_solver::{DefinitionStore, DiplotypeCaller};
//!
//! // Load a directory of per-gene definition files
//! let store = DefinitionStore::load_from_dir(Path::new("definitions/")).unwrap();
//!
//! // Call diplotypes for a single-sample VCF
//! let caller = DiplotypeCaller::new(&store);
//! let result = caller.call(Path::new("sample.vcf")).unwrap();
//!
//! for call in &result.gene_calls {
//!     for diplotype in &call.diplotypes {
//!         println!("{}: {} (score {})", call.gene, diplotype.name, diplotype.score);
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: data model for definitions and sample observations
//! - [`definitions`]: definition library loading and indexing
//! - [`parsing`]: single-sample VCF reading
//! - [`matching`]: match preparation, patterns, scoring, and the pair search
//! - [`results`]: the result container, builder, and JSON serialization
//! - [`cli`]: command-line interface implementation

pub mod cli;
pub mod core;
pub mod definitions;
pub mod matching;
pub mod parsing;
pub mod results;

// Re-export commonly used types for convenience
pub use crate::core::gene::{GeneDefinition, NamedAllele, VariantLocus};
pub use crate::core::sample::SampleAllele;
pub use crate::core::types::{ConfigError, ReportFormat};
pub use crate::definitions::store::DefinitionStore;
pub use crate::matching::engine::{CallError, DiplotypeCaller, MatcherConfig};
pub use crate::results::{CallResult, GeneCall};
