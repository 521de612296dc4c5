use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::definitions::store::DefinitionStore;
use crate::matching::engine::{DiplotypeCaller, MatcherConfig};
use crate::results::{serializer, CallResult, GeneCall};

#[derive(Args)]
pub struct CallArgs {
    /// Single-sample VCF to call diplotypes for
    #[arg(required = true)]
    pub vcf: PathBuf,

    /// Directory of allele definition files (one JSON file per gene)
    #[arg(short = 'd', long)]
    pub definition_dir: PathBuf,

    /// Also write the result to a .json file
    #[arg(long)]
    pub json_out: Option<PathBuf>,

    /// Score missing positions as carrying the reference allele
    #[arg(long)]
    pub assume_reference: bool,

    /// Report every matching diplotype instead of only the top scorers
    #[arg(long)]
    pub all_candidates: bool,

    /// List definition haplotypes that matched nothing
    #[arg(long)]
    pub show_unmatched: bool,
}

/// Execute the call subcommand
///
/// # Errors
///
/// Returns an error if the definition library or the VCF cannot be read, or
/// if the requested output file cannot be written.
pub fn run(args: &CallArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = DefinitionStore::load_from_dir(&args.definition_dir)?;
    if store.is_empty() {
        anyhow::bail!(
            "no allele definitions found in {}",
            args.definition_dir.display()
        );
    }
    if verbose {
        eprintln!("Loaded {} gene definitions", store.len());
        if args.assume_reference {
            eprintln!("Missing positions scored as reference");
        }
    }

    let config = MatcherConfig {
        assume_reference: args.assume_reference,
        top_candidate_only: !args.all_candidates,
        always_show_unmatched: args.show_unmatched,
    };
    let caller = DiplotypeCaller::with_config(&store, config);
    let result = caller.call(&args.vcf)?;
    let show_unmatched = caller.config().always_show_unmatched;

    if let Some(path) = &args.json_out {
        serializer::to_json(&result, path)?;
        if verbose {
            eprintln!("Wrote {}", path.display());
        }
    }

    match format {
        OutputFormat::Text => print_text_result(&result, &store, show_unmatched),
        OutputFormat::Json => println!("{}", serializer::to_json_string(&result)?),
    }
    Ok(())
}

fn print_text_result(result: &CallResult, store: &DefinitionStore, show_unmatched: bool) {
    println!(
        "Input: {}  (matcher {})",
        result.metadata.input_filename, result.metadata.version
    );
    for call in &result.gene_calls {
        println!("\n{} ({})", call.gene, call.chromosome);
        print_gene_call(call, store, show_unmatched);
    }
}

fn print_gene_call(call: &GeneCall, store: &DefinitionStore, show_unmatched: bool) {
    if call.is_called() {
        for diplotype in &call.diplotypes {
            println!("  {}  (score {})", diplotype.name, diplotype.score);
        }
    } else {
        println!("  no call");
    }

    for variant in &call.variants {
        let rsid = variant.rsid.as_deref().unwrap_or("-");
        println!(
            "    {}:{}  {}  [{}]  {}",
            call.chromosome,
            variant.vcf_position,
            rsid,
            variant.vcf_alleles.join(","),
            variant.vcf_call
        );
    }

    let total = call.variants.len() + call.missing_positions.len();
    if !call.missing_positions.is_empty() {
        let positions: Vec<String> = call
            .missing_positions
            .iter()
            .map(|p| p.vcf_position.to_string())
            .collect();
        println!(
            "  missing {} of {} positions: {}",
            call.missing_positions.len(),
            total,
            positions.join(", ")
        );
    }
    if !call.uncallable_haplotypes.is_empty() {
        println!("  uncallable: {}", call.uncallable_haplotypes.join(", "));
    }

    if show_unmatched {
        if let Some(named) = store.haplotypes_of(&call.gene) {
            let unmatched: Vec<&str> = named
                .iter()
                .map(|n| n.name.as_str())
                .filter(|name| {
                    !call.haplotypes.iter().any(|h| h.name == *name)
                        && !call.uncallable_haplotypes.iter().any(|u| u == name)
                })
                .collect();
            if !unmatched.is_empty() {
                println!("  unmatched: {}", unmatched.join(", "));
            }
        }
    }
}
