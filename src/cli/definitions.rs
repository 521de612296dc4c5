use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::gene::GeneDefinition;
use crate::definitions::store::DefinitionStore;

#[derive(Args)]
pub struct DefinitionsArgs {
    /// Directory of allele definition files (one JSON file per gene)
    #[arg(short = 'd', long)]
    pub definition_dir: PathBuf,

    /// Show a single gene in detail
    #[arg(long)]
    pub gene: Option<String>,
}

/// Execute the definitions subcommand
///
/// # Errors
///
/// Returns an error if the definition library cannot be read or the requested
/// gene is not in it.
pub fn run(args: &DefinitionsArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let store = DefinitionStore::load_from_dir(&args.definition_dir)?;

    match &args.gene {
        Some(gene) => {
            let definition = store
                .get(gene)
                .ok_or_else(|| anyhow::anyhow!("no definition for gene {gene}"))?;
            match format {
                OutputFormat::Text => print_definition(definition),
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(definition)?);
                }
            }
        }
        None => match format {
            OutputFormat::Text => {
                println!("{:<12} {:<8} {:>9} {:>13}", "GENE", "CHROM", "POSITIONS", "NAMED ALLELES");
                for definition in store.definitions() {
                    println!(
                        "{:<12} {:<8} {:>9} {:>13}",
                        definition.gene,
                        definition.chromosome,
                        definition.variants.len(),
                        definition.named_alleles.len()
                    );
                }
            }
            OutputFormat::Json => {
                let all: Vec<&GeneDefinition> = store.definitions().collect();
                println!("{}", serde_json::to_string_pretty(&all)?);
            }
        },
    }
    Ok(())
}

fn print_definition(definition: &GeneDefinition) {
    println!("{} ({})", definition.gene, definition.chromosome);
    println!("positions:");
    for locus in &definition.variants {
        let rsid = locus.rsid.as_deref().unwrap_or("-");
        println!(
            "  {:>12}  vcf {:>12}  {}  ref {}  [{}]",
            locus.position,
            locus.vcf_position,
            rsid,
            locus.reference,
            locus.alleles.join(",")
        );
    }
    println!("named alleles:");
    for named in &definition.named_alleles {
        let slots: Vec<&str> = named
            .alleles
            .iter()
            .map(|slot| slot.as_deref().unwrap_or("."))
            .collect();
        println!("  {:<8} {}", named.name, slots.join(" "));
    }
}
