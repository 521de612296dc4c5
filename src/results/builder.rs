use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::core::gene::GeneDefinition;
use crate::matching::diplotype::DiplotypeMatch;
use crate::matching::match_data::MatchData;
use crate::results::{
    CallResult, Diplotype, GeneCall, HaplotypeRecord, Metadata, PositionRecord, VariantRecord,
};

/// Matcher version recorded in every result
pub const MATCHER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Assembles per-gene results into a [`CallResult`]
#[derive(Debug, Default)]
pub struct ResultBuilder {
    input_filename: String,
    timestamp: Option<String>,
    gene_calls: Vec<GeneCall>,
}

impl ResultBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the input file this result was produced from
    #[must_use]
    pub fn for_file(mut self, path: &Path) -> Self {
        self.input_filename = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        self
    }

    /// Pin the metadata timestamp, for reproducible output
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Append one gene's call. Genes without matches still contribute a
    /// [`GeneCall`] so that missing data is visible in the result.
    pub fn add_gene(
        &mut self,
        definition: &GeneDefinition,
        data: &MatchData,
        matches: Vec<DiplotypeMatch>,
    ) {
        let variants = data
            .observed()
            .map(|(locus, sample)| VariantRecord {
                position: locus.position,
                rsid: locus.rsid.clone(),
                vcf_position: locus.vcf_position,
                vcf_call: sample.vcf_call(),
                vcf_alleles: sample.vcf_alleles.clone(),
            })
            .collect();

        let missing_positions = data
            .missing_positions
            .iter()
            .map(|locus| PositionRecord {
                position: locus.position,
                rsid: locus.rsid.clone(),
                vcf_position: locus.vcf_position,
            })
            .collect();

        // every haplotype appearing in any match, sequences merged
        let mut matched: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for pair in &matches {
            for side in [pair.haplotype1(), pair.haplotype2()] {
                matched
                    .entry(side.name().to_string())
                    .or_default()
                    .extend(side.sequences().iter().cloned());
            }
        }
        let haplotypes = matched
            .into_iter()
            .map(|(name, sequences)| HaplotypeRecord {
                name,
                sequences: sequences.into_iter().collect(),
            })
            .collect();

        let diplotypes = matches
            .iter()
            .map(|pair| Diplotype {
                name: pair.name().to_string(),
                score: pair.score(),
                haplotype1: pair.haplotype1().name().to_string(),
                haplotype2: pair.haplotype2().name().to_string(),
            })
            .collect();

        self.gene_calls.push(GeneCall {
            gene: definition.gene.clone(),
            chromosome: definition.chromosome.clone(),
            diplotypes,
            haplotypes,
            variants,
            missing_positions,
            uncallable_haplotypes: data.uncallable_haplotypes.clone(),
        });
    }

    #[must_use]
    pub fn build(self) -> CallResult {
        CallResult {
            metadata: Metadata {
                input_filename: self.input_filename,
                timestamp: self
                    .timestamp
                    .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
                version: MATCHER_VERSION.to_string(),
            },
            gene_calls: self.gene_calls,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::gene::{NamedAllele, VariantLocus};
    use crate::core::sample::SampleAllele;
    use crate::matching::diplotype::DiplotypeMatcher;

    fn definition() -> GeneDefinition {
        GeneDefinition::new("GENE", "chr7")
            .with_variants(vec![
                VariantLocus::new(100, 1100, "A")
                    .with_rsid("rs100")
                    .with_alleles(vec!["A".into(), "T".into()]),
                VariantLocus::new(200, 1200, "G").with_alleles(vec!["G".into(), "C".into()]),
            ])
            .with_named_alleles(vec![
                NamedAllele::new("*1", vec![Some("A".into()), Some("G".into())]),
                NamedAllele::new("*2", vec![Some("T".into()), Some("G".into())]),
            ])
    }

    fn prepared(samples: Vec<SampleAllele>) -> (MatchData, Vec<DiplotypeMatch>) {
        let definition = definition();
        let alleles: BTreeMap<String, SampleAllele> = samples
            .into_iter()
            .map(|s| (s.chr_position(), s))
            .collect();
        let mut data = MatchData::new(&alleles, &definition);
        data.marshall_haplotypes(&definition.named_alleles, false);
        data.compile_haplotypes();
        data.generate_sample_permutations();
        let matches = DiplotypeMatcher::new(&data).compute();
        (data, matches)
    }

    #[test]
    fn test_build_populates_metadata() {
        let result = ResultBuilder::new()
            .for_file(Path::new("/data/sample.vcf"))
            .with_timestamp("2024-05-01T00:00:00+00:00")
            .build();

        assert_eq!(result.metadata.input_filename, "sample.vcf");
        assert_eq!(result.metadata.timestamp, "2024-05-01T00:00:00+00:00");
        assert_eq!(result.metadata.version, MATCHER_VERSION);
        assert!(result.gene_calls.is_empty());
    }

    #[test]
    fn test_add_gene_with_matches() {
        let (data, matches) = prepared(vec![
            SampleAllele::new("chr7", 1100, "A", "T", false, vec!["A".into(), "T".into()]),
            SampleAllele::new("chr7", 1200, "G", "G", true, vec!["G".into()]),
        ]);

        let mut builder = ResultBuilder::new();
        builder.add_gene(&definition(), &data, matches);
        let result = builder.build();

        let call = &result.gene_calls[0];
        assert_eq!(call.gene, "GENE");
        assert_eq!(call.variants.len(), 2);
        assert_eq!(call.variants[0].rsid.as_deref(), Some("rs100"));
        assert_eq!(call.variants[0].vcf_call, "A/T");
        assert_eq!(call.diplotypes.len(), 1);
        assert_eq!(call.diplotypes[0].name, "*1/*2");
        assert_eq!(call.haplotypes.len(), 2);
        assert!(call.missing_positions.is_empty());
    }

    #[test]
    fn test_add_gene_without_data() {
        let (data, matches) = prepared(Vec::new());
        assert!(matches.is_empty());

        let mut builder = ResultBuilder::new();
        builder.add_gene(&definition(), &data, matches);
        let result = builder.build();

        let call = &result.gene_calls[0];
        assert!(!call.is_called());
        assert!(call.variants.is_empty());
        assert_eq!(call.missing_positions.len(), 2);
        assert_eq!(call.uncallable_haplotypes, vec!["*1", "*2"]);
    }
}
