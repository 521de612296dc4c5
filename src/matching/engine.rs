use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::core::gene::GeneDefinition;
use crate::core::sample::SampleAllele;
use crate::definitions::store::{DefinitionError, DefinitionStore};
use crate::matching::diplotype::{DiplotypeMatch, DiplotypeMatcher};
use crate::matching::match_data::MatchData;
use crate::parsing::vcf::{self, VcfError};
use crate::results::builder::ResultBuilder;
use crate::results::CallResult;

#[derive(Error, Debug)]
pub enum CallError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Vcf(#[from] VcfError),
}

/// Options controlling the matcher
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Treat unconstrained haplotype slots (and missing sample positions) as
    /// carrying the reference allele
    pub assume_reference: bool,

    /// Return only the diplotypes with the maximum score
    pub top_candidate_only: bool,

    /// Reporting-side only: also list definition haplotypes that matched
    /// nothing. Never affects the search.
    pub always_show_unmatched: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            assume_reference: false,
            top_candidate_only: true,
            always_show_unmatched: false,
        }
    }
}

/// The top-level matcher.
///
/// Immutable after construction: the definition store and configuration are
/// read-only, so one caller may be shared across threads and invoked on
/// distinct input files concurrently. Every per-call structure is owned by
/// the call and dropped with it.
pub struct DiplotypeCaller<'a> {
    store: &'a DefinitionStore,
    locations: HashSet<String>,
    config: MatcherConfig,
}

impl<'a> DiplotypeCaller<'a> {
    /// Create a caller with the default configuration
    #[must_use]
    pub fn new(store: &'a DefinitionStore) -> Self {
        Self::with_config(store, MatcherConfig::default())
    }

    #[must_use]
    pub fn with_config(store: &'a DefinitionStore, config: MatcherConfig) -> Self {
        Self {
            store,
            locations: store.locations_of_interest(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Call diplotypes for every gene in the definition store against one
    /// single-sample VCF. Genes without sample data still contribute a gene
    /// call listing their missing positions.
    pub fn call(&self, vcf_file: &Path) -> Result<CallResult, CallError> {
        let alleles = vcf::read_sample_file(vcf_file, &self.locations)?;
        debug!(
            "Read {} sample alleles of interest from {}",
            alleles.len(),
            vcf_file.display()
        );

        let mut builder = ResultBuilder::new().for_file(vcf_file);
        for definition in self.store.definitions() {
            let data = self.prepare(&alleles, definition);
            let matches = if data.sample_count() > 0 {
                self.call_diplotypes(&data)
            } else {
                Vec::new()
            };
            debug!("{}: {} diplotype(s)", definition.gene, matches.len());
            builder.add_gene(definition, &data, matches);
        }
        Ok(builder.build())
    }

    /// Prepare the per-gene search instance
    fn prepare(
        &self,
        alleles: &BTreeMap<String, SampleAllele>,
        definition: &GeneDefinition,
    ) -> MatchData {
        let mut data = MatchData::new(alleles, definition);
        data.marshall_haplotypes(&definition.named_alleles, self.config.assume_reference);
        if self.config.assume_reference {
            data.default_missing_to_reference();
        }
        data.compile_haplotypes();
        if data.sample_count() > 0 {
            data.generate_sample_permutations();
        }
        data
    }

    /// Run the pair search, keeping only top scorers when configured
    fn call_diplotypes(&self, data: &MatchData) -> Vec<DiplotypeMatch> {
        let mut pairs = DiplotypeMatcher::new(data).compute();
        if self.config.top_candidate_only && pairs.len() > 1 {
            let top = pairs[0].score();
            pairs.retain(|pair| pair.score() == top);
        }
        pairs
    }
}
