//! Per-gene match preparation.
//!
//! A [`MatchData`] is the fully prepared search instance for one gene and one
//! sample: gene positions aligned to the sample's observations, haplotypes
//! that survived missing data, and the enumerated strand permutations.
//! Preparation runs in a fixed order: projection, haplotype marshalling,
//! optional reference defaulting, pattern compilation, permutation
//! generation.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::core::gene::{GeneDefinition, NamedAllele, VariantLocus};
use crate::core::sample::SampleAllele;
use crate::matching::pattern::HaplotypePattern;

/// One concrete assignment of sample alleles to the two strands.
///
/// `strand_a`/`strand_b` hold one allele per retained position, in gene
/// order; the rendered forms are the canonical `pos:allele;…` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePermutation {
    pub strand_a: Vec<String>,
    pub strand_b: Vec<String>,
    pub rendered_a: String,
    pub rendered_b: String,
}

/// A retained haplotype mid-preparation: projected onto the retained
/// positions, slots still optional until defaulting/compilation.
#[derive(Debug, Clone)]
struct WorkingHaplotype {
    name: String,
    slots: Vec<Option<String>>,
}

/// Prepared search instance for one gene and one sample call
#[derive(Debug, Clone, Default)]
pub struct MatchData {
    pub gene: String,
    pub chromosome: String,

    /// All gene positions, in definition order
    pub positions: Vec<VariantLocus>,

    /// Positions with no sample data
    pub missing_positions: Vec<VariantLocus>,

    /// Haplotypes that remain callable, compiled into patterns
    pub haplotypes: Vec<HaplotypePattern>,

    /// Names of haplotypes dropped over missing positions, sorted
    pub uncallable_haplotypes: Vec<String>,

    /// Enumerated strand permutations over the retained positions
    pub permutations: Vec<SamplePermutation>,

    retained_loci: Vec<VariantLocus>,
    retained_samples: Vec<SampleAllele>,
    missing_indexes: Vec<usize>,
    working: Vec<WorkingHaplotype>,
}

impl MatchData {
    /// Project the sample's observations onto a gene's positions
    #[must_use]
    pub fn new(alleles: &BTreeMap<String, SampleAllele>, definition: &GeneDefinition) -> Self {
        let mut data = Self {
            gene: definition.gene.clone(),
            chromosome: definition.chromosome.clone(),
            positions: definition.variants.clone(),
            ..Self::default()
        };

        for (index, locus) in definition.variants.iter().enumerate() {
            let key = format!("{}:{}", definition.chromosome, locus.vcf_position);
            match alleles.get(&key) {
                Some(sample) => {
                    data.retained_loci.push(locus.clone());
                    data.retained_samples.push(sample.clone());
                }
                None => {
                    data.missing_positions.push(locus.clone());
                    data.missing_indexes.push(index);
                }
            }
        }
        data
    }

    /// Number of gene positions the sample has data for
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.retained_samples.len()
    }

    /// Retained positions paired with their sample observations, gene order
    pub fn observed(&self) -> impl Iterator<Item = (&VariantLocus, &SampleAllele)> {
        self.retained_loci.iter().zip(&self.retained_samples)
    }

    /// The positions the search operates over
    #[must_use]
    pub fn retained_loci(&self) -> &[VariantLocus] {
        &self.retained_loci
    }

    /// Decide which haplotypes remain callable given the missing positions.
    ///
    /// A haplotype constraining a missing position is dropped, unless
    /// assume-reference is on and the constraint is exactly the reference
    /// allele: a missing site is then presumed homozygous reference, which a
    /// non-reference constraint contradicts while a reference constraint
    /// trivially satisfies. Survivors are projected onto the retained
    /// positions.
    pub fn marshall_haplotypes(&mut self, named_alleles: &[NamedAllele], assume_reference: bool) {
        self.working.clear();
        let mut uncallable = Vec::new();

        'next_allele: for named in named_alleles {
            for &index in &self.missing_indexes {
                if let Some(allele) = named.allele_at(index) {
                    if !assume_reference || allele != self.positions[index].reference {
                        uncallable.push(named.name.clone());
                        continue 'next_allele;
                    }
                }
            }
            let slots = self
                .observed_indexes()
                .map(|i| named.alleles[i].clone())
                .collect();
            self.working.push(WorkingHaplotype {
                name: named.name.clone(),
                slots,
            });
        }

        uncallable.sort();
        self.uncallable_haplotypes = uncallable;
    }

    /// Fill every still-unconstrained slot with the position's reference
    /// allele, so that unconstrained no longer means "matches anything"
    pub fn default_missing_to_reference(&mut self) {
        for haplotype in &mut self.working {
            for (slot, locus) in haplotype.slots.iter_mut().zip(&self.retained_loci) {
                if slot.is_none() {
                    *slot = Some(locus.reference.clone());
                }
            }
        }
    }

    /// Compile the retained haplotypes into patterns over the retained
    /// positions; remaining unconstrained slots become the any-allele
    /// wildcard
    pub fn compile_haplotypes(&mut self) {
        self.haplotypes = self
            .working
            .iter()
            .map(|h| HaplotypePattern::compile(h.name.as_str(), &h.slots, &self.retained_loci))
            .collect();
    }

    /// Enumerate strand permutations: phased and homozygous sites contribute
    /// one ordered pair, unphased heterozygous sites contribute both
    /// orderings. Grows as `2^h` in the number of unphased het sites.
    pub fn generate_sample_permutations(&mut self) {
        self.permutations.clear();
        if self.retained_samples.is_empty() {
            return;
        }

        let het_unphased = self
            .retained_samples
            .iter()
            .filter(|s| !s.phased && s.is_heterozygous())
            .count();
        if het_unphased > 16 {
            warn!(
                "{}: {het_unphased} unphased heterozygous sites expand to {} permutations",
                self.gene,
                1u64 << het_unphased
            );
        }

        let mut strands: Vec<(Vec<String>, Vec<String>)> = vec![(Vec::new(), Vec::new())];
        for sample in &self.retained_samples {
            let choices: Vec<(&str, &str)> = if sample.phased || !sample.is_heterozygous() {
                vec![(sample.allele_a.as_str(), sample.allele_b.as_str())]
            } else {
                vec![
                    (sample.allele_a.as_str(), sample.allele_b.as_str()),
                    (sample.allele_b.as_str(), sample.allele_a.as_str()),
                ]
            };

            let mut expanded = Vec::with_capacity(strands.len() * choices.len());
            for (strand_a, strand_b) in &strands {
                for (a, b) in &choices {
                    let mut next_a = strand_a.clone();
                    let mut next_b = strand_b.clone();
                    next_a.push((*a).to_string());
                    next_b.push((*b).to_string());
                    expanded.push((next_a, next_b));
                }
            }
            strands = expanded;
        }

        let mut seen: BTreeSet<(String, String)> = BTreeSet::new();
        for (strand_a, strand_b) in strands {
            let rendered_a = self.render_strand(&strand_a);
            let rendered_b = self.render_strand(&strand_b);
            if seen.insert((rendered_a.clone(), rendered_b.clone())) {
                self.permutations.push(SamplePermutation {
                    strand_a,
                    strand_b,
                    rendered_a,
                    rendered_b,
                });
            }
        }
    }

    /// Canonical `pos1:allele;pos2:allele;…` rendering of one strand
    fn render_strand(&self, alleles: &[String]) -> String {
        self.retained_loci
            .iter()
            .zip(alleles)
            .map(|(locus, allele)| format!("{}:{allele}", locus.vcf_position))
            .collect::<Vec<_>>()
            .join(";")
    }

    fn observed_indexes(&self) -> impl Iterator<Item = usize> + '_ {
        let missing: BTreeSet<usize> = self.missing_indexes.iter().copied().collect();
        (0..self.positions.len()).filter(move |i| !missing.contains(i))
    }
}
