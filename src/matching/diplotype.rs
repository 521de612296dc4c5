//! Diplotype search.
//!
//! Pairs two haplotype patterns against the two strands of every sample
//! permutation. An unordered pair matches when some permutation has one
//! haplotype consistent with strand a and the other with strand b, in either
//! orientation. Matched pairs are scored by summed specificity and ranked.

use std::collections::BTreeSet;

use crate::matching::match_data::MatchData;
use crate::matching::pattern::HaplotypePattern;

/// A haplotype together with the strand sequences it was consistent with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaplotypeMatch {
    haplotype: HaplotypePattern,
    sequences: BTreeSet<String>,
}

impl HaplotypeMatch {
    fn new(haplotype: HaplotypePattern, sequences: BTreeSet<String>) -> Self {
        Self {
            haplotype,
            sequences,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.haplotype.name()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.haplotype.score()
    }

    #[must_use]
    pub fn haplotype(&self) -> &HaplotypePattern {
        &self.haplotype
    }

    /// Matched strand sequences, in canonical rendered form
    #[must_use]
    pub fn sequences(&self) -> &BTreeSet<String> {
        &self.sequences
    }
}

/// An unordered pair of haplotype matches explaining both sample strands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiplotypeMatch {
    name: String,
    score: u32,
    haplotype1: HaplotypeMatch,
    haplotype2: HaplotypeMatch,
    witness: (String, String),
}

impl DiplotypeMatch {
    /// Build a match; the pair is canonicalized so the lexicographically
    /// smaller haplotype name comes first
    #[must_use]
    pub fn new(h1: HaplotypeMatch, h2: HaplotypeMatch, witness: (String, String)) -> Self {
        let (haplotype1, haplotype2) = if h1.name() <= h2.name() {
            (h1, h2)
        } else {
            (h2, h1)
        };
        Self {
            name: format!("{}/{}", haplotype1.name(), haplotype2.name()),
            score: haplotype1.score() + haplotype2.score(),
            haplotype1,
            haplotype2,
            witness,
        }
    }

    /// The diplotype name, e.g. `*1/*17`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn haplotype1(&self) -> &HaplotypeMatch {
        &self.haplotype1
    }

    #[must_use]
    pub fn haplotype2(&self) -> &HaplotypeMatch {
        &self.haplotype2
    }

    /// The strand-sequence pair that witnessed this match
    #[must_use]
    pub fn witness(&self) -> (&str, &str) {
        (&self.witness.0, &self.witness.1)
    }
}

/// Searches a prepared [`MatchData`] for diplotype matches
pub struct DiplotypeMatcher<'a> {
    data: &'a MatchData,
}

impl<'a> DiplotypeMatcher<'a> {
    #[must_use]
    pub fn new(data: &'a MatchData) -> Self {
        Self { data }
    }

    /// Compute all matching pairs, sorted by descending score then by name
    #[must_use]
    pub fn compute(&self) -> Vec<DiplotypeMatch> {
        let permutations = &self.data.permutations;
        if permutations.is_empty() {
            return Vec::new();
        }

        // per-haplotype strand consistency, computed once
        struct StrandHits {
            a: Vec<bool>,
            b: Vec<bool>,
        }
        let hits: Vec<StrandHits> = self
            .data
            .haplotypes
            .iter()
            .map(|haplotype| StrandHits {
                a: permutations
                    .iter()
                    .map(|p| haplotype.matches(&p.strand_a))
                    .collect(),
                b: permutations
                    .iter()
                    .map(|p| haplotype.matches(&p.strand_b))
                    .collect(),
            })
            .collect();

        let matches: Vec<Option<HaplotypeMatch>> = self
            .data
            .haplotypes
            .iter()
            .zip(&hits)
            .map(|(haplotype, hit)| {
                let mut sequences = BTreeSet::new();
                for (index, permutation) in permutations.iter().enumerate() {
                    if hit.a[index] {
                        sequences.insert(permutation.rendered_a.clone());
                    }
                    if hit.b[index] {
                        sequences.insert(permutation.rendered_b.clone());
                    }
                }
                if sequences.is_empty() {
                    None
                } else {
                    Some(HaplotypeMatch::new(haplotype.clone(), sequences))
                }
            })
            .collect();

        let mut results = Vec::new();
        for i in 0..matches.len() {
            let Some(first) = &matches[i] else { continue };
            for (j, second) in matches.iter().enumerate().skip(i) {
                let Some(second) = second else { continue };

                // first permutation witnessing either orientation
                let witness = (0..permutations.len()).find_map(|k| {
                    if (hits[i].a[k] && hits[j].b[k]) || (hits[j].a[k] && hits[i].b[k]) {
                        Some((
                            permutations[k].rendered_a.clone(),
                            permutations[k].rendered_b.clone(),
                        ))
                    } else {
                        None
                    }
                });
                if let Some(witness) = witness {
                    results.push(DiplotypeMatch::new(first.clone(), second.clone(), witness));
                }
            }
        }

        results.sort_by(|x, y| {
            y.score()
                .cmp(&x.score())
                .then_with(|| x.name().cmp(y.name()))
        });
        results
    }
}
