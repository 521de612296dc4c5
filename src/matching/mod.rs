//! The haplotype matcher.
//!
//! Matching runs per gene, in four stages:
//!
//! 1. [`match_data::MatchData`] projects the sample's observations onto the
//!    gene's positions, decides which haplotypes remain callable given
//!    missing data, and enumerates the strand permutations of unphased
//!    heterozygous sites.
//! 2. [`pattern::HaplotypePattern`] compiles each retained haplotype into a
//!    per-position allele pattern.
//! 3. [`diplotype::DiplotypeMatcher`] pairs haplotypes against the two
//!    strands of every permutation, scores pairs by summed specificity
//!    ([`scoring`]), and ranks them.
//! 4. [`engine::DiplotypeCaller`] orchestrates the above for every gene of a
//!    definition store and assembles the final result.

pub mod diplotype;
pub mod engine;
pub mod match_data;
pub mod pattern;
pub mod scoring;
