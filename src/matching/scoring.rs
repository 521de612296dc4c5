//! Specificity scoring.
//!
//! A haplotype's score rewards narrow constraints: at each position it earns
//! one point per definition-allowed allele its slot rules out. The wildcard
//! rules out nothing; a literal at a two-allele position rules out one; a
//! position where only the reference is defined can never contribute. A
//! diplotype's score is the sum of both haplotypes' scores, so the permissive
//! reference haplotype ranks below anything that actually pinned the sample
//! down.

use std::collections::HashSet;

use crate::core::gene::VariantLocus;
use crate::matching::pattern::AllelePattern;

/// Definition-allowed alleles at this locus that `pattern` rules out
#[must_use]
pub fn position_weight(locus: &VariantLocus, pattern: &AllelePattern) -> u32 {
    let allowed: HashSet<&str> = locus.alleles.iter().map(String::as_str).collect();
    match pattern {
        AllelePattern::Any => 0,
        AllelePattern::OneOf(options) => {
            let accepted = allowed
                .iter()
                .filter(|allele| options.iter().any(|o| o == *allele))
                .count();
            u32::try_from(allowed.len() - accepted).unwrap_or(u32::MAX)
        }
    }
}

/// Sum of position weights across all retained positions
#[must_use]
pub fn haplotype_score(loci: &[VariantLocus], slots: &[AllelePattern]) -> u32 {
    loci.iter()
        .zip(slots)
        .map(|(locus, slot)| position_weight(locus, slot))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locus(alleles: &[&str]) -> VariantLocus {
        VariantLocus::new(100, 1100, alleles[0])
            .with_alleles(alleles.iter().map(|a| (*a).to_string()).collect())
    }

    #[test]
    fn test_literal_rules_out_alternatives() {
        let locus = locus(&["A", "T"]);
        let pattern = AllelePattern::literal("A");
        assert_eq!(position_weight(&locus, &pattern), 1);
    }

    #[test]
    fn test_wildcard_scores_zero() {
        let locus = locus(&["A", "T", "C"]);
        assert_eq!(position_weight(&locus, &AllelePattern::Any), 0);
    }

    #[test]
    fn test_reference_only_position_scores_zero() {
        let locus = locus(&["G"]);
        let pattern = AllelePattern::literal("G");
        assert_eq!(position_weight(&locus, &pattern), 0);
    }

    #[test]
    fn test_ambiguity_code_rules_out_fewer() {
        let locus = locus(&["A", "C", "T"]);
        // Y = C|T accepts two of the three allowed alleles
        let pattern = AllelePattern::literal("Y");
        assert_eq!(position_weight(&locus, &pattern), 1);
    }

    #[test]
    fn test_duplicate_allowed_alleles_counted_once() {
        let locus = locus(&["A", "A", "T"]);
        let pattern = AllelePattern::literal("A");
        assert_eq!(position_weight(&locus, &pattern), 1);
    }

    #[test]
    fn test_haplotype_score_sums_positions() {
        let loci = vec![
            VariantLocus::new(100, 1100, "A").with_alleles(vec!["A".into(), "T".into()]),
            VariantLocus::new(200, 1200, "G").with_alleles(vec!["G".into()]),
            VariantLocus::new(300, 1300, "C")
                .with_alleles(vec!["C".into(), "G".into(), "T".into()]),
        ];
        let slots = vec![
            AllelePattern::literal("T"),
            AllelePattern::literal("G"),
            AllelePattern::literal("C"),
        ];
        // 1 (of 2) + 0 (reference only) + 2 (of 3)
        assert_eq!(haplotype_score(&loci, &slots), 3);
    }
}
