//! Compiled haplotype patterns.
//!
//! A retained haplotype is compiled into one pattern slot per retained
//! position: either an alternation of literal alleles or the any-allele
//! wildcard. Matching a sample strand is a direct position-by-position
//! string comparison; the `pos:allele;…` rendering (with `.?` standing for
//! the wildcard) is an interchange form for reporting, not the matching
//! mechanism.

use crate::core::gene::VariantLocus;
use crate::matching::scoring;

/// The any-allele token used in definitions and pattern renderings
pub const ANY_TOKEN: &str = ".?";

/// What a haplotype accepts at one position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllelePattern {
    /// Matches any sample allele
    Any,
    /// Matches any one of these literal alleles
    OneOf(Vec<String>),
}

impl AllelePattern {
    /// Compile one definition allele string.
    ///
    /// Single-character IUPAC ambiguity codes expand to their base
    /// alternation; everything else (bases, indel strings) stays literal.
    #[must_use]
    pub fn literal(allele: &str) -> Self {
        if allele == ANY_TOKEN {
            return Self::Any;
        }
        let mut chars = allele.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(bases) = expand_iupac(c) {
                return Self::OneOf(bases.iter().map(|b| (*b).to_string()).collect());
            }
        }
        Self::OneOf(vec![allele.to_string()])
    }

    #[must_use]
    pub fn matches(&self, allele: &str) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(options) => options.iter().any(|o| o == allele),
        }
    }

    /// Interchange rendering: `.?`, a bare literal, or `(a|b)`
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Any => ANY_TOKEN.to_string(),
            Self::OneOf(options) if options.len() == 1 => options[0].clone(),
            Self::OneOf(options) => format!("({})", options.join("|")),
        }
    }
}

/// Base alternation for a single-character IUPAC ambiguity code
fn expand_iupac(code: char) -> Option<&'static [&'static str]> {
    match code {
        'R' => Some(&["A", "G"]),
        'Y' => Some(&["C", "T"]),
        'S' => Some(&["C", "G"]),
        'W' => Some(&["A", "T"]),
        'K' => Some(&["G", "T"]),
        'M' => Some(&["A", "C"]),
        'B' => Some(&["C", "G", "T"]),
        'D' => Some(&["A", "G", "T"]),
        'H' => Some(&["A", "C", "T"]),
        'V' => Some(&["A", "C", "G"]),
        'N' => Some(&["A", "C", "G", "T"]),
        _ => None,
    }
}

/// A named haplotype compiled over the retained positions of a gene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaplotypePattern {
    name: String,
    slots: Vec<AllelePattern>,
    score: u32,
    rendered: String,
}

impl HaplotypePattern {
    /// Compile a haplotype's (projected) slots against the retained loci.
    /// `None` slots compile to the any-allele wildcard.
    #[must_use]
    pub fn compile(name: impl Into<String>, slots: &[Option<String>], loci: &[VariantLocus]) -> Self {
        debug_assert_eq!(slots.len(), loci.len());
        let slots: Vec<AllelePattern> = slots
            .iter()
            .map(|slot| match slot {
                Some(allele) => AllelePattern::literal(allele),
                None => AllelePattern::Any,
            })
            .collect();
        let score = scoring::haplotype_score(loci, &slots);
        let rendered = loci
            .iter()
            .zip(&slots)
            .map(|(locus, slot)| format!("{}:{}", locus.vcf_position, slot.render()))
            .collect::<Vec<_>>()
            .join(";");

        Self {
            name: name.into(),
            slots,
            score,
            rendered,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Specificity score: definition-allowed alleles this haplotype rules out
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The `pos:allele;…` interchange form
    #[must_use]
    pub fn pattern_string(&self) -> &str {
        &self.rendered
    }

    #[must_use]
    pub fn slots(&self) -> &[AllelePattern] {
        &self.slots
    }

    /// Test whether a sample strand (one allele per retained position, in
    /// order) is consistent with this haplotype
    #[must_use]
    pub fn matches(&self, strand: &[String]) -> bool {
        self.slots.len() == strand.len()
            && self
                .slots
                .iter()
                .zip(strand)
                .all(|(slot, allele)| slot.matches(allele))
    }
}
