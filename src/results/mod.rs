//! Result container types.
//!
//! A [`CallResult`] is the complete, caller-owned outcome of one matcher
//! invocation: run metadata plus one [`GeneCall`] per gene in the definition
//! library, in stable gene order. Genes without sample data still appear,
//! with empty diplotypes and their missing positions listed. All types
//! round-trip through JSON to equal values.

pub mod builder;
pub mod serializer;

use serde::{Deserialize, Serialize};

/// Run metadata attached to every result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Name of the input variant file
    pub input_filename: String,

    /// RFC 3339 timestamp of the call
    pub timestamp: String,

    /// Matcher version that produced this result
    pub version: String,
}

/// Complete result of one matcher invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResult {
    pub metadata: Metadata,
    pub gene_calls: Vec<GeneCall>,
}

/// Per-gene call: diplotypes plus diagnostic context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneCall {
    pub gene: String,
    pub chromosome: String,

    /// Matched diplotypes, descending score then name
    pub diplotypes: Vec<Diplotype>,

    /// Every haplotype appearing in any diplotype, with its matched sequences
    pub haplotypes: Vec<HaplotypeRecord>,

    /// Sites observed in the sample, in gene position order
    pub variants: Vec<VariantRecord>,

    /// Gene positions the sample had no data for
    pub missing_positions: Vec<PositionRecord>,

    /// Haplotypes eliminated from consideration by missing data
    pub uncallable_haplotypes: Vec<String>,
}

impl GeneCall {
    /// Whether any diplotype was called for this gene
    #[must_use]
    pub fn is_called(&self) -> bool {
        !self.diplotypes.is_empty()
    }
}

/// One called diplotype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diplotype {
    /// Pair name, e.g. `*1/*17`
    pub name: String,

    /// Summed specificity score
    pub score: u32,

    pub haplotype1: String,
    pub haplotype2: String,
}

/// A matched haplotype and the strand sequences it was consistent with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaplotypeRecord {
    pub name: String,
    pub sequences: Vec<String>,
}

/// An observed site, as reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub position: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsid: Option<String>,

    pub vcf_position: u64,

    /// The genotype as called, e.g. `A|T`
    pub vcf_call: String,

    /// All alleles declared at the site
    pub vcf_alleles: Vec<String>,
}

/// A definition position without sample data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    pub position: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsid: Option<String>,

    pub vcf_position: u64,
}
