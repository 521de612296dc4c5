use serde::{Deserialize, Serialize};

/// The sample's observed genotype at a single site.
///
/// Homozygous calls are always treated as phased, regardless of the separator
/// the input used; strand assignment of two identical alleles is vacuous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleAllele {
    /// Chromosome this site is on
    pub chromosome: String,

    /// Position of this site in the VCF
    pub position: u64,

    /// Allele called on strand a
    pub allele_a: String,

    /// Allele called on strand b
    pub allele_b: String,

    /// Whether the two strand alleles are phased
    pub phased: bool,

    /// All alleles declared at this site (REF plus ALTs), verbatim
    pub vcf_alleles: Vec<String>,
}

impl SampleAllele {
    pub fn new(
        chromosome: impl Into<String>,
        position: u64,
        allele_a: impl Into<String>,
        allele_b: impl Into<String>,
        phased: bool,
        vcf_alleles: Vec<String>,
    ) -> Self {
        let allele_a = allele_a.into();
        let allele_b = allele_b.into();
        // homozygous is phased by definition
        let phased = phased || allele_a == allele_b;
        Self {
            chromosome: chromosome.into(),
            position,
            allele_a,
            allele_b,
            phased,
            vcf_alleles,
        }
    }

    /// `chromosome:position` key for this site
    #[must_use]
    pub fn chr_position(&self) -> String {
        format!("{}:{}", self.chromosome, self.position)
    }

    #[must_use]
    pub fn is_heterozygous(&self) -> bool {
        self.allele_a != self.allele_b
    }

    /// The genotype as called, e.g. `A|T` or `A/T`
    #[must_use]
    pub fn vcf_call(&self) -> String {
        let sep = if self.phased { '|' } else { '/' };
        format!("{}{}{}", self.allele_a, sep, self.allele_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homozygous_is_phased() {
        let sa = SampleAllele::new("chr3", 100, "A", "A", false, vec!["A".into(), "T".into()]);
        assert!(sa.phased);
        assert!(!sa.is_heterozygous());
        assert_eq!(sa.vcf_call(), "A|A");
    }

    #[test]
    fn test_heterozygous_unphased() {
        let sa = SampleAllele::new("chr7", 200, "A", "T", false, vec!["A".into(), "T".into()]);
        assert!(!sa.phased);
        assert!(sa.is_heterozygous());
        assert_eq!(sa.vcf_call(), "A/T");
    }

    #[test]
    fn test_heterozygous_phased() {
        let sa = SampleAllele::new("chr7", 200, "T", "A", true, vec!["A".into(), "T".into()]);
        assert!(sa.phased);
        assert_eq!(sa.vcf_call(), "T|A");
    }

    #[test]
    fn test_chr_position_key() {
        let sa = SampleAllele::new("chr10", 94761900, "C", "C", true, vec!["C".into()]);
        assert_eq!(sa.chr_position(), "chr10:94761900");
    }

    #[test]
    fn test_indel_alleles_are_literal() {
        let sa = SampleAllele::new(
            "chr1",
            50,
            "ATCT",
            "A",
            false,
            vec!["ATCT".into(), "A".into()],
        );
        assert!(sa.is_heterozygous());
        assert_eq!(sa.vcf_call(), "ATCT/A");
    }
}
