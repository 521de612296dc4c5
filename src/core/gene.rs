use serde::{Deserialize, Serialize};

/// A single genomic position a gene definition depends on.
///
/// `position` is the coordinate used by the definition itself (it may be
/// negative for promoter-region variants), while `vcf_position` is the
/// coordinate the sample file reports the site at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantLocus {
    /// Position used in the allele definition
    pub position: i64,

    /// dbSNP identifier, when one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsid: Option<String>,

    /// Position of this site in the VCF
    pub vcf_position: u64,

    /// Reference allele at this site
    #[serde(rename = "ref")]
    pub reference: String,

    /// All alleles the definition allows at this site (includes the reference)
    pub alleles: Vec<String>,
}

impl VariantLocus {
    pub fn new(position: i64, vcf_position: u64, reference: impl Into<String>) -> Self {
        let reference = reference.into();
        Self {
            position,
            rsid: None,
            vcf_position,
            alleles: vec![reference.clone()],
            reference,
        }
    }

    #[must_use]
    pub fn with_rsid(mut self, rsid: impl Into<String>) -> Self {
        self.rsid = Some(rsid.into());
        self
    }

    #[must_use]
    pub fn with_alleles(mut self, alleles: Vec<String>) -> Self {
        self.alleles = alleles;
        self
    }
}

/// A named haplotype (e.g. `*1`, `*17`).
///
/// `alleles` is parallel to the gene's position list; the i-th slot holds the
/// allele this haplotype carries at position i, or `None` when the haplotype
/// does not constrain that position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAllele {
    pub name: String,
    pub alleles: Vec<Option<String>>,
}

impl NamedAllele {
    pub fn new(name: impl Into<String>, alleles: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            alleles,
        }
    }

    /// The allele this haplotype carries at position index `i`, if constrained
    #[must_use]
    pub fn allele_at(&self, i: usize) -> Option<&str> {
        self.alleles.get(i).and_then(|a| a.as_deref())
    }
}

/// Allele definition for one gene: the positions it depends on and the named
/// haplotypes defined over those positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneDefinition {
    /// Gene symbol (e.g. `CYP2C19`)
    pub gene: String,

    /// Chromosome all of this gene's positions live on
    pub chromosome: String,

    /// Ordered positions this gene depends on
    pub variants: Vec<VariantLocus>,

    /// Named haplotypes, each parallel to `variants`
    pub named_alleles: Vec<NamedAllele>,
}

impl GeneDefinition {
    pub fn new(gene: impl Into<String>, chromosome: impl Into<String>) -> Self {
        Self {
            gene: gene.into(),
            chromosome: chromosome.into(),
            variants: Vec::new(),
            named_alleles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_variants(mut self, variants: Vec<VariantLocus>) -> Self {
        self.variants = variants;
        self
    }

    #[must_use]
    pub fn with_named_alleles(mut self, named_alleles: Vec<NamedAllele>) -> Self {
        self.named_alleles = named_alleles;
        self
    }

    /// Number of positions this gene depends on
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.variants.len()
    }

    /// `chromosome:vcfPosition` keys for every position of this gene
    pub fn location_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.variants
            .iter()
            .map(|v| format!("{}:{}", self.chromosome, v.vcf_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_definition_json() {
        let json = r#"{
            "gene": "CYP2C19",
            "chromosome": "chr10",
            "variants": [
                {"position": 3205, "rsid": "rs12248560", "vcfPosition": 94761900, "ref": "C", "alleles": ["C", "T"]},
                {"position": 19154, "vcfPosition": 94781859, "ref": "G", "alleles": ["G", "A"]}
            ],
            "namedAlleles": [
                {"name": "*1", "alleles": ["C", "G"]},
                {"name": "*2", "alleles": [null, "A"]}
            ]
        }"#;

        let def: GeneDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.gene, "CYP2C19");
        assert_eq!(def.chromosome, "chr10");
        assert_eq!(def.variants.len(), 2);
        assert_eq!(def.variants[0].rsid.as_deref(), Some("rs12248560"));
        assert_eq!(def.variants[0].reference, "C");
        assert_eq!(def.variants[1].rsid, None);
        assert_eq!(def.named_alleles.len(), 2);
        assert_eq!(def.named_alleles[1].allele_at(0), None);
        assert_eq!(def.named_alleles[1].allele_at(1), Some("A"));
    }

    #[test]
    fn test_definition_round_trip() {
        let def = GeneDefinition::new("CYP2C9", "chr10")
            .with_variants(vec![
                VariantLocus::new(100, 1000, "A").with_alleles(vec!["A".into(), "T".into()])
            ])
            .with_named_alleles(vec![
                NamedAllele::new("*1", vec![Some("A".into())]),
                NamedAllele::new("*2", vec![Some("T".into())]),
            ]);

        let json = serde_json::to_string(&def).unwrap();
        assert!(json.contains("\"vcfPosition\""));
        assert!(json.contains("\"ref\":\"A\""));
        let parsed: GeneDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, def);
    }

    #[test]
    fn test_location_keys() {
        let def = GeneDefinition::new("VKORC1", "chr16").with_variants(vec![
            VariantLocus::new(-1639, 31096368, "G"),
            VariantLocus::new(1173, 31093557, "C"),
        ]);

        let keys: Vec<String> = def.location_keys().collect();
        assert_eq!(keys, vec!["chr16:31096368", "chr16:31093557"]);
    }

    #[test]
    fn test_allele_at_out_of_range() {
        let na = NamedAllele::new("*1", vec![Some("A".into())]);
        assert_eq!(na.allele_at(5), None);
    }
}
