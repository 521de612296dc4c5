use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::core::gene::{GeneDefinition, NamedAllele, VariantLocus};

#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Failed to read definition: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{gene}: named allele {allele} carries {found} alleles for {expected} positions")]
    PositionCountMismatch {
        gene: String,
        allele: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate definition for gene {0}")]
    DuplicateGene(String),
}

/// The library of allele definitions, one [`GeneDefinition`] per gene.
///
/// Built once, immutable afterwards. Genes iterate in a stable sorted order
/// so that repeated calls over the same library produce identical results.
#[derive(Debug, Default)]
pub struct DefinitionStore {
    definitions: BTreeMap<String, GeneDefinition>,
}

impl DefinitionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions: BTreeMap::new(),
        }
    }

    /// Load every `*.json` definition file in a directory
    pub fn load_from_dir(dir: &Path) -> Result<Self, DefinitionError> {
        let mut store = Self::new();
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in paths {
            let content = std::fs::read_to_string(&path)?;
            let definition: GeneDefinition = serde_json::from_str(&content)?;
            debug!(
                "Loaded {} ({} positions, {} named alleles) from {}",
                definition.gene,
                definition.variants.len(),
                definition.named_alleles.len(),
                path.display()
            );
            store.add_definition(definition)?;
        }
        Ok(store)
    }

    /// Parse a single definition from a JSON string
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: GeneDefinition = serde_json::from_str(json)?;
        let mut store = Self::new();
        store.add_definition(definition)?;
        Ok(store)
    }

    /// Add a definition, validating the positions/alleles length invariant
    pub fn add_definition(&mut self, definition: GeneDefinition) -> Result<(), DefinitionError> {
        let expected = definition.position_count();
        for named in &definition.named_alleles {
            if named.alleles.len() != expected {
                return Err(DefinitionError::PositionCountMismatch {
                    gene: definition.gene.clone(),
                    allele: named.name.clone(),
                    expected,
                    found: named.alleles.len(),
                });
            }
        }
        if self.definitions.contains_key(&definition.gene) {
            return Err(DefinitionError::DuplicateGene(definition.gene));
        }
        self.definitions.insert(definition.gene.clone(), definition);
        Ok(())
    }

    /// Gene names in stable sorted order
    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// All definitions in stable sorted gene order
    pub fn definitions(&self) -> impl Iterator<Item = &GeneDefinition> {
        self.definitions.values()
    }

    /// Get the definition for a gene
    #[must_use]
    pub fn get(&self, gene: &str) -> Option<&GeneDefinition> {
        self.definitions.get(gene)
    }

    /// Ordered positions of a gene
    #[must_use]
    pub fn positions_of(&self, gene: &str) -> Option<&[VariantLocus]> {
        self.get(gene).map(|d| d.variants.as_slice())
    }

    /// Named haplotypes of a gene
    #[must_use]
    pub fn haplotypes_of(&self, gene: &str) -> Option<&[NamedAllele]> {
        self.get(gene).map(|d| d.named_alleles.as_slice())
    }

    /// Chromosome of a gene
    #[must_use]
    pub fn chromosome_of(&self, gene: &str) -> Option<&str> {
        self.get(gene).map(|d| d.chromosome.as_str())
    }

    /// Union of `chromosome:vcfPosition` keys across all genes, used to
    /// filter the input variant file down to sites that matter
    #[must_use]
    pub fn locations_of_interest(&self) -> HashSet<String> {
        self.definitions
            .values()
            .flat_map(GeneDefinition::location_keys)
            .collect()
    }

    /// Number of genes in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
