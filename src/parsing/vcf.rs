//! Reader for single-sample VCF files.
//!
//! Only the subset of VCF the matcher needs is read: per-site chromosome,
//! position, REF/ALT alleles, and the GT sub-field of the first sample
//! column. Sites outside the positions of interest are skipped without
//! parsing their genotype.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::core::sample::SampleAllele;

#[derive(Error, Debug)]
pub enum VcfError {
    #[error("Input is not a regular file: {0}")]
    MissingInput(PathBuf),

    #[error("Failed to read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("Malformed VCF line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

impl VcfError {
    fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            reason: reason.into(),
        }
    }
}

/// Read a single-sample VCF file, keeping only sites whose
/// `chromosome:position` key appears in `locations`.
pub fn read_sample_file(
    path: &Path,
    locations: &HashSet<String>,
) -> Result<BTreeMap<String, SampleAllele>, VcfError> {
    if !path.is_file() {
        return Err(VcfError::MissingInput(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    read_sample_text(&content, locations)
}

/// Read single-sample VCF text, keeping only sites of interest
pub fn read_sample_text(
    text: &str,
    locations: &HashSet<String>,
) -> Result<BTreeMap<String, SampleAllele>, VcfError> {
    let mut alleles = BTreeMap::new();

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(sample) = parse_data_line(line, number, locations)? {
            let key = sample.chr_position();
            if alleles.contains_key(&key) {
                warn!("Duplicate site {key} on line {number}, keeping the first");
                continue;
            }
            alleles.insert(key, sample);
        }
    }
    Ok(alleles)
}

/// Parse one data line. Returns `Ok(None)` for sites that are skipped:
/// outside the positions of interest, or carrying a missing genotype.
fn parse_data_line(
    line: &str,
    number: usize,
    locations: &HashSet<String>,
) -> Result<Option<SampleAllele>, VcfError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 10 {
        return Err(VcfError::malformed(
            number,
            format!(
                "expected at least 10 tab-separated fields, found {}",
                fields.len()
            ),
        ));
    }

    let chromosome = fields[0];
    let position: u64 = fields[1]
        .parse()
        .map_err(|_| VcfError::malformed(number, format!("invalid position {:?}", fields[1])))?;

    if !locations.contains(&format!("{chromosome}:{position}")) {
        return Ok(None);
    }

    let reference = fields[3];
    if reference.is_empty() || reference == "." {
        return Err(VcfError::malformed(number, "missing REF allele"));
    }

    // REF plus every declared ALT, preserved verbatim for provenance
    let mut vcf_alleles = vec![reference.to_string()];
    if fields[4] != "." {
        vcf_alleles.extend(fields[4].split(',').map(str::to_string));
    }

    let genotype = genotype_field(&fields, number)?;
    let Some((a_index, b_index, phased)) = parse_genotype(genotype, number)? else {
        warn!("Missing genotype at {chromosome}:{position} (line {number}), skipping site");
        return Ok(None);
    };

    let fetch = |idx: usize| -> Result<&String, VcfError> {
        vcf_alleles.get(idx).ok_or_else(|| {
            VcfError::malformed(
                number,
                format!(
                    "genotype references allele {idx} but only {} are declared",
                    vcf_alleles.len()
                ),
            )
        })
    };
    let allele_a = fetch(a_index)?.clone();
    let allele_b = fetch(b_index)?.clone();

    Ok(Some(SampleAllele::new(
        chromosome,
        position,
        allele_a,
        allele_b,
        phased,
        vcf_alleles,
    )))
}

/// Locate the GT sub-field of the first sample column via the FORMAT column
fn genotype_field<'a>(fields: &[&'a str], number: usize) -> Result<&'a str, VcfError> {
    let gt_index = fields[8]
        .split(':')
        .position(|key| key == "GT")
        .ok_or_else(|| VcfError::malformed(number, "FORMAT column has no GT field"))?;
    fields[9]
        .split(':')
        .nth(gt_index)
        .ok_or_else(|| VcfError::malformed(number, "sample column is missing the GT field"))
}

/// Parse a diploid GT value into allele indexes and a phased flag.
/// Returns `Ok(None)` when either allele is missing (`.`).
fn parse_genotype(
    genotype: &str,
    number: usize,
) -> Result<Option<(usize, usize, bool)>, VcfError> {
    let (separator, phased) = if genotype.contains('|') {
        ('|', true)
    } else if genotype.contains('/') {
        ('/', false)
    } else {
        return Err(VcfError::malformed(
            number,
            format!("genotype {genotype:?} is not diploid"),
        ));
    };

    let mut parts = genotype.split(separator);
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(VcfError::malformed(
            number,
            format!("genotype {genotype:?} is not diploid"),
        ));
    };
    if a == "." || b == "." {
        return Ok(None);
    }

    let parse = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| VcfError::malformed(number, format!("invalid allele index {s:?}")))
    };
    Ok(Some((parse(a)?, parse(b)?, phased)))
}
