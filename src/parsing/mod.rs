//! Parsers for sample input files.
//!
//! The matcher consumes one single-sample VCF per call. Only sites at
//! positions of interest are retained, and only the fields the matcher needs
//! are parsed:
//!
//! | Column | Use |
//! |--------|-----|
//! | CHROM, POS | site key, aligned against gene definitions |
//! | REF, ALT | declared alleles, preserved verbatim |
//! | FORMAT, sample | GT sub-field: called alleles and phasing |
//!
//! The genotype separator carries phasing: `|` is phased, `/` is unphased.
//! Homozygous calls are always reported as phased.

pub mod vcf;
