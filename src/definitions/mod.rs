//! Allele definition storage.
//!
//! A definition library is a directory of per-gene JSON files, each listing
//! the genomic positions the gene depends on and the named haplotypes defined
//! over those positions:
//!
//! ```json
//! {
//!   "gene": "CYP2C19",
//!   "chromosome": "chr10",
//!   "variants": [
//!     { "position": 3205, "rsid": "rs12248560", "vcfPosition": 94761900,
//!       "ref": "C", "alleles": ["C", "T"] }
//!   ],
//!   "namedAlleles": [
//!     { "name": "*1",  "alleles": ["C"] },
//!     { "name": "*17", "alleles": ["T"] }
//!   ]
//! }
//! ```
//!
//! Each named allele's `alleles` array is parallel to `variants`; `null`
//! means the haplotype does not constrain that position.

pub mod store;
