//! End-to-end tests driving the matcher through on-disk definition
//! libraries and VCF files.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use star_solver::parsing::vcf::read_sample_file;
use star_solver::results::serializer;
use star_solver::{DefinitionStore, DiplotypeCaller, MatcherConfig};

const VCF_HEADER: &str = "##fileformat=VCFv4.2\n\
    #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tSAMPLE\n";

fn write_definition(dir: &Path, name: &str, json: &str) {
    std::fs::write(dir.join(format!("{name}.json")), json).unwrap();
}

fn write_vcf(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("sample.vcf");
    std::fs::write(&path, format!("{VCF_HEADER}{body}")).unwrap();
    path
}

/// Two positions; *1 is the reference haplotype, *2 differs at the first
fn two_site_gene() -> &'static str {
    r#"{
        "gene": "GENEA",
        "chromosome": "chr7",
        "variants": [
            {"position": 100, "vcfPosition": 100, "ref": "A", "alleles": ["A", "T"]},
            {"position": 200, "vcfPosition": 200, "ref": "G", "alleles": ["G"]}
        ],
        "namedAlleles": [
            {"name": "*1", "alleles": ["A", "G"]},
            {"name": "*2", "alleles": ["T", "G"]}
        ]
    }"#
}

#[test]
fn phasing_detection() {
    let dir = TempDir::new().unwrap();
    write_definition(
        dir.path(),
        "genea",
        r#"{
            "gene": "GENEA",
            "chromosome": "chr3",
            "variants": [
                {"position": 100, "vcfPosition": 100, "ref": "A", "alleles": ["A", "T"]},
                {"position": 200, "vcfPosition": 200, "ref": "G", "alleles": ["G", "C"]}
            ],
            "namedAlleles": [{"name": "*1", "alleles": ["A", "G"]}]
        }"#,
    );
    write_definition(
        dir.path(),
        "geneb",
        r#"{
            "gene": "GENEB",
            "chromosome": "chr7",
            "variants": [
                {"position": 300, "vcfPosition": 300, "ref": "C", "alleles": ["C", "T"]},
                {"position": 400, "vcfPosition": 400, "ref": "G", "alleles": ["G", "A"]}
            ],
            "namedAlleles": [{"name": "*1", "alleles": ["C", "G"]}]
        }"#,
    );
    let store = DefinitionStore::load_from_dir(dir.path()).unwrap();

    // chr3 all homozygous, chr7 heterozygous unphased
    let vcf = write_vcf(
        dir.path(),
        "chr3\t100\t.\tA\tT\t.\tPASS\t.\tGT\t0/0\n\
         chr3\t200\t.\tG\tC\t.\tPASS\t.\tGT\t1/1\n\
         chr7\t300\t.\tC\tT\t.\tPASS\t.\tGT\t0/1\n\
         chr7\t400\t.\tG\tA\t.\tPASS\t.\tGT\t0/1\n",
    );

    let alleles = read_sample_file(&vcf, &store.locations_of_interest()).unwrap();
    assert_eq!(alleles.len(), 4);
    for (key, sample) in &alleles {
        assert_eq!(key, &sample.chr_position());
        if sample.chromosome == "chr3" {
            // homozygous is treated as phased
            assert!(sample.phased, "{key} should be phased");
        } else {
            assert!(!sample.phased, "{key} should be unphased");
        }
    }
}

#[test]
fn reference_only_sample_calls_reference_diplotype() {
    let dir = TempDir::new().unwrap();
    write_definition(dir.path(), "genea", two_site_gene());
    let store = DefinitionStore::load_from_dir(dir.path()).unwrap();

    let vcf = write_vcf(
        dir.path(),
        "chr7\t100\t.\tA\tT\t.\tPASS\t.\tGT\t0|0\n\
         chr7\t200\t.\tG\t.\t.\tPASS\t.\tGT\t0|0\n",
    );

    let result = DiplotypeCaller::new(&store).call(&vcf).unwrap();
    let call = &result.gene_calls[0];

    assert_eq!(call.diplotypes.len(), 1);
    assert_eq!(call.diplotypes[0].name, "*1/*1");
    // *1 rules out T at position 100 on each strand; position 200 defines
    // only the reference and contributes nothing
    assert_eq!(call.diplotypes[0].score, 2);
    assert!(call.haplotypes.iter().all(|h| h.name != "*2"));
}

#[test]
fn unphased_heterozygote_yields_single_unordered_pair() {
    let dir = TempDir::new().unwrap();
    write_definition(
        dir.path(),
        "genea",
        r#"{
            "gene": "GENEA",
            "chromosome": "chr7",
            "variants": [
                {"position": 100, "vcfPosition": 100, "ref": "A", "alleles": ["A", "T"]}
            ],
            "namedAlleles": [
                {"name": "*1", "alleles": ["A"]},
                {"name": "*2", "alleles": ["T"]}
            ]
        }"#,
    );
    let store = DefinitionStore::load_from_dir(dir.path()).unwrap();

    let vcf = write_vcf(dir.path(), "chr7\t100\t.\tA\tT\t.\tPASS\t.\tGT\t0/1\n");
    let result = DiplotypeCaller::new(&store).call(&vcf).unwrap();
    let call = &result.gene_calls[0];

    // (A,T) and (T,A) both witness the same unordered pair, reported once
    assert_eq!(call.diplotypes.len(), 1);
    assert_eq!(call.diplotypes[0].name, "*1/*2");
}

#[test]
fn missing_position_drops_haplotypes() {
    let dir = TempDir::new().unwrap();
    write_definition(
        dir.path(),
        "genea",
        r#"{
            "gene": "GENEA",
            "chromosome": "chr7",
            "variants": [
                {"position": 100, "vcfPosition": 100, "ref": "A", "alleles": ["A", "T"]},
                {"position": 200, "vcfPosition": 200, "ref": "G", "alleles": ["G", "C"]}
            ],
            "namedAlleles": [
                {"name": "*1", "alleles": ["A", "G"]},
                {"name": "*3", "alleles": ["A", "C"]}
            ]
        }"#,
    );
    let store = DefinitionStore::load_from_dir(dir.path()).unwrap();
    let vcf = write_vcf(dir.path(), "chr7\t100\t.\tA\tT\t.\tPASS\t.\tGT\t0|0\n");

    // without assume-reference both haplotypes constrain the missing 200
    let result = DiplotypeCaller::new(&store).call(&vcf).unwrap();
    let call = &result.gene_calls[0];
    assert!(call.diplotypes.is_empty());
    assert_eq!(call.uncallable_haplotypes, vec!["*1", "*3"]);
    assert_eq!(call.missing_positions.len(), 1);
    assert_eq!(call.missing_positions[0].vcf_position, 200);

    // with assume-reference, *1 (declaring the reference G at 200) survives
    // and is called; *3 (declaring C) stays uncallable
    let caller = DiplotypeCaller::with_config(
        &store,
        MatcherConfig {
            assume_reference: true,
            ..MatcherConfig::default()
        },
    );
    let result = caller.call(&vcf).unwrap();
    let call = &result.gene_calls[0];
    assert_eq!(call.uncallable_haplotypes, vec!["*3"]);
    assert_eq!(call.diplotypes.len(), 1);
    assert_eq!(call.diplotypes[0].name, "*1/*1");
}

#[test]
fn top_candidate_filtering() {
    let dir = TempDir::new().unwrap();
    write_definition(
        dir.path(),
        "genea",
        r#"{
            "gene": "GENEA",
            "chromosome": "chr7",
            "variants": [
                {"position": 100, "vcfPosition": 100, "ref": "A", "alleles": ["A", "T"]}
            ],
            "namedAlleles": [
                {"name": "*1", "alleles": ["A"]},
                {"name": "*2", "alleles": ["T"]},
                {"name": "*9", "alleles": [null]}
            ]
        }"#,
    );
    let store = DefinitionStore::load_from_dir(dir.path()).unwrap();
    let vcf = write_vcf(dir.path(), "chr7\t100\t.\tA\tT\t.\tPASS\t.\tGT\t0/1\n");

    let result = DiplotypeCaller::new(&store).call(&vcf).unwrap();
    let call = &result.gene_calls[0];
    assert_eq!(call.diplotypes.len(), 1);
    assert_eq!(call.diplotypes[0].name, "*1/*2");

    let caller = DiplotypeCaller::with_config(
        &store,
        MatcherConfig {
            top_candidate_only: false,
            ..MatcherConfig::default()
        },
    );
    let result = caller.call(&vcf).unwrap();
    let call = &result.gene_calls[0];
    let scores: Vec<u32> = call.diplotypes.iter().map(|d| d.score).collect();
    assert_eq!(scores, vec![2, 1, 1, 0]);
    // descending order is strictly maintained
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn gene_without_data_is_reported_not_omitted() {
    let dir = TempDir::new().unwrap();
    write_definition(dir.path(), "genea", two_site_gene());
    write_definition(
        dir.path(),
        "geneb",
        r#"{
            "gene": "GENEB",
            "chromosome": "chr10",
            "variants": [
                {"position": 500, "vcfPosition": 500, "ref": "C", "alleles": ["C", "T"]}
            ],
            "namedAlleles": [
                {"name": "*1", "alleles": ["C"]},
                {"name": "*4", "alleles": ["T"]}
            ]
        }"#,
    );
    let store = DefinitionStore::load_from_dir(dir.path()).unwrap();

    // sample only covers GENEA
    let vcf = write_vcf(
        dir.path(),
        "chr7\t100\t.\tA\tT\t.\tPASS\t.\tGT\t0|0\n\
         chr7\t200\t.\tG\t.\t.\tPASS\t.\tGT\t0|0\n",
    );
    let result = DiplotypeCaller::new(&store).call(&vcf).unwrap();
    assert_eq!(result.gene_calls.len(), 2);

    let geneb = result
        .gene_calls
        .iter()
        .find(|c| c.gene == "GENEB")
        .unwrap();
    assert!(geneb.diplotypes.is_empty());
    assert!(geneb.variants.is_empty());
    assert_eq!(geneb.missing_positions.len(), 1);
    assert_eq!(geneb.uncallable_haplotypes, vec!["*1", "*4"]);
}

#[test]
fn result_round_trips_through_json() {
    let dir = TempDir::new().unwrap();
    write_definition(dir.path(), "genea", two_site_gene());
    let store = DefinitionStore::load_from_dir(dir.path()).unwrap();
    let vcf = write_vcf(
        dir.path(),
        "chr7\t100\t.\tA\tT\t.\tPASS\t.\tGT\t0/1\n\
         chr7\t200\t.\tG\t.\t.\tPASS\t.\tGT\t0|0\n",
    );

    let result = DiplotypeCaller::new(&store).call(&vcf).unwrap();
    let path = dir.path().join("result.json");
    serializer::to_json(&result, &path).unwrap();
    let restored = serializer::from_json(&path).unwrap();
    assert_eq!(restored, result);
}

#[test]
fn repeated_calls_are_deterministic() {
    let dir = TempDir::new().unwrap();
    write_definition(dir.path(), "genea", two_site_gene());
    let store = DefinitionStore::load_from_dir(dir.path()).unwrap();
    let vcf = write_vcf(
        dir.path(),
        "chr7\t100\t.\tA\tT\t.\tPASS\t.\tGT\t0/1\n\
         chr7\t200\t.\tG\t.\t.\tPASS\t.\tGT\t0|0\n",
    );

    let caller = DiplotypeCaller::new(&store);
    let first = caller.call(&vcf).unwrap();
    let second = caller.call(&vcf).unwrap();

    // gene calls (everything except the run timestamp) are byte-identical
    assert_eq!(first.gene_calls, second.gene_calls);
    assert_eq!(
        serde_json::to_string(&first.gene_calls).unwrap(),
        serde_json::to_string(&second.gene_calls).unwrap()
    );
    assert_eq!(first.metadata.version, second.metadata.version);
}
