//! ZPGen Command-Line Interface
//!
//! Compiles the two ZFIN phenotype annotation downloads into the ZP
//! ontology document plus four annotation files, optionally reusing
//! identifiers from a previous release.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Parser;
use tracing::info;

use zpgen_common::{Result, ZpGenError};
use zpgen_core::{Compiler, IdRegistry, ZfinFileType};

pub mod input;
pub mod ontology;
pub mod seed;

use ontology::FunctionalSyntaxDocument;

/// Annotation file names, written under the annotation directory
pub const GENE_POSITIVE_FILE: &str = "annot_gene_pos.txt";
pub const GENE_NEGATIVE_FILE: &str = "annot_gene_neg.txt";
pub const GENO_POSITIVE_FILE: &str = "annot_geno_pos.txt";
pub const GENO_NEGATIVE_FILE: &str = "annot_geno_neg.txt";

/// Generate the ZP ontology from ZFIN phenotype annotation downloads
#[derive(Debug, Parser)]
#[command(name = "zpgen", version, about)]
pub struct Cli {
    /// Phenotype-to-gene download (phenoGeneCleanData_fish.txt, .gz accepted)
    #[arg(long, value_name = "FILE")]
    pub gene_input: PathBuf,

    /// Phenotype-to-genotype download (phenotype_fish.txt, .gz accepted)
    #[arg(long, value_name = "FILE")]
    pub genotype_input: PathBuf,

    /// Where to write the ontology document
    #[arg(short = 'o', long, value_name = "FILE")]
    pub ontology_output: PathBuf,

    /// Directory for the four annotation files
    #[arg(short = 'a', long, value_name = "DIR")]
    pub annotation_dir: PathBuf,

    /// Ontology document from a previous release, used with --keep-ids
    #[arg(short = 'p', long, value_name = "FILE")]
    pub previous_ontology: Option<PathBuf>,

    /// Reuse identifiers from the previous release for unchanged classes
    #[arg(short = 'k', long)]
    pub keep_ids: bool,

    /// Annotate each class with the raw records that produced it
    #[arg(long)]
    pub add_source_information: bool,

    /// Where to write the per-class source report (implies
    /// --add-source-information)
    #[arg(short = 's', long, value_name = "FILE")]
    pub source_information_output: Option<PathBuf>,

    /// Assert ZFA-UBERON class equivalences from the UBERON xrefs
    #[arg(long)]
    pub add_zfa_uberon_equivalence: bool,

    /// UBERON OBO file, used with --add-zfa-uberon-equivalence
    #[arg(short = 'u', long, value_name = "FILE")]
    pub uberon_obo: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Execute one full compilation run
pub fn run(cli: &Cli) -> Result<()> {
    let registry = build_registry(cli)?;

    // Asking for the report file implies recording sources.
    let record_sources = cli.add_source_information || cli.source_information_output.is_some();
    let mut compiler = Compiler::new(registry, FunctionalSyntaxDocument::new(), record_sources);

    std::fs::create_dir_all(&cli.annotation_dir)
        .map_err(|e| ZpGenError::file(&cli.annotation_dir, e))?;
    let mut gene_positive = annotation_writer(&cli.annotation_dir, GENE_POSITIVE_FILE)?;
    let mut gene_negative = annotation_writer(&cli.annotation_dir, GENE_NEGATIVE_FILE)?;
    let mut geno_positive = annotation_writer(&cli.annotation_dir, GENO_POSITIVE_FILE)?;
    let mut geno_negative = annotation_writer(&cli.annotation_dir, GENO_NEGATIVE_FILE)?;

    info!(path = %cli.gene_input.display(), "compiling gene annotations");
    compiler.visit_roots(&mut gene_positive, &mut gene_negative)?;
    compiler.walk_file(
        input::open_input(&cli.gene_input)?,
        ZfinFileType::PhenoGenes,
        &mut gene_positive,
        &mut gene_negative,
    )?;

    info!(path = %cli.genotype_input.display(), "compiling genotype annotations");
    compiler.visit_roots(&mut geno_positive, &mut geno_negative)?;
    compiler.walk_file(
        input::open_input(&cli.genotype_input)?,
        ZfinFileType::PhenoGenotypes,
        &mut geno_positive,
        &mut geno_negative,
    )?;

    if cli.add_zfa_uberon_equivalence {
        let path = cli.uberon_obo.as_ref().ok_or_else(|| {
            ZpGenError::config("--add-zfa-uberon-equivalence requires --uberon-obo")
        })?;
        info!(path = %path.display(), "loading anatomy cross-references");
        let map = zpgen_core::uberon::zfa_to_uberon(input::open_input(path)?)?;
        compiler.add_term_equivalences(&map)?;
    }

    gene_positive.flush()?;
    gene_negative.flush()?;
    geno_positive.flush()?;
    geno_negative.flush()?;

    let (_, document, provenance, stats) = compiler.finish();

    let mut ontology_out = BufWriter::new(create_file(&cli.ontology_output)?);
    document.write_to(&mut ontology_out, Utc::now().date_naive())?;
    ontology_out.flush()?;

    if let Some(path) = &cli.source_information_output {
        let mut report = BufWriter::new(create_file(path)?);
        provenance.write_to(&mut report)?;
        report.flush()?;
    }

    info!("run summary: {}", serde_json::to_string(&stats)?);
    Ok(())
}

/// Build the identifier registry, seeded from the previous release when
/// requested
fn build_registry(cli: &Cli) -> Result<IdRegistry> {
    let mut registry = IdRegistry::new();

    if cli.keep_ids {
        let path = cli
            .previous_ontology
            .as_ref()
            .ok_or_else(|| ZpGenError::config("--keep-ids requires --previous-ontology"))?;
        info!(path = %path.display(), "recovering identifiers from previous release");
        let mappings = seed::recover_prior_mappings(input::open_input(path)?)?;
        registry.seed(mappings);
    }

    Ok(registry)
}

fn annotation_writer(dir: &Path, name: &str) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(create_file(&dir.join(name))?))
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| ZpGenError::file(path, e))
}
