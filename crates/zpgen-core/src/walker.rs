// ZFIN Download File Walker
//
// Both download formats carry the same conceptual record at different
// column offsets; one parser is parameterized by a named offset table per
// format. See http://zfin.org/downloads for the current layouts (they
// change over the years).
//
// phenoGeneCleanData_fish.txt (phenotype-to-gene):
//   0 ID, 1 Gene Symbol, 2 Gene ID, 3/4 term1 subterm id/name,
//   5/6 post-composed relationship id/name, 7/8 term1 superterm id/name,
//   9/10 phenotype keyword id/name, 11 phenotype tag,
//   12/13 term2 subterm id/name, 14/15 relationship id/name,
//   16/17 term2 superterm id/name, 18+ fish/stage/publication columns
//
// phenotype_fish.txt (phenotype-to-genotype):
//   0 Fish ID, 1 Fish Name, 2-5 stage columns, 6/7 term1 subterm id/name,
//   8/9 relationship id/name, 10/11 term1 superterm id/name,
//   12/13 phenotype keyword id/name, 14 phenotype tag,
//   15/16 term2 subterm id/name, 17/18 relationship id/name,
//   19/20 term2 superterm id/name, 21+ publication/environment columns

use std::io::BufRead;

use tracing::debug;
use zpgen_common::{Result, ZpGenError};

use crate::entry::ZfinEntry;
use crate::{GO_VISUAL_PERCEPTION, PATO_ABSENT};

/// Which ZFIN download format a file uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZfinFileType {
    /// Phenotype-to-gene records (phenoGeneCleanData_fish.txt)
    PhenoGenes,
    /// Phenotype-to-genotype records (phenotype_fish.txt)
    PhenoGenotypes,
}

impl ZfinFileType {
    fn layout(self) -> &'static ColumnLayout {
        match self {
            ZfinFileType::PhenoGenes => &PHENO_GENES_LAYOUT,
            ZfinFileType::PhenoGenotypes => &PHENO_GENOTYPES_LAYOUT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZfinFileType::PhenoGenes => "pheno-genes",
            ZfinFileType::PhenoGenotypes => "pheno-genotypes",
        }
    }
}

impl std::fmt::Display for ZfinFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named column offsets for one format variant
#[derive(Debug)]
struct ColumnLayout {
    subject_id: usize,
    entity1_subterm_id: usize,
    entity1_subterm_name: usize,
    entity1_superterm_id: usize,
    entity1_superterm_name: usize,
    pato_id: usize,
    pato_name: usize,
    pato_modifier: usize,
    entity2_subterm_id: usize,
    entity2_subterm_name: usize,
    entity2_superterm_id: usize,
    entity2_superterm_name: usize,
    /// Minimum number of columns a line must split into
    min_columns: usize,
}

const PHENO_GENES_LAYOUT: ColumnLayout = ColumnLayout {
    subject_id: 2,
    entity1_subterm_id: 3,
    entity1_subterm_name: 4,
    entity1_superterm_id: 7,
    entity1_superterm_name: 8,
    pato_id: 9,
    pato_name: 10,
    pato_modifier: 11,
    entity2_subterm_id: 12,
    entity2_subterm_name: 13,
    entity2_superterm_id: 16,
    entity2_superterm_name: 17,
    min_columns: 18,
};

const PHENO_GENOTYPES_LAYOUT: ColumnLayout = ColumnLayout {
    subject_id: 0,
    entity1_subterm_id: 6,
    entity1_subterm_name: 7,
    entity1_superterm_id: 10,
    entity1_superterm_name: 11,
    pato_id: 12,
    pato_name: 13,
    pato_modifier: 14,
    entity2_subterm_id: 15,
    entity2_subterm_name: 16,
    entity2_superterm_id: 19,
    entity2_superterm_name: 20,
    min_columns: 21,
};

/// Parse one raw line into a [`ZfinEntry`].
///
/// The delimiter is detected per line: pipe if the line contains one, tab
/// otherwise. Trailing empty fields are preserved (no delimiter
/// collapsing). A line shorter than the layout requires, or a phenotype
/// tag that is neither "abnormal" nor "normal" (outside the one literal
/// "absent" fix), is a fatal [`ZpGenError::MalformedRecord`].
pub fn parse_line(line: &str, file_type: ZfinFileType) -> Result<ZfinEntry> {
    let layout = file_type.layout();

    let fields: Vec<&str> = if line.contains('|') {
        line.split('|').collect()
    } else {
        line.split('\t').collect()
    };

    if fields.len() < layout.min_columns {
        return Err(ZpGenError::malformed_record(
            format!(
                "expected at least {} columns, got {}",
                layout.min_columns,
                fields.len()
            ),
            line,
        ));
    }

    let modifier = fields[layout.pato_modifier];
    let mut entry = ZfinEntry {
        subject_id: fields[layout.subject_id].to_string(),
        entity1_superterm_id: fields[layout.entity1_superterm_id].to_string(),
        entity1_superterm_name: fields[layout.entity1_superterm_name].to_string(),
        entity1_subterm_id: fields[layout.entity1_subterm_id].to_string(),
        entity1_subterm_name: fields[layout.entity1_subterm_name].to_string(),
        entity2_superterm_id: fields[layout.entity2_superterm_id].to_string(),
        entity2_superterm_name: fields[layout.entity2_superterm_name].to_string(),
        entity2_subterm_id: fields[layout.entity2_subterm_id].to_string(),
        entity2_subterm_name: fields[layout.entity2_subterm_name].to_string(),
        pato_id: fields[layout.pato_id].to_string(),
        pato_name: fields[layout.pato_name].to_string(),
        is_abnormal: modifier == "abnormal",
        ..Default::default()
    };

    apply_phenotype_tag(modifier, &mut entry, line)?;

    // The fingerprint is fixed here, after the absent-coercion and before
    // any quality-term correction.
    entry.source_string = entry.source_fingerprint();

    Ok(entry)
}

/// Validate the phenotype tag and apply the one literal fix.
///
/// ZFIN has shipped a bare "absent" tag on visual perception annotations;
/// those coerce to abnormal with an "absent" quality. This rule is kept
/// as a literal: it applies to that one entity id only.
fn apply_phenotype_tag(modifier: &str, entry: &mut ZfinEntry, line: &str) -> Result<()> {
    if modifier == "absent" && entry.entity1_superterm_id == GO_VISUAL_PERCEPTION {
        entry.is_abnormal = true;
        entry.pato_id = PATO_ABSENT.to_string();
        entry.pato_name = "absent".to_string();
        return Ok(());
    }

    if modifier == "abnormal" || modifier == "normal" {
        return Ok(());
    }

    Err(ZpGenError::malformed_record(
        format!("expected phenotype tag normal/abnormal, found '{modifier}'"),
        line,
    ))
}

/// Stream a ZFIN download file, invoking `visit` for every parsed entry.
///
/// Any parse or visit failure aborts the walk immediately: a corrupt
/// record would invalidate the identifier-assignment order for the rest
/// of the run.
pub fn walk<R, F>(input: R, file_type: ZfinFileType, mut visit: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(ZfinEntry) -> Result<()>,
{
    let mut records = 0u64;
    for line in input.lines() {
        let line = line?;
        let entry = parse_line(&line, file_type)?;
        visit(entry)?;
        records += 1;
    }
    debug!("walked {} {} records", records, file_type);
    Ok(())
}
