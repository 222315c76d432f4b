// Compilation Pipeline
//
// Drives one sequential pass over the annotation streams: parse, skip
// noise, correct, compose, resolve the identifier, hand the definition to
// the sink, and emit the annotation row.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::debug;

use zpgen_common::Result;

use crate::annotations;
use crate::builder::{self, CompiledEntry};
use crate::corrector;
use crate::entry::ZfinEntry;
use crate::expression::Expression;
use crate::provenance::ProvenanceRecorder;
use crate::registry::{IdRegistry, ZpId};
use crate::uberon::Zfa2Uberon;
use crate::walker::{self, ZfinFileType};

/// Top-level category terms whose classes are always defined, ahead of
/// any real data, so they claim stable low-numbered identifiers
pub const ROOT_TERMS: [(&str, &str); 4] = [
    ("ZFA:0100000", "zebrafish anatomical entity"),
    ("GO:0008150", "biological process"),
    ("GO:0003674", "molecular function"),
    ("GO:0005575", "cellular component"),
];

/// Destination for class definitions produced by the compiler
pub trait OntologySink {
    /// Define (or re-assert) a composed phenotype class
    fn define_class(&mut self, id: &ZpId, expression: &Expression, label: &str) -> Result<()>;

    /// Attach one raw-record provenance annotation to a class
    fn add_class_source(&mut self, id: &ZpId, source: &str) -> Result<()>;

    /// Assert equivalence between two named classes from other ontologies
    fn add_term_equivalence(&mut self, left_id: &str, right_id: &str) -> Result<()>;
}

/// Counters for one compilation run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CompileStats {
    pub entries_visited: u64,
    pub noise_skipped: u64,
    pub ids_minted: u64,
    pub ids_reused: u64,
    pub positive_annotations: u64,
    pub negative_annotations: u64,
    pub term_equivalences: u64,
}

/// Drives the compilation pass, owning the registry and the sink
pub struct Compiler<S: OntologySink> {
    registry: IdRegistry,
    sink: S,
    record_sources: bool,
    provenance: ProvenanceRecorder,
    stats: CompileStats,
}

impl<S: OntologySink> Compiler<S> {
    pub fn new(registry: IdRegistry, sink: S, record_sources: bool) -> Self {
        Compiler {
            registry,
            sink,
            record_sources,
            provenance: ProvenanceRecorder::new(),
            stats: CompileStats::default(),
        }
    }

    /// Visit one entry: dedupe, define, and write its annotation row
    pub fn visit<W: Write>(
        &mut self,
        entry: ZfinEntry,
        positive: &mut W,
        negative: &mut W,
    ) -> Result<()> {
        self.stats.entries_visited += 1;

        if builder::is_noise(&entry) {
            debug!(subject = %entry.subject_id, "skipping degenerate record");
            self.stats.noise_skipped += 1;
            return Ok(());
        }

        let entry = corrector::correct(entry);
        let CompiledEntry { expression, label } = builder::build(&entry)?;

        let known = self.registry.contains(&expression);
        let id = self.registry.resolve(&expression);
        if known {
            self.stats.ids_reused += 1;
        } else {
            self.stats.ids_minted += 1;
        }

        self.sink.define_class(&id, &expression, &label)?;

        if self.record_sources {
            self.sink.add_class_source(&id, &entry.source_string)?;
            self.provenance.record(&id, &label, &entry.source_string);
        }

        if entry.is_abnormal {
            self.stats.positive_annotations += 1;
        } else {
            self.stats.negative_annotations += 1;
        }
        annotations::emit(
            &entry.subject_id,
            &id,
            &label,
            entry.is_abnormal,
            positive,
            negative,
        )?;

        Ok(())
    }

    /// Visit the synthetic root entries for one annotation stream pair
    pub fn visit_roots<W: Write>(&mut self, positive: &mut W, negative: &mut W) -> Result<()> {
        for (term_id, term_label) in ROOT_TERMS {
            self.visit(ZfinEntry::root(term_id, term_label), positive, negative)?;
        }
        Ok(())
    }

    /// Walk one ZFIN download file end to end
    pub fn walk_file<R: BufRead, W: Write>(
        &mut self,
        input: R,
        file_type: ZfinFileType,
        positive: &mut W,
        negative: &mut W,
    ) -> Result<()> {
        walker::walk(input, file_type, |entry| {
            self.visit(entry, positive, negative)
        })
    }

    /// Emit one equivalence axiom per (ZFA, UBERON) cross-reference pair
    pub fn add_term_equivalences(&mut self, map: &Zfa2Uberon) -> Result<()> {
        for (zfa_id, uberon_ids) in map {
            for uberon_id in uberon_ids {
                self.sink.add_term_equivalence(zfa_id, uberon_id)?;
                self.stats.term_equivalences += 1;
            }
        }
        Ok(())
    }

    pub fn stats(&self) -> &CompileStats {
        &self.stats
    }

    /// Consume the compiler, releasing its collaborators
    pub fn finish(self) -> (IdRegistry, S, ProvenanceRecorder, CompileStats) {
        (self.registry, self.sink, self.provenance, self.stats)
    }
}
