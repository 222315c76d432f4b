// Source Provenance
//
// Optional side table recording, per minted class, the set of raw record
// fingerprints that produced it. Ordered maps keep the report output
// deterministic.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use crate::registry::ZpId;

#[derive(Debug, Default)]
struct ClassProvenance {
    label: String,
    sources: BTreeSet<String>,
}

/// Accumulates source fingerprints per class across a compilation run
#[derive(Debug, Default)]
pub struct ProvenanceRecorder {
    by_id: BTreeMap<ZpId, ClassProvenance>,
}

impl ProvenanceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one contributing record for a class
    pub fn record(&mut self, id: &ZpId, label: &str, source: &str) {
        let class = self.by_id.entry(id.clone()).or_default();
        if class.label.is_empty() {
            class.label = label.to_string();
        }
        class.sources.insert(source.to_string());
    }

    /// Write the report: one tab-separated row per (class, source) pair,
    /// ordered by identifier and then by source
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for (id, class) in &self.by_id {
            for source in &class.sources {
                writeln!(out, "{id}\t{}\t{source}", class.label)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_are_deduplicated_and_ordered() {
        let mut recorder = ProvenanceRecorder::new();
        let id = ZpId::from_sequence(2);
        recorder.record(&id, "abnormal(ly) quality eye", "b\tsource");
        recorder.record(&id, "abnormal(ly) quality eye", "a\tsource");
        recorder.record(&id, "abnormal(ly) quality eye", "b\tsource");

        let mut out = Vec::new();
        recorder.write_to(&mut out).expect("write");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "ZP:0000002\tabnormal(ly) quality eye\ta\tsource\n\
             ZP:0000002\tabnormal(ly) quality eye\tb\tsource\n"
        );
    }

    #[test]
    fn test_rows_ordered_by_id() {
        let mut recorder = ProvenanceRecorder::new();
        recorder.record(&ZpId::from_sequence(10), "ten", "s");
        recorder.record(&ZpId::from_sequence(2), "two", "s");

        let mut out = Vec::new();
        recorder.write_to(&mut out).expect("write");
        let rendered = String::from_utf8(out).expect("utf8");
        let first = rendered.lines().next().expect("row");
        assert!(first.starts_with("ZP:0000002"));
        assert_eq!(recorder.len(), 2);
    }
}
