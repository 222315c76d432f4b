// ZFA to UBERON Cross-References
//
// Scans an UBERON OBO file for ZFA xrefs and inverts them into a
// ZFA-to-UBERON map used to emit cross-ontology equivalence axioms. An
// UBERON term may carry several ZFA xrefs and vice versa.

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;

use tracing::info;

use zpgen_common::Result;

/// ZFA term id -> set of equivalent UBERON term ids
pub type Zfa2Uberon = BTreeMap<String, BTreeSet<String>>;

/// Extract the ZFA-to-UBERON map from an OBO document
pub fn zfa_to_uberon<R: BufRead>(input: R) -> Result<Zfa2Uberon> {
    let mut map = Zfa2Uberon::new();
    let mut uberon: Option<String> = None;
    let mut zfa: Vec<String> = Vec::new();

    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            flush(&mut map, &mut uberon, &mut zfa);
        } else if let Some(id) = line.strip_prefix("id: UBERON:") {
            uberon = Some(format!("UBERON:{id}"));
        } else if let Some(xref) = line.strip_prefix("xref: ZFA:") {
            zfa.push(format!("ZFA:{xref}"));
        }
    }
    flush(&mut map, &mut uberon, &mut zfa);

    info!(zfa_terms = map.len(), "loaded anatomy cross-references");
    Ok(map)
}

fn flush(map: &mut Zfa2Uberon, uberon: &mut Option<String>, zfa: &mut Vec<String>) {
    let xrefs = std::mem::take(zfa);
    let Some(uberon_id) = uberon.take() else {
        return;
    };
    for zfa_id in xrefs {
        map.entry(zfa_id).or_default().insert(uberon_id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
format-version: 1.2

[Term]
id: UBERON:0000019
name: camera-type eye
xref: ZFA:0000107

[Term]
id: UBERON:0002107
name: liver
xref: MA:0000358
xref: ZFA:0000123
";

    #[test]
    fn test_xrefs_are_inverted() {
        let map = zfa_to_uberon(Cursor::new(SAMPLE)).expect("parse");

        assert_eq!(map.len(), 2);
        assert!(map["ZFA:0000107"].contains("UBERON:0000019"));
        assert!(map["ZFA:0000123"].contains("UBERON:0002107"));
        assert!(!map.contains_key("MA:0000358"));
    }

    #[test]
    fn test_final_stanza_without_trailing_blank_line() {
        let input = "[Term]\nid: UBERON:0000019\nxref: ZFA:0000107";
        let map = zfa_to_uberon(Cursor::new(input)).expect("parse");
        assert!(map["ZFA:0000107"].contains("UBERON:0000019"));
    }

    #[test]
    fn test_xrefs_without_uberon_id_are_dropped() {
        let input = "[Term]\nid: ZFA:0000001\nxref: ZFA:0000107\n\n";
        let map = zfa_to_uberon(Cursor::new(input)).expect("parse");
        assert!(map.is_empty());
    }

    #[test]
    fn test_every_zfa_xref_in_a_stanza_is_recorded() {
        let input = "\
[Term]
id: UBERON:0002107
xref: ZFA:0000123
xref: ZFA:0005155

";
        let map = zfa_to_uberon(Cursor::new(input)).expect("parse");
        assert!(map["ZFA:0000123"].contains("UBERON:0002107"));
        assert!(map["ZFA:0005155"].contains("UBERON:0002107"));
    }

    #[test]
    fn test_one_zfa_term_many_uberon_terms() {
        let input = "\
[Term]
id: UBERON:0000019
xref: ZFA:0000107

[Term]
id: UBERON:0000970
xref: ZFA:0000107
";
        let map = zfa_to_uberon(Cursor::new(input)).expect("parse");
        assert_eq!(map["ZFA:0000107"].len(), 2);
    }
}
