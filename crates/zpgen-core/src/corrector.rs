// Quality-Term Corrections for Normal-Polarity Entries
//
// ZFIN encodes some "normal X" annotations with a quality term that
// duplicates the "normal" tag, e.g.:
//
//   ZDB-GENE-030131-6223|...|ZFA:0001086|muscle pioneer|PATO:0002050|normal amount|normal|...
//
// The bare axis term has to be restored before composition so the
// polarity tag and the quality term do not collide: "normal amount"
// becomes "amount".

use crate::entry::ZfinEntry;

/// (observed quality id) -> (replacement id, replacement name); applied
/// only to entries tagged "normal"
const CORRECTIONS: [(&str, &str, &str); 3] = [
    // normal amount -> amount
    ("PATO:0002050", "PATO:0000070", "amount"),
    // has normal numbers of parts of type -> has number of
    ("PATO:0001905", "PATO:0001555", "has number of"),
    // normal -> quality
    ("PATO:0000461", "PATO:0000001", "quality"),
];

/// Apply the fixed substitution table. Pure, total, idempotent.
pub fn correct(mut entry: ZfinEntry) -> ZfinEntry {
    if entry.is_abnormal {
        return entry;
    }

    for (observed, replacement_id, replacement_name) in CORRECTIONS {
        if entry.pato_id == observed {
            entry.pato_id = replacement_id.to_string();
            entry.pato_name = replacement_name.to_string();
            break;
        }
    }

    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_entry(pato_id: &str, pato_name: &str) -> ZfinEntry {
        ZfinEntry {
            pato_id: pato_id.to_string(),
            pato_name: pato_name.to_string(),
            is_abnormal: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_normal_amount_is_corrected() {
        let entry = correct(normal_entry("PATO:0002050", "normal amount"));
        assert_eq!(entry.pato_id, "PATO:0000070");
        assert_eq!(entry.pato_name, "amount");
    }

    #[test]
    fn test_normal_numbers_is_corrected() {
        let entry = correct(normal_entry(
            "PATO:0001905",
            "has normal numbers of parts of type",
        ));
        assert_eq!(entry.pato_id, "PATO:0001555");
        assert_eq!(entry.pato_name, "has number of");
    }

    #[test]
    fn test_bare_normal_is_corrected() {
        let entry = correct(normal_entry("PATO:0000461", "normal"));
        assert_eq!(entry.pato_id, "PATO:0000001");
        assert_eq!(entry.pato_name, "quality");
    }

    #[test]
    fn test_abnormal_entry_untouched() {
        let mut entry = normal_entry("PATO:0002050", "normal amount");
        entry.is_abnormal = true;

        let corrected = correct(entry.clone());
        assert_eq!(corrected, entry);
    }

    #[test]
    fn test_other_quality_untouched() {
        let entry = normal_entry("PATO:0000587", "decreased size");
        assert_eq!(correct(entry.clone()), entry);
    }

    #[test]
    fn test_correction_is_idempotent() {
        for (observed, _, _) in [
            ("PATO:0002050", "", ""),
            ("PATO:0001905", "", ""),
            ("PATO:0000461", "", ""),
            ("PATO:0000587", "", ""),
        ] {
            let once = correct(normal_entry(observed, "x"));
            let twice = correct(once.clone());
            assert_eq!(once, twice);
        }
    }
}
