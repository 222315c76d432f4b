// ZFIN Entry Model

use serde::Serialize;

use crate::{PATO_ABNORMAL, PATO_NORMAL, PATO_QUALITY};

/// Subject id carried by synthetic root entries
pub const ROOT_SUBJECT_ID: &str = "DUMMY";

/// One decomposed phenotype annotation record from a ZFIN download file.
///
/// Absent optional parts (entity 1 subterm, all of entity 2) are empty
/// strings, matching the empty columns in the download files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZfinEntry {
    /// Gene or genotype ZFIN id (or the root sentinel)
    pub subject_id: String,

    /// Affected structure or process 1, superterm id (always present)
    pub entity1_superterm_id: String,

    /// Affected structure or process 1, superterm name
    pub entity1_superterm_name: String,

    /// Affected structure or process 1, subterm id (empty = simple entity)
    pub entity1_subterm_id: String,

    /// Affected structure or process 1, subterm name
    pub entity1_subterm_name: String,

    /// Affected structure or process 2, superterm id (empty = no "towards")
    pub entity2_superterm_id: String,

    /// Affected structure or process 2, superterm name
    pub entity2_superterm_name: String,

    /// Affected structure or process 2, subterm id
    pub entity2_subterm_id: String,

    /// Affected structure or process 2, subterm name
    pub entity2_subterm_name: String,

    /// PATO quality id
    pub pato_id: String,

    /// PATO quality name
    pub pato_name: String,

    /// Polarity derived from the phenotype tag column
    pub is_abnormal: bool,

    /// Tab-joined provenance fingerprint, fixed at parse time (before any
    /// quality-term correction)
    pub source_string: String,
}

impl ZfinEntry {
    /// Render the tab-joined provenance fingerprint for this entry.
    ///
    /// Field order: entity1 superterm, entity1 subterm, quality, polarity
    /// marker, entity2 superterm, entity2 subterm. Used for provenance
    /// only, never for identifier assignment.
    pub fn source_fingerprint(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.entity1_superterm_id,
            self.entity1_subterm_id,
            self.pato_id,
            if self.is_abnormal {
                PATO_ABNORMAL
            } else {
                PATO_NORMAL
            },
            self.entity2_superterm_id,
            self.entity2_subterm_id,
        )
    }

    /// Build a synthetic root entry for a top-level category term.
    ///
    /// Root entries are visited before any real data so that auxiliary
    /// top-level classes always exist and claim stable low-numbered ids.
    pub fn root(term_id: &str, term_label: &str) -> Self {
        let mut entry = ZfinEntry {
            subject_id: ROOT_SUBJECT_ID.to_string(),
            entity1_superterm_id: term_id.to_string(),
            entity1_superterm_name: term_label.to_string(),
            pato_id: PATO_QUALITY.to_string(),
            pato_name: "quality".to_string(),
            is_abnormal: true,
            ..Default::default()
        };
        entry.source_string = entry.source_fingerprint();
        entry
    }

    /// Whether entity 1 carries a subterm composition
    pub fn has_entity1_subterm(&self) -> bool {
        !self.entity1_subterm_id.is_empty()
    }

    /// Whether the record carries a "towards" entity at all
    pub fn has_entity2(&self) -> bool {
        !self.entity2_superterm_id.is_empty()
    }

    /// Whether entity 2 carries a subterm composition
    pub fn has_entity2_subterm(&self) -> bool {
        !self.entity2_subterm_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_fingerprint_abnormal() {
        let entry = ZfinEntry {
            entity1_superterm_id: "ZFA:0000001".to_string(),
            entity1_subterm_id: "ZFA:0000002".to_string(),
            pato_id: "PATO:0000587".to_string(),
            is_abnormal: true,
            ..Default::default()
        };

        assert_eq!(
            entry.source_fingerprint(),
            "ZFA:0000001\tZFA:0000002\tPATO:0000587\tPATO:0000460\t\t"
        );
    }

    #[test]
    fn test_source_fingerprint_normal_marker() {
        let entry = ZfinEntry {
            entity1_superterm_id: "ZFA:0000001".to_string(),
            pato_id: "PATO:0000070".to_string(),
            is_abnormal: false,
            ..Default::default()
        };

        assert!(entry.source_fingerprint().contains("PATO:0000461"));
    }

    #[test]
    fn test_root_entry() {
        let entry = ZfinEntry::root("ZFA:0100000", "zebrafish anatomical entity");

        assert_eq!(entry.subject_id, ROOT_SUBJECT_ID);
        assert_eq!(entry.entity1_superterm_id, "ZFA:0100000");
        assert_eq!(entry.pato_id, PATO_QUALITY);
        assert!(entry.is_abnormal);
        assert!(!entry.has_entity1_subterm());
        assert!(!entry.has_entity2());
        assert_eq!(entry.source_string, entry.source_fingerprint());
    }
}
