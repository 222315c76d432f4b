// Annotation Row Output
//
// One row per visited (non-noise) entry. Abnormal entries land in the
// positive stream, normal entries in the negative stream with a trailing
// NOT column.

use std::io::Write;

use crate::registry::ZpId;

/// Write the annotation row for one entry to the matching stream
pub fn emit<W: Write>(
    subject_id: &str,
    id: &ZpId,
    label: &str,
    is_abnormal: bool,
    positive: &mut W,
    negative: &mut W,
) -> std::io::Result<()> {
    if is_abnormal {
        writeln!(positive, "{subject_id}\t{id}\t{label}")
    } else {
        writeln!(negative, "{subject_id}\t{id}\t{label}\tNOT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_row() {
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        emit(
            "ZDB-GENE-000201-18",
            &ZpId::from_sequence(5),
            "abnormal(ly) decreased size eye",
            true,
            &mut positive,
            &mut negative,
        )
        .expect("write");

        assert_eq!(
            String::from_utf8(positive).expect("utf8"),
            "ZDB-GENE-000201-18\tZP:0000005\tabnormal(ly) decreased size eye\n"
        );
        assert!(negative.is_empty());
    }

    #[test]
    fn test_negative_row_carries_not_marker() {
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        emit(
            "ZDB-GENO-070219-2",
            &ZpId::from_sequence(12),
            "abnormal(ly) quality liver",
            false,
            &mut positive,
            &mut negative,
        )
        .expect("write");

        assert!(positive.is_empty());
        assert_eq!(
            String::from_utf8(negative).expect("utf8"),
            "ZDB-GENO-070219-2\tZP:0000012\tabnormal(ly) quality liver\tNOT\n"
        );
    }
}
