// Expression Composer
//
// Turns a corrected entry into the canonical phenotype class expression
//
//   has-part some (Q and has-modifier some abnormal and inheres-in some E1
//                  [and towards some E2])
//
// plus its human-readable label.

use tracing::debug;

use zpgen_common::{Result, ZpGenError};

use crate::entry::ZfinEntry;
use crate::expression::{Expression, Relation};
use crate::{CARO_ANATOMICAL_BOUNDARY, PATO_ABNORMAL, PATO_QUALITY, ZFA_ANATOMICAL_LINE, ZFA_ANATOMICAL_SYSTEM};

/// Namespaces accepted for affected-entity terms
const ENTITY_PREFIXES: [&str; 5] = ["GO:", "ZFA:", "BSPO:", "MPATH:", "CHEBI:"];

/// A composed class expression together with its label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledEntry {
    pub expression: Expression,
    pub label: String,
}

/// Degenerate placeholder records carrying no phenotype information:
/// bare "anatomical system" with the bare top-level quality and nothing
/// else. Checked on the uncorrected entry.
pub fn is_noise(entry: &ZfinEntry) -> bool {
    entry.entity1_superterm_id == ZFA_ANATOMICAL_SYSTEM
        && entry.pato_id == PATO_QUALITY
        && entry.entity1_subterm_id.is_empty()
        && entry.entity2_superterm_id.is_empty()
        && entry.entity2_subterm_id.is_empty()
}

/// Resolve an affected-entity term id to a class, applying the CARO
/// boundary remap and the namespace allow-list
fn entity_class(id: &str) -> Result<Expression> {
    if id == CARO_ANATOMICAL_BOUNDARY {
        debug!(term = id, "remapping anatomical boundary to anatomical line");
        return Ok(Expression::class(ZFA_ANATOMICAL_LINE));
    }

    if ENTITY_PREFIXES.iter().any(|prefix| id.starts_with(prefix)) {
        Ok(Expression::class(id))
    } else {
        Err(ZpGenError::UnsupportedNamespace(id.to_string()))
    }
}

/// Resolve a quality term id, which must live in PATO
fn quality_class(id: &str) -> Result<Expression> {
    if id.starts_with("PATO:") {
        Ok(Expression::class(id))
    } else {
        Err(ZpGenError::UnsupportedNamespace(id.to_string()))
    }
}

/// Compose the class expression and label for a corrected entry
pub fn build(entry: &ZfinEntry) -> Result<CompiledEntry> {
    let mut members = vec![
        quality_class(&entry.pato_id)?,
        Expression::some(Relation::HasModifier, Expression::class(PATO_ABNORMAL)),
    ];

    let entity1_superterm = entity_class(&entry.entity1_superterm_id)?;
    if entry.has_entity1_subterm() {
        let entity1_subterm = entity_class(&entry.entity1_subterm_id)?;
        members.push(Expression::some(
            Relation::InheresIn,
            Expression::IntersectionOf(vec![
                entity1_subterm,
                Expression::some(Relation::PartOf, entity1_superterm),
            ]),
        ));
    } else {
        members.push(Expression::some(Relation::InheresIn, entity1_superterm));
    }

    if entry.has_entity2() {
        let entity2_superterm = entity_class(&entry.entity2_superterm_id)?;
        if entry.has_entity2_subterm() {
            let entity2_subterm = entity_class(&entry.entity2_subterm_id)?;
            members.push(Expression::some(
                Relation::Towards,
                Expression::IntersectionOf(vec![
                    entity2_subterm,
                    Expression::some(Relation::PartOf, entity2_superterm),
                ]),
            ));
        } else {
            members.push(Expression::some(Relation::Towards, entity2_superterm));
        }
    }

    let expression = Expression::some(Relation::HasPart, Expression::IntersectionOf(members));

    Ok(CompiledEntry {
        expression,
        label: label(entry),
    })
}

/// Render the class label. Superterm names precede subterm names, and the
/// "towards" entity is appended when present.
fn label(entry: &ZfinEntry) -> String {
    let mut label = format!("abnormal(ly) {} {}", entry.pato_name, entry.entity1_superterm_name);
    if entry.has_entity1_subterm() {
        label.push(' ');
        label.push_str(&entry.entity1_subterm_name);
    }
    if entry.has_entity2() {
        label.push_str(" towards ");
        label.push_str(&entry.entity2_superterm_name);
        if entry.has_entity2_subterm() {
            label.push(' ');
            label.push_str(&entry.entity2_subterm_name);
        }
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PATO_NORMAL;

    fn simple_entry() -> ZfinEntry {
        ZfinEntry {
            subject_id: "ZDB-GENE-000201-18".to_string(),
            entity1_superterm_id: "ZFA:0000107".to_string(),
            entity1_superterm_name: "eye".to_string(),
            pato_id: "PATO:0000587".to_string(),
            pato_name: "decreased size".to_string(),
            is_abnormal: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_simple_entity_expression() {
        let compiled = build(&simple_entry()).expect("build");

        assert_eq!(
            compiled.expression.functional_syntax(),
            "ObjectSomeValuesFrom(obo:BFO_0000051 ObjectIntersectionOf(\
             obo:PATO_0000587 \
             ObjectSomeValuesFrom(obo:RO_0002573 obo:PATO_0000460) \
             ObjectSomeValuesFrom(obo:RO_0000052 obo:ZFA_0000107)))"
        );
        assert_eq!(compiled.label, "abnormal(ly) decreased size eye");
    }

    #[test]
    fn test_subterm_nests_part_of() {
        let mut entry = simple_entry();
        entry.entity1_subterm_id = "ZFA:0000047".to_string();
        entry.entity1_subterm_name = "retina".to_string();

        let compiled = build(&entry).expect("build");
        assert!(compiled.expression.functional_syntax().contains(
            "ObjectSomeValuesFrom(obo:RO_0000052 ObjectIntersectionOf(\
             obo:ZFA_0000047 \
             ObjectSomeValuesFrom(obo:BFO_0000050 obo:ZFA_0000107)))"
        ));
        assert_eq!(compiled.label, "abnormal(ly) decreased size eye retina");
    }

    #[test]
    fn test_towards_entity() {
        let mut entry = simple_entry();
        entry.pato_id = "PATO:0001555".to_string();
        entry.pato_name = "has number of".to_string();
        entry.entity2_superterm_id = "GO:0007601".to_string();
        entry.entity2_superterm_name = "visual perception".to_string();

        let compiled = build(&entry).expect("build");
        assert!(compiled
            .expression
            .functional_syntax()
            .contains("ObjectSomeValuesFrom(obo:RO_0002503 obo:GO_0007601)"));
        assert_eq!(
            compiled.label,
            "abnormal(ly) has number of eye towards visual perception"
        );
    }

    #[test]
    fn test_towards_subterm_label_order() {
        let mut entry = simple_entry();
        entry.entity2_superterm_id = "ZFA:0000108".to_string();
        entry.entity2_superterm_name = "fin".to_string();
        entry.entity2_subterm_id = "ZFA:0000109".to_string();
        entry.entity2_subterm_name = "fin ray".to_string();

        let compiled = build(&entry).expect("build");
        assert_eq!(
            compiled.label,
            "abnormal(ly) decreased size eye towards fin fin ray"
        );
    }

    #[test]
    fn test_caro_boundary_remap() {
        let mut entry = simple_entry();
        entry.entity1_superterm_id = CARO_ANATOMICAL_BOUNDARY.to_string();

        let compiled = build(&entry).expect("build");
        assert!(compiled
            .expression
            .functional_syntax()
            .contains("obo:ZFA_0001689"));
        assert!(!compiled
            .expression
            .functional_syntax()
            .contains("CARO"));
    }

    #[test]
    fn test_unsupported_entity_namespace() {
        let mut entry = simple_entry();
        entry.entity1_superterm_id = "CL:0000540".to_string();

        let err = build(&entry).unwrap_err();
        assert!(matches!(err, ZpGenError::UnsupportedNamespace(_)));
    }

    #[test]
    fn test_non_pato_quality_rejected() {
        let mut entry = simple_entry();
        entry.pato_id = "GO:0008150".to_string();

        assert!(matches!(
            build(&entry),
            Err(ZpGenError::UnsupportedNamespace(_))
        ));
    }

    #[test]
    fn test_noise_detection() {
        let noise = ZfinEntry {
            entity1_superterm_id: ZFA_ANATOMICAL_SYSTEM.to_string(),
            pato_id: PATO_QUALITY.to_string(),
            ..Default::default()
        };
        assert!(is_noise(&noise));

        let mut with_subterm = noise.clone();
        with_subterm.entity1_subterm_id = "ZFA:0000107".to_string();
        assert!(!is_noise(&with_subterm));

        let mut with_quality = noise.clone();
        with_quality.pato_id = "PATO:0000587".to_string();
        assert!(!is_noise(&with_quality));

        let mut with_entity2 = noise;
        with_entity2.entity2_superterm_id = "GO:0008150".to_string();
        assert!(!is_noise(&with_entity2));
    }

    #[test]
    fn test_normal_entry_expression_matches_abnormal() {
        // Polarity lives in the annotation row, never in the expression
        let abnormal = build(&simple_entry()).expect("build");

        let mut entry = simple_entry();
        entry.is_abnormal = false;
        entry.source_string = format!("x\t\ty\t{PATO_NORMAL}\t\t");
        let normal = build(&entry).expect("build");

        assert_eq!(abnormal.expression, normal.expression);
    }
}
