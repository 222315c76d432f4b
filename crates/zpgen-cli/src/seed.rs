// Previous-Release Recovery
//
// Re-reads the definition axioms of a previously emitted ontology
// document so the registry can hand identical expressions their old
// identifiers. Only EquivalentClasses axioms whose first operand is a ZP
// class matter; everything else in the document is passed over.

use std::io::BufRead;

use tracing::{debug, info, warn};

use zpgen_common::Result;
use zpgen_core::expression::{curie_to_obo_id, Expression};
use zpgen_core::registry::ZP_PREFIX;

/// Extract (identifier, expression) pairs from a previous ontology
/// document. Lines that are not well-formed definition axioms are
/// skipped with a warning; definitions of non-ZP classes are skipped
/// silently.
pub fn recover_prior_mappings<R: BufRead>(input: R) -> Result<Vec<(String, Expression)>> {
    let mut mappings = Vec::new();

    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        let Some(body) = line
            .strip_prefix("EquivalentClasses(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            continue;
        };

        let Some((class_token, expression_text)) = body.split_once(' ') else {
            warn!(axiom = line, "skipping definition axiom without an expression");
            continue;
        };

        let Some(class_id) = curie_to_obo_id(class_token) else {
            warn!(axiom = line, "skipping definition axiom with unrecognized class");
            continue;
        };

        if !class_id.starts_with(ZP_PREFIX) {
            debug!(class = class_id, "passing over non-ZP equivalence axiom");
            continue;
        }

        match Expression::parse_functional(expression_text) {
            Ok(expression) => mappings.push((class_id, expression)),
            Err(e) => {
                warn!(class = class_id, error = %e, "skipping unparseable class expression");
            }
        }
    }

    info!(count = mappings.len(), "recovered prior class definitions");
    Ok(mappings)
}
