// Ontology Document Output
//
// Collects OWL functional-syntax axioms in insertion order, dropping
// exact duplicates, and writes the complete document with the prefix
// block and a dated version IRI.

use std::collections::HashSet;
use std::io::Write;

use chrono::NaiveDate;

use zpgen_common::Result;
use zpgen_core::expression::{obo_curie, Expression};
use zpgen_core::registry::ZpId;
use zpgen_core::OntologySink;

const ONTOLOGY_IRI: &str = "http://purl.obolibrary.org/obo/upheno/zp.owl";
const RELEASE_IRI_BASE: &str = "http://purl.obolibrary.org/obo/upheno/releases";

/// An OWL functional-syntax document under construction
#[derive(Debug, Default)]
pub struct FunctionalSyntaxDocument {
    axioms: Vec<String>,
    seen: HashSet<String>,
}

impl FunctionalSyntaxDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an axiom unless an identical one is already present
    fn push(&mut self, axiom: String) {
        if self.seen.insert(axiom.clone()) {
            self.axioms.push(axiom);
        }
    }

    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    /// Write the complete document. The release date lands in the
    /// version IRI.
    pub fn write_to<W: Write>(&self, out: &mut W, date: NaiveDate) -> std::io::Result<()> {
        writeln!(out, "Prefix(obo:=<http://purl.obolibrary.org/obo/>)")?;
        writeln!(out, "Prefix(rdfs:=<http://www.w3.org/2000/01/rdf-schema#>)")?;
        writeln!(out, "Prefix(zfin:=<http://zfin.org/>)")?;
        writeln!(out)?;
        writeln!(
            out,
            "Ontology(<{ONTOLOGY_IRI}> <{RELEASE_IRI_BASE}/{}/zp.owl>",
            date.format("%Y-%m-%d")
        )?;
        for axiom in &self.axioms {
            writeln!(out, "{axiom}")?;
        }
        writeln!(out, ")")?;
        Ok(())
    }
}

/// Escape a string for use as a functional-syntax literal
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

impl OntologySink for FunctionalSyntaxDocument {
    fn define_class(&mut self, id: &ZpId, expression: &Expression, label: &str) -> Result<()> {
        let class = obo_curie(id.as_str());
        self.push(format!(
            "EquivalentClasses({class} {})",
            expression.functional_syntax()
        ));
        self.push(format!(
            "AnnotationAssertion(rdfs:label {class} {})",
            quote(label)
        ));
        Ok(())
    }

    fn add_class_source(&mut self, id: &ZpId, source: &str) -> Result<()> {
        self.push(format!(
            "AnnotationAssertion(zfin:source_information {} {})",
            obo_curie(id.as_str()),
            quote(source)
        ));
        Ok(())
    }

    fn add_term_equivalence(&mut self, left_id: &str, right_id: &str) -> Result<()> {
        self.push(format!(
            "EquivalentClasses({} {})",
            obo_curie(left_id),
            obo_curie(right_id)
        ));
        Ok(())
    }
}
