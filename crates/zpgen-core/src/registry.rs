// ZP Identifier Registry
//
// Maps canonical expression keys to stable ZP identifiers. Identity is
// structural, so two records composing the same expression share one id
// across files and across runs (when seeded from the previous release).

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::expression::Expression;

/// Identifier prefix for minted phenotype classes
pub const ZP_PREFIX: &str = "ZP:";

/// Zero-padded width of the numeric part
pub const ZP_ID_WIDTH: usize = 7;

/// A minted phenotype class identifier ("ZP:0000001")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ZpId(String);

impl ZpId {
    /// Format a sequence number as an identifier
    pub fn from_sequence(sequence: u32) -> Self {
        ZpId(format!("{ZP_PREFIX}{sequence:0width$}", width = ZP_ID_WIDTH))
    }

    /// Parse an identifier back into its sequence number. Requires the
    /// exact zero-padded width.
    pub fn parse(id: &str) -> Option<(Self, u32)> {
        let digits = id.strip_prefix(ZP_PREFIX)?;
        if digits.len() != ZP_ID_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let sequence = digits.parse().ok()?;
        Some((ZpId(id.to_string()), sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expression-to-identifier registry
#[derive(Debug, Default)]
pub struct IdRegistry {
    expression_to_id: HashMap<String, ZpId>,
    next_sequence: u32,
}

impl IdRegistry {
    pub fn new() -> Self {
        IdRegistry {
            expression_to_id: HashMap::new(),
            next_sequence: 1,
        }
    }

    /// Load previously minted mappings. Each pair carries the identifier
    /// and the expression it was minted for. Unparseable identifiers are
    /// skipped with a warning. Returns the number of mappings recovered.
    pub fn seed<I>(&mut self, mappings: I) -> usize
    where
        I: IntoIterator<Item = (String, Expression)>,
    {
        let mut recovered = 0;
        for (id, expression) in mappings {
            let Some((zp_id, sequence)) = ZpId::parse(&id) else {
                warn!(id, "skipping malformed identifier in previous ontology");
                continue;
            };
            self.expression_to_id
                .insert(expression.canonical_key(), zp_id);
            if sequence >= self.next_sequence {
                self.next_sequence = sequence + 1;
            }
            recovered += 1;
        }
        info!(recovered, "previous identifiers recovered");
        recovered
    }

    /// Look up the identifier for an expression, minting the next one in
    /// sequence on first sight
    pub fn resolve(&mut self, expression: &Expression) -> ZpId {
        let key = expression.canonical_key();
        if let Some(id) = self.expression_to_id.get(&key) {
            return id.clone();
        }
        let id = ZpId::from_sequence(self.next_sequence);
        self.next_sequence += 1;
        self.expression_to_id.insert(key, id.clone());
        id
    }

    /// Whether an identifier has already been assigned to this expression
    pub fn contains(&self, expression: &Expression) -> bool {
        self.expression_to_id
            .contains_key(&expression.canonical_key())
    }

    pub fn len(&self) -> usize {
        self.expression_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expression_to_id.is_empty()
    }
}
