// Class Expressions
//
// A small closed expression language covering exactly the shapes the
// composer produces: named classes, existential restrictions, and
// intersections. Rendering uses OWL functional syntax with OBO-style
// prefixed names ("obo:ZFA_0000001").

use std::fmt;

use zpgen_common::{Result, ZpGenError};

// ============================================================================
// Relations
// ============================================================================

/// Object properties used in composed phenotype expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// BFO "has part"
    HasPart,
    /// RO "inheres in"
    InheresIn,
    /// RO "towards"
    Towards,
    /// BFO "part of"
    PartOf,
    /// RO "has modifier"
    HasModifier,
}

impl Relation {
    /// The OBO identifier of the property
    pub fn obo_id(&self) -> &'static str {
        match self {
            Relation::HasPart => "BFO:0000051",
            Relation::InheresIn => "RO:0000052",
            Relation::Towards => "RO:0002503",
            Relation::PartOf => "BFO:0000050",
            Relation::HasModifier => "RO:0002573",
        }
    }

    /// Inverse of [`Relation::obo_id`], used when re-reading emitted axioms
    pub fn from_obo_id(id: &str) -> Option<Self> {
        match id {
            "BFO:0000051" => Some(Relation::HasPart),
            "RO:0000052" => Some(Relation::InheresIn),
            "RO:0002503" => Some(Relation::Towards),
            "BFO:0000050" => Some(Relation::PartOf),
            "RO:0002573" => Some(Relation::HasModifier),
            _ => None,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", obo_curie(self.obo_id()))
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// A composed OWL class expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A named class, held as an OBO id ("ZFA:0000001")
    Class(String),
    /// ObjectSomeValuesFrom over one of the fixed relations
    SomeValuesFrom(Relation, Box<Expression>),
    /// ObjectIntersectionOf; operand order is the construction order
    IntersectionOf(Vec<Expression>),
}

impl Expression {
    /// Named-class constructor
    pub fn class(id: impl Into<String>) -> Self {
        Expression::Class(id.into())
    }

    /// Existential-restriction constructor
    pub fn some(relation: Relation, filler: Expression) -> Self {
        Expression::SomeValuesFrom(relation, Box::new(filler))
    }

    /// Canonical identity key. Intersection operands are sorted, so two
    /// expressions that differ only in operand order produce the same key.
    pub fn canonical_key(&self) -> String {
        match self {
            Expression::Class(id) => obo_curie(id),
            Expression::SomeValuesFrom(relation, filler) => {
                format!("ObjectSomeValuesFrom({} {})", relation, filler.canonical_key())
            }
            Expression::IntersectionOf(members) => {
                let mut keys: Vec<String> =
                    members.iter().map(Expression::canonical_key).collect();
                keys.sort();
                format!("ObjectIntersectionOf({})", keys.join(" "))
            }
        }
    }

    /// Render in OWL functional syntax, preserving operand order
    pub fn functional_syntax(&self) -> String {
        match self {
            Expression::Class(id) => obo_curie(id),
            Expression::SomeValuesFrom(relation, filler) => {
                format!(
                    "ObjectSomeValuesFrom({} {})",
                    relation,
                    filler.functional_syntax()
                )
            }
            Expression::IntersectionOf(members) => {
                let rendered: Vec<String> =
                    members.iter().map(Expression::functional_syntax).collect();
                format!("ObjectIntersectionOf({})", rendered.join(" "))
            }
        }
    }

    /// Parse the functional-syntax subset produced by
    /// [`Expression::functional_syntax`]
    pub fn parse_functional(input: &str) -> Result<Self> {
        let mut parser = Parser {
            input,
            pos: 0,
        };
        let expression = parser.parse_expression()?;
        parser.skip_whitespace();
        if parser.pos != input.len() {
            return Err(ZpGenError::parse(format!(
                "trailing input after expression at byte {}: {input:?}",
                parser.pos
            )));
        }
        Ok(expression)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.functional_syntax())
    }
}

// ============================================================================
// CURIE helpers
// ============================================================================

/// Render an OBO id as a prefixed name: "ZFA:0000001" -> "obo:ZFA_0000001"
pub fn obo_curie(id: &str) -> String {
    format!("obo:{}", id.replacen(':', "_", 1))
}

/// Inverse of [`obo_curie`]: "obo:ZP_0000001" -> "ZP:0000001"
pub fn curie_to_obo_id(token: &str) -> Option<String> {
    let local = token.strip_prefix("obo:")?;
    let underscore = local.find('_')?;
    Some(format!(
        "{}:{}",
        &local[..underscore],
        &local[underscore + 1..]
    ))
}

// ============================================================================
// Parser
// ============================================================================

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn expect(&mut self, token: char) -> Result<()> {
        if self.rest().starts_with(token) {
            self.pos += token.len_utf8();
            Ok(())
        } else {
            Err(ZpGenError::parse(format!(
                "expected '{token}' at byte {} in {:?}",
                self.pos, self.input
            )))
        }
    }

    /// Consume a run of atom characters (anything but whitespace and parens)
    fn atom(&mut self) -> Result<&'a str> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(ZpGenError::parse(format!(
                "expected a name at byte {} in {:?}",
                self.pos, self.input
            )));
        }
        self.pos += end;
        Ok(&rest[..end])
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        self.skip_whitespace();
        let atom = self.atom()?;

        match atom {
            "ObjectSomeValuesFrom" => {
                self.expect('(')?;
                self.skip_whitespace();
                let property = self.atom()?;
                let obo_id = curie_to_obo_id(property).ok_or_else(|| {
                    ZpGenError::parse(format!("unrecognized property token {property:?}"))
                })?;
                let relation = Relation::from_obo_id(&obo_id).ok_or_else(|| {
                    ZpGenError::parse(format!("unrecognized object property {obo_id:?}"))
                })?;
                let filler = self.parse_expression()?;
                self.skip_whitespace();
                self.expect(')')?;
                Ok(Expression::some(relation, filler))
            }
            "ObjectIntersectionOf" => {
                self.expect('(')?;
                let mut members = Vec::new();
                loop {
                    self.skip_whitespace();
                    if self.rest().starts_with(')') {
                        break;
                    }
                    members.push(self.parse_expression()?);
                }
                self.expect(')')?;
                if members.len() < 2 {
                    return Err(ZpGenError::parse(format!(
                        "intersection with fewer than two operands in {:?}",
                        self.input
                    )));
                }
                Ok(Expression::IntersectionOf(members))
            }
            token => {
                let obo_id = curie_to_obo_id(token).ok_or_else(|| {
                    ZpGenError::parse(format!("unrecognized class token {token:?}"))
                })?;
                Ok(Expression::Class(obo_id))
            }
        }
    }
}
