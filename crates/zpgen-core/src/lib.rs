//! ZPGen Core Library
//!
//! Compiles decomposed ZFIN phenotype annotation records (gene/genotype x
//! anatomical entity x PATO quality) into a deduplicated set of composite
//! phenotype class definitions plus annotation rows.
//!
//! # Overview
//!
//! One compilation pass is strictly sequential:
//!
//! 1. [`walker`] parses raw download lines into [`entry::ZfinEntry`] values
//! 2. [`corrector`] normalizes quality terms on normal-polarity entries
//! 3. [`builder`] composes the canonical class [`expression::Expression`]
//!    and human-readable label
//! 4. [`registry`] resolves (or mints) the stable ZP identifier for the
//!    expression
//! 5. [`annotations`] emits one row per visited entry
//!
//! [`pipeline::Compiler`] drives the pass and hands class definitions to an
//! [`pipeline::OntologySink`] collaborator for persistence.

pub mod annotations;
pub mod builder;
pub mod corrector;
pub mod entry;
pub mod expression;
pub mod pipeline;
pub mod provenance;
pub mod registry;
pub mod uberon;
pub mod walker;

// Re-export commonly used types
pub use entry::ZfinEntry;
pub use expression::{Expression, Relation};
pub use pipeline::{CompileStats, Compiler, OntologySink, ROOT_TERMS};
pub use registry::{IdRegistry, ZpId};
pub use walker::ZfinFileType;

/// PATO modifier class marking abnormal polarity
pub const PATO_ABNORMAL: &str = "PATO:0000460";

/// PATO modifier class marking normal polarity
pub const PATO_NORMAL: &str = "PATO:0000461";

/// The bare top-level PATO quality term
pub const PATO_QUALITY: &str = "PATO:0000001";

/// PATO "absent"
pub const PATO_ABSENT: &str = "PATO:0000462";

/// GO "visual perception"; the one entity whose "absent" tag is coerced
pub const GO_VISUAL_PERCEPTION: &str = "GO:0007601";

/// ZFA "anatomical system"; anchor of the degenerate noise pattern
pub const ZFA_ANATOMICAL_SYSTEM: &str = "ZFA:0001439";

/// CARO "anatomical boundary", remapped to the ZFA "anatomical line" term
pub const CARO_ANATOMICAL_BOUNDARY: &str = "CARO:0000010";

/// ZFA "anatomical line"
pub const ZFA_ANATOMICAL_LINE: &str = "ZFA:0001689";
