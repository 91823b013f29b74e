//! The BEL term model.
//!
//! Terms are finite recursive trees built from the BEL function vocabulary.
//! Each term renders to a canonical text form via [`std::fmt::Display`];
//! that rendering is the term's identity — the graph deduplicates nodes by
//! it, and unordered argument lists (complex and composite members, reaction
//! reactant and product lists, modifier lists) are sorted by member rendering
//! at construction so that syntactically different spellings of the same
//! term normalize to one key.

use serde::{Deserialize, Serialize};
use std::fmt;

// ──────────────────────────────────────────────
// Identifier
// ──────────────────────────────────────────────

/// A namespace-qualified name, e.g. `HGNC:AKT1` or `GOCC:"cell surface"`.
///
/// `namespace` is `None` only for naked names accepted under
/// `allow_naked_names`, and for controlled keywords that carry no namespace
/// (modification names like `Ph`, activity effects like `kin`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identifier {
    pub namespace: Option<String>,
    pub name: String,
}

impl Identifier {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Identifier {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    pub fn naked(name: impl Into<String>) -> Self {
        Identifier {
            namespace: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.namespace {
            write!(f, "{}:", ns)?;
        }
        write_name(f, &self.name)
    }
}

/// Writes a name, quoting it unless it is a plain word.
fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        f.write_str(name)
    } else {
        write_quoted(f, name)
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            other => write!(f, "{}", other)?,
        }
    }
    f.write_str("\"")
}

// ──────────────────────────────────────────────
// Entity functions
// ──────────────────────────────────────────────

/// Entity function vocabulary for simple and modified abundances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Func {
    Abundance,
    Protein,
    Gene,
    Rna,
    MicroRna,
    BiologicalProcess,
    Pathology,
}

impl Func {
    /// Maps a short or long source keyword to its function.
    pub fn from_keyword(word: &str) -> Option<Func> {
        Some(match word {
            "a" | "abundance" => Func::Abundance,
            "p" | "proteinAbundance" => Func::Protein,
            "g" | "geneAbundance" => Func::Gene,
            "r" | "rnaAbundance" => Func::Rna,
            "m" | "microRNAAbundance" => Func::MicroRna,
            "bp" | "biologicalProcess" => Func::BiologicalProcess,
            "path" | "pathology" => Func::Pathology,
            _ => return None,
        })
    }

    /// The short keyword used in canonical renderings.
    pub fn keyword(&self) -> &'static str {
        match self {
            Func::Abundance => "a",
            Func::Protein => "p",
            Func::Gene => "g",
            Func::Rna => "r",
            Func::MicroRna => "m",
            Func::BiologicalProcess => "bp",
            Func::Pathology => "path",
        }
    }

    /// Whether this function accepts variant modifiers (pmod, var, ...).
    pub fn takes_variants(&self) -> bool {
        matches!(
            self,
            Func::Protein | Func::Gene | Func::Rna | Func::MicroRna
        )
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// ──────────────────────────────────────────────
// Variant modifiers
// ──────────────────────────────────────────────

/// A modifier attached to an entity abundance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// `pmod(Ph, Ser, 473)` — modification name with optional residue code
    /// and position.
    Modification {
        name: Identifier,
        code: Option<String>,
        position: Option<i64>,
    },
    /// `var("p.Gly12Val")` — an HGVS variant description.
    Hgvs(String),
    /// Legacy `sub(G, 12, V)`.
    Substitution {
        reference: String,
        position: i64,
        variant: String,
    },
    /// Legacy `trunc(40)`.
    Truncation { position: i64 },
    /// `frag("5_20")` with an optional free-text description.
    Fragment {
        range: String,
        description: Option<String>,
    },
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Modification {
                name,
                code,
                position,
            } => {
                write!(f, "pmod({}", name)?;
                if let Some(code) = code {
                    write!(f, ", {}", code)?;
                }
                if let Some(position) = position {
                    write!(f, ", {}", position)?;
                }
                f.write_str(")")
            }
            Variant::Hgvs(text) => {
                f.write_str("var(")?;
                write_quoted(f, text)?;
                f.write_str(")")
            }
            Variant::Substitution {
                reference,
                position,
                variant,
            } => write!(f, "sub({}, {}, {})", reference, position, variant),
            Variant::Truncation { position } => write!(f, "trunc({})", position),
            Variant::Fragment { range, description } => {
                f.write_str("frag(")?;
                write_quoted(f, range)?;
                if let Some(description) = description {
                    f.write_str(", ")?;
                    write_quoted(f, description)?;
                }
                f.write_str(")")
            }
        }
    }
}

// ──────────────────────────────────────────────
// Terms
// ──────────────────────────────────────────────

/// Direction of a translocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslocationKind {
    /// `tloc(t, fromLoc(a), toLoc(b))`
    Between { from: Identifier, to: Identifier },
    /// `sec(t)`
    Secretion,
    /// `surf(t)`
    SurfaceExpression,
}

/// A BEL term: a biological entity, process, or transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// An entity abundance; `variants` is empty for a simple abundance.
    Abundance {
        func: Func,
        id: Identifier,
        variants: Vec<Variant>,
    },
    /// `complex(SCOMP:"AP-1 Complex")` — a complex named in a vocabulary.
    NamedComplex { id: Identifier },
    /// `complex(p(..), p(..))` — a complex enumerated by its members.
    Complex { members: Vec<Term> },
    /// `composite(p(..), a(..))`
    Composite { members: Vec<Term> },
    /// `rxn(reactants(..), products(..))`
    Reaction {
        reactants: Vec<Term>,
        products: Vec<Term>,
    },
    /// `act(t)` or `act(t, ma(kin))`; BEL 1 one-word activities normalize
    /// to this form.
    Activity {
        target: Box<Term>,
        effect: Option<Identifier>,
    },
    /// `deg(t)`
    Degradation { target: Box<Term> },
    /// `tloc(..)`, `sec(..)`, `surf(..)`
    Translocation {
        target: Box<Term>,
        kind: TranslocationKind,
    },
    /// `p(fus(HGNC:BCR, "r.1_426", HGNC:JAK2, "r.812_5034"))`; a range of
    /// `None` renders as `"?"`.
    Fusion {
        func: Func,
        partner_five: Identifier,
        range_five: Option<String>,
        partner_three: Identifier,
        range_three: Option<String>,
    },
}

impl Term {
    /// A simple (unmodified) abundance.
    pub fn simple(func: Func, id: Identifier) -> Term {
        Term::Abundance {
            func,
            id,
            variants: Vec::new(),
        }
    }

    /// An abundance with its modifier list canonically sorted.
    pub fn abundance(func: Func, id: Identifier, mut variants: Vec<Variant>) -> Term {
        variants.sort_by_cached_key(|v| v.to_string());
        Term::Abundance { func, id, variants }
    }

    /// An enumerated complex with canonically sorted members.
    pub fn complex(mut members: Vec<Term>) -> Term {
        members.sort_by_cached_key(|m| m.to_string());
        Term::Complex { members }
    }

    /// A composite abundance with canonically sorted members.
    pub fn composite(mut members: Vec<Term>) -> Term {
        members.sort_by_cached_key(|m| m.to_string());
        Term::Composite { members }
    }

    /// A reaction with canonically sorted reactant and product lists.
    pub fn reaction(mut reactants: Vec<Term>, mut products: Vec<Term>) -> Term {
        reactants.sort_by_cached_key(|t| t.to_string());
        products.sort_by_cached_key(|t| t.to_string());
        Term::Reaction {
            reactants,
            products,
        }
    }

    /// The canonical dedup key: the rendered text of the term.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Term]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Abundance { func, id, variants } => {
                write!(f, "{}({}", func, id)?;
                for v in variants {
                    write!(f, ", {}", v)?;
                }
                f.write_str(")")
            }
            Term::NamedComplex { id } => write!(f, "complex({})", id),
            Term::Complex { members } => {
                f.write_str("complex(")?;
                write_list(f, members)?;
                f.write_str(")")
            }
            Term::Composite { members } => {
                f.write_str("composite(")?;
                write_list(f, members)?;
                f.write_str(")")
            }
            Term::Reaction {
                reactants,
                products,
            } => {
                f.write_str("rxn(reactants(")?;
                write_list(f, reactants)?;
                f.write_str("), products(")?;
                write_list(f, products)?;
                f.write_str("))")
            }
            Term::Activity { target, effect } => match effect {
                Some(effect) => write!(f, "act({}, ma({}))", target, effect),
                None => write!(f, "act({})", target),
            },
            Term::Degradation { target } => write!(f, "deg({})", target),
            Term::Translocation { target, kind } => match kind {
                TranslocationKind::Between { from, to } => {
                    write!(f, "tloc({}, fromLoc({}), toLoc({}))", target, from, to)
                }
                TranslocationKind::Secretion => write!(f, "sec({})", target),
                TranslocationKind::SurfaceExpression => write!(f, "surf({})", target),
            },
            Term::Fusion {
                func,
                partner_five,
                range_five,
                partner_three,
                range_three,
            } => {
                if range_five.is_none() && range_three.is_none() {
                    return write!(f, "{}(fus({}, {}))", func, partner_five, partner_three);
                }
                write!(f, "{}(fus({}, ", func, partner_five)?;
                write_quoted(f, range_five.as_deref().unwrap_or("?"))?;
                write!(f, ", {}, ", partner_three)?;
                write_quoted(f, range_three.as_deref().unwrap_or("?"))?;
                f.write_str("))")
            }
        }
    }
}
