//! Node registration and structural edges.
//!
//! Registration walks a parsed term, validates every source-written
//! identifier against the document's inline namespaces and the external
//! resolver, interns each constituent term as a node, and adds the
//! unqualified structural edges implied by containers: `hasComponent` for
//! complex and composite members, `hasReactant` / `hasProduct` for
//! reactions, and `hasVariant` from an unmodified base to its modified
//! form. Structural edges always carry an empty context.

use petgraph::graph::NodeIndex;

use crate::context::Context;
use crate::error::{Warning, WarningKind};
use crate::graph::{BelGraph, EdgeData};
use crate::options::ParserOptions;
use crate::relation::Relation;
use crate::resolver::{Lookup, NamespaceResolver};
use crate::term::{Identifier, Term, TranslocationKind, Variant};

pub(crate) struct Registrar<'a> {
    pub graph: &'a mut BelGraph,
    pub resolver: &'a dyn NamespaceResolver,
    pub options: &'a ParserOptions,
    /// Logical line number (or record ordinal) of the statement being
    /// registered, for warning provenance.
    pub line: u32,
    pub source: &'a str,
}

impl<'a> Registrar<'a> {
    /// Registers a term and all of its constituents, returning the node
    /// index of the term itself.
    pub(crate) fn register(&mut self, term: &Term) -> NodeIndex {
        match term {
            Term::Abundance { func, id, variants } => {
                self.check_identifier(id);
                for variant in variants {
                    if let Variant::Modification { name, .. } = variant {
                        if name.namespace.is_some() {
                            self.check_identifier(name);
                        }
                    }
                }
                let ix = self.graph.register_node(term);
                if !variants.is_empty() {
                    let base = self.graph.register_node(&Term::simple(*func, id.clone()));
                    self.structural_edge(base, ix, Relation::HasVariant);
                }
                ix
            }
            Term::NamedComplex { id } => {
                self.check_identifier(id);
                self.graph.register_node(term)
            }
            Term::Complex { members } | Term::Composite { members } => {
                let member_ixs: Vec<NodeIndex> =
                    members.iter().map(|m| self.register(m)).collect();
                let ix = self.graph.register_node(term);
                for member in member_ixs {
                    self.structural_edge(ix, member, Relation::HasComponent);
                }
                ix
            }
            Term::Reaction {
                reactants,
                products,
            } => {
                let reactant_ixs: Vec<NodeIndex> =
                    reactants.iter().map(|t| self.register(t)).collect();
                let product_ixs: Vec<NodeIndex> =
                    products.iter().map(|t| self.register(t)).collect();
                let ix = self.graph.register_node(term);
                for reactant in reactant_ixs {
                    self.structural_edge(ix, reactant, Relation::HasReactant);
                }
                for product in product_ixs {
                    self.structural_edge(ix, product, Relation::HasProduct);
                }
                ix
            }
            Term::Activity { target, effect } => {
                if let Some(effect) = effect {
                    if effect.namespace.is_some() {
                        self.check_identifier(effect);
                    }
                }
                self.register(target);
                self.graph.register_node(term)
            }
            Term::Degradation { target } => {
                self.register(target);
                self.graph.register_node(term)
            }
            Term::Translocation { target, kind } => {
                if let TranslocationKind::Between { from, to } = kind {
                    self.check_identifier(from);
                    self.check_identifier(to);
                }
                self.register(target);
                self.graph.register_node(term)
            }
            Term::Fusion {
                partner_five,
                partner_three,
                ..
            } => {
                self.check_identifier(partner_five);
                self.check_identifier(partner_three);
                self.graph.register_node(term)
            }
        }
    }

    fn structural_edge(&mut self, source: NodeIndex, target: NodeIndex, relation: Relation) {
        self.graph.add_edge(
            source,
            target,
            EdgeData {
                relation,
                context: Context::default(),
            },
        );
    }

    /// Non-blocking identifier validation: inline LIST namespaces first,
    /// then the external resolver. The placeholder namespace for naked
    /// names is exempt.
    fn check_identifier(&mut self, id: &Identifier) {
        let Some(ns) = id.namespace.as_deref() else {
            return;
        };
        if self.options.naked_namespace.as_deref() == Some(ns) {
            return;
        }
        let listed = self
            .graph
            .namespace_list(ns)
            .map(|values| values.contains(&id.name));
        match listed {
            Some(true) => {}
            Some(false) => self.unknown_term(ns, &id.name),
            None => match self.resolver.resolve(ns, &id.name) {
                Lookup::Known => {}
                Lookup::Unknown => self.unknown_term(ns, &id.name),
                Lookup::NamespaceUndeclared => self.warn(
                    WarningKind::NamespaceUndeclared,
                    format!("namespace '{ns}' is not defined"),
                ),
            },
        }
    }

    fn unknown_term(&mut self, ns: &str, name: &str) {
        self.warn(
            WarningKind::UnknownNamespaceTerm,
            format!("'{name}' is not a member of namespace '{ns}'"),
        );
    }

    fn warn(&mut self, kind: WarningKind, message: String) {
        self.graph
            .warn(Warning::new(self.line, self.source, kind, message));
    }
}
