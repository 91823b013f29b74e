//! Term grammar: entity functions, modifiers, and transformations.
//!
//! Long and short function keywords are accepted everywhere; terms are
//! normalized at construction so that every spelling of the same biology
//! produces the same canonical key.

use crate::error::StatementError;
use crate::lexer::Token;
use crate::term::{Func, Identifier, Term, TranslocationKind, Variant};

use super::Parser;

/// One-word BEL 1 activity functions, mapped to their canonical short
/// effect names.
fn legacy_activity(word: &str) -> Option<&'static str> {
    Some(match word {
        "cat" | "catalyticActivity" => "cat",
        "chap" | "chaperoneActivity" => "chap",
        "gtp" | "gtpBoundActivity" => "gtp",
        "kin" | "kinaseActivity" => "kin",
        "pep" | "peptidaseActivity" => "pep",
        "phos" | "phosphataseActivity" => "phos",
        "ribo" | "ribosylationActivity" => "ribo",
        "tscript" | "transcriptionalActivity" => "tscript",
        "tport" | "transportActivity" => "tport",
        _ => return None,
    })
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_term(&mut self) -> Result<Term, StatementError> {
        let word = match self.cur() {
            Token::Word(w) => w.clone(),
            other => return Err(self.err(format!("expected a BEL function, got {other}"))),
        };

        if let Some(func) = Func::from_keyword(&word) {
            self.advance();
            return self.parse_abundance(func);
        }

        match word.as_str() {
            "complex" | "complexAbundance" => {
                self.advance();
                self.parse_complex()
            }
            "composite" | "compositeAbundance" => {
                self.advance();
                self.parse_composite()
            }
            "rxn" | "reaction" => {
                self.advance();
                self.parse_reaction()
            }
            "act" | "activity" => {
                self.advance();
                self.parse_activity()
            }
            "deg" | "degradation" => {
                self.advance();
                let target = self.parse_wrapped_term()?;
                Ok(Term::Degradation {
                    target: Box::new(target),
                })
            }
            "tloc" | "translocation" => {
                self.advance();
                self.parse_translocation()
            }
            "sec" | "cellSecretion" => {
                self.advance();
                let target = self.parse_wrapped_term()?;
                Ok(Term::Translocation {
                    target: Box::new(target),
                    kind: TranslocationKind::Secretion,
                })
            }
            "surf" | "cellSurfaceExpression" => {
                self.advance();
                let target = self.parse_wrapped_term()?;
                Ok(Term::Translocation {
                    target: Box::new(target),
                    kind: TranslocationKind::SurfaceExpression,
                })
            }
            _ => {
                // BEL 1 one-word activities: kin(p(..)) reads as
                // act(p(..), ma(kin)).
                if let Some(effect) = legacy_activity(&word) {
                    self.advance();
                    let target = self.parse_wrapped_term()?;
                    return Ok(Term::Activity {
                        target: Box::new(target),
                        effect: Some(Identifier::naked(effect)),
                    });
                }
                Err(self.err(format!("unknown BEL function '{word}'")))
            }
        }
    }

    /// `( term )`
    fn parse_wrapped_term(&mut self) -> Result<Term, StatementError> {
        self.expect_lparen()?;
        let term = self.parse_term()?;
        self.expect_rparen()?;
        Ok(term)
    }

    fn parse_abundance(&mut self, func: Func) -> Result<Term, StatementError> {
        self.expect_lparen()?;

        // Fusion is written as the sole argument of an entity function.
        if (self.is_word("fus") || self.is_word("fusion")) && self.peek() == &Token::LParen {
            let fusion = self.parse_fusion(func)?;
            self.expect_rparen()?;
            return Ok(fusion);
        }

        let id = self.parse_identifier()?;
        let mut variants = Vec::new();
        while self.cur() == &Token::Comma {
            if !func.takes_variants() {
                return Err(self.err(format!(
                    "function '{}' does not accept modifiers",
                    func.keyword()
                )));
            }
            self.advance();
            variants.push(self.parse_variant()?);
        }
        self.expect_rparen()?;
        Ok(Term::abundance(func, id, variants))
    }

    /// `fus(NS:A, "range", NS:B, "range")` or `fus(NS:A, NS:B)`; a range
    /// written as `"?"` means unspecified.
    fn parse_fusion(&mut self, func: Func) -> Result<Term, StatementError> {
        self.advance();
        self.expect_lparen()?;
        let partner_five = self.parse_identifier()?;
        self.expect_comma()?;

        let (range_five, partner_three, range_three) = if matches!(self.cur(), Token::Str(_)) {
            let range_five = self.take_str()?;
            self.expect_comma()?;
            let partner_three = self.parse_identifier()?;
            self.expect_comma()?;
            let range_three = self.take_str()?;
            (
                fusion_range(range_five),
                partner_three,
                fusion_range(range_three),
            )
        } else {
            (None, self.parse_identifier()?, None)
        };
        self.expect_rparen()?;
        Ok(Term::Fusion {
            func,
            partner_five,
            range_five,
            partner_three,
            range_three,
        })
    }

    fn parse_complex(&mut self) -> Result<Term, StatementError> {
        self.expect_lparen()?;
        // A named complex has a single identifier argument; an enumerated
        // complex lists member terms, each a function call.
        let enumerated = matches!(self.cur(), Token::Word(_)) && self.peek() == &Token::LParen;
        if enumerated {
            let members = self.parse_members("complex")?;
            self.expect_rparen()?;
            return Ok(Term::complex(members));
        }
        let id = self.parse_identifier()?;
        self.expect_rparen()?;
        Ok(Term::NamedComplex { id })
    }

    fn parse_composite(&mut self) -> Result<Term, StatementError> {
        self.expect_lparen()?;
        let members = self.parse_members("composite")?;
        self.expect_rparen()?;
        Ok(Term::composite(members))
    }

    fn parse_members(&mut self, what: &str) -> Result<Vec<Term>, StatementError> {
        let mut members = vec![self.parse_term()?];
        while self.cur() == &Token::Comma {
            self.advance();
            members.push(self.parse_term()?);
        }
        if members.len() < 2 {
            return Err(self.err(format!("{what} requires at least two member terms")));
        }
        Ok(members)
    }

    /// `rxn(reactants(..), products(..))`
    fn parse_reaction(&mut self) -> Result<Term, StatementError> {
        self.expect_lparen()?;
        self.expect_word("reactants")?;
        let reactants = self.parse_term_list()?;
        self.expect_comma()?;
        self.expect_word("products")?;
        let products = self.parse_term_list()?;
        self.expect_rparen()?;
        Ok(Term::reaction(reactants, products))
    }

    /// A parenthesized, non-empty, comma-separated list of terms.
    fn parse_term_list(&mut self) -> Result<Vec<Term>, StatementError> {
        self.expect_lparen()?;
        let mut terms = vec![self.parse_term()?];
        while self.cur() == &Token::Comma {
            self.advance();
            terms.push(self.parse_term()?);
        }
        self.expect_rparen()?;
        Ok(terms)
    }

    /// `act(t)` or `act(t, ma(effect))`
    fn parse_activity(&mut self) -> Result<Term, StatementError> {
        self.expect_lparen()?;
        let target = self.parse_term()?;
        let effect = if self.cur() == &Token::Comma {
            self.advance();
            if !self.is_word("ma") && !self.is_word("molecularActivity") {
                return Err(self.err(format!("expected 'ma', got {}", self.cur())));
            }
            self.advance();
            self.expect_lparen()?;
            let effect = self.parse_effect()?;
            self.expect_rparen()?;
            Some(effect)
        } else {
            None
        };
        self.expect_rparen()?;
        Ok(Term::Activity {
            target: Box::new(target),
            effect,
        })
    }

    /// An activity effect. Bare long-form activity names normalize to their
    /// short form so `ma(kinaseActivity)` and `ma(kin)` agree.
    fn parse_effect(&mut self) -> Result<Identifier, StatementError> {
        let id = self.parse_loose_identifier()?;
        if id.namespace.is_none() {
            if let Some(short) = legacy_activity(&id.name) {
                return Ok(Identifier::naked(short));
            }
        }
        Ok(id)
    }

    /// `tloc(t, fromLoc(NS:a), toLoc(NS:b))`, locations also accepted in the
    /// legacy positional style without the wrappers.
    fn parse_translocation(&mut self) -> Result<Term, StatementError> {
        self.expect_lparen()?;
        let target = self.parse_term()?;
        self.expect_comma()?;
        let from = self.parse_location("fromLoc")?;
        self.expect_comma()?;
        let to = self.parse_location("toLoc")?;
        self.expect_rparen()?;
        Ok(Term::Translocation {
            target: Box::new(target),
            kind: TranslocationKind::Between { from, to },
        })
    }

    fn parse_location(&mut self, wrapper: &str) -> Result<Identifier, StatementError> {
        if self.is_word(wrapper) && self.peek() == &Token::LParen {
            self.advance();
            self.advance();
            let id = self.parse_identifier()?;
            self.expect_rparen()?;
            return Ok(id);
        }
        self.parse_identifier()
    }

    fn parse_variant(&mut self) -> Result<Variant, StatementError> {
        let keyword = self.take_word()?;
        self.expect_lparen()?;
        let variant = match keyword.as_str() {
            "pmod" | "proteinModification" => self.parse_modification()?,
            "var" | "variant" => Variant::Hgvs(self.take_str()?),
            "sub" | "substitution" => {
                let reference = self.take_word()?;
                self.expect_comma()?;
                let position = self.take_int()?;
                self.expect_comma()?;
                let variant = self.take_word()?;
                Variant::Substitution {
                    reference,
                    position,
                    variant,
                }
            }
            "trunc" | "truncation" => Variant::Truncation {
                position: self.take_int()?,
            },
            "frag" | "fragment" => {
                let range = self.take_str()?;
                let description = if self.cur() == &Token::Comma {
                    self.advance();
                    Some(self.take_str()?)
                } else {
                    None
                };
                Variant::Fragment { range, description }
            }
            other => return Err(self.err(format!("unknown modifier '{other}'"))),
        };
        self.expect_rparen()?;
        Ok(variant)
    }

    /// `pmod(name)`, `pmod(name, code)`, `pmod(name, position)`, or
    /// `pmod(name, code, position)`. The code is a bare amino-acid word;
    /// it renders unquoted, so quoted spellings are rejected here.
    fn parse_modification(&mut self) -> Result<Variant, StatementError> {
        let name = self.parse_loose_identifier()?;
        let mut code = None;
        let mut position = None;
        if self.cur() == &Token::Comma {
            self.advance();
            if matches!(self.cur(), Token::Int(_)) {
                position = Some(self.take_int()?);
            } else {
                code = Some(self.take_word()?);
                if self.cur() == &Token::Comma {
                    self.advance();
                    position = Some(self.take_int()?);
                }
            }
        }
        Ok(Variant::Modification {
            name,
            code,
            position,
        })
    }

    /// `NS:name`, with the name as a word, quoted string, or integer. A name
    /// with no namespace prefix is accepted only under `allow_naked_names`,
    /// carrying the configured `naked_namespace` if one is set.
    fn parse_identifier(&mut self) -> Result<Identifier, StatementError> {
        if let Token::Word(w) = self.cur() {
            if self.peek() == &Token::Colon {
                let namespace = w.clone();
                self.advance();
                self.advance();
                return Ok(Identifier::new(namespace, self.take_value()?));
            }
        }
        let name = self.take_value()?;
        if self.options.allow_naked_names {
            Ok(Identifier {
                namespace: self.options.naked_namespace.clone(),
                name,
            })
        } else {
            Err(StatementError::NakedName(name))
        }
    }

    /// An identifier position where a bare controlled-vocabulary word is
    /// always legal: modification names and activity effects.
    fn parse_loose_identifier(&mut self) -> Result<Identifier, StatementError> {
        if let Token::Word(w) = self.cur() {
            if self.peek() == &Token::Colon {
                let namespace = w.clone();
                self.advance();
                self.advance();
                return Ok(Identifier::new(namespace, self.take_value()?));
            }
        }
        Ok(Identifier::naked(self.take_value()?))
    }
}

fn fusion_range(text: String) -> Option<String> {
    if text == "?" {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_term;
    use crate::error::StatementError;
    use crate::options::ParserOptions;
    use crate::term::{Term, TranslocationKind, Variant};

    fn parse(text: &str) -> Term {
        parse_term(text, &ParserOptions::default()).unwrap()
    }

    fn rendered(text: &str) -> String {
        parse(text).to_string()
    }

    #[test]
    fn long_and_short_forms_agree() {
        assert_eq!(
            parse("proteinAbundance(HGNC:AKT1)"),
            parse("p(HGNC:AKT1)")
        );
        assert_eq!(rendered("geneAbundance(HGNC:TP53)"), "g(HGNC:TP53)");
        assert_eq!(rendered("microRNAAbundance(MIRBASE:\"hsa-mir-21\")"), "m(MIRBASE:\"hsa-mir-21\")");
        assert_eq!(rendered("biologicalProcess(GOBP:\"cell cycle\")"), "bp(GOBP:\"cell cycle\")");
    }

    #[test]
    fn naked_names_follow_policy() {
        let err = parse_term("p(AKT1)", &ParserOptions::default()).unwrap_err();
        assert!(matches!(err, StatementError::NakedName(name) if name == "AKT1"));

        let permissive = ParserOptions {
            allow_naked_names: true,
            ..ParserOptions::default()
        };
        assert_eq!(
            parse_term("p(AKT1)", &permissive).unwrap().to_string(),
            "p(AKT1)"
        );

        let placeholder = ParserOptions {
            allow_naked_names: true,
            naked_namespace: Some("UNKNOWN".to_string()),
            ..ParserOptions::default()
        };
        assert_eq!(
            parse_term("p(AKT1)", &placeholder).unwrap().to_string(),
            "p(UNKNOWN:AKT1)"
        );
    }

    #[test]
    fn parses_modification_arities() {
        assert_eq!(
            rendered("p(HGNC:AKT1, pmod(P, S, 473))"),
            "p(HGNC:AKT1, pmod(P, S, 473))"
        );
        assert_eq!(rendered("p(HGNC:AKT1, pmod(Ph))"), "p(HGNC:AKT1, pmod(Ph))");
        // Two-argument form with a position and no residue code.
        match parse("p(HGNC:AKT1, pmod(Ph, 473))") {
            Term::Abundance { variants, .. } => match &variants[0] {
                Variant::Modification { code, position, .. } => {
                    assert_eq!(code, &None);
                    assert_eq!(position, &Some(473));
                }
                other => panic!("unexpected variant {other:?}"),
            },
            other => panic!("unexpected term {other:?}"),
        }
        assert_eq!(
            rendered("proteinAbundance(HGNC:AKT1, proteinModification(MOD:PhosRes))"),
            "p(HGNC:AKT1, pmod(MOD:PhosRes))"
        );
    }

    #[test]
    fn rejects_quoted_modification_codes() {
        // Codes render bare, so a quoted code would break the
        // parse-render-parse fixed point.
        let err = parse_term(
            r#"p(HGNC:AKT1, pmod(Ph, "Ser residue", 473))"#,
            &ParserOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected identifier"), "{err}");
        assert!(matches!(err, StatementError::Structural(_)));
    }

    #[test]
    fn parses_legacy_variants() {
        assert_eq!(
            rendered("p(HGNC:KRAS, sub(G, 12, V))"),
            "p(HGNC:KRAS, sub(G, 12, V))"
        );
        assert_eq!(rendered("p(HGNC:AKT1, trunc(40))"), "p(HGNC:AKT1, trunc(40))");
        assert_eq!(
            rendered("p(HGNC:YFG, frag(\"5_20\", \"N-terminal\"))"),
            "p(HGNC:YFG, frag(\"5_20\", \"N-terminal\"))"
        );
        assert_eq!(
            rendered("g(HGNC:KRAS, var(\"c.35G>T\"))"),
            "g(HGNC:KRAS, var(\"c.35G>T\"))"
        );
    }

    #[test]
    fn sorts_variant_lists() {
        assert_eq!(
            parse("p(HGNC:AKT1, var(\"p.G12V\"), pmod(P))"),
            parse("p(HGNC:AKT1, pmod(P), var(\"p.G12V\"))")
        );
    }

    #[test]
    fn rejects_modifiers_on_processes() {
        let err = parse_term("bp(GOBP:apoptosis, pmod(P))", &ParserOptions::default()).unwrap_err();
        assert!(err.to_string().contains("does not accept modifiers"), "{err}");
    }

    #[test]
    fn distinguishes_named_and_enumerated_complexes() {
        assert!(matches!(
            parse("complex(SCOMP:\"AP-1 Complex\")"),
            Term::NamedComplex { .. }
        ));
        assert_eq!(
            rendered("complex(p(HGNC:JUN), p(HGNC:FOS))"),
            "complex(p(HGNC:FOS), p(HGNC:JUN))"
        );
        let err = parse_term("complex(p(HGNC:JUN))", &ParserOptions::default()).unwrap_err();
        assert!(err.to_string().contains("at least two"), "{err}");
    }

    #[test]
    fn parses_composite() {
        assert_eq!(
            rendered("composite(p(HGNC:TGFB1), a(CHEBI:lipopolysaccharide))"),
            "composite(a(CHEBI:lipopolysaccharide), p(HGNC:TGFB1))"
        );
    }

    #[test]
    fn parses_reaction() {
        assert_eq!(
            rendered("rxn(reactants(a(CHEBI:superoxide)), products(a(CHEBI:oxygen), a(CHEBI:\"hydrogen peroxide\")))"),
            "rxn(reactants(a(CHEBI:superoxide)), products(a(CHEBI:\"hydrogen peroxide\"), a(CHEBI:oxygen)))"
        );
    }

    #[test]
    fn normalizes_activities() {
        assert_eq!(rendered("act(p(HGNC:AKT1))"), "act(p(HGNC:AKT1))");
        assert_eq!(
            rendered("act(p(HGNC:AKT1), ma(kin))"),
            "act(p(HGNC:AKT1), ma(kin))"
        );
        // BEL 1 one-word activities and long-form effects collapse to the
        // same canonical form.
        assert_eq!(
            rendered("kin(p(HGNC:AKT1))"),
            "act(p(HGNC:AKT1), ma(kin))"
        );
        assert_eq!(
            rendered("kinaseActivity(p(HGNC:AKT1))"),
            "act(p(HGNC:AKT1), ma(kin))"
        );
        assert_eq!(
            rendered("act(p(HGNC:AKT1), ma(kinaseActivity))"),
            "act(p(HGNC:AKT1), ma(kin))"
        );
        assert_eq!(
            rendered("act(p(HGNC:CTNNB1), ma(GO:\"kinase activity\"))"),
            "act(p(HGNC:CTNNB1), ma(GO:\"kinase activity\"))"
        );
        assert_eq!(
            rendered("tscript(p(HGNC:TP53))"),
            "act(p(HGNC:TP53), ma(tscript))"
        );
    }

    #[test]
    fn parses_translocations() {
        let canonical = "tloc(p(HGNC:EGFR), fromLoc(GOCC:\"cell surface\"), toLoc(GOCC:endosome))";
        assert_eq!(
            rendered("tloc(p(HGNC:EGFR), fromLoc(GOCC:\"cell surface\"), toLoc(GOCC:endosome))"),
            canonical
        );
        // Legacy positional locations.
        assert_eq!(
            rendered("tloc(p(HGNC:EGFR), GOCC:\"cell surface\", GOCC:endosome)"),
            canonical
        );
        assert_eq!(rendered("sec(p(HGNC:IL6))"), "sec(p(HGNC:IL6))");
        assert_eq!(
            rendered("cellSurfaceExpression(p(HGNC:EGFR))"),
            "surf(p(HGNC:EGFR))"
        );
        let err = parse_term("tloc(p(HGNC:EGFR))", &ParserOptions::default()).unwrap_err();
        assert!(matches!(err, StatementError::Structural(_)));
    }

    #[test]
    fn parses_fusions() {
        assert_eq!(
            rendered("p(fus(HGNC:BCR, \"p.1_426\", HGNC:JAK2, \"p.812_1132\"))"),
            "p(fus(HGNC:BCR, \"p.1_426\", HGNC:JAK2, \"p.812_1132\"))"
        );
        // "?" ranges collapse to the two-argument rendering.
        assert_eq!(
            rendered("g(fus(HGNC:BCR, \"?\", HGNC:JAK2, \"?\"))"),
            "g(fus(HGNC:BCR, HGNC:JAK2))"
        );
        assert_eq!(
            rendered("r(fusion(HGNC:TMPRSS2, HGNC:ERG))"),
            "r(fus(HGNC:TMPRSS2, HGNC:ERG))"
        );
    }

    #[test]
    fn parses_degradation() {
        assert_eq!(rendered("deg(p(HGNC:MYC))"), "deg(p(HGNC:MYC))");
        assert_eq!(rendered("degradation(r(HGNC:MYC))"), "deg(r(HGNC:MYC))");
    }

    #[test]
    fn rejects_unknown_function() {
        let err = parse_term("widget(HGNC:AKT1)", &ParserOptions::default()).unwrap_err();
        assert!(err.to_string().contains("unknown BEL function"), "{err}");
    }
}
