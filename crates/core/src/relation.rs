//! The BEL relation vocabulary.
//!
//! Relations are partitioned at design time: QUALIFIED relations assert
//! evidence-backed causality or correlation and require a citation and
//! evidence in scope, UNQUALIFIED relations express composition or ontology
//! and never require context.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    // Qualified
    Increases,
    DirectlyIncreases,
    Decreases,
    DirectlyDecreases,
    CausesNoChange,
    Regulates,
    Association,
    PositiveCorrelation,
    NegativeCorrelation,
    BiomarkerFor,
    PrognosticBiomarkerFor,
    RateLimitingStepOf,
    SubProcessOf,
    // Unqualified
    HasComponent,
    HasMember,
    HasVariant,
    HasReactant,
    HasProduct,
    IsA,
    PartOf,
    TranscribedTo,
    TranslatedTo,
    EquivalentTo,
    Orthologous,
    Translocates,
}

impl Relation {
    /// Maps a relation keyword, abbreviation, or arrow to its relation.
    pub fn from_keyword(word: &str) -> Option<Relation> {
        Some(match word {
            "increases" | "->" => Relation::Increases,
            "directlyIncreases" | "=>" => Relation::DirectlyIncreases,
            "decreases" | "-|" => Relation::Decreases,
            "directlyDecreases" | "=|" => Relation::DirectlyDecreases,
            "causesNoChange" | "cnc" => Relation::CausesNoChange,
            "regulates" | "reg" => Relation::Regulates,
            "association" | "--" => Relation::Association,
            "positiveCorrelation" | "pos" => Relation::PositiveCorrelation,
            "negativeCorrelation" | "neg" => Relation::NegativeCorrelation,
            "biomarkerFor" => Relation::BiomarkerFor,
            "prognosticBiomarkerFor" => Relation::PrognosticBiomarkerFor,
            "rateLimitingStepOf" => Relation::RateLimitingStepOf,
            "subProcessOf" => Relation::SubProcessOf,
            "hasComponent" => Relation::HasComponent,
            "hasMember" => Relation::HasMember,
            "hasVariant" => Relation::HasVariant,
            "hasReactant" => Relation::HasReactant,
            "hasProduct" => Relation::HasProduct,
            "isA" => Relation::IsA,
            "partOf" => Relation::PartOf,
            "transcribedTo" => Relation::TranscribedTo,
            "translatedTo" => Relation::TranslatedTo,
            "equivalentTo" | "eq" => Relation::EquivalentTo,
            "orthologous" => Relation::Orthologous,
            "translocates" => Relation::Translocates,
            _ => return None,
        })
    }

    /// The canonical long keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Relation::Increases => "increases",
            Relation::DirectlyIncreases => "directlyIncreases",
            Relation::Decreases => "decreases",
            Relation::DirectlyDecreases => "directlyDecreases",
            Relation::CausesNoChange => "causesNoChange",
            Relation::Regulates => "regulates",
            Relation::Association => "association",
            Relation::PositiveCorrelation => "positiveCorrelation",
            Relation::NegativeCorrelation => "negativeCorrelation",
            Relation::BiomarkerFor => "biomarkerFor",
            Relation::PrognosticBiomarkerFor => "prognosticBiomarkerFor",
            Relation::RateLimitingStepOf => "rateLimitingStepOf",
            Relation::SubProcessOf => "subProcessOf",
            Relation::HasComponent => "hasComponent",
            Relation::HasMember => "hasMember",
            Relation::HasVariant => "hasVariant",
            Relation::HasReactant => "hasReactant",
            Relation::HasProduct => "hasProduct",
            Relation::IsA => "isA",
            Relation::PartOf => "partOf",
            Relation::TranscribedTo => "transcribedTo",
            Relation::TranslatedTo => "translatedTo",
            Relation::EquivalentTo => "equivalentTo",
            Relation::Orthologous => "orthologous",
            Relation::Translocates => "translocates",
        }
    }

    /// Whether this relation requires citation and evidence in scope.
    pub fn is_qualified(&self) -> bool {
        matches!(
            self,
            Relation::Increases
                | Relation::DirectlyIncreases
                | Relation::Decreases
                | Relation::DirectlyDecreases
                | Relation::CausesNoChange
                | Relation::Regulates
                | Relation::Association
                | Relation::PositiveCorrelation
                | Relation::NegativeCorrelation
                | Relation::BiomarkerFor
                | Relation::PrognosticBiomarkerFor
                | Relation::RateLimitingStepOf
                | Relation::SubProcessOf
        )
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
