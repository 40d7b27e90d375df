//! Ontology and notation capabilities consumed by the best-practice checks.
//!
//! The validator never owns ontology data. It consumes two narrow
//! capabilities:
//!
//! - [`TermHierarchy`] — "is term X a descendant of ancestor Y?"; an unknown
//!   term answers `false` and never raises.
//! - [`ChemicalNotation`] — "does this text parse as chemical notation?".
//!
//! Built-in implementations cover the hierarchy facts and notation shape the
//! rules need out of the box; callers with a full ontology service or a real
//! notation parser plug their own in through
//! [`DocumentValidator`](crate::validation::DocumentValidator).

pub mod terms;

use ahash::{AHashMap, AHashSet};
use once_cell::sync::Lazy;

use crate::model::Uri;

/// Term-hierarchy capability: strict descent, so a term is not a descendant
/// of itself. Unknown terms degrade to `false`.
pub trait TermHierarchy {
    fn is_descendant_of(&self, term: &Uri, ancestor: &Uri) -> bool;
}

/// Chemical-notation capability: whether `text` parses under the notation the
/// adapter understands.
pub trait ChemicalNotation {
    fn parses(&self, text: &str) -> bool;
}

static DESCENDANTS: Lazy<AHashMap<&'static str, AHashSet<&'static str>>> = Lazy::new(|| {
    let mut map: AHashMap<&'static str, AHashSet<&'static str>> = AHashMap::new();
    map.insert(
        terms::SEQUENCE_FEATURE,
        [
            terms::ROLE_PROMOTER,
            terms::ROLE_RBS,
            terms::ROLE_CDS,
            terms::ROLE_TERMINATOR,
            terms::ROLE_OPERATOR,
            terms::ROLE_GENE,
            terms::ROLE_ENGINEERED_REGION,
        ]
        .into_iter()
        .collect(),
    );
    map.insert(
        terms::TOPOLOGY_ATTRIBUTE,
        [terms::TOPOLOGY_LINEAR, terms::TOPOLOGY_CIRCULAR]
            .into_iter()
            .collect(),
    );
    map.insert(
        terms::STRAND_ATTRIBUTE,
        [terms::STRAND_SINGLE, terms::STRAND_DOUBLE]
            .into_iter()
            .collect(),
    );
    map.insert(
        terms::OCCURRING_ENTITY,
        [
            terms::INTERACTION_INHIBITION,
            terms::INTERACTION_STIMULATION,
            terms::INTERACTION_NON_COVALENT_BINDING,
            terms::INTERACTION_DEGRADATION,
            terms::INTERACTION_BIOCHEMICAL_REACTION,
            terms::INTERACTION_GENETIC_PRODUCTION,
            terms::INTERACTION_CONTROL,
        ]
        .into_iter()
        .collect(),
    );
    map.insert(
        terms::PARTICIPANT_ROLE,
        [
            terms::ROLE_INHIBITOR,
            terms::ROLE_INHIBITED,
            terms::ROLE_STIMULATOR,
            terms::ROLE_STIMULATED,
            terms::ROLE_REACTANT,
            terms::ROLE_PRODUCT,
            terms::ROLE_MODIFIER,
            terms::ROLE_MODIFIED,
            terms::ROLE_PROMOTER_PARTICIPANT,
            terms::ROLE_TEMPLATE,
        ]
        .into_iter()
        .collect(),
    );
    map.insert(
        terms::FORMAT_ROOT,
        [
            terms::FORMAT_SBML,
            terms::FORMAT_CELLML,
            terms::FORMAT_BIOPAX,
            terms::FORMAT_GENBANK,
        ]
        .into_iter()
        .collect(),
    );
    map.insert(
        terms::FRAMEWORK_ROOT,
        [
            terms::FRAMEWORK_CONTINUOUS,
            terms::FRAMEWORK_DISCRETE,
            terms::FRAMEWORK_LOGICAL,
        ]
        .into_iter()
        .collect(),
    );
    map
});

/// Built-in hierarchy over the term table in [`terms`]. Flat: every known
/// descendant hangs directly off its vocabulary root, which is all the rules
/// ask about.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTermHierarchy;

impl TermHierarchy for BuiltinTermHierarchy {
    fn is_descendant_of(&self, term: &Uri, ancestor: &Uri) -> bool {
        DESCENDANTS
            .get(ancestor.as_str())
            .is_some_and(|set| set.contains(term.as_str()))
    }
}

/// Built-in notation check: accepts the SMILES surface alphabet with balanced
/// brackets and parentheses. Deliberately permissive — a real parser can be
/// plugged in instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinNotation;

impl ChemicalNotation for BuiltinNotation {
    fn parses(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let mut parens = 0i32;
        let mut brackets = 0i32;
        for c in text.chars() {
            match c {
                '(' => parens += 1,
                ')' => {
                    parens -= 1;
                    if parens < 0 {
                        return false;
                    }
                }
                '[' => brackets += 1,
                ']' => {
                    brackets -= 1;
                    if brackets < 0 {
                        return false;
                    }
                }
                'A'..='Z' | 'a'..='z' | '0'..='9' => {}
                '=' | '#' | '$' | ':' | '/' | '\\' | '+' | '-' | '@' | '.' | '%' | '*' => {}
                _ => return false,
            }
        }
        parens == 0 && brackets == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_descendants_resolve() {
        let h = BuiltinTermHierarchy;
        assert!(h.is_descendant_of(
            &Uri::new(terms::ROLE_PROMOTER),
            &Uri::new(terms::SEQUENCE_FEATURE)
        ));
        assert!(h.is_descendant_of(
            &Uri::new(terms::INTERACTION_CONTROL),
            &Uri::new(terms::OCCURRING_ENTITY)
        ));
    }

    #[test]
    fn descent_is_strict_and_unknown_terms_are_false() {
        let h = BuiltinTermHierarchy;
        assert!(!h.is_descendant_of(
            &Uri::new(terms::SEQUENCE_FEATURE),
            &Uri::new(terms::SEQUENCE_FEATURE)
        ));
        assert!(!h.is_descendant_of(
            &Uri::new("http://example.org/unknown"),
            &Uri::new(terms::SEQUENCE_FEATURE)
        ));
    }

    #[test]
    fn notation_accepts_plausible_molecules() {
        let n = BuiltinNotation;
        assert!(n.parses("CC(=O)Oc1ccccc1C(=O)O"));
        assert!(n.parses("[Na+].[Cl-]"));
        assert!(!n.parses("CC(=O"));
        assert!(!n.parses(""));
        assert!(!n.parses("C{C}"));
    }
}
