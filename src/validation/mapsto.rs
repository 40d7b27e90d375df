//! Mapping-refinement rule: within one owning element, no two distinct
//! mappings may target the same local element while both declare the
//! use-remote refinement.
//!
//! The rule is one pure predicate with two invocation surfaces: the document
//! mutation path calls it eagerly and rejects the offending attach (see
//! [`Document::add_component_maps_to`](crate::model::Document::add_component_maps_to)),
//! and the batch pass below records violations and keeps going.

use crate::error::RuleCode;
use crate::model::{Document, MapsTo, Refinement};

use super::context::ValidationContext;

/// Whether `candidate` clashes with any mapping in `existing`: same local
/// element, both use-remote, and not the same mapping.
pub(crate) fn use_remote_conflict<'a>(
    existing: impl IntoIterator<Item = &'a MapsTo>,
    candidate: &MapsTo,
) -> bool {
    if candidate.refinement != Refinement::UseRemote {
        return false;
    }
    existing
        .into_iter()
        .filter(|m| m.ident.identity != candidate.ident.identity)
        .any(|m| m.refinement == Refinement::UseRemote && m.local == candidate.local)
}

/// Batch surface: runs the predicate over every owning definition.
pub(crate) fn check_mapping_refinements(doc: &Document, ctx: &mut ValidationContext) {
    for cd in doc.component_definitions() {
        let all: Vec<&MapsTo> = cd
            .components
            .iter()
            .flat_map(|c| c.maps_tos.iter())
            .collect();
        for &m in &all {
            if use_remote_conflict(all.iter().copied(), m) {
                ctx.error(
                    RuleCode::MappingRefinementConflict,
                    &cd.ident.identity,
                    format!(
                        "local {} is replaced by more than one use-remote mapping ({})",
                        m.local, m.ident.identity
                    ),
                );
            }
        }
    }
    for md in doc.module_definitions() {
        let all: Vec<&MapsTo> = md
            .modules
            .iter()
            .flat_map(|m| m.maps_tos.iter())
            .chain(
                md.functional_components
                    .iter()
                    .flat_map(|fc| fc.maps_tos.iter()),
            )
            .collect();
        for &m in &all {
            if use_remote_conflict(all.iter().copied(), m) {
                ctx.error(
                    RuleCode::MappingRefinementConflict,
                    &md.ident.identity,
                    format!(
                        "local {} is replaced by more than one use-remote mapping ({})",
                        m.local, m.ident.identity
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Identified;

    fn mapping(id: &str, refinement: Refinement, local: &str) -> MapsTo {
        MapsTo::new(Identified::new(id), refinement, local, "remote:r")
    }

    #[test]
    fn two_use_remote_on_same_local_conflict() {
        let a = mapping("m:a", Refinement::UseRemote, "local:x");
        let b = mapping("m:b", Refinement::UseRemote, "local:x");
        assert!(use_remote_conflict([&a], &b));
    }

    #[test]
    fn different_locals_or_refinements_do_not_conflict() {
        let a = mapping("m:a", Refinement::UseRemote, "local:x");
        let b = mapping("m:b", Refinement::UseRemote, "local:y");
        let c = mapping("m:c", Refinement::UseLocal, "local:x");
        assert!(!use_remote_conflict([&a], &b));
        assert!(!use_remote_conflict([&a], &c));
        assert!(!use_remote_conflict([&c], &a));
    }

    #[test]
    fn a_mapping_never_conflicts_with_itself() {
        let a = mapping("m:a", Refinement::UseRemote, "local:x");
        assert!(!use_remote_conflict([&a], &a));
    }
}
