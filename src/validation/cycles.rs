//! Circular-reference detection.
//!
//! One generic depth-first walk with an explicit on-path set, instantiated
//! over four successor relations. The on-path set — not recursion depth — is
//! what guarantees termination on cyclic input, and dangling edges are
//! treated as leaves (completeness is a separate concern).
//!
//! A cross-start `done` set makes each loop surface exactly once, no matter
//! how many entities it is reachable from.

use ahash::AHashSet;

use crate::error::RuleCode;
use crate::model::{Document, TopLevelRef, Uri};

use super::context::ValidationContext;

/// Depth-first walk from `node`. `on_path` holds the identities on the
/// current recursion path; a successor already on it closes a cycle and is
/// reported, not entered. Fully-explored nodes land in `done` and are never
/// walked again.
fn depth_first(
    node: &Uri,
    successors: &impl Fn(&Uri) -> Vec<Uri>,
    on_path: &mut AHashSet<Uri>,
    done: &mut AHashSet<Uri>,
    on_cycle: &mut impl FnMut(&Uri, &Uri),
) {
    if done.contains(node) {
        return;
    }
    on_path.insert(node.clone());
    for next in successors(node) {
        if on_path.contains(&next) {
            on_cycle(node, &next);
            continue;
        }
        depth_first(&next, successors, on_path, done, on_cycle);
    }
    on_path.remove(node);
    done.insert(node.clone());
}

fn detect(
    starts: impl Iterator<Item = Uri>,
    successors: impl Fn(&Uri) -> Vec<Uri>,
    rule: RuleCode,
    ctx: &mut ValidationContext,
) {
    let mut on_path = AHashSet::new();
    let mut done = AHashSet::new();
    for start in starts {
        depth_first(&start, &successors, &mut on_path, &mut done, &mut |from, to| {
            ctx.error(
                rule,
                from,
                format!("{from} reaches {to}, which is already on the current path"),
            );
        });
    }
}

/// Runs all four cycle checks.
pub(crate) fn check_circular_references(doc: &Document, ctx: &mut ValidationContext) {
    // Containment: a definition transitively containing itself.
    detect(
        doc.component_definitions()
            .map(|cd| cd.ident.identity.clone()),
        |node| {
            doc.component_definition(node)
                .map(|cd| cd.components.iter().map(|c| c.definition.clone()).collect())
                .unwrap_or_default()
        },
        RuleCode::ComponentContainmentCycle,
        ctx,
    );

    detect(
        doc.module_definitions().map(|md| md.ident.identity.clone()),
        |node| {
            doc.module_definition(node)
                .map(|md| md.modules.iter().map(|m| m.definition.clone()).collect())
                .unwrap_or_default()
        },
        RuleCode::ModuleContainmentCycle,
        ctx,
    );

    // A derivation proposing itself, transitively, as its own variant.
    detect(
        doc.combinatorial_derivations()
            .map(|cd| cd.ident.identity.clone()),
        |node| {
            doc.combinatorial_derivation(node)
                .map(|cd| {
                    cd.variable_components
                        .iter()
                        .flat_map(|vc| vc.variant_derivations.iter().cloned())
                        .collect()
                })
                .unwrap_or_default()
        },
        RuleCode::DerivationCycle,
        ctx,
    );

    // Provenance: derivation lineage plus generation edges routed through
    // activities and their usages.
    detect(
        doc.top_levels().map(|t| t.ident().identity.clone()),
        |node| {
            let Some(entity) = doc.top_level(node) else {
                return Vec::new();
            };
            let ident = entity.ident();
            let mut next: Vec<Uri> = ident.derived_froms.clone();
            next.extend(ident.generated_bys.iter().cloned());
            if let TopLevelRef::Activity(activity) = entity {
                next.extend(activity.usages.iter().map(|u| u.entity.clone()));
            }
            next
        },
        RuleCode::ProvenanceCycle,
        ctx,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(edges: &[(&str, &str)], starts: &[&str]) -> Vec<(Uri, Uri)> {
        let mut found = Vec::new();
        let mut on_path = AHashSet::new();
        let mut done = AHashSet::new();
        let successors = |node: &Uri| -> Vec<Uri> {
            edges
                .iter()
                .filter(|(from, _)| node == from)
                .map(|(_, to)| Uri::new(*to))
                .collect()
        };
        for start in starts {
            depth_first(
                &Uri::new(*start),
                &successors,
                &mut on_path,
                &mut done,
                &mut |from, to| found.push((from.clone(), to.clone())),
            );
        }
        found
    }

    #[test]
    fn two_node_loop_reported_once_across_starts() {
        let found = walk(&[("a", "b"), ("b", "a")], &["a", "b"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0], (Uri::new("b"), Uri::new("a")));
    }

    #[test]
    fn chain_without_repeats_is_clean() {
        let found = walk(&[("a", "b"), ("b", "c")], &["a", "b", "c"]);
        assert!(found.is_empty());
    }

    #[test]
    fn self_edge_is_a_cycle() {
        let found = walk(&[("a", "a")], &["a"]);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn dangling_edges_are_leaves() {
        // "b" has no outgoing edges and is never a start; the walk just ends.
        let found = walk(&[("a", "missing")], &["a"]);
        assert!(found.is_empty());
    }
}
