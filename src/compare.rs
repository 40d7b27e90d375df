//! Recursive structural diff between two documents.
//!
//! For each entity kind the comparator reports the symmetric difference of
//! identity sets; identities present on both sides that are not field-wise
//! equal are reported as differing, and the comparison recurses one level
//! into the owned child collections to pinpoint the differing child. Entries
//! are purely informational — no severities — and come out in a stable
//! order. Nesting depth is shown with `->` markers, grandchildren under
//! `--->`.

use std::fmt;

use serde::Serialize;

use crate::model::{Document, Identified, MapsTo, Uri};

/// Ordered, informational diff entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub entries: Vec<String>,
}

impl ComparisonReport {
    pub fn is_identical(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    fn push(&mut self, entry: String) {
        self.entries.push(entry);
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Symmetric comparison of one entity collection. `descend` runs on pairs
/// that share an identity but differ field-wise.
#[allow(clippy::too_many_arguments)]
fn compare_set<'a, T: PartialEq + 'a>(
    report: &mut ComparisonReport,
    kind: &str,
    marker: &str,
    name_a: &str,
    in_a: impl Iterator<Item = (&'a Identified, &'a T)>,
    lookup_a: impl Fn(&Uri) -> Option<&'a T>,
    name_b: &str,
    in_b: impl Iterator<Item = (&'a Identified, &'a T)>,
    lookup_b: impl Fn(&Uri) -> Option<&'a T>,
    mut descend: impl FnMut(&mut ComparisonReport, &'a T, &'a T),
) {
    for (ident, entity_a) in in_a {
        match lookup_b(&ident.identity) {
            None => report.push(format!(
                "{marker}{kind} {} not found in {name_b}",
                ident.identity
            )),
            Some(entity_b) if entity_a != entity_b => {
                report.push(format!("{marker}{kind} {} differ.", ident.identity));
                descend(report, entity_a, entity_b);
            }
            Some(_) => {}
        }
    }
    for (ident, _) in in_b {
        if lookup_a(&ident.identity).is_none() {
            report.push(format!(
                "{marker}{kind} {} not found in {name_a}",
                ident.identity
            ));
        }
    }
}

fn compare_maps_tos(
    report: &mut ComparisonReport,
    name_a: &str,
    in_a: &[MapsTo],
    name_b: &str,
    in_b: &[MapsTo],
) {
    let find = |set: &'_ [MapsTo], uri: &Uri| -> bool {
        set.iter().any(|m| &m.ident.identity == uri)
    };
    for maps_to in in_a {
        match in_b.iter().find(|m| m.ident.identity == maps_to.ident.identity) {
            None => report.push(format!(
                "--->MapsTo {} not found in {name_b}",
                maps_to.ident.identity
            )),
            Some(other) if maps_to != other => {
                report.push(format!("--->MapsTo {} differ.", maps_to.ident.identity));
            }
            Some(_) => {}
        }
    }
    for maps_to in in_b {
        if !find(in_a, &maps_to.ident.identity) {
            report.push(format!(
                "--->MapsTo {} not found in {name_a}",
                maps_to.ident.identity
            ));
        }
    }
}

/// Compares two documents and returns every difference found.
pub fn compare_documents(
    name_a: &str,
    a: &Document,
    name_b: &str,
    b: &Document,
) -> ComparisonReport {
    let mut report = ComparisonReport::default();
    tracing::debug!(%name_a, %name_b, "comparing documents");

    compare_set(
        &mut report,
        "Collection",
        "",
        name_a,
        a.collections().map(|e| (&e.ident, e)),
        |uri| a.collection(uri),
        name_b,
        b.collections().map(|e| (&e.ident, e)),
        |uri| b.collection(uri),
        |_, _, _| {},
    );

    compare_set(
        &mut report,
        "ComponentDefinition",
        "",
        name_a,
        a.component_definitions().map(|e| (&e.ident, e)),
        |uri| a.component_definition(uri),
        name_b,
        b.component_definitions().map(|e| (&e.ident, e)),
        |uri| b.component_definition(uri),
        |report, cd1, cd2| {
            compare_set(
                report,
                "Component",
                "->",
                name_a,
                cd1.components.iter().map(|c| (&c.ident, c)),
                |uri| cd1.component(uri),
                name_b,
                cd2.components.iter().map(|c| (&c.ident, c)),
                |uri| cd2.component(uri),
                |report, c1, c2| {
                    compare_maps_tos(report, name_a, &c1.maps_tos, name_b, &c2.maps_tos);
                },
            );
            compare_set(
                report,
                "SequenceAnnotation",
                "->",
                name_a,
                cd1.sequence_annotations.iter().map(|sa| (&sa.ident, sa)),
                |uri| cd1.sequence_annotation(uri),
                name_b,
                cd2.sequence_annotations.iter().map(|sa| (&sa.ident, sa)),
                |uri| cd2.sequence_annotation(uri),
                |report, sa1, sa2| {
                    compare_set(
                        report,
                        "Location",
                        "--->",
                        name_a,
                        sa1.locations.iter().map(|l| (l.ident(), l)),
                        |uri| sa1.location(uri),
                        name_b,
                        sa2.locations.iter().map(|l| (l.ident(), l)),
                        |uri| sa2.location(uri),
                        |_, _, _| {},
                    );
                },
            );
            compare_set(
                report,
                "SequenceConstraint",
                "->",
                name_a,
                cd1.sequence_constraints.iter().map(|sc| (&sc.ident, sc)),
                |uri| cd1.sequence_constraint(uri),
                name_b,
                cd2.sequence_constraints.iter().map(|sc| (&sc.ident, sc)),
                |uri| cd2.sequence_constraint(uri),
                |_, _, _| {},
            );
        },
    );

    compare_set(
        &mut report,
        "Sequence",
        "",
        name_a,
        a.sequences().map(|e| (&e.ident, e)),
        |uri| a.sequence(uri),
        name_b,
        b.sequences().map(|e| (&e.ident, e)),
        |uri| b.sequence(uri),
        |_, _, _| {},
    );

    compare_set(
        &mut report,
        "ModuleDefinition",
        "",
        name_a,
        a.module_definitions().map(|e| (&e.ident, e)),
        |uri| a.module_definition(uri),
        name_b,
        b.module_definitions().map(|e| (&e.ident, e)),
        |uri| b.module_definition(uri),
        |report, md1, md2| {
            compare_set(
                report,
                "FunctionalComponent",
                "->",
                name_a,
                md1.functional_components.iter().map(|fc| (&fc.ident, fc)),
                |uri| md1.functional_component(uri),
                name_b,
                md2.functional_components.iter().map(|fc| (&fc.ident, fc)),
                |uri| md2.functional_component(uri),
                |report, fc1, fc2| {
                    compare_maps_tos(report, name_a, &fc1.maps_tos, name_b, &fc2.maps_tos);
                },
            );
            compare_set(
                report,
                "Module",
                "->",
                name_a,
                md1.modules.iter().map(|m| (&m.ident, m)),
                |uri| md1.module(uri),
                name_b,
                md2.modules.iter().map(|m| (&m.ident, m)),
                |uri| md2.module(uri),
                |report, m1, m2| {
                    compare_maps_tos(report, name_a, &m1.maps_tos, name_b, &m2.maps_tos);
                },
            );
            compare_set(
                report,
                "Interaction",
                "->",
                name_a,
                md1.interactions.iter().map(|i| (&i.ident, i)),
                |uri| md1.interaction(uri),
                name_b,
                md2.interactions.iter().map(|i| (&i.ident, i)),
                |uri| md2.interaction(uri),
                |report, i1, i2| {
                    compare_set(
                        report,
                        "Participation",
                        "--->",
                        name_a,
                        i1.participations.iter().map(|p| (&p.ident, p)),
                        |uri| i1.participation(uri),
                        name_b,
                        i2.participations.iter().map(|p| (&p.ident, p)),
                        |uri| i2.participation(uri),
                        |_, _, _| {},
                    );
                },
            );
        },
    );

    compare_set(
        &mut report,
        "Model",
        "",
        name_a,
        a.models().map(|e| (&e.ident, e)),
        |uri| a.model(uri),
        name_b,
        b.models().map(|e| (&e.ident, e)),
        |uri| b.model(uri),
        |_, _, _| {},
    );

    compare_set(
        &mut report,
        "Activity",
        "",
        name_a,
        a.activities().map(|e| (&e.ident, e)),
        |uri| a.activity(uri),
        name_b,
        b.activities().map(|e| (&e.ident, e)),
        |uri| b.activity(uri),
        |report, act1, act2| {
            compare_set(
                report,
                "Association",
                "->",
                name_a,
                act1.associations.iter().map(|x| (&x.ident, x)),
                |uri| act1.association(uri),
                name_b,
                act2.associations.iter().map(|x| (&x.ident, x)),
                |uri| act2.association(uri),
                |_, _, _| {},
            );
            compare_set(
                report,
                "Usage",
                "->",
                name_a,
                act1.usages.iter().map(|x| (&x.ident, x)),
                |uri| act1.usage(uri),
                name_b,
                act2.usages.iter().map(|x| (&x.ident, x)),
                |uri| act2.usage(uri),
                |_, _, _| {},
            );
        },
    );

    compare_set(
        &mut report,
        "Plan",
        "",
        name_a,
        a.plans().map(|e| (&e.ident, e)),
        |uri| a.plan(uri),
        name_b,
        b.plans().map(|e| (&e.ident, e)),
        |uri| b.plan(uri),
        |_, _, _| {},
    );

    compare_set(
        &mut report,
        "Agent",
        "",
        name_a,
        a.agents().map(|e| (&e.ident, e)),
        |uri| a.agent(uri),
        name_b,
        b.agents().map(|e| (&e.ident, e)),
        |uri| b.agent(uri),
        |_, _, _| {},
    );

    compare_set(
        &mut report,
        "GenericTopLevel",
        "",
        name_a,
        a.generic_top_levels().map(|e| (&e.ident, e)),
        |uri| a.generic_top_level(uri),
        name_b,
        b.generic_top_levels().map(|e| (&e.ident, e)),
        |uri| b.generic_top_level(uri),
        |_, _, _| {},
    );

    compare_set(
        &mut report,
        "CombinatorialDerivation",
        "",
        name_a,
        a.combinatorial_derivations().map(|e| (&e.ident, e)),
        |uri| a.combinatorial_derivation(uri),
        name_b,
        b.combinatorial_derivations().map(|e| (&e.ident, e)),
        |uri| b.combinatorial_derivation(uri),
        |report, d1, d2| {
            compare_set(
                report,
                "VariableComponent",
                "->",
                name_a,
                d1.variable_components.iter().map(|vc| (&vc.ident, vc)),
                |uri| d1.variable_component(uri),
                name_b,
                d2.variable_components.iter().map(|vc| (&vc.ident, vc)),
                |uri| d2.variable_component(uri),
                |_, _, _| {},
            );
        },
    );

    compare_set(
        &mut report,
        "Implementation",
        "",
        name_a,
        a.implementations().map(|e| (&e.ident, e)),
        |uri| a.implementation(uri),
        name_b,
        b.implementations().map(|e| (&e.ident, e)),
        |uri| b.implementation(uri),
        |_, _, _| {},
    );

    compare_set(
        &mut report,
        "Attachment",
        "",
        name_a,
        a.attachments().map(|e| (&e.ident, e)),
        |uri| a.attachment(uri),
        name_b,
        b.attachments().map(|e| (&e.ident, e)),
        |uri| b.attachment(uri),
        |_, _, _| {},
    );

    report
}
