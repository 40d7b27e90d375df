//! Comparator coverage: symmetric differences, field-wise mismatches, and
//! child-level pinpointing.

use anyhow::Result;

use biodesign_validate::compare_documents;
use biodesign_validate::model::{
    Component, ComponentDefinition, Identified, Location, Range, SequenceAnnotation, Uri,
};
use biodesign_validate::Document;

fn definition_with_component(component_role: Option<&str>) -> Result<Document> {
    let mut doc = Document::new();
    let mut cd = ComponentDefinition::new(Identified::new("urn:cd:gate"));
    let mut c = Component::new(Identified::new("urn:cd:gate/c"), "urn:cd:part");
    if let Some(role) = component_role {
        c.roles.insert(Uri::new(role));
    }
    cd.components.push(c);
    doc.add_component_definition(cd)?;
    doc.add_component_definition(ComponentDefinition::new(Identified::new("urn:cd:part")))?;
    Ok(doc)
}

#[test]
fn identical_documents_compare_clean() -> Result<()> {
    let a = definition_with_component(None)?;
    let b = definition_with_component(None)?;
    let report = compare_documents("left", &a, "right", &b);
    assert!(report.is_identical(), "unexpected entries: {report}");
    Ok(())
}

#[test]
fn nested_component_difference_is_pinpointed() -> Result<()> {
    let a = definition_with_component(None)?;
    let b = definition_with_component(Some("http://example.org/role"))?;
    let report = compare_documents("left", &a, "right", &b);

    assert!(
        report
            .entries()
            .iter()
            .any(|e| e == "ComponentDefinition urn:cd:gate differ.")
    );
    assert!(
        report
            .entries()
            .iter()
            .any(|e| e == "->Component urn:cd:gate/c differ.")
    );
    Ok(())
}

#[test]
fn one_sided_entities_are_reported_symmetrically() -> Result<()> {
    let mut a = Document::new();
    a.add_component_definition(ComponentDefinition::new(Identified::new("urn:cd:only-a")))?;
    let mut b = Document::new();
    b.add_component_definition(ComponentDefinition::new(Identified::new("urn:cd:only-b")))?;

    let report = compare_documents("left", &a, "right", &b);
    assert!(
        report
            .entries()
            .iter()
            .any(|e| e == "ComponentDefinition urn:cd:only-a not found in right")
    );
    assert!(
        report
            .entries()
            .iter()
            .any(|e| e == "ComponentDefinition urn:cd:only-b not found in left")
    );
    Ok(())
}

#[test]
fn location_difference_is_reported_two_levels_down() -> Result<()> {
    let build = |end: u64| -> Result<Document> {
        let mut doc = Document::new();
        let mut cd = ComponentDefinition::new(Identified::new("urn:cd:gate"));
        let mut sa = SequenceAnnotation::new(Identified::new("urn:sa:1"));
        sa.locations.push(Location::Range(Range {
            ident: Identified::new("urn:loc:1"),
            start: 1,
            end,
            orientation: None,
        }));
        cd.sequence_annotations.push(sa);
        doc.add_component_definition(cd)?;
        Ok(doc)
    };
    let a = build(10)?;
    let b = build(20)?;

    let report = compare_documents("left", &a, "right", &b);
    assert!(
        report
            .entries()
            .iter()
            .any(|e| e == "->SequenceAnnotation urn:sa:1 differ.")
    );
    assert!(
        report
            .entries()
            .iter()
            .any(|e| e == "--->Location urn:loc:1 differ.")
    );
    Ok(())
}

#[test]
fn entries_come_out_in_a_stable_order() -> Result<()> {
    let a = definition_with_component(None)?;
    let b = definition_with_component(Some("http://example.org/role"))?;
    let first = compare_documents("left", &a, "right", &b);
    let second = compare_documents("left", &a, "right", &b);
    assert_eq!(first, second);
    Ok(())
}
