//! End-to-end pipeline scenarios: each test builds a document, runs the rule
//! pipeline, and asserts on the diagnostics that come back.

use anyhow::Result;
use assert_matches::assert_matches;

use biodesign_validate::model::{
    Cardinality, Collection, CombinatorialDerivation, Component, ComponentDefinition, Cut,
    Identified, Location, MapsTo, Range, Refinement, Sequence, SequenceAnnotation, Uri,
    VariableComponent,
};
use biodesign_validate::ontology::terms;
use biodesign_validate::{
    Document, DocumentError, NotationPolicy, RuleCode, ValidationOptions, validate_document,
};

fn core_only() -> ValidationOptions {
    ValidationOptions {
        complete: false,
        compliant: false,
        best_practice: false,
        notation_policy: NotationPolicy::Error,
    }
}

fn complete_only() -> ValidationOptions {
    ValidationOptions {
        complete: true,
        compliant: false,
        best_practice: false,
        notation_policy: NotationPolicy::Error,
    }
}

fn best_practice_only() -> ValidationOptions {
    ValidationOptions {
        complete: false,
        compliant: false,
        best_practice: true,
        notation_policy: NotationPolicy::Error,
    }
}

fn definition(id: &str) -> ComponentDefinition {
    ComponentDefinition::new(Identified::new(id))
}

fn component(id: &str, definition: &str) -> Component {
    Component::new(Identified::new(id), definition)
}

fn range(id: &str, start: u64, end: u64) -> Location {
    Location::Range(Range {
        ident: Identified::new(id),
        start,
        end,
        orientation: None,
    })
}

fn count(report: &biodesign_validate::ValidationReport, rule: RuleCode) -> usize {
    report.with_rule(rule).count()
}

// ---------------------------------------------------------------------------
// determinism
// ---------------------------------------------------------------------------

#[test]
fn running_twice_yields_identical_reports() -> Result<()> {
    let mut doc = Document::new();
    let mut a = definition("urn:cd:a");
    a.components.push(component("urn:cd:a/c", "urn:cd:b"));
    doc.add_component_definition(a)?;
    let mut b = definition("urn:cd:b");
    b.components.push(component("urn:cd:b/c", "urn:cd:a"));
    doc.add_component_definition(b)?;
    doc.add_collection(Collection {
        ident: Identified::new("urn:col:1"),
        members: vec![Uri::new("urn:missing")],
    })?;

    let options = ValidationOptions::default();
    let first = validate_document(&doc, &options);
    let second = validate_document(&doc, &options);
    assert!(!first.is_empty());
    assert_eq!(first, second);
    Ok(())
}

// ---------------------------------------------------------------------------
// cycles
// ---------------------------------------------------------------------------

#[test]
fn containment_loop_yields_exactly_one_diagnostic() -> Result<()> {
    let mut doc = Document::new();
    let mut a = definition("urn:cd:a");
    a.components.push(component("urn:cd:a/c", "urn:cd:b"));
    doc.add_component_definition(a)?;
    let mut b = definition("urn:cd:b");
    b.components.push(component("urn:cd:b/c", "urn:cd:a"));
    doc.add_component_definition(b)?;

    let report = validate_document(&doc, &core_only());
    assert_eq!(count(&report, RuleCode::ComponentContainmentCycle), 1);
    Ok(())
}

#[test]
fn containment_chain_without_repeats_is_clean() -> Result<()> {
    let mut doc = Document::new();
    let mut a = definition("urn:cd:a");
    a.components.push(component("urn:cd:a/c", "urn:cd:b"));
    doc.add_component_definition(a)?;
    let mut b = definition("urn:cd:b");
    b.components.push(component("urn:cd:b/c", "urn:cd:c"));
    doc.add_component_definition(b)?;
    doc.add_component_definition(definition("urn:cd:c"))?;

    let report = validate_document(&doc, &core_only());
    assert_eq!(count(&report, RuleCode::ComponentContainmentCycle), 0);
    Ok(())
}

#[test]
fn mutual_lineage_is_a_provenance_cycle() -> Result<()> {
    let mut doc = Document::new();
    let mut a = definition("urn:cd:a");
    a.ident.derived_froms.push(Uri::new("urn:cd:b"));
    doc.add_component_definition(a)?;
    let mut b = definition("urn:cd:b");
    b.ident.derived_froms.push(Uri::new("urn:cd:a"));
    doc.add_component_definition(b)?;

    let report = validate_document(&doc, &core_only());
    assert_eq!(count(&report, RuleCode::ProvenanceCycle), 1);
    Ok(())
}

#[test]
fn dangling_lineage_is_not_a_cycle() -> Result<()> {
    let mut doc = Document::new();
    let mut a = definition("urn:cd:a");
    a.ident.derived_froms.push(Uri::new("urn:not-here"));
    doc.add_component_definition(a)?;

    let report = validate_document(&doc, &core_only());
    assert_eq!(count(&report, RuleCode::ProvenanceCycle), 0);
    Ok(())
}

// ---------------------------------------------------------------------------
// identity uniqueness
// ---------------------------------------------------------------------------

#[test]
fn repeated_identity_with_differing_content_is_flagged() -> Result<()> {
    let mut doc = Document::new();
    let mut a = definition("urn:cd:a");
    a.components.push(component("urn:shared", "urn:cd:x"));
    doc.add_component_definition(a)?;
    let mut b = definition("urn:cd:b");
    b.components.push(component("urn:shared", "urn:cd:y"));
    doc.add_component_definition(b)?;

    let report = validate_document(&doc, &core_only());
    assert_eq!(count(&report, RuleCode::IdentityCollision), 1);
    Ok(())
}

#[test]
fn repeated_identity_with_equal_content_is_tolerated() -> Result<()> {
    let mut doc = Document::new();
    let mut a = definition("urn:cd:a");
    a.components.push(component("urn:shared", "urn:cd:x"));
    doc.add_component_definition(a)?;
    let mut b = definition("urn:cd:b");
    b.components.push(component("urn:shared", "urn:cd:x"));
    doc.add_component_definition(b)?;

    let report = validate_document(&doc, &core_only());
    assert_eq!(count(&report, RuleCode::IdentityCollision), 0);
    Ok(())
}

#[test]
fn persistent_identity_kind_collision_counts_extra_occurrences() -> Result<()> {
    let mut doc = Document::new();
    let mut cd = definition("urn:cd:a");
    cd.ident.persistent_identity = Some(Uri::new("urn:pid"));
    doc.add_component_definition(cd)?;
    let mut seq = Sequence::new(
        Identified::new("urn:seq:a"),
        "acgt",
        terms::ENCODING_IUPAC_DNA,
    );
    seq.ident.persistent_identity = Some(Uri::new("urn:pid"));
    doc.add_sequence(seq)?;

    let report = validate_document(&doc, &core_only());
    assert_eq!(count(&report, RuleCode::PersistentIdentityKindCollision), 1);
    Ok(())
}

// ---------------------------------------------------------------------------
// lineage versions
// ---------------------------------------------------------------------------

#[test]
fn deriving_from_a_newer_version_is_flagged() -> Result<()> {
    let mut doc = Document::new();
    let mut newer = ComponentDefinition::new(Identified::compliant("urn:parts", "gate", "2"));
    newer.ident.name = Some("gate v2".into());
    let older_ident = Identified::compliant("urn:parts", "gate", "1")
        .derived_from(newer.ident.identity.clone());
    doc.add_component_definition(newer)?;
    doc.add_component_definition(ComponentDefinition::new(older_ident))?;

    let report = validate_document(&doc, &core_only());
    assert_eq!(count(&report, RuleCode::LineageVersionOrder), 1);
    Ok(())
}

// ---------------------------------------------------------------------------
// completeness
// ---------------------------------------------------------------------------

#[test]
fn one_unresolved_collection_member_yields_one_diagnostic() -> Result<()> {
    let mut doc = Document::new();
    doc.add_component_definition(definition("urn:cd:a"))?;
    doc.add_collection(Collection {
        ident: Identified::new("urn:col:1"),
        members: vec![Uri::new("urn:cd:a"), Uri::new("urn:gone")],
    })?;

    let report = validate_document(&doc, &complete_only());
    assert_eq!(count(&report, RuleCode::DanglingCollectionMember), 1);
    Ok(())
}

#[test]
fn fully_resolved_collection_is_clean() -> Result<()> {
    let mut doc = Document::new();
    doc.add_component_definition(definition("urn:cd:a"))?;
    doc.add_collection(Collection {
        ident: Identified::new("urn:col:1"),
        members: vec![Uri::new("urn:cd:a")],
    })?;

    let report = validate_document(&doc, &complete_only());
    assert_eq!(count(&report, RuleCode::DanglingCollectionMember), 0);
    Ok(())
}

// ---------------------------------------------------------------------------
// identity compliance
// ---------------------------------------------------------------------------

#[test]
fn noncompliant_identity_is_flagged_only_under_compliant() -> Result<()> {
    let mut doc = Document::new();
    doc.add_component_definition(definition("urn:cd:opaque"))?;

    let compliant = ValidationOptions {
        compliant: true,
        complete: false,
        best_practice: false,
        notation_policy: NotationPolicy::Error,
    };
    let report = validate_document(&doc, &compliant);
    assert_eq!(count(&report, RuleCode::NoncompliantIdentity), 1);

    let report = validate_document(&doc, &core_only());
    assert_eq!(count(&report, RuleCode::NoncompliantIdentity), 0);
    Ok(())
}

// ---------------------------------------------------------------------------
// mapping refinements: eager and batch surfaces
// ---------------------------------------------------------------------------

#[test]
fn eager_attach_rejects_second_use_remote_on_same_local() -> Result<()> {
    let mut doc = Document::new();
    let mut cd = definition("urn:cd:outer");
    cd.components.push(component("urn:c:1", "urn:cd:inner"));
    cd.components.push(component("urn:c:2", "urn:cd:inner"));
    doc.add_component_definition(cd)?;

    let outer = Uri::new("urn:cd:outer");
    doc.add_component_maps_to(
        &outer,
        &Uri::new("urn:c:1"),
        MapsTo::new(
            Identified::new("urn:m:1"),
            Refinement::UseRemote,
            "urn:c:local",
            "urn:c:remote",
        ),
    )?;
    let rejected = doc.add_component_maps_to(
        &outer,
        &Uri::new("urn:c:2"),
        MapsTo::new(
            Identified::new("urn:m:2"),
            Refinement::UseRemote,
            "urn:c:local",
            "urn:c:remote2",
        ),
    );
    assert_matches!(rejected, Err(DocumentError::MappingConflict { .. }));

    // Document unchanged by the rejected attach.
    let cd = doc.component_definition(&outer).unwrap();
    assert_eq!(cd.components[0].maps_tos.len(), 1);
    assert!(cd.components[1].maps_tos.is_empty());
    Ok(())
}

#[test]
fn batch_pass_flags_conflicting_mappings_and_continues() -> Result<()> {
    let mut doc = Document::new();
    let mut cd = definition("urn:cd:outer");
    let mut c1 = component("urn:c:1", "urn:cd:inner");
    c1.maps_tos.push(MapsTo::new(
        Identified::new("urn:m:1"),
        Refinement::UseRemote,
        "urn:c:local",
        "urn:c:r1",
    ));
    let mut c2 = component("urn:c:2", "urn:cd:inner");
    c2.maps_tos.push(MapsTo::new(
        Identified::new("urn:m:2"),
        Refinement::UseRemote,
        "urn:c:local",
        "urn:c:r2",
    ));
    cd.components.push(c1);
    cd.components.push(c2);
    doc.add_component_definition(cd)?;

    let report = validate_document(&doc, &core_only());
    assert_eq!(count(&report, RuleCode::MappingRefinementConflict), 2);
    Ok(())
}

#[test]
fn read_only_document_rejects_mutation() -> Result<()> {
    let mut doc = Document::new();
    doc.add_component_definition(definition("urn:cd:a"))?;
    doc.set_read_only(true);
    let rejected = doc.add_component_definition(definition("urn:cd:b"));
    assert_matches!(rejected, Err(DocumentError::ReadOnly));
    doc.set_read_only(false);
    doc.add_component_definition(definition("urn:cd:b"))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// structural consistency: template vs derivation
// ---------------------------------------------------------------------------

/// Template with positions p1 and p2; a variable component replaces p1 under
/// exactly-one. The derived definition carries the given components.
fn derivation_fixture(derived_components: Vec<Component>) -> Result<Document> {
    let mut doc = Document::new();
    doc.add_component_definition(definition("urn:cd:dp1"))?;
    doc.add_component_definition(definition("urn:cd:dp2"))?;
    doc.add_component_definition(definition("urn:cd:v1"))?;

    let mut template = definition("urn:cd:template");
    template.components.push(component("urn:tc:p1", "urn:cd:dp1"));
    template.components.push(component("urn:tc:p2", "urn:cd:dp2"));
    doc.add_component_definition(template)?;

    let mut derivation =
        CombinatorialDerivation::new(Identified::new("urn:deriv:1"), "urn:cd:template");
    let mut variable = VariableComponent::new(
        Identified::new("urn:vc:1"),
        Cardinality::One,
        "urn:tc:p1",
    );
    variable.variants.push(Uri::new("urn:cd:v1"));
    derivation.variable_components.push(variable);
    doc.add_combinatorial_derivation(derivation)?;

    let mut derived = ComponentDefinition::new(
        Identified::new("urn:cd:derived").derived_from("urn:deriv:1"),
    );
    derived.components = derived_components;
    doc.add_component_definition(derived)?;
    Ok(doc)
}

#[test]
fn exactly_one_substitution_missing_is_flagged() -> Result<()> {
    let mut unreplaced = component("urn:dc:p2", "urn:cd:dp2");
    unreplaced.ident.derived_froms.push(Uri::new("urn:tc:p2"));
    let doc = derivation_fixture(vec![unreplaced])?;

    let report = validate_document(&doc, &complete_only());
    assert_eq!(count(&report, RuleCode::CardinalityExactlyOne), 1);
    Ok(())
}

#[test]
fn satisfied_substitution_and_unreplaced_position_pass() -> Result<()> {
    let mut substituted = component("urn:dc:p1", "urn:cd:v1");
    substituted.ident.derived_froms.push(Uri::new("urn:tc:p1"));
    let mut unreplaced = component("urn:dc:p2", "urn:cd:dp2");
    unreplaced.ident.derived_froms.push(Uri::new("urn:tc:p2"));
    let doc = derivation_fixture(vec![substituted, unreplaced])?;

    let report = validate_document(&doc, &complete_only());
    assert_eq!(count(&report, RuleCode::CardinalityExactlyOne), 0);
    assert_eq!(count(&report, RuleCode::UnreplacedPositionCount), 0);
    assert_eq!(count(&report, RuleCode::VariantNotAllowed), 0);
    assert!(report.is_valid(), "unexpected: {report}");
    Ok(())
}

#[test]
fn substitution_outside_the_variant_set_is_flagged() -> Result<()> {
    let mut substituted = component("urn:dc:p1", "urn:cd:dp2");
    substituted.ident.derived_froms.push(Uri::new("urn:tc:p1"));
    let mut unreplaced = component("urn:dc:p2", "urn:cd:dp2");
    unreplaced.ident.derived_froms.push(Uri::new("urn:tc:p2"));
    let doc = derivation_fixture(vec![substituted, unreplaced])?;

    let report = validate_document(&doc, &complete_only());
    assert_eq!(count(&report, RuleCode::VariantNotAllowed), 1);
    Ok(())
}

#[test]
fn missing_unreplaced_position_is_flagged() -> Result<()> {
    let mut substituted = component("urn:dc:p1", "urn:cd:v1");
    substituted.ident.derived_froms.push(Uri::new("urn:tc:p1"));
    let doc = derivation_fixture(vec![substituted])?;

    let report = validate_document(&doc, &complete_only());
    assert_eq!(count(&report, RuleCode::UnreplacedPositionCount), 1);
    Ok(())
}

// ---------------------------------------------------------------------------
// annotation overlap
// ---------------------------------------------------------------------------

fn annotated_definition(spans: &[(u64, u64)]) -> ComponentDefinition {
    let mut cd = definition("urn:cd:annotated");
    for (i, (start, end)) in spans.iter().enumerate() {
        let mut sa = SequenceAnnotation::new(Identified::new(format!("urn:sa:{i}")));
        sa.locations
            .push(range(&format!("urn:loc:{i}"), *start, *end));
        cd.sequence_annotations.push(sa);
    }
    cd
}

#[test]
fn overlapping_spans_on_one_definition_are_flagged() -> Result<()> {
    let mut doc = Document::new();
    doc.add_component_definition(annotated_definition(&[(1, 10), (5, 15)]))?;

    let report = validate_document(&doc, &best_practice_only());
    assert_eq!(count(&report, RuleCode::AnnotationOverlap), 1);
    Ok(())
}

#[test]
fn disjoint_spans_are_not_flagged() -> Result<()> {
    let mut doc = Document::new();
    doc.add_component_definition(annotated_definition(&[(1, 10), (11, 20)]))?;

    let report = validate_document(&doc, &best_practice_only());
    assert_eq!(count(&report, RuleCode::AnnotationOverlap), 0);
    Ok(())
}

#[test]
fn point_coinciding_inside_span_is_flagged() -> Result<()> {
    let mut doc = Document::new();
    let mut cd = annotated_definition(&[(2, 9)]);
    let mut sa = SequenceAnnotation::new(Identified::new("urn:sa:cut"));
    sa.locations.push(Location::Cut(Cut {
        ident: Identified::new("urn:loc:cut"),
        at: 5,
        orientation: None,
    }));
    cd.sequence_annotations.push(sa);
    doc.add_component_definition(cd)?;

    let report = validate_document(&doc, &best_practice_only());
    assert_eq!(count(&report, RuleCode::AnnotationOverlap), 1);
    Ok(())
}

// ---------------------------------------------------------------------------
// sequence encodings and notation policy
// ---------------------------------------------------------------------------

#[test]
fn malformed_nucleotide_elements_are_flagged() -> Result<()> {
    let mut doc = Document::new();
    doc.add_sequence(Sequence::new(
        Identified::new("urn:seq:bad"),
        "acgxq",
        terms::ENCODING_IUPAC_DNA,
    ))?;

    let report = validate_document(&doc, &best_practice_only());
    assert_eq!(count(&report, RuleCode::MalformedSequenceElements), 1);
    Ok(())
}

#[test]
fn unknown_encoding_is_flagged() -> Result<()> {
    let mut doc = Document::new();
    doc.add_sequence(Sequence::new(
        Identified::new("urn:seq:odd"),
        "acgt",
        "http://example.org/private-encoding",
    ))?;

    let report = validate_document(&doc, &best_practice_only());
    assert_eq!(count(&report, RuleCode::UnknownSequenceEncoding), 1);
    Ok(())
}

#[test]
fn notation_policy_downgrades_chemical_notation_failures() -> Result<()> {
    let mut doc = Document::new();
    doc.add_sequence(Sequence::new(
        Identified::new("urn:seq:mol"),
        "CC(=O",
        terms::ENCODING_SMILES,
    ))?;

    let strict = validate_document(&doc, &best_practice_only());
    assert_eq!(count(&strict, RuleCode::MalformedChemicalNotation), 1);
    assert!(!strict.is_valid());

    let lenient_options = ValidationOptions {
        notation_policy: NotationPolicy::Warning,
        ..best_practice_only()
    };
    let lenient = validate_document(&doc, &lenient_options);
    assert_eq!(count(&lenient, RuleCode::MalformedChemicalNotation), 1);
    assert!(lenient.is_valid());
    assert!(lenient.has_warnings());
    Ok(())
}

// ---------------------------------------------------------------------------
// report shape
// ---------------------------------------------------------------------------

#[test]
fn reports_serialize_to_json() -> Result<()> {
    let mut doc = Document::new();
    doc.add_collection(Collection {
        ident: Identified::new("urn:col:1"),
        members: vec![Uri::new("urn:gone")],
    })?;

    let report = validate_document(&doc, &complete_only());
    let json = serde_json::to_string(&report)?;
    assert!(json.contains("DanglingCollectionMember"));
    assert!(json.contains("urn:col:1"));
    Ok(())
}

#[test]
fn messages_embed_rule_code_and_entity() -> Result<()> {
    let mut doc = Document::new();
    doc.add_collection(Collection {
        ident: Identified::new("urn:col:1"),
        members: vec![Uri::new("urn:gone")],
    })?;

    let report = validate_document(&doc, &complete_only());
    let messages = report.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("[dangling-collection-member]"));
    assert!(messages[0].contains("urn:col:1"));
    Ok(())
}
