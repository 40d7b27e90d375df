//! Recommended-practice checks: ontology term usage, sequence encodings and
//! contents, annotation overlaps, sequence-constraint semantics and activity
//! role usage.
//!
//! Ontology questions go through the [`TermHierarchy`] capability; an
//! unresolved term simply answers `false` and the walk continues. Chemical
//! notation goes through [`ChemicalNotation`] and is reported at the severity
//! the caller configured.

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

use crate::error::{RuleCode, Severity};
use crate::model::{
    ComponentDefinition, Cut, Document, Location, Orientation, Range, Restriction, Sequence,
    TopLevelRef, Uri,
};
use crate::ontology::{ChemicalNotation, TermHierarchy, terms};

use super::context::ValidationContext;

static IUPAC_NUCLEOTIDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ACGTURYSWKMBDHVN\-.]*$").expect("nucleotide pattern"));
static IUPAC_PROTEIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]*$").expect("protein pattern"));

fn is_nucleic_encoding(encoding: &Uri) -> bool {
    encoding == terms::ENCODING_IUPAC_DNA || encoding == terms::ENCODING_IUPAC_RNA
}

// =============================================================================
// ONTOLOGY TERM USAGE
// =============================================================================

pub(crate) fn check_ontology_usage(
    doc: &Document,
    hierarchy: &dyn TermHierarchy,
    ctx: &mut ValidationContext,
) {
    let sequence_feature = Uri::new(terms::SEQUENCE_FEATURE);
    let topology = Uri::new(terms::TOPOLOGY_ATTRIBUTE);
    let strand = Uri::new(terms::STRAND_ATTRIBUTE);
    let occurring = Uri::new(terms::OCCURRING_ENTITY);
    let participant = Uri::new(terms::PARTICIPANT_ROLE);
    let format_root = Uri::new(terms::FORMAT_ROOT);
    let framework_root = Uri::new(terms::FRAMEWORK_ROOT);

    for sequence in doc.sequences() {
        if !terms::SEQUENCE_ENCODINGS
            .iter()
            .any(|known| sequence.encoding == *known)
        {
            ctx.error(
                RuleCode::UnknownSequenceEncoding,
                &sequence.ident.identity,
                format!("encoding {} is not a recognized vocabulary", sequence.encoding),
            );
        }
    }

    for cd in doc.component_definitions() {
        let biochemical = cd
            .types
            .iter()
            .filter(|t| terms::BIOCHEMICAL_TYPES.iter().any(|b| *t == b))
            .count();
        if biochemical == 0 {
            ctx.error(
                RuleCode::BiochemicalTypeMissing,
                &cd.ident.identity,
                "no biochemical type is declared",
            );
        } else if biochemical > 1 {
            ctx.error(
                RuleCode::BiochemicalTypeConflict,
                &cd.ident.identity,
                format!("{biochemical} biochemical types are declared (expected exactly 1)"),
            );
        }

        let feature_roles = cd
            .roles
            .iter()
            .filter(|&r| {
                r == &sequence_feature || hierarchy.is_descendant_of(r, &sequence_feature)
            })
            .count();
        let topologies = cd
            .types
            .iter()
            .filter(|&t| hierarchy.is_descendant_of(t, &topology))
            .count();
        let strands = cd
            .types
            .iter()
            .filter(|&t| hierarchy.is_descendant_of(t, &strand))
            .count();
        let nucleic = cd.types.iter().any(|t| *t == terms::TYPE_DNA)
            || cd.types.iter().any(|t| *t == terms::TYPE_RNA);
        if nucleic {
            if feature_roles != 1 {
                ctx.error(
                    RuleCode::SequenceFeatureRoleCount,
                    &cd.ident.identity,
                    format!("{feature_roles} sequence-feature roles (expected exactly 1)"),
                );
            }
            if topologies > 1 {
                ctx.error(
                    RuleCode::TopologyAttributeCount,
                    &cd.ident.identity,
                    format!("{topologies} topology attributes (expected at most 1)"),
                );
            }
        } else {
            if feature_roles != 0 {
                ctx.error(
                    RuleCode::UnexpectedSequenceFeatureRole,
                    &cd.ident.identity,
                    "sequence-feature roles on a non-nucleic definition",
                );
            }
            if topologies != 0 || strands != 0 {
                ctx.error(
                    RuleCode::UnexpectedTopologyAttribute,
                    &cd.ident.identity,
                    "topology or strand attributes on a non-nucleic definition",
                );
            }
        }

        for component in &cd.components {
            let Some(definition) = doc.component_definition(&component.definition) else {
                continue;
            };
            let roles = component
                .roles
                .iter()
                .filter(|&r| {
                    r == &sequence_feature || hierarchy.is_descendant_of(r, &sequence_feature)
                })
                .count();
            let sub_nucleic = definition.types.iter().any(|t| *t == terms::TYPE_DNA)
                || definition.types.iter().any(|t| *t == terms::TYPE_RNA);
            if !sub_nucleic && roles != 0 {
                ctx.error(
                    RuleCode::SubComponentRoleCount,
                    &cd.ident.identity,
                    format!(
                        "component {} carries sequence-feature roles but its definition is not nucleic",
                        component.ident.identity
                    ),
                );
            } else if sub_nucleic && roles > 1 {
                ctx.error(
                    RuleCode::SubComponentRoleCount,
                    &cd.ident.identity,
                    format!(
                        "component {} carries {roles} sequence-feature roles (expected at most 1)",
                        component.ident.identity
                    ),
                );
            }
        }
    }

    for model in doc.models() {
        if !hierarchy.is_descendant_of(&model.language, &format_root) {
            ctx.error(
                RuleCode::ModelLanguageUnrecognized,
                &model.ident.identity,
                format!("language {} is not a recognized format", model.language),
            );
        }
        if !hierarchy.is_descendant_of(&model.framework, &framework_root) {
            ctx.error(
                RuleCode::ModelFrameworkUnrecognized,
                &model.ident.identity,
                format!("framework {} is not a recognized modeling framework", model.framework),
            );
        }
    }

    for md in doc.module_definitions() {
        for interaction in &md.interactions {
            let mut interaction_type = None;
            let mut type_count = 0;
            for t in &interaction.types {
                if hierarchy.is_descendant_of(t, &occurring) {
                    type_count += 1;
                    interaction_type = Some(t);
                }
            }
            if type_count != 1 {
                ctx.error(
                    RuleCode::InteractionTypeCount,
                    &interaction.ident.identity,
                    format!("{type_count} interaction types (expected exactly 1)"),
                );
            }
            for participation in &interaction.participations {
                let mut participant_role = None;
                let mut role_count = 0;
                for r in &participation.roles {
                    if hierarchy.is_descendant_of(r, &participant) {
                        role_count += 1;
                        participant_role = Some(r);
                    }
                }
                if role_count != 1 {
                    ctx.error(
                        RuleCode::ParticipationRoleCount,
                        &participation.ident.identity,
                        format!("{role_count} participant roles (expected exactly 1)"),
                    );
                } else if let (Some(itype), Some(role)) = (interaction_type, participant_role) {
                    if !role_compatible(itype, role) {
                        ctx.error(
                            RuleCode::IncompatibleParticipationRole,
                            &interaction.ident.identity,
                            format!("role {role} is not compatible with interaction type {itype}"),
                        );
                    }
                }
            }
        }
    }

    for attachment in doc.attachments() {
        if let Some(format) = &attachment.format {
            if !hierarchy.is_descendant_of(format, &format_root) {
                ctx.error(
                    RuleCode::AttachmentFormatUnrecognized,
                    &attachment.ident.identity,
                    format!("format {format} is not a recognized format"),
                );
            }
        }
    }
}

/// Interaction-type / participation-role compatibility. Types outside the
/// fixed table are not constrained.
fn role_compatible(interaction_type: &Uri, role: &Uri) -> bool {
    let allowed: &[&str] = match interaction_type.as_str() {
        terms::INTERACTION_INHIBITION => &[
            terms::ROLE_INHIBITOR,
            terms::ROLE_INHIBITED,
            terms::ROLE_PROMOTER_PARTICIPANT,
        ],
        terms::INTERACTION_STIMULATION => &[
            terms::ROLE_STIMULATOR,
            terms::ROLE_STIMULATED,
            terms::ROLE_PROMOTER_PARTICIPANT,
        ],
        terms::INTERACTION_NON_COVALENT_BINDING => &[terms::ROLE_REACTANT, terms::ROLE_PRODUCT],
        terms::INTERACTION_DEGRADATION => &[terms::ROLE_REACTANT],
        terms::INTERACTION_BIOCHEMICAL_REACTION => &[
            terms::ROLE_REACTANT,
            terms::ROLE_PRODUCT,
            terms::ROLE_MODIFIER,
        ],
        terms::INTERACTION_GENETIC_PRODUCTION => &[
            terms::ROLE_PROMOTER_PARTICIPANT,
            terms::ROLE_TEMPLATE,
            terms::ROLE_PRODUCT,
        ],
        terms::INTERACTION_CONTROL => &[terms::ROLE_MODIFIER, terms::ROLE_MODIFIED],
        _ => return true,
    };
    allowed.iter().any(|a| role == a)
}

// =============================================================================
// SEQUENCE ENCODINGS
// =============================================================================

/// Lexical conformance of sequence elements to their declared encoding.
/// Chemical notation defers to the adapter and is reported at the configured
/// severity.
pub(crate) fn check_sequence_encodings(
    doc: &Document,
    notation: &dyn ChemicalNotation,
    notation_severity: Severity,
    ctx: &mut ValidationContext,
) {
    for sequence in doc.sequences() {
        if is_nucleic_encoding(&sequence.encoding) {
            if !IUPAC_NUCLEOTIDE.is_match(&sequence.elements.to_uppercase()) {
                ctx.error(
                    RuleCode::MalformedSequenceElements,
                    &sequence.ident.identity,
                    "elements are not IUPAC nucleotide codes",
                );
            }
        } else if sequence.encoding == terms::ENCODING_IUPAC_PROTEIN {
            if !IUPAC_PROTEIN.is_match(&sequence.elements.to_uppercase()) {
                ctx.error(
                    RuleCode::MalformedSequenceElements,
                    &sequence.ident.identity,
                    "elements are not IUPAC amino-acid codes",
                );
            }
        } else if sequence.encoding == terms::ENCODING_SMILES && !notation.parses(&sequence.elements)
        {
            ctx.report(
                RuleCode::MalformedChemicalNotation,
                notation_severity,
                &sequence.ident.identity,
                "elements do not parse as chemical notation",
            );
        }
    }
}

// =============================================================================
// ANNOTATION OVERLAP
// =============================================================================

/// Overlap between locations across all annotations of one definition:
/// span/span by endpoint containment, span/point when the point falls
/// strictly inside the span, point/point when the points coincide.
pub(crate) fn check_annotation_overlap(doc: &Document, ctx: &mut ValidationContext) {
    for cd in doc.component_definitions() {
        let locations: SmallVec<[&Location; 8]> = cd
            .sequence_annotations
            .iter()
            .flat_map(|sa| sa.locations.iter())
            .collect();
        for (i, a) in locations.iter().enumerate() {
            for b in locations.iter().skip(i + 1) {
                if a.ident().identity == b.ident().identity {
                    continue;
                }
                if locations_overlap(a, b) {
                    ctx.error(
                        RuleCode::AnnotationOverlap,
                        &a.ident().identity,
                        format!("overlaps {}", b.ident().identity),
                    );
                }
            }
        }
    }
}

/// Overlap predicate between two placed locations; exposed for reuse and
/// property testing.
pub fn locations_overlap(a: &Location, b: &Location) -> bool {
    match (a, b) {
        (Location::Range(x), Location::Range(y)) => {
            (x.start >= y.start && x.start <= y.end) || (y.start >= x.start && y.start <= x.end)
        }
        (Location::Range(r), Location::Cut(c)) | (Location::Cut(c), Location::Range(r)) => {
            r.end > c.at && c.at >= r.start
        }
        (Location::Cut(x), Location::Cut(y)) => x.at == y.at,
    }
}

// =============================================================================
// DEFINITION / SEQUENCE AGREEMENT
// =============================================================================

/// Sequence presence per declared biochemical type, same-encoding length
/// agreement, location bounds, and inclusion of the annotation-implied
/// nucleic sequence.
pub(crate) fn check_definition_sequences(doc: &Document, ctx: &mut ValidationContext) {
    for cd in doc.component_definitions() {
        let resolved: Vec<&Sequence> = cd
            .sequences
            .iter()
            .filter_map(|uri| doc.sequence(uri))
            .collect();
        if resolved.is_empty() {
            continue;
        }
        let mut nucleic_len: Option<usize> = None;
        let mut protein_len: Option<usize> = None;
        let mut smiles_len: Option<usize> = None;
        for sequence in &resolved {
            let len = sequence.elements.chars().count();
            let bucket = if is_nucleic_encoding(&sequence.encoding) {
                &mut nucleic_len
            } else if sequence.encoding == terms::ENCODING_IUPAC_PROTEIN {
                &mut protein_len
            } else if sequence.encoding == terms::ENCODING_SMILES {
                &mut smiles_len
            } else {
                continue;
            };
            match bucket {
                Some(existing) if *existing != len => {
                    ctx.error(
                        RuleCode::SequenceLengthMismatch,
                        &cd.ident.identity,
                        format!(
                            "sequence {} has length {len}, other sequences of the same encoding have {existing}",
                            sequence.ident.identity
                        ),
                    );
                }
                Some(_) => {}
                None => *bucket = Some(len),
            }
        }

        if let Some(len) = nucleic_len {
            for sa in &cd.sequence_annotations {
                for location in &sa.locations {
                    let out_of_bounds = match location {
                        Location::Range(Range { start, end, .. }) => {
                            *start == 0 || *end as usize > len
                        }
                        Location::Cut(Cut { at, .. }) => *at as usize > len,
                    };
                    if out_of_bounds {
                        ctx.error(
                            RuleCode::LocationOutOfBounds,
                            &cd.ident.identity,
                            format!(
                                "location {} falls outside the nucleic sequence (length {len})",
                                location.ident().identity
                            ),
                        );
                    }
                }
            }
        }

        let declares = |t: &str| cd.types.iter().any(|ty| *ty == t);
        let missing = (declares(terms::TYPE_DNA) && nucleic_len.is_none())
            || (declares(terms::TYPE_RNA) && nucleic_len.is_none())
            || (declares(terms::TYPE_PROTEIN) && protein_len.is_none())
            || (declares(terms::TYPE_SMALL_MOLECULE) && smiles_len.is_none());
        if missing {
            ctx.error(
                RuleCode::MissingTypedSequence,
                &cd.ident.identity,
                "no sequence matches a declared biochemical type's encoding",
            );
        }

        if nucleic_len.is_some() && !cd.sequence_annotations.is_empty() {
            check_implied_sequence(doc, cd, &resolved, ctx);
        }
    }
}

/// Rebuilds the nucleic sequence implied by range annotations over
/// sub-definition sequences and checks the declared sequence includes it
/// under IUPAC ambiguity codes.
fn check_implied_sequence(
    doc: &Document,
    cd: &ComponentDefinition,
    resolved: &[&Sequence],
    ctx: &mut ValidationContext,
) {
    let Some(declared) = resolved
        .iter()
        .find(|s| is_nucleic_encoding(&s.encoding))
        .map(|s| s.elements.to_lowercase())
    else {
        return;
    };
    let mut implied: Vec<char> = vec!['n'; declared.chars().count()];
    for sa in &cd.sequence_annotations {
        let Some(component_uri) = &sa.component else {
            continue;
        };
        let Some(sub_elements) = cd
            .component(component_uri)
            .and_then(|c| doc.component_definition(&c.definition))
            .and_then(|definition| {
                definition
                    .sequences
                    .iter()
                    .filter_map(|uri| doc.sequence(uri))
                    .find(|s| is_nucleic_encoding(&s.encoding))
            })
            .map(|s| s.elements.to_lowercase())
        else {
            continue;
        };
        for location in &sa.locations {
            let Location::Range(range) = location else {
                continue;
            };
            if range.start == 0 || range.start > range.end || range.end as usize > implied.len() {
                ctx.error(
                    RuleCode::ImpliedSequenceMismatch,
                    &cd.ident.identity,
                    format!(
                        "annotation {} places {} outside the declared sequence",
                        sa.ident.identity, component_uri
                    ),
                );
                continue;
            }
            let mut fragment: Vec<char> = sub_elements.chars().collect();
            if range.orientation == Some(Orientation::ReverseComplement) {
                fragment = fragment.iter().rev().map(|c| complement(*c)).collect();
            }
            let span = (range.end - range.start + 1) as usize;
            for (offset, c) in fragment.into_iter().take(span).enumerate() {
                implied[range.start as usize - 1 + offset] = c;
            }
        }
    }
    let matches = declared
        .chars()
        .zip(implied.iter())
        .all(|(specific, general)| iupac_includes(specific, *general));
    if !matches {
        ctx.error(
            RuleCode::ImpliedSequenceMismatch,
            &cd.ident.identity,
            "declared sequence does not include the sequence implied by its annotations",
        );
    }
}

fn complement(c: char) -> char {
    match c {
        'a' => 't',
        't' => 'a',
        'u' => 'a',
        'c' => 'g',
        'g' => 'c',
        _ => 'n',
    }
}

/// Whether the specific (declared) character satisfies the general (implied)
/// IUPAC ambiguity code.
fn iupac_includes(specific: char, general: char) -> bool {
    match general {
        'a' | 'c' | 'g' | 't' | 'u' => specific == general,
        '.' | '-' => specific == '.' || specific == '-',
        'r' => matches!(specific, 'r' | 'a' | 'g'),
        'y' => matches!(specific, 'y' | 'c' | 't'),
        's' => matches!(specific, 's' | 'c' | 'g'),
        'w' => matches!(specific, 'w' | 'a' | 't'),
        'k' => matches!(specific, 'k' | 'g' | 't'),
        'm' => matches!(specific, 'm' | 'a' | 'c'),
        'b' => matches!(specific, 'b' | 'c' | 'g' | 't'),
        'd' => matches!(specific, 'd' | 'a' | 'g' | 't'),
        'h' => matches!(specific, 'h' | 'a' | 'c' | 't'),
        'v' => matches!(specific, 'v' | 'a' | 'c' | 'g'),
        'n' => true,
        _ => false,
    }
}

// =============================================================================
// SEQUENCE CONSTRAINTS
// =============================================================================

/// Semantic checks on declared constraints against the annotations that
/// place their subject and object.
pub(crate) fn check_sequence_constraints(doc: &Document, ctx: &mut ValidationContext) {
    for cd in doc.component_definitions() {
        for constraint in &cd.sequence_constraints {
            if constraint.restriction == Restriction::DifferentFrom {
                if let (Some(subject), Some(object)) = (
                    cd.component(&constraint.subject),
                    cd.component(&constraint.object),
                ) {
                    if subject.definition == object.definition {
                        ctx.error(
                            RuleCode::ConstraintSelfSimilar,
                            &constraint.ident.identity,
                            format!(
                                "subject and object share definition {}",
                                subject.definition
                            ),
                        );
                    }
                }
            }
            let subject_annotation = cd.annotation_for_component(&constraint.subject);
            let object_annotation = cd.annotation_for_component(&constraint.object);
            let (Some(subject_annotation), Some(object_annotation)) =
                (subject_annotation, object_annotation)
            else {
                continue;
            };
            match constraint.restriction {
                Restriction::Precedes => {
                    if let (Some(subject_start), Some(object_start)) =
                        (subject_annotation.min_start(), object_annotation.min_start())
                    {
                        if object_start < subject_start {
                            ctx.error(
                                RuleCode::ConstraintPrecedesViolated,
                                &constraint.ident.identity,
                                format!(
                                    "object starts at {object_start}, before subject at {subject_start}"
                                ),
                            );
                        }
                    }
                }
                Restriction::SameOrientationAs | Restriction::OppositeOrientationAs => {
                    let expect_same = constraint.restriction == Restriction::SameOrientationAs;
                    let violated = subject_annotation.locations.iter().any(|ls| {
                        object_annotation.locations.iter().any(|lo| {
                            match (ls.orientation(), lo.orientation()) {
                                (Some(a), Some(b)) => (a == b) != expect_same,
                                _ => false,
                            }
                        })
                    });
                    if violated {
                        ctx.error(
                            RuleCode::ConstraintOrientationViolated,
                            &constraint.ident.identity,
                            format!("locations violate {}", constraint.restriction),
                        );
                    }
                }
                Restriction::DifferentFrom => {}
            }
        }
    }
}

// =============================================================================
// ACTIVITY ROLE USAGE
// =============================================================================

/// Design/build/test/learn roles constrain what kind of entity an activity
/// may generate or use, and which role pairs may appear inside one activity.
pub(crate) fn check_activity_roles(doc: &Document, ctx: &mut ValidationContext) {
    let design = Uri::new(terms::ACTIVITY_DESIGN);
    let build = Uri::new(terms::ACTIVITY_BUILD);
    let test = Uri::new(terms::ACTIVITY_TEST);
    let learn = Uri::new(terms::ACTIVITY_LEARN);

    for top in doc.top_levels() {
        let identity = &top.ident().identity;
        for generated_by in &top.ident().generated_bys {
            let Some(activity) = doc.activity(generated_by) else {
                continue;
            };
            for association in &activity.associations {
                for role in &association.roles {
                    if *role == design && matches!(top, TopLevelRef::Implementation(_)) {
                        ctx.error(
                            RuleCode::GenerationRoleKindMismatch,
                            identity,
                            "generated by a design activity but is an implementation",
                        );
                    }
                    if *role == build && !matches!(top, TopLevelRef::Implementation(_)) {
                        ctx.error(
                            RuleCode::GenerationRoleKindMismatch,
                            identity,
                            "generated by a build activity but is not an implementation",
                        );
                    }
                    if *role == test {
                        match top {
                            TopLevelRef::Attachment(_) => {}
                            TopLevelRef::Collection(collection) => {
                                let foreign = collection.members.iter().any(|member| {
                                    !matches!(
                                        doc.top_level(member),
                                        Some(TopLevelRef::Attachment(_)) | None
                                    )
                                });
                                if foreign {
                                    ctx.error(
                                        RuleCode::GenerationRoleKindMismatch,
                                        identity,
                                        "generated by a test activity but collects non-attachments",
                                    );
                                }
                            }
                            _ => {
                                ctx.error(
                                    RuleCode::GenerationRoleKindMismatch,
                                    identity,
                                    "generated by a test activity but is not an attachment or collection",
                                );
                            }
                        }
                    }
                    if *role == learn && matches!(top, TopLevelRef::Implementation(_)) {
                        ctx.error(
                            RuleCode::GenerationRoleKindMismatch,
                            identity,
                            "generated by a learn activity but is an implementation",
                        );
                    }
                }
            }
        }
    }

    for activity in doc.activities() {
        let identity = &activity.ident.identity;
        for usage in &activity.usages {
            let used = doc.top_level(&usage.entity);
            let association_has = |role: &Uri| {
                activity
                    .associations
                    .iter()
                    .any(|a| a.roles.contains(role))
            };
            if usage.roles.contains(&design) {
                if matches!(used, Some(TopLevelRef::Implementation(_))) {
                    ctx.error(
                        RuleCode::UsageRoleKindMismatch,
                        identity,
                        format!("uses {} as a design but it is an implementation", usage.entity),
                    );
                }
                if association_has(&test) {
                    ctx.error(
                        RuleCode::IncompatibleActivityRoles,
                        identity,
                        "design usage inside a test activity",
                    );
                }
                if association_has(&learn) {
                    ctx.error(
                        RuleCode::IncompatibleActivityRoles,
                        identity,
                        "design usage inside a learn activity",
                    );
                }
            }
            if usage.roles.contains(&build) {
                if used.is_some() && !matches!(used, Some(TopLevelRef::Implementation(_))) {
                    ctx.error(
                        RuleCode::UsageRoleKindMismatch,
                        identity,
                        format!("uses {} as a build but it is not an implementation", usage.entity),
                    );
                }
                if association_has(&design) {
                    ctx.error(
                        RuleCode::IncompatibleActivityRoles,
                        identity,
                        "build usage inside a design activity",
                    );
                }
                if association_has(&learn) {
                    ctx.error(
                        RuleCode::IncompatibleActivityRoles,
                        identity,
                        "build usage inside a learn activity",
                    );
                }
            }
            if usage.roles.contains(&test) {
                if used.is_some()
                    && !matches!(
                        used,
                        Some(TopLevelRef::Attachment(_)) | Some(TopLevelRef::Collection(_))
                    )
                {
                    ctx.error(
                        RuleCode::UsageRoleKindMismatch,
                        identity,
                        format!(
                            "uses {} as a test but it is not an attachment or collection",
                            usage.entity
                        ),
                    );
                }
                if association_has(&design) {
                    ctx.error(
                        RuleCode::IncompatibleActivityRoles,
                        identity,
                        "test usage inside a design activity",
                    );
                }
                if association_has(&build) {
                    ctx.error(
                        RuleCode::IncompatibleActivityRoles,
                        identity,
                        "test usage inside a build activity",
                    );
                }
            }
            if usage.roles.contains(&learn) {
                if matches!(used, Some(TopLevelRef::Implementation(_))) {
                    ctx.error(
                        RuleCode::UsageRoleKindMismatch,
                        identity,
                        format!("uses {} to learn but it is an implementation", usage.entity),
                    );
                }
                if association_has(&test) {
                    ctx.error(
                        RuleCode::IncompatibleActivityRoles,
                        identity,
                        "learn usage inside a test activity",
                    );
                }
                if association_has(&build) {
                    ctx.error(
                        RuleCode::IncompatibleActivityRoles,
                        identity,
                        "learn usage inside a build activity",
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Identified;

    fn range(id: &str, start: u64, end: u64) -> Location {
        Location::Range(Range {
            ident: Identified::new(id),
            start,
            end,
            orientation: None,
        })
    }

    fn cut(id: &str, at: u64) -> Location {
        Location::Cut(Cut {
            ident: Identified::new(id),
            at,
            orientation: None,
        })
    }

    #[test]
    fn overlapping_spans_are_detected() {
        assert!(locations_overlap(&range("a", 1, 10), &range("b", 5, 15)));
        assert!(locations_overlap(&range("a", 5, 15), &range("b", 1, 10)));
    }

    #[test]
    fn adjacent_spans_do_not_overlap() {
        assert!(!locations_overlap(&range("a", 1, 10), &range("b", 11, 20)));
    }

    #[test]
    fn point_inside_span_overlaps() {
        assert!(locations_overlap(&range("a", 2, 9), &cut("b", 5)));
        assert!(locations_overlap(&cut("b", 2), &range("a", 2, 9)));
        assert!(!locations_overlap(&range("a", 2, 9), &cut("b", 9)));
        assert!(!locations_overlap(&range("a", 2, 9), &cut("b", 1)));
    }

    #[test]
    fn coincident_points_overlap() {
        assert!(locations_overlap(&cut("a", 4), &cut("b", 4)));
        assert!(!locations_overlap(&cut("a", 4), &cut("b", 5)));
    }

    #[test]
    fn iupac_inclusion_honors_ambiguity_codes() {
        assert!(iupac_includes('a', 'n'));
        assert!(iupac_includes('a', 'r'));
        assert!(!iupac_includes('c', 'r'));
        assert!(iupac_includes('t', 'y'));
        assert!(!iupac_includes('a', 'c'));
        assert!(iupac_includes('g', 'g'));
    }
}
