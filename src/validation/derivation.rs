//! Structural consistency between a combinatorial derivation's template and
//! the definitions derived from it.
//!
//! A derived definition declares its origin by listing the derivation among
//! its lineage; each of its components traces to a template position through
//! its own lineage. Against that mapping the checker verifies unreplaced
//! positions, substitution legality, cardinality, role preservation and
//! constraint correspondence.

use crate::error::RuleCode;
use crate::model::{
    Cardinality, CombinatorialDerivation, Component, ComponentDefinition, Document, TopLevelRef,
    Uri, VariableComponent,
};

use super::context::ValidationContext;

/// Entry point for the `complete` phase: checks every definition that
/// derives from a combinatorial derivation in this document.
pub(crate) fn check_derived_definitions(doc: &Document, ctx: &mut ValidationContext) {
    for derived in doc.component_definitions() {
        for origin in &derived.ident.derived_froms {
            let Some(TopLevelRef::CombinatorialDerivation(derivation)) = doc.top_level(origin)
            else {
                continue;
            };
            let Some(template) = doc.component_definition(&derivation.template) else {
                continue;
            };
            check_against_template(doc, derived, derivation, template, ctx);
        }
    }
}

fn check_against_template(
    doc: &Document,
    derived: &ComponentDefinition,
    derivation: &CombinatorialDerivation,
    template: &ComponentDefinition,
    ctx: &mut ValidationContext,
) {
    let identity = &derived.ident.identity;

    // The derived definition keeps the template's type and role sets.
    if derived.types != template.types {
        ctx.error(
            RuleCode::DerivedTypeMismatch,
            identity,
            format!("type set differs from template {}", template.ident.identity),
        );
    }
    if derived.roles != template.roles {
        ctx.error(
            RuleCode::DerivedRoleMismatch,
            identity,
            format!("role set differs from template {}", template.ident.identity),
        );
    }

    // Per derived component: substitution legality and role preservation.
    for component in &derived.components {
        for position_uri in &component.ident.derived_froms {
            let Some(position) = template.component(position_uri) else {
                continue;
            };
            match derivation.variable_for(position_uri) {
                Some(variable) => {
                    if !variant_allowed(doc, variable, component) {
                        ctx.error(
                            RuleCode::VariantNotAllowed,
                            identity,
                            format!(
                                "component {} substitutes {} with {}, which is not an allowed variant",
                                component.ident.identity, position_uri, component.definition
                            ),
                        );
                    }
                }
                None => {
                    if component.definition != position.definition {
                        ctx.error(
                            RuleCode::UnreplacedPositionRedefined,
                            identity,
                            format!(
                                "component {} changes the definition of unreplaced position {}",
                                component.ident.identity, position_uri
                            ),
                        );
                    }
                }
            }
            // Roles must be preserved unless the substitution explicitly
            // changed the definition away from the template position's.
            let substituted = derivation.variable_for(position_uri).is_some()
                && component.definition != position.definition;
            if !substituted && component.roles != position.roles {
                ctx.error(
                    RuleCode::ReplacementRoleMismatch,
                    identity,
                    format!(
                        "component {} does not keep the role set of template position {}",
                        component.ident.identity, position_uri
                    ),
                );
            }
        }
    }

    // Unreplaced template positions must appear exactly once.
    for position in &template.components {
        if derivation.variable_for(&position.ident.identity).is_some() {
            continue;
        }
        let count = trace_count(derived, &position.ident.identity);
        if count != 1 {
            ctx.error(
                RuleCode::UnreplacedPositionCount,
                identity,
                format!(
                    "unreplaced template position {} appears {count} times (expected exactly 1)",
                    position.ident.identity
                ),
            );
        }
    }

    // Cardinality per substitution point.
    for variable in &derivation.variable_components {
        let count = trace_count(derived, &variable.variable);
        let violation = match variable.operator {
            Cardinality::ZeroOrOne if count > 1 => Some(RuleCode::CardinalityZeroOrOne),
            Cardinality::One if count != 1 => Some(RuleCode::CardinalityExactlyOne),
            Cardinality::OneOrMore if count == 0 => Some(RuleCode::CardinalityOneOrMore),
            _ => None,
        };
        if let Some(rule) = violation {
            ctx.error(
                rule,
                identity,
                format!(
                    "{count} components trace to {} under operator {}",
                    variable.variable, variable.operator
                ),
            );
        }
    }

    // Every template constraint must reappear between the mapped components.
    for constraint in &template.sequence_constraints {
        let mapped_subject = derived
            .components
            .iter()
            .find(|c| c.ident.derived_froms.contains(&constraint.subject))
            .map(|c| c.ident.identity.clone());
        let mapped_object = derived
            .components
            .iter()
            .find(|c| c.ident.derived_froms.contains(&constraint.object))
            .map(|c| c.ident.identity.clone());
        let (Some(subject), Some(object)) = (mapped_subject, mapped_object) else {
            continue;
        };
        let satisfied = derived.sequence_constraints.iter().any(|sc| {
            sc.subject == subject && sc.object == object && sc.restriction == constraint.restriction
        });
        if !satisfied {
            ctx.error(
                RuleCode::TemplateConstraintUnmatched,
                identity,
                format!(
                    "template constraint {} ({} {} {}) has no counterpart between {subject} and {object}",
                    constraint.ident.identity,
                    constraint.subject,
                    constraint.restriction,
                    constraint.object
                ),
            );
        }
    }
}

/// How many derived components trace back to the given template position.
fn trace_count(derived: &ComponentDefinition, position: &Uri) -> usize {
    derived
        .components
        .iter()
        .filter(|c| c.ident.derived_froms.contains(position))
        .count()
}

/// Whether the component's chosen definition belongs to the substitution
/// point's allowed variant set: directly, through a variant collection's
/// members, or as an output of a nested derivation.
fn variant_allowed(doc: &Document, variable: &VariableComponent, component: &Component) -> bool {
    let chosen = &component.definition;
    if variable.variants.contains(chosen) {
        return true;
    }
    if variable.variant_collections.iter().any(|uri| {
        doc.collection(uri)
            .is_some_and(|collection| collection.members.contains(chosen))
    }) {
        return true;
    }
    // An output of a nested derivation is a definition whose lineage names
    // that derivation.
    variable.variant_derivations.iter().any(|nested| {
        doc.component_definition(chosen)
            .is_some_and(|definition| definition.ident.derived_froms.contains(nested))
    })
}

/// Best-practice hygiene around derivations: empty templates, variable
/// components offering nothing, and collection/member lineage symmetry.
pub(crate) fn check_derivation_hygiene(doc: &Document, ctx: &mut ValidationContext) {
    for derivation in doc.combinatorial_derivations() {
        if let Some(template) = doc.component_definition(&derivation.template) {
            if template.components.is_empty() {
                ctx.error(
                    RuleCode::EmptyTemplate,
                    &derivation.ident.identity,
                    format!("template {} has no components to vary", derivation.template),
                );
            }
        }
        for variable in &derivation.variable_components {
            if variable.variants.is_empty()
                && variable.variant_collections.is_empty()
                && variable.variant_derivations.is_empty()
            {
                ctx.error(
                    RuleCode::EmptyVariableComponent,
                    &variable.ident.identity,
                    "no variants, variant collections or variant derivations are offered",
                );
            }
        }
    }
    for collection in doc.collections() {
        for origin in &collection.ident.derived_froms {
            if !matches!(
                doc.top_level(origin),
                Some(TopLevelRef::CombinatorialDerivation(_))
            ) {
                continue;
            }
            for member_uri in &collection.members {
                if let Some(member) = doc.top_level(member_uri) {
                    if !member.ident().derived_froms.contains(origin) {
                        ctx.error(
                            RuleCode::MemberLineageMissing,
                            &collection.ident.identity,
                            format!("member {member_uri} does not share the collection's lineage {origin}"),
                        );
                    }
                }
            }
        }
        for member_uri in &collection.members {
            let Some(member) = doc.top_level(member_uri) else {
                continue;
            };
            for origin in &member.ident().derived_froms {
                if !matches!(
                    doc.top_level(origin),
                    Some(TopLevelRef::CombinatorialDerivation(_))
                ) {
                    continue;
                }
                if !collection.ident.derived_froms.contains(origin) {
                    ctx.error(
                        RuleCode::CollectionLineageMissing,
                        &collection.ident.identity,
                        format!(
                            "member {member_uri} derives from {origin} but the collection does not"
                        ),
                    );
                }
            }
        }
    }
}
