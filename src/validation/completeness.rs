//! Referential completeness: every URI reference field on every entity must
//! resolve inside the document.
//!
//! Each unresolved reference yields one diagnostic scoped to the owning
//! entity. Resolution failures are never fatal — the walk visits everything
//! regardless.

use crate::error::RuleCode;
use crate::model::{
    Access, CombinatorialDerivation, ComponentDefinition, Document, MapsTo, ModuleDefinition,
    Refinement,
};

use super::context::ValidationContext;

pub(crate) fn check_references(doc: &Document, ctx: &mut ValidationContext) {
    for top in doc.top_levels() {
        for generated_by in &top.ident().generated_bys {
            if doc.activity(generated_by).is_none() {
                ctx.error(
                    RuleCode::DanglingGeneratedBy,
                    &top.ident().identity,
                    format!("generating activity {generated_by} is not in the document"),
                );
            }
        }
    }
    for collection in doc.collections() {
        for member in &collection.members {
            if doc.top_level(member).is_none() {
                ctx.error(
                    RuleCode::DanglingCollectionMember,
                    &collection.ident.identity,
                    format!("member {member} is not in the document"),
                );
            }
        }
    }
    for cd in doc.component_definitions() {
        check_component_definition(doc, cd, ctx);
    }
    for md in doc.module_definitions() {
        check_module_definition(doc, md, ctx);
    }
    for derivation in doc.combinatorial_derivations() {
        check_derivation(doc, derivation, ctx);
    }
    for implementation in doc.implementations() {
        if let Some(built) = &implementation.built {
            let resolves = doc.component_definition(built).is_some()
                || doc.module_definition(built).is_some();
            if !resolves {
                ctx.error(
                    RuleCode::DanglingBuiltReference,
                    &implementation.ident.identity,
                    format!("built reference {built} is not a component or module definition"),
                );
            }
        }
    }
    for activity in doc.activities() {
        for informed_by in &activity.informed_bys {
            if doc.activity(informed_by).is_none() {
                ctx.error(
                    RuleCode::DanglingInformedBy,
                    &activity.ident.identity,
                    format!("informing activity {informed_by} is not in the document"),
                );
            }
        }
        for association in &activity.associations {
            if let Some(plan) = &association.plan {
                if doc.plan(plan).is_none() {
                    ctx.error(
                        RuleCode::DanglingAssociationPlan,
                        &activity.ident.identity,
                        format!("association plan {plan} is not in the document"),
                    );
                }
            }
            if doc.agent(&association.agent).is_none() {
                ctx.error(
                    RuleCode::DanglingAssociationAgent,
                    &activity.ident.identity,
                    format!("association agent {} is not in the document", association.agent),
                );
            }
        }
    }
}

fn check_component_definition(
    doc: &Document,
    cd: &ComponentDefinition,
    ctx: &mut ValidationContext,
) {
    for sequence in &cd.sequences {
        if doc.sequence(sequence).is_none() {
            ctx.error(
                RuleCode::DanglingSequenceReference,
                &cd.ident.identity,
                format!("sequence {sequence} is not in the document"),
            );
        }
    }
    for component in &cd.components {
        let definition = doc.component_definition(&component.definition);
        if definition.is_none() {
            ctx.error(
                RuleCode::DanglingComponentDefinition,
                &component.ident.identity,
                format!("definition {} is not in the document", component.definition),
            );
        }
        for maps_to in &component.maps_tos {
            check_component_mapping(cd, definition, maps_to, ctx);
        }
    }
}

/// Resolves a component mapping's remote end inside the referenced
/// definition, then applies the access and verify-identical rules.
fn check_component_mapping(
    owner: &ComponentDefinition,
    remote_definition: Option<&ComponentDefinition>,
    maps_to: &MapsTo,
    ctx: &mut ValidationContext,
) {
    let Some(remote) = remote_definition.and_then(|d| d.component(&maps_to.remote)) else {
        ctx.error(
            RuleCode::DanglingMappingRemote,
            &maps_to.ident.identity,
            format!("remote {} does not resolve", maps_to.remote),
        );
        return;
    };
    if remote.access == Access::Private {
        ctx.error(
            RuleCode::PrivateMappingRemote,
            &maps_to.ident.identity,
            format!("remote {} has private access", maps_to.remote),
        );
    }
    if maps_to.refinement == Refinement::VerifyIdentical {
        if let Some(local) = owner.component(&maps_to.local) {
            if local.definition != remote.definition {
                ctx.error(
                    RuleCode::MappingDefinitionMismatch,
                    &maps_to.ident.identity,
                    format!(
                        "verify-identical mapping joins different definitions ({} vs {})",
                        local.definition, remote.definition
                    ),
                );
            }
        }
    }
}

fn check_module_definition(doc: &Document, md: &ModuleDefinition, ctx: &mut ValidationContext) {
    for model in &md.models {
        if doc.model(model).is_none() {
            ctx.error(
                RuleCode::DanglingModelReference,
                &md.ident.identity,
                format!("model {model} is not in the document"),
            );
        }
    }
    for fc in &md.functional_components {
        let definition = doc.component_definition(&fc.definition);
        if definition.is_none() {
            ctx.error(
                RuleCode::DanglingComponentDefinition,
                &fc.ident.identity,
                format!("definition {} is not in the document", fc.definition),
            );
        }
        for maps_to in &fc.maps_tos {
            // The remote end of a functional-component mapping lives in the
            // referenced component definition.
            let Some(remote) = definition.and_then(|d| d.component(&maps_to.remote)) else {
                ctx.error(
                    RuleCode::DanglingMappingRemote,
                    &maps_to.ident.identity,
                    format!("remote {} does not resolve", maps_to.remote),
                );
                continue;
            };
            if remote.access == Access::Private {
                ctx.error(
                    RuleCode::PrivateMappingRemote,
                    &maps_to.ident.identity,
                    format!("remote {} has private access", maps_to.remote),
                );
            }
            if maps_to.refinement == Refinement::VerifyIdentical {
                if let Some(local) = md.functional_component(&maps_to.local) {
                    if local.definition != remote.definition {
                        ctx.error(
                            RuleCode::MappingDefinitionMismatch,
                            &maps_to.ident.identity,
                            format!(
                                "verify-identical mapping joins different definitions ({} vs {})",
                                local.definition, remote.definition
                            ),
                        );
                    }
                }
            }
        }
    }
    for module in &md.modules {
        let definition = doc.module_definition(&module.definition);
        if definition.is_none() {
            ctx.error(
                RuleCode::DanglingModuleDefinition,
                &module.ident.identity,
                format!("definition {} is not in the document", module.definition),
            );
        }
        for maps_to in &module.maps_tos {
            // A module mapping's remote end is a functional component of the
            // referenced module definition.
            let Some(remote) = definition.and_then(|d| d.functional_component(&maps_to.remote))
            else {
                ctx.error(
                    RuleCode::DanglingMappingRemote,
                    &maps_to.ident.identity,
                    format!("remote {} does not resolve", maps_to.remote),
                );
                continue;
            };
            if remote.access == Access::Private {
                ctx.error(
                    RuleCode::PrivateMappingRemote,
                    &maps_to.ident.identity,
                    format!("remote {} has private access", maps_to.remote),
                );
            }
            if maps_to.refinement == Refinement::VerifyIdentical {
                if let Some(local) = md.functional_component(&maps_to.local) {
                    if local.definition != remote.definition {
                        ctx.error(
                            RuleCode::MappingDefinitionMismatch,
                            &maps_to.ident.identity,
                            format!(
                                "verify-identical mapping joins different definitions ({} vs {})",
                                local.definition, remote.definition
                            ),
                        );
                    }
                }
            }
        }
    }
}

fn check_derivation(
    doc: &Document,
    derivation: &CombinatorialDerivation,
    ctx: &mut ValidationContext,
) {
    let template = doc.component_definition(&derivation.template);
    if template.is_none() {
        ctx.error(
            RuleCode::DanglingDerivationTemplate,
            &derivation.ident.identity,
            format!("template {} is not in the document", derivation.template),
        );
    }
    for vc in &derivation.variable_components {
        if let Some(template) = template {
            if template.component(&vc.variable).is_none() {
                ctx.error(
                    RuleCode::UnknownTemplateVariable,
                    &derivation.ident.identity,
                    format!(
                        "variable {} is not a component of template {}",
                        vc.variable, derivation.template
                    ),
                );
            }
        }
        for variant in &vc.variants {
            if doc.component_definition(variant).is_none() {
                ctx.error(
                    RuleCode::DanglingVariant,
                    &derivation.ident.identity,
                    format!("variant {variant} is not in the document"),
                );
            }
        }
        for collection_uri in &vc.variant_collections {
            let Some(collection) = doc.collection(collection_uri) else {
                ctx.error(
                    RuleCode::DanglingVariantCollection,
                    &derivation.ident.identity,
                    format!("variant collection {collection_uri} is not in the document"),
                );
                continue;
            };
            if collection.members.is_empty() {
                ctx.error(
                    RuleCode::EmptyVariantCollection,
                    &derivation.ident.identity,
                    format!("variant collection {collection_uri} has no members"),
                );
            }
            for member in &collection.members {
                if doc.component_definition(member).is_none() {
                    ctx.error(
                        RuleCode::ForeignVariantCollectionMember,
                        &derivation.ident.identity,
                        format!(
                            "variant collection member {member} is not a component definition"
                        ),
                    );
                }
            }
        }
        for variant_derivation in &vc.variant_derivations {
            if doc.combinatorial_derivation(variant_derivation).is_none() {
                ctx.error(
                    RuleCode::DanglingVariantDerivation,
                    &derivation.ident.identity,
                    format!("variant derivation {variant_derivation} is not in the document"),
                );
            }
        }
    }
}
