//! The document: an identity-keyed store of top-level entities.
//!
//! Stores are insertion-ordered, so every walk over a document — validation,
//! uniqueness, comparison — visits entities in a stable order and diagnostics
//! come out deterministic.
//!
//! Mutations go through the `add_*` factory surface and are rejected while
//! the document is read-only; the read-only guard is what keeps the eager
//! mapping checks from racing an in-progress batch validation pass.

use indexmap::IndexMap;

use crate::error::DocumentError;
use crate::validation::mapsto::use_remote_conflict;

use super::component::{ComponentDefinition, MapsTo};
use super::derivation::CombinatorialDerivation;
use super::identity::Uri;
use super::module::ModuleDefinition;
use super::provenance::{Activity, Agent, Plan};
use super::toplevel::{
    Attachment, Collection, GenericTopLevel, Implementation, Model, Sequence,
};
use super::{EntityKind, EntityRef, TopLevelRef};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    component_definitions: IndexMap<Uri, ComponentDefinition>,
    sequences: IndexMap<Uri, Sequence>,
    module_definitions: IndexMap<Uri, ModuleDefinition>,
    models: IndexMap<Uri, Model>,
    collections: IndexMap<Uri, Collection>,
    combinatorial_derivations: IndexMap<Uri, CombinatorialDerivation>,
    implementations: IndexMap<Uri, Implementation>,
    activities: IndexMap<Uri, Activity>,
    agents: IndexMap<Uri, Agent>,
    plans: IndexMap<Uri, Plan>,
    attachments: IndexMap<Uri, Attachment>,
    generic_top_levels: IndexMap<Uri, GenericTopLevel>,
    read_only: bool,
}

macro_rules! top_level_store {
    ($add:ident, $get:ident, $iter:ident, $field:ident, $ty:ty, $kind:expr) => {
        pub fn $add(&mut self, entity: $ty) -> Result<(), DocumentError> {
            self.ensure_writable()?;
            let identity = entity.ident.identity.clone();
            if self.$field.contains_key(&identity) {
                return Err(DocumentError::DuplicateIdentity {
                    kind: $kind,
                    identity,
                });
            }
            self.$field.insert(identity, entity);
            Ok(())
        }

        pub fn $get(&self, identity: &Uri) -> Option<&$ty> {
            self.$field.get(identity)
        }

        pub fn $iter(&self) -> impl Iterator<Item = &$ty> {
            self.$field.values()
        }
    };
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn ensure_writable(&self) -> Result<(), DocumentError> {
        if self.read_only {
            return Err(DocumentError::ReadOnly);
        }
        Ok(())
    }

    top_level_store!(
        add_component_definition,
        component_definition,
        component_definitions,
        component_definitions,
        ComponentDefinition,
        EntityKind::ComponentDefinition
    );
    top_level_store!(
        add_sequence,
        sequence,
        sequences,
        sequences,
        Sequence,
        EntityKind::Sequence
    );
    top_level_store!(
        add_module_definition,
        module_definition,
        module_definitions,
        module_definitions,
        ModuleDefinition,
        EntityKind::ModuleDefinition
    );
    top_level_store!(add_model, model, models, models, Model, EntityKind::Model);
    top_level_store!(
        add_collection,
        collection,
        collections,
        collections,
        Collection,
        EntityKind::Collection
    );
    top_level_store!(
        add_combinatorial_derivation,
        combinatorial_derivation,
        combinatorial_derivations,
        combinatorial_derivations,
        CombinatorialDerivation,
        EntityKind::CombinatorialDerivation
    );
    top_level_store!(
        add_implementation,
        implementation,
        implementations,
        implementations,
        Implementation,
        EntityKind::Implementation
    );
    top_level_store!(
        add_activity,
        activity,
        activities,
        activities,
        Activity,
        EntityKind::Activity
    );
    top_level_store!(add_agent, agent, agents, agents, Agent, EntityKind::Agent);
    top_level_store!(add_plan, plan, plans, plans, Plan, EntityKind::Plan);
    top_level_store!(
        add_attachment,
        attachment,
        attachments,
        attachments,
        Attachment,
        EntityKind::Attachment
    );
    top_level_store!(
        add_generic_top_level,
        generic_top_level,
        generic_top_levels,
        generic_top_levels,
        GenericTopLevel,
        EntityKind::GenericTopLevel
    );

    /// Looks an identity up across every top-level store.
    pub fn top_level(&self, identity: &Uri) -> Option<TopLevelRef<'_>> {
        if let Some(e) = self.component_definitions.get(identity) {
            return Some(TopLevelRef::ComponentDefinition(e));
        }
        if let Some(e) = self.sequences.get(identity) {
            return Some(TopLevelRef::Sequence(e));
        }
        if let Some(e) = self.module_definitions.get(identity) {
            return Some(TopLevelRef::ModuleDefinition(e));
        }
        if let Some(e) = self.models.get(identity) {
            return Some(TopLevelRef::Model(e));
        }
        if let Some(e) = self.collections.get(identity) {
            return Some(TopLevelRef::Collection(e));
        }
        if let Some(e) = self.combinatorial_derivations.get(identity) {
            return Some(TopLevelRef::CombinatorialDerivation(e));
        }
        if let Some(e) = self.implementations.get(identity) {
            return Some(TopLevelRef::Implementation(e));
        }
        if let Some(e) = self.activities.get(identity) {
            return Some(TopLevelRef::Activity(e));
        }
        if let Some(e) = self.agents.get(identity) {
            return Some(TopLevelRef::Agent(e));
        }
        if let Some(e) = self.plans.get(identity) {
            return Some(TopLevelRef::Plan(e));
        }
        if let Some(e) = self.attachments.get(identity) {
            return Some(TopLevelRef::Attachment(e));
        }
        if let Some(e) = self.generic_top_levels.get(identity) {
            return Some(TopLevelRef::GenericTopLevel(e));
        }
        None
    }

    /// Every top-level entity, grouped by kind, each group in insertion
    /// order.
    pub fn top_levels(&self) -> impl Iterator<Item = TopLevelRef<'_>> {
        let cds = self
            .component_definitions
            .values()
            .map(TopLevelRef::ComponentDefinition);
        let seqs = self.sequences.values().map(TopLevelRef::Sequence);
        let mds = self
            .module_definitions
            .values()
            .map(TopLevelRef::ModuleDefinition);
        let models = self.models.values().map(TopLevelRef::Model);
        let cols = self.collections.values().map(TopLevelRef::Collection);
        let derivs = self
            .combinatorial_derivations
            .values()
            .map(TopLevelRef::CombinatorialDerivation);
        let impls = self
            .implementations
            .values()
            .map(TopLevelRef::Implementation);
        let acts = self.activities.values().map(TopLevelRef::Activity);
        let agents = self.agents.values().map(TopLevelRef::Agent);
        let plans = self.plans.values().map(TopLevelRef::Plan);
        let atts = self.attachments.values().map(TopLevelRef::Attachment);
        let gens = self
            .generic_top_levels
            .values()
            .map(TopLevelRef::GenericTopLevel);
        cds.chain(seqs)
            .chain(mds)
            .chain(models)
            .chain(cols)
            .chain(derivs)
            .chain(impls)
            .chain(acts)
            .chain(agents)
            .chain(plans)
            .chain(atts)
            .chain(gens)
    }

    /// Visits every entity reachable from every top-level — the top-levels
    /// themselves, their nested entities, and nested locations — in a stable
    /// order. This is the single graph walk behind the uniqueness checks.
    pub fn for_each_entity<'a>(&'a self, mut visit: impl FnMut(EntityRef<'a>)) {
        for cd in self.component_definitions.values() {
            visit(EntityRef::ComponentDefinition(cd));
            for c in &cd.components {
                visit(EntityRef::Component(c));
                for m in &c.maps_tos {
                    visit(EntityRef::MapsTo(m));
                }
            }
            for sa in &cd.sequence_annotations {
                visit(EntityRef::SequenceAnnotation(sa));
                for l in &sa.locations {
                    visit(EntityRef::Location(l));
                }
            }
            for sc in &cd.sequence_constraints {
                visit(EntityRef::SequenceConstraint(sc));
            }
        }
        for s in self.sequences.values() {
            visit(EntityRef::Sequence(s));
        }
        for md in self.module_definitions.values() {
            visit(EntityRef::ModuleDefinition(md));
            for fc in &md.functional_components {
                visit(EntityRef::FunctionalComponent(fc));
                for m in &fc.maps_tos {
                    visit(EntityRef::MapsTo(m));
                }
            }
            for module in &md.modules {
                visit(EntityRef::Module(module));
                for m in &module.maps_tos {
                    visit(EntityRef::MapsTo(m));
                }
            }
            for i in &md.interactions {
                visit(EntityRef::Interaction(i));
                for p in &i.participations {
                    visit(EntityRef::Participation(p));
                }
            }
        }
        for m in self.models.values() {
            visit(EntityRef::Model(m));
        }
        for c in self.collections.values() {
            visit(EntityRef::Collection(c));
        }
        for cd in self.combinatorial_derivations.values() {
            visit(EntityRef::CombinatorialDerivation(cd));
            for vc in &cd.variable_components {
                visit(EntityRef::VariableComponent(vc));
            }
        }
        for i in self.implementations.values() {
            visit(EntityRef::Implementation(i));
        }
        for a in self.activities.values() {
            visit(EntityRef::Activity(a));
            for assoc in &a.associations {
                visit(EntityRef::Association(assoc));
            }
            for u in &a.usages {
                visit(EntityRef::Usage(u));
            }
        }
        for a in self.agents.values() {
            visit(EntityRef::Agent(a));
        }
        for p in self.plans.values() {
            visit(EntityRef::Plan(p));
        }
        for a in self.attachments.values() {
            visit(EntityRef::Attachment(a));
        }
        for g in self.generic_top_levels.values() {
            visit(EntityRef::GenericTopLevel(g));
        }
    }

    /// Attaches a mapping to a nested component, running the use-remote
    /// conflict rule eagerly: on violation the mutation is rejected and the
    /// document is unchanged.
    pub fn add_component_maps_to(
        &mut self,
        definition: &Uri,
        component: &Uri,
        maps_to: MapsTo,
    ) -> Result<(), DocumentError> {
        self.ensure_writable()?;
        let cd = self.component_definitions.get_mut(definition).ok_or_else(|| {
            DocumentError::UnknownEntity {
                kind: EntityKind::ComponentDefinition,
                identity: definition.clone(),
            }
        })?;
        if use_remote_conflict(
            cd.components.iter().flat_map(|c| c.maps_tos.iter()),
            &maps_to,
        ) {
            return Err(DocumentError::MappingConflict {
                owner: cd.ident.identity.clone(),
                local: maps_to.local.clone(),
            });
        }
        let target = cd
            .components
            .iter_mut()
            .find(|c| &c.ident.identity == component)
            .ok_or_else(|| DocumentError::UnknownEntity {
                kind: EntityKind::Component,
                identity: component.clone(),
            })?;
        target.maps_tos.push(maps_to);
        Ok(())
    }

    /// Attaches a mapping to a functional component; the conflict rule spans
    /// every mapping in the owning module definition.
    pub fn add_functional_component_maps_to(
        &mut self,
        definition: &Uri,
        functional_component: &Uri,
        maps_to: MapsTo,
    ) -> Result<(), DocumentError> {
        self.ensure_writable()?;
        let md = self.module_definitions.get_mut(definition).ok_or_else(|| {
            DocumentError::UnknownEntity {
                kind: EntityKind::ModuleDefinition,
                identity: definition.clone(),
            }
        })?;
        if use_remote_conflict(module_definition_maps_tos(md), &maps_to) {
            return Err(DocumentError::MappingConflict {
                owner: md.ident.identity.clone(),
                local: maps_to.local.clone(),
            });
        }
        let target = md
            .functional_components
            .iter_mut()
            .find(|fc| &fc.ident.identity == functional_component)
            .ok_or_else(|| DocumentError::UnknownEntity {
                kind: EntityKind::FunctionalComponent,
                identity: functional_component.clone(),
            })?;
        target.maps_tos.push(maps_to);
        Ok(())
    }

    /// Attaches a mapping to a module instance; same conflict scope as
    /// [`Self::add_functional_component_maps_to`].
    pub fn add_module_maps_to(
        &mut self,
        definition: &Uri,
        module: &Uri,
        maps_to: MapsTo,
    ) -> Result<(), DocumentError> {
        self.ensure_writable()?;
        let md = self.module_definitions.get_mut(definition).ok_or_else(|| {
            DocumentError::UnknownEntity {
                kind: EntityKind::ModuleDefinition,
                identity: definition.clone(),
            }
        })?;
        if use_remote_conflict(module_definition_maps_tos(md), &maps_to) {
            return Err(DocumentError::MappingConflict {
                owner: md.ident.identity.clone(),
                local: maps_to.local.clone(),
            });
        }
        let target = md
            .modules
            .iter_mut()
            .find(|m| &m.ident.identity == module)
            .ok_or_else(|| DocumentError::UnknownEntity {
                kind: EntityKind::Module,
                identity: module.clone(),
            })?;
        target.maps_tos.push(maps_to);
        Ok(())
    }
}

/// Every mapping owned anywhere inside one module definition.
fn module_definition_maps_tos(md: &ModuleDefinition) -> impl Iterator<Item = &MapsTo> {
    md.modules
        .iter()
        .flat_map(|m| m.maps_tos.iter())
        .chain(
            md.functional_components
                .iter()
                .flat_map(|fc| fc.maps_tos.iter()),
        )
}
