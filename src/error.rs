//! Error surface: rule codes for batch diagnostics and typed errors for the
//! immediate (mutation-time) channel.
//!
//! Validation itself never fails — checks append diagnostics
//! (see [`crate::validation::context`]) tagged with a [`RuleCode`]. The only
//! hard errors are [`DocumentError`]s raised when a mutation is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

use crate::model::{EntityKind, Uri};

// =============================================================================
// RULE CODES
// =============================================================================

/// Stable identifier for one validation rule. The wire form ([`Self::code`])
/// is what diagnostics embed; it never changes once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleCode {
    // Always-on integrity rules
    LineageVersionOrder,
    ComponentContainmentCycle,
    ModuleContainmentCycle,
    DerivationCycle,
    ProvenanceCycle,
    IdentityCollision,
    PersistentIdentityKindCollision,
    MappingRefinementConflict,

    // Compliant-identity shape
    NoncompliantIdentity,
    MalformedDisplayId,

    // Referential completeness
    DanglingGeneratedBy,
    DanglingCollectionMember,
    DanglingSequenceReference,
    DanglingComponentDefinition,
    DanglingModuleDefinition,
    DanglingModelReference,
    DanglingMappingRemote,
    PrivateMappingRemote,
    MappingDefinitionMismatch,
    DanglingDerivationTemplate,
    UnknownTemplateVariable,
    DanglingVariant,
    DanglingVariantCollection,
    EmptyVariantCollection,
    ForeignVariantCollectionMember,
    DanglingVariantDerivation,
    DanglingBuiltReference,
    DanglingInformedBy,
    DanglingAssociationPlan,
    DanglingAssociationAgent,

    // Structural consistency (template vs derivation)
    UnreplacedPositionCount,
    UnreplacedPositionRedefined,
    VariantNotAllowed,
    CardinalityZeroOrOne,
    CardinalityExactlyOne,
    CardinalityOneOrMore,
    TemplateConstraintUnmatched,
    ReplacementRoleMismatch,
    DerivedTypeMismatch,
    DerivedRoleMismatch,

    // Best practice
    EmptyTemplate,
    EmptyVariableComponent,
    CollectionLineageMissing,
    MemberLineageMissing,
    UnknownSequenceEncoding,
    MalformedSequenceElements,
    MalformedChemicalNotation,
    BiochemicalTypeMissing,
    BiochemicalTypeConflict,
    SequenceFeatureRoleCount,
    TopologyAttributeCount,
    UnexpectedSequenceFeatureRole,
    UnexpectedTopologyAttribute,
    SubComponentRoleCount,
    MissingTypedSequence,
    SequenceLengthMismatch,
    LocationOutOfBounds,
    ImpliedSequenceMismatch,
    AnnotationOverlap,
    InteractionTypeCount,
    ParticipationRoleCount,
    IncompatibleParticipationRole,
    ModelLanguageUnrecognized,
    ModelFrameworkUnrecognized,
    AttachmentFormatUnrecognized,
    ConstraintPrecedesViolated,
    ConstraintOrientationViolated,
    ConstraintSelfSimilar,
    GenerationRoleKindMismatch,
    UsageRoleKindMismatch,
    IncompatibleActivityRoles,
}

impl RuleCode {
    /// The stable wire code embedded in diagnostic messages.
    pub fn code(&self) -> &'static str {
        match self {
            RuleCode::LineageVersionOrder => "lineage-version-order",
            RuleCode::ComponentContainmentCycle => "component-containment-cycle",
            RuleCode::ModuleContainmentCycle => "module-containment-cycle",
            RuleCode::DerivationCycle => "derivation-cycle",
            RuleCode::ProvenanceCycle => "provenance-cycle",
            RuleCode::IdentityCollision => "identity-collision",
            RuleCode::PersistentIdentityKindCollision => "persistent-identity-kind",
            RuleCode::MappingRefinementConflict => "mapping-refinement-conflict",
            RuleCode::NoncompliantIdentity => "noncompliant-identity",
            RuleCode::MalformedDisplayId => "malformed-display-id",
            RuleCode::DanglingGeneratedBy => "dangling-generated-by",
            RuleCode::DanglingCollectionMember => "dangling-collection-member",
            RuleCode::DanglingSequenceReference => "dangling-sequence-ref",
            RuleCode::DanglingComponentDefinition => "dangling-component-definition",
            RuleCode::DanglingModuleDefinition => "dangling-module-definition",
            RuleCode::DanglingModelReference => "dangling-model-ref",
            RuleCode::DanglingMappingRemote => "dangling-mapping-remote",
            RuleCode::PrivateMappingRemote => "private-mapping-remote",
            RuleCode::MappingDefinitionMismatch => "mapping-definition-mismatch",
            RuleCode::DanglingDerivationTemplate => "dangling-derivation-template",
            RuleCode::UnknownTemplateVariable => "unknown-template-variable",
            RuleCode::DanglingVariant => "dangling-variant",
            RuleCode::DanglingVariantCollection => "dangling-variant-collection",
            RuleCode::EmptyVariantCollection => "empty-variant-collection",
            RuleCode::ForeignVariantCollectionMember => "foreign-variant-collection-member",
            RuleCode::DanglingVariantDerivation => "dangling-variant-derivation",
            RuleCode::DanglingBuiltReference => "dangling-built-ref",
            RuleCode::DanglingInformedBy => "dangling-informed-by",
            RuleCode::DanglingAssociationPlan => "dangling-association-plan",
            RuleCode::DanglingAssociationAgent => "dangling-association-agent",
            RuleCode::UnreplacedPositionCount => "unreplaced-position-count",
            RuleCode::UnreplacedPositionRedefined => "unreplaced-position-redefined",
            RuleCode::VariantNotAllowed => "variant-not-allowed",
            RuleCode::CardinalityZeroOrOne => "cardinality-zero-or-one",
            RuleCode::CardinalityExactlyOne => "cardinality-exactly-one",
            RuleCode::CardinalityOneOrMore => "cardinality-one-or-more",
            RuleCode::TemplateConstraintUnmatched => "template-constraint-unmatched",
            RuleCode::ReplacementRoleMismatch => "replacement-role-mismatch",
            RuleCode::DerivedTypeMismatch => "derived-type-mismatch",
            RuleCode::DerivedRoleMismatch => "derived-role-mismatch",
            RuleCode::EmptyTemplate => "empty-template",
            RuleCode::EmptyVariableComponent => "empty-variable-component",
            RuleCode::CollectionLineageMissing => "collection-lineage-missing",
            RuleCode::MemberLineageMissing => "member-lineage-missing",
            RuleCode::UnknownSequenceEncoding => "unknown-sequence-encoding",
            RuleCode::MalformedSequenceElements => "malformed-sequence-elements",
            RuleCode::MalformedChemicalNotation => "sequence-notation",
            RuleCode::BiochemicalTypeMissing => "biochemical-type-missing",
            RuleCode::BiochemicalTypeConflict => "biochemical-type-conflict",
            RuleCode::SequenceFeatureRoleCount => "sequence-feature-role-count",
            RuleCode::TopologyAttributeCount => "topology-attribute-count",
            RuleCode::UnexpectedSequenceFeatureRole => "unexpected-sequence-feature-role",
            RuleCode::UnexpectedTopologyAttribute => "unexpected-topology-attribute",
            RuleCode::SubComponentRoleCount => "sub-component-role-count",
            RuleCode::MissingTypedSequence => "missing-typed-sequence",
            RuleCode::SequenceLengthMismatch => "sequence-length-mismatch",
            RuleCode::LocationOutOfBounds => "location-out-of-bounds",
            RuleCode::ImpliedSequenceMismatch => "implied-sequence-mismatch",
            RuleCode::AnnotationOverlap => "annotation-overlap",
            RuleCode::InteractionTypeCount => "interaction-type-count",
            RuleCode::ParticipationRoleCount => "participation-role-count",
            RuleCode::IncompatibleParticipationRole => "incompatible-participation-role",
            RuleCode::ModelLanguageUnrecognized => "model-language-unrecognized",
            RuleCode::ModelFrameworkUnrecognized => "model-framework-unrecognized",
            RuleCode::AttachmentFormatUnrecognized => "attachment-format-unrecognized",
            RuleCode::ConstraintPrecedesViolated => "constraint-precedes-violated",
            RuleCode::ConstraintOrientationViolated => "constraint-orientation-violated",
            RuleCode::ConstraintSelfSimilar => "constraint-self-similar",
            RuleCode::GenerationRoleKindMismatch => "generation-role-kind-mismatch",
            RuleCode::UsageRoleKindMismatch => "usage-role-kind-mismatch",
            RuleCode::IncompatibleActivityRoles => "incompatible-activity-roles",
        }
    }

    /// Which pipeline phase owns the rule; used for reporting and filtering.
    pub fn category(&self) -> RuleCategory {
        use RuleCode::*;
        match self {
            LineageVersionOrder | ComponentContainmentCycle | ModuleContainmentCycle
            | DerivationCycle | ProvenanceCycle | IdentityCollision
            | PersistentIdentityKindCollision | MappingRefinementConflict => {
                RuleCategory::Integrity
            }
            NoncompliantIdentity | MalformedDisplayId => RuleCategory::Compliance,
            DanglingGeneratedBy | DanglingCollectionMember | DanglingSequenceReference
            | DanglingComponentDefinition | DanglingModuleDefinition | DanglingModelReference
            | DanglingMappingRemote | PrivateMappingRemote | MappingDefinitionMismatch
            | DanglingDerivationTemplate | UnknownTemplateVariable | DanglingVariant
            | DanglingVariantCollection | EmptyVariantCollection
            | ForeignVariantCollectionMember | DanglingVariantDerivation
            | DanglingBuiltReference | DanglingInformedBy | DanglingAssociationPlan
            | DanglingAssociationAgent => RuleCategory::Completeness,
            UnreplacedPositionCount | UnreplacedPositionRedefined | VariantNotAllowed
            | CardinalityZeroOrOne | CardinalityExactlyOne | CardinalityOneOrMore
            | TemplateConstraintUnmatched | ReplacementRoleMismatch | DerivedTypeMismatch
            | DerivedRoleMismatch => RuleCategory::Structure,
            _ => RuleCategory::BestPractice,
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum RuleCategory {
    Integrity,
    Compliance,
    Completeness,
    Structure,
    BestPractice,
}

/// Severity of one diagnostic. Whether a report is "valid" only considers
/// errors; warnings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

// =============================================================================
// IMMEDIATE-CHANNEL ERRORS
// =============================================================================

/// Rejection of a document mutation. The document is unchanged whenever one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("document is read-only")]
    ReadOnly,

    #[error("{kind} {identity} is already present")]
    DuplicateIdentity { kind: EntityKind, identity: Uri },

    #[error("no {kind} with identity {identity}")]
    UnknownEntity { kind: EntityKind, identity: Uri },

    #[error(
        "mapping rejected: local {local} in {owner} is already replaced by a use-remote mapping"
    )]
    MappingConflict { owner: Uri, local: Uri },
}
