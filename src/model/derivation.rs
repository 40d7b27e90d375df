//! Combinatorial derivations: a template definition plus substitution points
//! describing a family of concrete designs.

use strum::{Display, EnumString};

use super::identity::{Identified, Uri};

/// How many derived components may trace back to one substitution point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Cardinality {
    ZeroOrOne,
    One,
    OneOrMore,
    ZeroOrMore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombinatorialDerivation {
    pub ident: Identified,
    /// The component definition whose nested components are the substitution
    /// positions.
    pub template: Uri,
    pub variable_components: Vec<VariableComponent>,
}

impl CombinatorialDerivation {
    pub fn new(ident: Identified, template: impl Into<Uri>) -> Self {
        Self {
            ident,
            template: template.into(),
            variable_components: Vec::new(),
        }
    }

    pub fn variable_component(&self, identity: &Uri) -> Option<&VariableComponent> {
        self.variable_components
            .iter()
            .find(|vc| &vc.ident.identity == identity)
    }

    /// The substitution point (if any) naming the given template component.
    pub fn variable_for(&self, template_component: &Uri) -> Option<&VariableComponent> {
        self.variable_components
            .iter()
            .find(|vc| &vc.variable == template_component)
    }
}

/// One substitution point: the template component it replaces, a cardinality
/// operator, and the allowed variants.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableComponent {
    pub ident: Identified,
    pub operator: Cardinality,
    pub variable: Uri,
    /// Directly allowed definitions.
    pub variants: Vec<Uri>,
    /// Collections whose members are allowed definitions.
    pub variant_collections: Vec<Uri>,
    /// Nested derivations whose outputs are allowed definitions.
    pub variant_derivations: Vec<Uri>,
}

impl VariableComponent {
    pub fn new(ident: Identified, operator: Cardinality, variable: impl Into<Uri>) -> Self {
        Self {
            ident,
            operator,
            variable: variable.into(),
            variants: Vec::new(),
            variant_collections: Vec::new(),
            variant_derivations: Vec::new(),
        }
    }
}
