//! Vocabulary terms the rules reference.
//!
//! Only the handful of terms the checks compare against live here; the open
//! vocabularies themselves stay external and are consulted through the
//! [`TermHierarchy`](super::TermHierarchy) capability.

// Biochemical entity types.
pub const TYPE_DNA: &str = "http://www.biopax.org/release/biopax-level3.owl#DnaRegion";
pub const TYPE_RNA: &str = "http://www.biopax.org/release/biopax-level3.owl#RnaRegion";
pub const TYPE_PROTEIN: &str = "http://www.biopax.org/release/biopax-level3.owl#Protein";
pub const TYPE_COMPLEX: &str = "http://www.biopax.org/release/biopax-level3.owl#Complex";
pub const TYPE_SMALL_MOLECULE: &str =
    "http://www.biopax.org/release/biopax-level3.owl#SmallMolecule";

/// The five recognized biochemical types, in reporting order.
pub const BIOCHEMICAL_TYPES: [&str; 5] = [
    TYPE_DNA,
    TYPE_RNA,
    TYPE_PROTEIN,
    TYPE_COMPLEX,
    TYPE_SMALL_MOLECULE,
];

// Sequence-feature vocabulary roots and common members.
pub const SEQUENCE_FEATURE: &str = "http://identifiers.org/so/SO:0000110";
pub const TOPOLOGY_ATTRIBUTE: &str = "http://identifiers.org/so/SO:0000986";
pub const STRAND_ATTRIBUTE: &str = "http://identifiers.org/so/SO:0000983";

pub const ROLE_PROMOTER: &str = "http://identifiers.org/so/SO:0000167";
pub const ROLE_RBS: &str = "http://identifiers.org/so/SO:0000139";
pub const ROLE_CDS: &str = "http://identifiers.org/so/SO:0000316";
pub const ROLE_TERMINATOR: &str = "http://identifiers.org/so/SO:0000141";
pub const ROLE_OPERATOR: &str = "http://identifiers.org/so/SO:0000057";
pub const ROLE_GENE: &str = "http://identifiers.org/so/SO:0000704";
pub const ROLE_ENGINEERED_REGION: &str = "http://identifiers.org/so/SO:0000804";

pub const TOPOLOGY_LINEAR: &str = "http://identifiers.org/so/SO:0000987";
pub const TOPOLOGY_CIRCULAR: &str = "http://identifiers.org/so/SO:0000988";
pub const STRAND_SINGLE: &str = "http://identifiers.org/so/SO:0000984";
pub const STRAND_DOUBLE: &str = "http://identifiers.org/so/SO:0000985";

// Interaction vocabulary: occurring-entity root, interaction types,
// participant-role root and participant roles.
pub const OCCURRING_ENTITY: &str = "http://identifiers.org/sbo/SBO:0000231";
pub const PARTICIPANT_ROLE: &str = "http://identifiers.org/sbo/SBO:0000003";

pub const INTERACTION_INHIBITION: &str = "http://identifiers.org/sbo/SBO:0000169";
pub const INTERACTION_STIMULATION: &str = "http://identifiers.org/sbo/SBO:0000170";
pub const INTERACTION_NON_COVALENT_BINDING: &str = "http://identifiers.org/sbo/SBO:0000177";
pub const INTERACTION_DEGRADATION: &str = "http://identifiers.org/sbo/SBO:0000179";
pub const INTERACTION_BIOCHEMICAL_REACTION: &str = "http://identifiers.org/sbo/SBO:0000176";
pub const INTERACTION_GENETIC_PRODUCTION: &str = "http://identifiers.org/sbo/SBO:0000589";
pub const INTERACTION_CONTROL: &str = "http://identifiers.org/sbo/SBO:0000168";

pub const ROLE_INHIBITOR: &str = "http://identifiers.org/sbo/SBO:0000020";
pub const ROLE_INHIBITED: &str = "http://identifiers.org/sbo/SBO:0000642";
pub const ROLE_STIMULATOR: &str = "http://identifiers.org/sbo/SBO:0000459";
pub const ROLE_STIMULATED: &str = "http://identifiers.org/sbo/SBO:0000643";
pub const ROLE_REACTANT: &str = "http://identifiers.org/sbo/SBO:0000010";
pub const ROLE_PRODUCT: &str = "http://identifiers.org/sbo/SBO:0000011";
pub const ROLE_MODIFIER: &str = "http://identifiers.org/sbo/SBO:0000019";
pub const ROLE_MODIFIED: &str = "http://identifiers.org/sbo/SBO:0000644";
pub const ROLE_PROMOTER_PARTICIPANT: &str = "http://identifiers.org/sbo/SBO:0000598";
pub const ROLE_TEMPLATE: &str = "http://identifiers.org/sbo/SBO:0000645";

// Model description vocabulary.
pub const FORMAT_ROOT: &str = "http://identifiers.org/edam/format_1915";
pub const FORMAT_SBML: &str = "http://identifiers.org/edam/format_2585";
pub const FORMAT_CELLML: &str = "http://identifiers.org/edam/format_3240";
pub const FORMAT_BIOPAX: &str = "http://identifiers.org/edam/format_3156";
pub const FORMAT_GENBANK: &str = "http://identifiers.org/edam/format_1936";

pub const FRAMEWORK_ROOT: &str = "http://identifiers.org/sbo/SBO:0000004";
pub const FRAMEWORK_CONTINUOUS: &str = "http://identifiers.org/sbo/SBO:0000062";
pub const FRAMEWORK_DISCRETE: &str = "http://identifiers.org/sbo/SBO:0000063";
pub const FRAMEWORK_LOGICAL: &str = "http://identifiers.org/sbo/SBO:0000234";

// Sequence encodings.
pub const ENCODING_IUPAC_DNA: &str = "http://www.chem.qmul.ac.uk/iubmb/misc/naseq.html";
pub const ENCODING_IUPAC_RNA: &str = "http://www.chem.qmul.ac.uk/iubmb/misc/naseq.html#rna";
pub const ENCODING_IUPAC_PROTEIN: &str = "http://www.chem.qmul.ac.uk/iupac/AminoAcid/";
pub const ENCODING_SMILES: &str = "http://www.opensmiles.org/opensmiles.html";

/// The four recognized sequence encodings.
pub const SEQUENCE_ENCODINGS: [&str; 4] = [
    ENCODING_IUPAC_DNA,
    ENCODING_IUPAC_RNA,
    ENCODING_IUPAC_PROTEIN,
    ENCODING_SMILES,
];

// Activity roles.
pub const ACTIVITY_DESIGN: &str = "http://sbols.org/v2#design";
pub const ACTIVITY_BUILD: &str = "http://sbols.org/v2#build";
pub const ACTIVITY_TEST: &str = "http://sbols.org/v2#test";
pub const ACTIVITY_LEARN: &str = "http://sbols.org/v2#learn";
