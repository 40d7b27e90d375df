//! Identity rules: compliant identity shape, identity uniqueness, the
//! persistent-identity kind invariant, and derivation-version ordering.
//!
//! The uniqueness rules run over a single graph walk visiting every entity
//! reachable from every top-level — not only top-levels. Bookkeeping always
//! replaces the stored occurrence, so each comparison is against the previous
//! occurrence and a repeat yields exactly one diagnostic per extra
//! occurrence, never one per pair.

use ahash::AHashMap;

use crate::error::RuleCode;
use crate::model::{
    Document, EntityKind, EntityRef, Identified, Uri, is_display_id, is_first_version_newer,
};

use super::context::ValidationContext;

/// Compliant-shape rule, top-levels only: identity must decompose into
/// `prefix "/" display_id [ "/" version ]`.
pub(crate) fn check_identity_shapes(doc: &Document, ctx: &mut ValidationContext) {
    for top in doc.top_levels() {
        check_shape(top.ident(), ctx);
    }
}

fn check_shape(ident: &Identified, ctx: &mut ValidationContext) {
    let Some(persistent) = &ident.persistent_identity else {
        ctx.error(
            RuleCode::NoncompliantIdentity,
            &ident.identity,
            "no persistent identity is declared",
        );
        return;
    };
    let Some(display_id) = &ident.display_id else {
        ctx.error(
            RuleCode::NoncompliantIdentity,
            &ident.identity,
            "no display id is declared",
        );
        return;
    };
    if !is_display_id(display_id) {
        ctx.error(
            RuleCode::MalformedDisplayId,
            &ident.identity,
            format!("display id {display_id:?} is not a letter or underscore followed by word characters"),
        );
    }
    if !persistent
        .as_str()
        .strip_suffix(display_id.as_str())
        .is_some_and(|rest| rest.ends_with('/'))
    {
        ctx.error(
            RuleCode::NoncompliantIdentity,
            &ident.identity,
            format!("persistent identity {persistent} does not end with /{display_id}"),
        );
    }
    let expected = match &ident.version {
        Some(version) => Uri::new(format!("{persistent}/{version}")),
        None => persistent.clone(),
    };
    if ident.identity != expected {
        ctx.error(
            RuleCode::NoncompliantIdentity,
            &ident.identity,
            format!("identity does not match its declared parts (expected {expected})"),
        );
    }
}

/// Identity uniqueness over the whole entity graph. A repeat identity is
/// tolerated only when the two occurrences are field-wise equal.
pub(crate) fn check_identity_uniqueness(doc: &Document, ctx: &mut ValidationContext) {
    let mut seen: AHashMap<Uri, EntityRef<'_>> = AHashMap::new();
    doc.for_each_entity(|entity| {
        let identity = entity.ident().identity.clone();
        if let Some(previous) = seen.get(&identity) {
            if *previous != entity {
                ctx.error(
                    RuleCode::IdentityCollision,
                    &identity,
                    format!(
                        "identity registered more than once with differing content ({} vs {})",
                        previous.kind(),
                        entity.kind()
                    ),
                );
            }
        }
        seen.insert(identity, entity);
    });
}

/// All entities sharing a persistent identity must have the same concrete
/// kind.
pub(crate) fn check_persistent_identity_kinds(doc: &Document, ctx: &mut ValidationContext) {
    let mut seen: AHashMap<Uri, EntityKind> = AHashMap::new();
    doc.for_each_entity(|entity| {
        let Some(persistent) = entity.ident().persistent_identity.clone() else {
            return;
        };
        let kind = entity.kind();
        if let Some(previous) = seen.get(&persistent) {
            if *previous != kind {
                ctx.error(
                    RuleCode::PersistentIdentityKindCollision,
                    &entity.ident().identity,
                    format!("persistent identity {persistent} is also used by a {previous}"),
                );
            }
        }
        seen.insert(persistent, kind);
    });
}

/// A top-level must not be derived from a newer version of its own
/// persistent identity.
pub(crate) fn check_derivation_versions(doc: &Document, ctx: &mut ValidationContext) {
    for top in doc.top_levels() {
        let ident = top.ident();
        for derived_from in &ident.derived_froms {
            let Some(ancestor) = doc.top_level(derived_from) else {
                continue;
            };
            let ancestor = ancestor.ident();
            let same_line = match (&ancestor.persistent_identity, &ident.persistent_identity) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            };
            if !same_line {
                continue;
            }
            if let (Some(ancestor_version), Some(version)) = (&ancestor.version, &ident.version) {
                if is_first_version_newer(ancestor_version, version) {
                    ctx.error(
                        RuleCode::LineageVersionOrder,
                        &ident.identity,
                        format!(
                            "derived from {derived_from}, a newer version ({ancestor_version} > {version})"
                        ),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_errors(ident: Identified) -> Vec<RuleCode> {
        let mut ctx = ValidationContext::new();
        check_shape(&ident, &mut ctx);
        ctx.diagnostics().iter().map(|d| d.rule).collect()
    }

    #[test]
    fn compliant_identity_passes() {
        assert!(shape_errors(Identified::compliant("https://parts.example", "gate", "1")).is_empty());
    }

    #[test]
    fn versionless_identity_must_equal_persistent_identity() {
        let mut ident = Identified::new("https://parts.example/gate");
        ident.persistent_identity = Some(Uri::new("https://parts.example/gate"));
        ident.display_id = Some("gate".into());
        assert!(shape_errors(ident).is_empty());
    }

    #[test]
    fn mismatched_identity_is_flagged() {
        let mut ident = Identified::compliant("https://parts.example", "gate", "1");
        ident.identity = Uri::new("https://parts.example/gate/2");
        assert_eq!(shape_errors(ident), vec![RuleCode::NoncompliantIdentity]);
    }

    #[test]
    fn bad_display_id_is_flagged() {
        let mut ident = Identified::compliant("https://parts.example", "gate", "1");
        ident.display_id = Some("2gate".into());
        let errors = shape_errors(ident);
        assert!(errors.contains(&RuleCode::MalformedDisplayId));
    }
}
