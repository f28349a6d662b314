//! # Authorizer
//!
//! The single-pass decision procedure over a grant snapshot, plus the thin
//! convenience predicates the UI layers gate on.

use chrono::{Local, NaiveTime};
use serde_json::{Map, Value};

use crate::condition::evaluate_conditions;
use crate::decision::{Decision, PermissionCheck};
use crate::grant::Grant;
use crate::limitation::evaluate_limitations_at;

/// Decide whether a check is permitted under a grant snapshot.
///
/// The procedure:
/// 1. Filter `grants` to candidates via [`Grant::matches`]. No candidates
///    → deny with `"No matching permissions found"`.
/// 2. Walk candidates in declaration order. A candidate whose conditions
///    fail is skipped — the next candidate may still grant access.
/// 3. The first candidate whose conditions hold has its limitations
///    evaluated, and that evaluation is **terminal** either way: a violated
///    limitation denies the whole check without trying later grants, and a
///    clean pass allows it. Both outcomes echo that grant's limitation map.
/// 4. If every candidate was skipped on conditions, deny with the generic
///    `"Conditions or limitations not met"`.
///
/// Note the asymmetry between step 2 (condition failure → keep looking) and
/// step 3 (limitation failure → hard stop). Existing profile data relies on
/// it; introducing fallback past a limitation failure would silently widen
/// access.
///
/// This function never panics for well-typed input; denial is always a
/// returned [`Decision`].
///
/// # Example
///
/// ```
/// use academy_authz::{Grant, PermissionCheck, has_permission};
/// use serde_json::json;
///
/// let grants = vec![
///     Grant::new("courses", &["update"]).with_condition("ownResourceOnly", json!(true)),
///     Grant::new("courses", &["update"]),
/// ];
///
/// // First grant's condition fails, second grant still allows.
/// let check = PermissionCheck::new("courses", "update")
///     .with_context("userId", json!("u1"))
///     .with_context("ownerId", json!("u2"));
/// assert!(has_permission(&grants, &check).allowed);
/// ```
pub fn has_permission(grants: &[Grant], check: &PermissionCheck) -> Decision {
    has_permission_at(grants, check, Local::now().time())
}

/// [`has_permission`] with a pinned wall-clock time, for deterministic
/// evaluation of `timeWindow` limitations in tests.
pub fn has_permission_at(grants: &[Grant], check: &PermissionCheck, now: NaiveTime) -> Decision {
    let candidates: Vec<&Grant> = grants
        .iter()
        .filter(|g| g.matches(&check.resource, &check.action))
        .collect();

    if candidates.is_empty() {
        return Decision::deny("No matching permissions found");
    }

    for grant in candidates {
        if !grant.conditions.is_empty() {
            let outcome = evaluate_conditions(&grant.conditions, &check.context);
            if !outcome.met {
                // Try the next candidate; its conditions may hold.
                continue;
            }
        }

        let outcome = evaluate_limitations_at(&grant.limitations, &check.context, now);
        if !outcome.allowed {
            return Decision {
                allowed: false,
                reason: outcome.reason,
                limitations: echo_limitations(grant),
            };
        }
        return Decision {
            allowed: true,
            reason: None,
            limitations: echo_limitations(grant),
        };
    }

    Decision::deny("Conditions or limitations not met")
}

fn echo_limitations(grant: &Grant) -> Option<Map<String, Value>> {
    if grant.limitations.is_empty() {
        None
    } else {
        Some(grant.limitations.clone())
    }
}

/// Check whether the principal may create profiles.
pub fn can_create_profile(grants: &[Grant], context: Map<String, Value>) -> Decision {
    has_permission(
        grants,
        &PermissionCheck::new("profiles", "create").with_context_map(context),
    )
}

/// Check whether the principal may edit a specific profile.
///
/// The profile id is added to the context as `profileId` so ownership-style
/// conditions can see it.
pub fn can_edit_profile(grants: &[Grant], profile_id: &str, context: Map<String, Value>) -> Decision {
    let check = PermissionCheck::new("profiles", "update")
        .with_context_map(context)
        .with_context("profileId", Value::String(profile_id.to_string()));
    has_permission(grants, &check)
}

/// Check whether the principal may delete a specific profile.
///
/// System profiles are protected: deletion is hard-denied before the engine
/// is consulted.
pub fn can_delete_profile(
    grants: &[Grant],
    profile_id: &str,
    is_system_profile: bool,
    context: Map<String, Value>,
) -> Decision {
    if is_system_profile {
        return Decision::deny("System profiles cannot be deleted");
    }
    let check = PermissionCheck::new("profiles", "delete")
        .with_context_map(context)
        .with_context("profileId", Value::String(profile_id.to_string()));
    has_permission(grants, &check)
}

/// Check whether the principal may manage users.
pub fn can_manage_users(grants: &[Grant], context: Map<String, Value>) -> Decision {
    has_permission(
        grants,
        &PermissionCheck::new("users", "manage").with_context_map(context),
    )
}

/// A policy that can answer permission checks with a [`Decision`].
///
/// Both the grant pipeline ([`GrantSet`]) and the coarser page/action model
/// in `academy-profiles` implement this, so callers can gate UI on either
/// without knowing which representation backs it. The two data shapes stay
/// separate; only the question/answer types are shared.
pub trait AccessPolicy {
    /// Decide whether the check is permitted.
    fn check(&self, check: &PermissionCheck) -> Decision;
}

/// An immutable grant snapshot implementing [`AccessPolicy`].
///
/// # Example
///
/// ```
/// use academy_authz::{AccessPolicy, Grant, GrantSet, PermissionCheck};
///
/// let policy = GrantSet::new(vec![Grant::new("courses", &["read"])]);
/// assert!(policy.check(&PermissionCheck::new("courses", "read")).allowed);
/// assert!(!policy.check(&PermissionCheck::new("courses", "delete")).allowed);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrantSet {
    grants: Vec<Grant>,
}

impl GrantSet {
    /// Create a grant set from a snapshot.
    pub fn new(grants: Vec<Grant>) -> Self {
        Self { grants }
    }

    /// The grants in declaration order.
    pub fn grants(&self) -> &[Grant] {
        &self.grants
    }

    /// Number of grants in the snapshot.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Check if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl AccessPolicy for GrantSet {
    fn check(&self, check: &PermissionCheck) -> Decision {
        has_permission(&self.grants, check)
    }
}

impl FromIterator<Grant> for GrantSet {
    fn from_iter<T: IntoIterator<Item = Grant>>(iter: T) -> Self {
        Self {
            grants: iter.into_iter().collect(),
        }
    }
}
