//! # Academy Authorization Engine
//!
//! This crate provides the permission evaluation engine for the Academy
//! platform, shared across the instructor, student, and admin applications.
//!
//! ## Overview
//!
//! The academy-authz crate handles:
//! - **Grants**: Resource + action rules with optional conditions and limitations
//! - **Matching**: Wildcard-aware structural applicability of grants
//! - **Conditions**: Contextual prerequisites (ownership, enrollment, department)
//! - **Limitations**: Quantitative and temporal caps (daily limits, time windows)
//! - **Decisions**: Allow/deny results with diagnostic reasons
//!
//! ## Architecture
//!
//! ```text
//! PermissionCheck { resource, action, context }
//!         │
//!         ▼
//! has_permission(grants, check)
//!         │
//!         ├─ Grant::matches ──────── candidate list (wildcard rules)
//!         ├─ evaluate_conditions ─── failed condition → try next candidate
//!         └─ evaluate_limitations ── failed limitation → terminal deny
//!         │
//!         ▼
//! Decision { allowed, reason, limitations }
//! ```
//!
//! ## Evaluation semantics
//!
//! Candidates are evaluated in declaration order; no specificity ranking is
//! computed. A failed condition skips to the next candidate, while a failed
//! limitation is terminal and denies the whole check. This asymmetry is part
//! of the engine's contract and is relied upon by existing profile data.
//!
//! Limitation rules whose context operand has the wrong type are skipped
//! rather than violated; see [`RuleOutcome::Inapplicable`].
//!
//! ## Usage
//!
//! ```rust
//! use academy_authz::{Grant, PermissionCheck, has_permission};
//!
//! let grants = vec![
//!     Grant::new("courses", &["read", "create"]),
//!     Grant::new("*", &["read"]),
//! ];
//!
//! let check = PermissionCheck::new("courses", "create");
//! let decision = has_permission(&grants, &check);
//! assert!(decision.allowed);
//!
//! // Wildcard resource grant covers everything for "read"
//! let check = PermissionCheck::new("reports", "read");
//! assert!(has_permission(&grants, &check).allowed);
//! ```
//!
//! ## Purity
//!
//! The engine is pure, synchronous computation over a caller-supplied grant
//! snapshot: no I/O, no mutation, no shared state. Fetching and aggregating a
//! principal's grants is the caller's responsibility (see the
//! `academy-profiles` crate).

pub mod authorizer;
pub mod condition;
pub mod decision;
pub mod grant;
pub mod limitation;

// Re-export main types for convenience
pub use authorizer::{
    can_create_profile, can_delete_profile, can_edit_profile, can_manage_users, has_permission,
    has_permission_at, AccessPolicy, GrantSet,
};
pub use condition::{evaluate_conditions, Condition, ConditionOutcome};
pub use decision::{Decision, PermissionCheck};
pub use grant::{Grant, WILDCARD};
pub use limitation::{
    evaluate_limitations, evaluate_limitations_at, Limitation, LimitationOutcome, RuleOutcome,
};
