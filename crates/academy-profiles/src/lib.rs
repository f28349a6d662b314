//! # Academy Permission Profiles
//!
//! This crate provides the profile data model behind the Academy
//! authorization engine, shared across the instructor, student, and admin
//! applications.
//!
//! ## Overview
//!
//! The academy-profiles crate handles:
//! - **Profiles**: Named bundles of permission grants with an active flag
//! - **Aggregation**: Flattening a principal's active profiles into the
//!   grant snapshot the engine evaluates
//! - **DTOs**: Create/update shapes passed through the profile CRUD boundary
//! - **Form helpers**: Round-tripping condition/limitation JSON through
//!   profile editor forms
//! - **Page permissions**: The separate, coarser role/page/toggle model used
//!   for instructor and student UI gating
//!
//! ## Architecture
//!
//! ```text
//! Principal
//!   └─ assigned Profiles (only is_active ones count)
//!         └─ PermissionAggregator ─→ Vec<Grant> (immutable snapshot)
//!               └─ academy_authz::has_permission(grants, check)
//! ```
//!
//! The aggregation step is the only asynchronous boundary: profiles are
//! fetched through a [`ProfileStore`], the snapshot is built, and every
//! subsequent check is pure synchronous computation in `academy-authz`.
//! Callers embedding this in a long-lived service own cache invalidation of
//! the snapshot when profile or assignment data changes.
//!
//! ## Two permission models
//!
//! The grant model (resource/action/condition/limitation) and the page
//! model ([`RoleBasedProfile`]) are parallel representations, not layers.
//! The page model has no condition concept and never feeds the grant
//! pipeline; both answer checks through
//! [`academy_authz::AccessPolicy`] so UI code can gate on either.
//!
//! ## Usage
//!
//! ```rust
//! use academy_profiles::{aggregate_grants, Profile};
//! use academy_authz::{has_permission, Grant, PermissionCheck};
//!
//! let instructor = Profile::new("Instructor", "Teaching staff")
//!     .with_permission(Grant::new("courses", &["read", "create"]));
//! let mut suspended = Profile::new("Admin", "Disabled emergency profile")
//!     .with_permission(Grant::new("*", &["*"]));
//! suspended.deactivate();
//!
//! let grants = aggregate_grants(&[instructor, suspended]);
//! assert_eq!(grants.len(), 1); // inactive profile contributes nothing
//!
//! let check = PermissionCheck::new("courses", "create");
//! assert!(has_permission(&grants, &check).allowed);
//! ```
//!
//! ## Feature Flags
//!
//! - `memory`: In-memory [`MemoryProfileStore`] (enabled by default),
//!   suitable for single-process applications and testing

pub mod aggregator;
pub mod error;
pub mod form;
pub mod pages;
pub mod profile;

// Re-export main types for convenience
pub use aggregator::{aggregate_grants, PermissionAggregator, ProfileStore};
pub use error::{ProfileError, ProfileResult};
pub use form::{
    format_profile_for_form, parse_profile_from_form, PermissionFormValues, ProfileFormValues,
};
pub use pages::{derive_limitations, PagePermission, RoleBasedProfile};
pub use profile::{CreateProfileDto, Profile, UpdateProfileDto};

#[cfg(feature = "memory")]
pub use aggregator::MemoryProfileStore;
