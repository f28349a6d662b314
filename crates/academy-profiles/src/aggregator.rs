//! Grant aggregation
//!
//! This module flattens a principal's assigned profiles into the immutable
//! grant snapshot the engine evaluates. Fetching profiles is the only
//! asynchronous boundary in the authorization path; it completes before any
//! check runs, so the evaluator never observes a mutating profile set.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use academy_authz::{has_permission, Decision, Grant, PermissionCheck};

use crate::error::ProfileResult;
use crate::profile::Profile;

/// Flatten profiles into an effective grant list.
///
/// Only active profiles contribute. Grants are emitted in profile, then
/// declaration order — the order the engine will evaluate them in — and
/// exact-duplicate grants are dropped.
///
/// # Example
///
/// ```
/// use academy_profiles::{aggregate_grants, Profile};
/// use academy_authz::Grant;
///
/// let a = Profile::new("A", "").with_permission(Grant::new("courses", &["read"]));
/// let b = Profile::new("B", "")
///     .with_permission(Grant::new("courses", &["read"]))  // duplicate
///     .with_permission(Grant::new("users", &["read"]));
///
/// let grants = aggregate_grants(&[a, b]);
/// assert_eq!(grants.len(), 2);
/// ```
pub fn aggregate_grants(profiles: &[Profile]) -> Vec<Grant> {
    let mut grants: Vec<Grant> = Vec::new();
    for profile in profiles.iter().filter(|p| p.is_active) {
        for grant in &profile.permissions {
            if !grants.contains(grant) {
                grants.push(grant.clone());
            }
        }
    }
    grants
}

/// Source of a principal's assigned profiles.
///
/// Implementations typically wrap a database or a profile-service HTTP
/// client; the in-memory implementation below serves tests and
/// single-process embedding.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch every profile assigned to the principal, active or not.
    async fn profiles_for(&self, principal: Uuid) -> ProfileResult<Vec<Profile>>;
}

/// Builds effective grant snapshots from a [`ProfileStore`].
///
/// The aggregator defines no cache: every call re-reads the store. Callers
/// embedding this in a long-lived service own snapshot reuse and
/// invalidation when profile or assignment data changes.
pub struct PermissionAggregator<S> {
    store: S,
}

impl<S: ProfileStore> PermissionAggregator<S> {
    /// Create an aggregator over a profile store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch and flatten the principal's effective grants.
    pub async fn effective_grants(&self, principal: Uuid) -> ProfileResult<Vec<Grant>> {
        let profiles = self.store.profiles_for(principal).await?;
        let active = profiles.iter().filter(|p| p.is_active).count();
        let grants = aggregate_grants(&profiles);
        debug!(
            %principal,
            profiles = profiles.len(),
            active,
            grants = grants.len(),
            "aggregated effective grants"
        );
        Ok(grants)
    }

    /// Fetch the principal's grants and decide a check in one call.
    ///
    /// Convenience for callers that do not reuse the snapshot; the decision
    /// itself is the engine's synchronous `has_permission`.
    pub async fn check(&self, principal: Uuid, check: &PermissionCheck) -> ProfileResult<Decision> {
        let grants = self.effective_grants(principal).await?;
        Ok(has_permission(&grants, check))
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// In-memory profile store.
///
/// Suitable for single-process applications and testing. Profiles are
/// registered once and assigned to principals by id.
#[cfg(feature = "memory")]
pub struct MemoryProfileStore {
    inner: tokio::sync::RwLock<MemoryStoreInner>,
}

#[cfg(feature = "memory")]
#[derive(Default)]
struct MemoryStoreInner {
    profiles: std::collections::HashMap<Uuid, Profile>,
    assignments: std::collections::HashMap<Uuid, Vec<Uuid>>,
}

#[cfg(feature = "memory")]
impl MemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: tokio::sync::RwLock::new(MemoryStoreInner::default()),
        }
    }

    /// Register a profile, returning its id.
    pub async fn insert_profile(&self, profile: Profile) -> Uuid {
        let id = profile.id;
        self.inner.write().await.profiles.insert(id, profile);
        id
    }

    /// Assign a registered profile to a principal.
    pub async fn assign(&self, principal: Uuid, profile_id: Uuid) {
        self.inner
            .write()
            .await
            .assignments
            .entry(principal)
            .or_default()
            .push(profile_id);
    }

    /// Replace a registered profile (e.g. after a toggle-active update).
    pub async fn update_profile(&self, profile: Profile) {
        self.inner.write().await.profiles.insert(profile.id, profile);
    }
}

#[cfg(feature = "memory")]
impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "memory")]
#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn profiles_for(&self, principal: Uuid) -> ProfileResult<Vec<Profile>> {
        let inner = self.inner.read().await;
        let ids = inner.assignments.get(&principal).cloned().unwrap_or_default();
        let mut profiles = Vec::with_capacity(ids.len());
        for id in ids {
            match inner.profiles.get(&id) {
                Some(profile) => profiles.push(profile.clone()),
                // Dangling assignment: skip rather than fail the whole fetch.
                None => tracing::warn!(%principal, profile_id = %id, "assigned profile missing"),
            }
        }
        Ok(profiles)
    }
}
