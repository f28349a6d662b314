//! Profile domain models
//!
//! This module provides the permission profile entity and the pass-through
//! DTOs used by the profile CRUD boundary. Profiles are read-only from the
//! engine's perspective: a check operates on whatever snapshot the caller
//! aggregated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use academy_authz::Grant;

/// A named bundle of permission grants assignable to principals.
///
/// Only profiles with `is_active == true` contribute grants to a
/// principal's effective set. System profiles are protected from deletion
/// (see [`Profile::is_deletable`] and
/// [`academy_authz::can_delete_profile`]); the evaluator itself does not
/// enforce this.
///
/// `global_limitations` is informational profile-level data (e.g. overall
/// caps shown in the admin UI). It is *not* folded into individual grants
/// during aggregation; each grant's own limitation map is what the engine
/// evaluates.
///
/// # Examples
///
/// ```
/// use academy_profiles::Profile;
/// use academy_authz::Grant;
///
/// let profile = Profile::new("Instructor", "Teaching staff")
///     .with_permission(Grant::new("courses", &["read", "create"]));
/// assert!(profile.is_active);
/// assert!(profile.is_deletable());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Unique profile ID
    pub id: Uuid,

    /// Profile name (e.g. "Instructor", "Teaching Assistant")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// The permission grants this profile carries
    #[serde(default)]
    pub permissions: Vec<Grant>,

    /// Profile-level limitation hints, not evaluated per-grant
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub global_limitations: Map<String, Value>,

    /// Whether the profile currently contributes grants
    pub is_active: bool,

    /// Whether the profile is platform-defined and protected from deletion
    pub is_system_profile: bool,

    /// When the profile was created
    pub created_at: DateTime<Utc>,

    /// When the profile was last modified
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a new active, non-system profile.
    ///
    /// The profile is created with:
    /// - A newly generated UUID v7 ID
    /// - Active status
    /// - No permissions or global limitations
    /// - Current timestamps
    ///
    /// # Arguments
    ///
    /// * `name` - The profile name
    /// * `description` - A human-readable description
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            description: description.into(),
            permissions: Vec::new(),
            global_limitations: Map::new(),
            is_active: true,
            is_system_profile: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a new platform-defined system profile.
    ///
    /// System profiles cannot be deleted through the normal profile
    /// management surface.
    pub fn system(name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut profile = Self::new(name, description);
        profile.is_system_profile = true;
        profile
    }

    /// Add a permission grant to this profile.
    pub fn with_permission(mut self, grant: Grant) -> Self {
        self.permissions.push(grant);
        self
    }

    /// Add a profile-level limitation hint.
    pub fn with_global_limitation(mut self, key: impl Into<String>, value: Value) -> Self {
        self.global_limitations.insert(key.into(), value);
        self
    }

    /// Activate the profile so it contributes grants again.
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Deactivate the profile. Its grants stop contributing to any
    /// principal's effective set on the next aggregation.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Check whether this profile may be deleted.
    ///
    /// # Returns
    ///
    /// `false` for system profiles
    pub fn is_deletable(&self) -> bool {
        !self.is_system_profile
    }
}

/// Payload for creating a profile.
///
/// Pass-through DTO: structural JSON validity is checked at the form layer
/// (see [`crate::form`]), not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateProfileDto {
    /// Profile name
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Permission grants for the new profile
    #[serde(default)]
    pub permissions: Vec<Grant>,

    /// Profile-level limitation hints
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub global_limitations: Map<String, Value>,
}

impl CreateProfileDto {
    /// Materialize the DTO into a new active profile.
    pub fn into_profile(self) -> Profile {
        let mut profile = Profile::new(self.name, self.description);
        profile.permissions = self.permissions;
        profile.global_limitations = self.global_limitations;
        profile
    }
}

/// Payload for updating a profile. All fields optional; only `Some` fields
/// overwrite.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateProfileDto {
    /// New profile name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Replacement grant list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Grant>>,

    /// Replacement global limitation hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_limitations: Option<Map<String, Value>>,

    /// Toggle the active flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateProfileDto {
    /// Apply this update to a profile, refreshing `updated_at`.
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(description) = &self.description {
            profile.description = description.clone();
        }
        if let Some(permissions) = &self.permissions {
            profile.permissions = permissions.clone();
        }
        if let Some(global_limitations) = &self.global_limitations {
            profile.global_limitations = global_limitations.clone();
        }
        if let Some(is_active) = self.is_active {
            profile.is_active = is_active;
        }
        profile.updated_at = Utc::now();
    }
}
