//! Page/action permissions
//!
//! The simpler role→page→toggle representation used for instructor and
//! student UI gating. This model is parallel to the grant pipeline, not
//! layered on it: it has no condition concept, and its data shapes are
//! never merged with [`academy_authz::Grant`]. The only thing the two
//! models share is the [`AccessPolicy`] question/answer interface.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use academy_authz::{AccessPolicy, Decision, PermissionCheck};

/// Per-page toggles for one role.
///
/// `actions` is an open map of flags and caps, conventionally keyed
/// `can*` (booleans) and `max*` (numbers), e.g.
/// `{"canCreate": true, "maxUploads": 3}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PagePermission {
    /// Stable page identifier (e.g. `"course-builder"`).
    pub page_key: String,

    /// Whether the page is visible to the role at all.
    pub enabled: bool,

    /// Action toggles and caps for the page.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub actions: Map<String, Value>,
}

impl PagePermission {
    /// Create an enabled page with no action entries.
    pub fn new(page_key: impl Into<String>) -> Self {
        Self {
            page_key: page_key.into(),
            enabled: true,
            actions: Map::new(),
        }
    }

    /// Create a disabled page.
    pub fn disabled(page_key: impl Into<String>) -> Self {
        let mut page = Self::new(page_key);
        page.enabled = false;
        page
    }

    /// Add an action entry.
    pub fn with_action(mut self, key: impl Into<String>, value: Value) -> Self {
        self.actions.insert(key.into(), value);
        self
    }
}

/// A role's full page permission set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleBasedProfile {
    /// The role this profile applies to (e.g. `"instructor"`, `"student"`).
    pub role: String,

    /// Per-page toggles.
    #[serde(default)]
    pub pages: Vec<PagePermission>,
}

impl RoleBasedProfile {
    /// Create an empty profile for a role.
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            pages: Vec::new(),
        }
    }

    /// Add a page entry.
    pub fn with_page(mut self, page: PagePermission) -> Self {
        self.pages.push(page);
        self
    }
}

/// Derive a flat limitations map from a role-based profile.
///
/// Run when the profile is persisted: every *enabled* page's action map is
/// scanned, and `max*`-prefixed numeric entries plus `can*`-prefixed boolean
/// entries are promoted into one flat map. Later pages overwrite earlier
/// ones on key collision; disabled pages contribute nothing. Entries with
/// an unexpected type for their prefix are left behind.
///
/// # Example
///
/// ```
/// use academy_profiles::{derive_limitations, PagePermission, RoleBasedProfile};
/// use serde_json::json;
///
/// let profile = RoleBasedProfile::new("student")
///     .with_page(
///         PagePermission::new("assignments")
///             .with_action("canSubmit", json!(true))
///             .with_action("maxSubmissionsPerDay", json!(3)),
///     )
///     .with_page(PagePermission::disabled("grades"));
///
/// let limitations = derive_limitations(&profile);
/// assert_eq!(limitations.get("maxSubmissionsPerDay"), Some(&json!(3)));
/// assert_eq!(limitations.get("canSubmit"), Some(&json!(true)));
/// ```
pub fn derive_limitations(profile: &RoleBasedProfile) -> Map<String, Value> {
    let mut limitations = Map::new();
    for page in profile.pages.iter().filter(|p| p.enabled) {
        for (key, value) in &page.actions {
            let promote = (key.starts_with("max") && value.is_number())
                || (key.starts_with("can") && value.is_boolean());
            if promote {
                limitations.insert(key.clone(), value.clone());
            }
        }
    }
    limitations
}

impl AccessPolicy for RoleBasedProfile {
    /// Answer a check against the page model.
    ///
    /// The check's resource is matched against page keys; the action is
    /// looked up in the page's action map, first verbatim, then as
    /// `can` + capitalized action (so `"create"` finds `"canCreate"`).
    /// Only boolean `true` allows. Disabled or unknown pages deny.
    fn check(&self, check: &PermissionCheck) -> Decision {
        let Some(page) = self.pages.iter().find(|p| p.page_key == check.resource) else {
            return Decision::deny(format!("Page {} is not configured", check.resource));
        };
        if !page.enabled {
            return Decision::deny(format!("Page {} is not enabled", check.resource));
        }

        let flag = page
            .actions
            .get(&check.action)
            .or_else(|| page.actions.get(&can_key(&check.action)));
        match flag {
            Some(Value::Bool(true)) => Decision::allow(),
            _ => Decision::deny(format!(
                "Action {} not allowed on page {}",
                check.action, check.resource
            )),
        }
    }
}

fn can_key(action: &str) -> String {
    let mut chars = action.chars();
    match chars.next() {
        Some(first) => format!("can{}{}", first.to_uppercase(), chars.as_str()),
        None => "can".to_string(),
    }
}
