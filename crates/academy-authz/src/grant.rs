//! # Grants
//!
//! Core grant type for the authorization engine.
//! A grant binds a resource and a set of actions to optional conditions
//! and limitations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The wildcard token, matching any resource or any action.
pub const WILDCARD: &str = "*";

/// A single permission grant.
///
/// Grants are the unit the engine evaluates. Each grant names a resource
/// and the actions it permits on that resource, plus:
/// - **Conditions**: contextual prerequisites that must hold for the grant
///   to be considered at all (ownership, enrollment, department).
/// - **Limitations**: quantitative or temporal caps that can still deny a
///   request even when conditions hold (daily limits, time windows).
///
/// Both maps are open key/value bags on the wire; recognized keys get
/// specialized semantics in [`crate::condition`] and [`crate::limitation`].
///
/// # Wildcards
///
/// `resource == "*"` matches any resource, and an actions list containing
/// `"*"` matches any action. Actions are otherwise matched by exact string
/// equality.
///
/// # Example
///
/// ```
/// use academy_authz::Grant;
/// use serde_json::json;
///
/// let grant = Grant::new("courses", &["read", "update"])
///     .with_condition("ownResourceOnly", json!(true))
///     .with_limitation("maxPerDay", json!(10));
///
/// assert!(grant.matches("courses", "update"));
/// assert!(!grant.matches("courses", "delete"));
/// assert!(!grant.matches("users", "read"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grant {
    /// The resource this grant applies to. `"*"` matches any resource.
    pub resource: String,

    /// The actions permitted on the resource. `"*"` matches any action.
    pub actions: Vec<String>,

    /// Contextual prerequisites, keyed by condition name.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub conditions: Map<String, Value>,

    /// Quantitative/temporal caps, keyed by limitation name.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub limitations: Map<String, Value>,

    /// Optional human-readable description of the grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Grant {
    /// Create a new unconditional grant.
    ///
    /// # Arguments
    ///
    /// * `resource` - The resource name, or `"*"` for all resources
    /// * `actions` - The permitted actions, or `["*"]` for all actions
    ///
    /// # Example
    ///
    /// ```
    /// use academy_authz::Grant;
    ///
    /// let grant = Grant::new("enrollments", &["create"]);
    /// assert!(grant.conditions.is_empty());
    /// assert!(grant.limitations.is_empty());
    /// ```
    pub fn new(resource: impl Into<String>, actions: &[&str]) -> Self {
        Self {
            resource: resource.into(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
            conditions: Map::new(),
            limitations: Map::new(),
            description: None,
        }
    }

    /// Add a condition entry to this grant.
    ///
    /// # Arguments
    ///
    /// * `key` - The condition name (e.g. `"ownResourceOnly"`)
    /// * `value` - The expected value
    pub fn with_condition(mut self, key: impl Into<String>, value: Value) -> Self {
        self.conditions.insert(key.into(), value);
        self
    }

    /// Add a limitation entry to this grant.
    ///
    /// # Arguments
    ///
    /// * `key` - The limitation name (e.g. `"maxPerDay"`)
    /// * `value` - The cap value
    pub fn with_limitation(mut self, key: impl Into<String>, value: Value) -> Self {
        self.limitations.insert(key.into(), value);
        self
    }

    /// Set the description of this grant.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check whether this grant structurally applies to a (resource, action)
    /// pair.
    ///
    /// A grant is applicable iff the resource matches exactly or the grant's
    /// resource is `"*"`, AND the action is listed exactly or the grant's
    /// actions contain `"*"`.
    ///
    /// This is a pure predicate: it only builds the candidate list and does
    /// not itself decide allow/deny.
    ///
    /// # Example
    ///
    /// ```
    /// use academy_authz::Grant;
    ///
    /// let any_read = Grant::new("*", &["read"]);
    /// assert!(any_read.matches("courses", "read"));
    /// assert!(any_read.matches("users", "read"));
    /// assert!(!any_read.matches("courses", "delete"));
    ///
    /// let all_course_actions = Grant::new("courses", &["*"]);
    /// assert!(all_course_actions.matches("courses", "delete"));
    /// ```
    pub fn matches(&self, resource: &str, action: &str) -> bool {
        let resource_matches = self.resource == resource || self.resource == WILDCARD;
        let action_matches = self
            .actions
            .iter()
            .any(|a| a == action || a == WILDCARD);
        resource_matches && action_matches
    }

    /// Check if this grant applies to every resource.
    pub fn is_wildcard_resource(&self) -> bool {
        self.resource == WILDCARD
    }

    /// Check if this grant permits every action on its resource.
    pub fn is_wildcard_action(&self) -> bool {
        self.actions.iter().any(|a| a == WILDCARD)
    }
}
