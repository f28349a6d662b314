//! # Checks and decisions
//!
//! The request and result types of the engine: a [`PermissionCheck`] goes
//! in, a [`Decision`] comes out. Denial is a first-class value, never an
//! error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single authorization question.
///
/// `context` is an open fact bag supplied by the caller for this specific
/// check (e.g. `userId`, `ownerId`, `isEnrolled`, `usageToday`). It is a
/// flat key→value map; no nested evaluation is performed.
///
/// # Example
///
/// ```
/// use academy_authz::PermissionCheck;
/// use serde_json::json;
///
/// let check = PermissionCheck::new("courses", "update")
///     .with_context("userId", json!("u1"))
///     .with_context("ownerId", json!("u1"));
/// assert_eq!(check.resource, "courses");
/// assert_eq!(check.context.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PermissionCheck {
    /// The resource being accessed.
    pub resource: String,

    /// The action being performed.
    pub action: String,

    /// Request-specific facts used by condition and limitation rules.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub context: Map<String, Value>,
}

impl PermissionCheck {
    /// Create a check with an empty context.
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
            context: Map::new(),
        }
    }

    /// Add one context fact.
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Replace the whole context map.
    pub fn with_context_map(mut self, context: Map<String, Value>) -> Self {
        self.context = context;
        self
    }
}

/// The engine's answer to a [`PermissionCheck`].
///
/// `reason` is populated on denial as diagnostic context. `limitations`
/// echoes the limitation map of the grant that ultimately applied, so
/// callers can render client-side hints ("3 of 5 used today") without
/// re-fetching the grant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Decision {
    /// Whether the operation is permitted.
    pub allowed: bool,

    /// Diagnostic reason, populated on denial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// The applying grant's limitation map, if it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limitations: Option<Map<String, Value>>,
}

impl Decision {
    /// An allow decision with no limitations attached.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            limitations: None,
        }
    }

    /// An allow decision echoing the applying grant's limitations.
    pub fn allow_with_limitations(limitations: Map<String, Value>) -> Self {
        Self {
            allowed: true,
            reason: None,
            limitations: Some(limitations),
        }
    }

    /// A deny decision with a diagnostic reason.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            limitations: None,
        }
    }

    /// A deny decision that also echoes the violated grant's limitations.
    pub fn deny_with_limitations(
        reason: impl Into<String>,
        limitations: Map<String, Value>,
    ) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            limitations: Some(limitations),
        }
    }
}
