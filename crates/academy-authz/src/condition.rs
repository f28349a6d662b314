//! # Conditions
//!
//! Contextual prerequisites attached to a grant. A grant's conditions must
//! all hold against the request context before the grant is considered; a
//! failed condition causes the authorizer to move on to the next candidate
//! grant rather than denying outright.

use serde_json::{Map, Value};

/// Outcome of evaluating a grant's condition map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionOutcome {
    /// Whether all declared conditions held.
    pub met: bool,
    /// The reason for the first failing condition, if any.
    pub reason: Option<String>,
}

impl ConditionOutcome {
    /// All conditions held.
    pub fn met() -> Self {
        Self {
            met: true,
            reason: None,
        }
    }

    /// A condition failed with the given reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            met: false,
            reason: Some(reason.into()),
        }
    }
}

/// A single condition, parsed from one entry of a grant's condition map.
///
/// Recognized keys get specialized semantics; any other key falls back to
/// generic equality against the same key in the request context, with the
/// raw key preserved in [`Condition::Equals`].
///
/// # Example
///
/// ```
/// use academy_authz::Condition;
/// use serde_json::json;
///
/// let cond = Condition::from_entry("ownResourceOnly", &json!(true));
/// assert!(matches!(cond, Condition::OwnResourceOnly(true)));
///
/// let cond = Condition::from_entry("minScore", &json!(80));
/// assert!(matches!(cond, Condition::Equals { .. }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `ownResourceOnly` — the requesting user must own the resource
    /// (`context.userId == context.ownerId`). A `false` flag disables the
    /// rule.
    OwnResourceOnly(bool),

    /// `enrolledOnly` — `context.isEnrolled` must be truthy. A `false` flag
    /// disables the rule.
    EnrolledOnly(bool),

    /// `departmentId` — `context.departmentId` must equal the declared value.
    DepartmentEquals(Value),

    /// Any other key — `context[key]` must equal the declared value.
    Equals {
        /// The raw condition key from the grant.
        key: String,
        /// The expected value.
        value: Value,
    },
}

impl Condition {
    /// Parse one condition-map entry into its typed form.
    ///
    /// `ownResourceOnly` and `enrolledOnly` are only recognized with a
    /// boolean value; any other value for those keys falls back to generic
    /// equality like an unrecognized key.
    pub fn from_entry(key: &str, value: &Value) -> Self {
        match (key, value) {
            ("ownResourceOnly", Value::Bool(flag)) => Condition::OwnResourceOnly(*flag),
            ("enrolledOnly", Value::Bool(flag)) => Condition::EnrolledOnly(*flag),
            ("departmentId", v) => Condition::DepartmentEquals(v.clone()),
            (k, v) => Condition::Equals {
                key: k.to_string(),
                value: v.clone(),
            },
        }
    }

    /// Evaluate this condition against a request context.
    ///
    /// # Arguments
    ///
    /// * `context` - The caller-supplied fact bag for this check
    ///
    /// # Returns
    ///
    /// A [`ConditionOutcome`] carrying a diagnostic reason on failure.
    pub fn evaluate(&self, context: &Map<String, Value>) -> ConditionOutcome {
        match self {
            Condition::OwnResourceOnly(flag) => {
                if !flag || context.get("userId") == context.get("ownerId") {
                    ConditionOutcome::met()
                } else {
                    ConditionOutcome::failed("Can only access own resources")
                }
            }
            Condition::EnrolledOnly(flag) => {
                let enrolled = context.get("isEnrolled").map(is_truthy).unwrap_or(false);
                if !flag || enrolled {
                    ConditionOutcome::met()
                } else {
                    ConditionOutcome::failed("Must be enrolled to access")
                }
            }
            Condition::DepartmentEquals(expected) => {
                if context.get("departmentId") == Some(expected) {
                    ConditionOutcome::met()
                } else {
                    ConditionOutcome::failed("Wrong department")
                }
            }
            Condition::Equals { key, value } => {
                if context.get(key) == Some(value) {
                    ConditionOutcome::met()
                } else {
                    ConditionOutcome::failed(format!("Condition {key} not met"))
                }
            }
        }
    }
}

/// Evaluate a grant's full condition map against a request context.
///
/// Conditions are checked in declaration order and combined with logical
/// AND; the first failing condition short-circuits with its reason. An
/// empty map is vacuously met.
///
/// # Example
///
/// ```
/// use academy_authz::evaluate_conditions;
/// use serde_json::{json, Map};
///
/// let mut conditions = Map::new();
/// conditions.insert("ownResourceOnly".into(), json!(true));
///
/// let mut context = Map::new();
/// context.insert("userId".into(), json!("u1"));
/// context.insert("ownerId".into(), json!("u2"));
///
/// let outcome = evaluate_conditions(&conditions, &context);
/// assert!(!outcome.met);
/// assert_eq!(outcome.reason.as_deref(), Some("Can only access own resources"));
/// ```
pub fn evaluate_conditions(
    conditions: &Map<String, Value>,
    context: &Map<String, Value>,
) -> ConditionOutcome {
    for (key, value) in conditions {
        let outcome = Condition::from_entry(key, value).evaluate(context);
        if !outcome.met {
            return outcome;
        }
    }
    ConditionOutcome::met()
}

/// Loose truthiness, matching how the profile data was historically
/// interpreted: `false`, `null`, `0`, and `""` are falsy; everything else
/// is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_own_resource_only_met() {
        let cond = Condition::from_entry("ownResourceOnly", &json!(true));
        let ctx = context(&[("userId", json!("u1")), ("ownerId", json!("u1"))]);
        assert!(cond.evaluate(&ctx).met);
    }

    #[test]
    fn test_own_resource_only_failed() {
        let cond = Condition::from_entry("ownResourceOnly", &json!(true));
        let ctx = context(&[("userId", json!("u1")), ("ownerId", json!("u2"))]);
        let outcome = cond.evaluate(&ctx);
        assert!(!outcome.met);
        assert_eq!(outcome.reason.as_deref(), Some("Can only access own resources"));
    }

    #[test]
    fn test_own_resource_only_both_absent_is_met() {
        // Loose equality: absent == absent held in the original data model.
        let cond = Condition::from_entry("ownResourceOnly", &json!(true));
        assert!(cond.evaluate(&Map::new()).met);
    }

    #[test]
    fn test_own_resource_only_disabled_flag() {
        let cond = Condition::from_entry("ownResourceOnly", &json!(false));
        let ctx = context(&[("userId", json!("u1")), ("ownerId", json!("u2"))]);
        assert!(cond.evaluate(&ctx).met);
    }

    #[test]
    fn test_enrolled_only() {
        let cond = Condition::from_entry("enrolledOnly", &json!(true));

        let ctx = context(&[("isEnrolled", json!(true))]);
        assert!(cond.evaluate(&ctx).met);

        let ctx = context(&[("isEnrolled", json!(false))]);
        let outcome = cond.evaluate(&ctx);
        assert!(!outcome.met);
        assert_eq!(outcome.reason.as_deref(), Some("Must be enrolled to access"));

        // Absent is falsy
        assert!(!cond.evaluate(&Map::new()).met);
    }

    #[test]
    fn test_enrolled_only_truthy_values() {
        let cond = Condition::from_entry("enrolledOnly", &json!(true));
        assert!(cond.evaluate(&context(&[("isEnrolled", json!(1))])).met);
        assert!(cond.evaluate(&context(&[("isEnrolled", json!("yes"))])).met);
        assert!(!cond.evaluate(&context(&[("isEnrolled", json!(0))])).met);
        assert!(!cond.evaluate(&context(&[("isEnrolled", json!(""))])).met);
    }

    #[test]
    fn test_department_equals() {
        let cond = Condition::from_entry("departmentId", &json!("math"));

        let ctx = context(&[("departmentId", json!("math"))]);
        assert!(cond.evaluate(&ctx).met);

        let ctx = context(&[("departmentId", json!("physics"))]);
        let outcome = cond.evaluate(&ctx);
        assert!(!outcome.met);
        assert_eq!(outcome.reason.as_deref(), Some("Wrong department"));
    }

    #[test]
    fn test_generic_equality_fallback() {
        let cond = Condition::from_entry("courseLevel", &json!("advanced"));

        let ctx = context(&[("courseLevel", json!("advanced"))]);
        assert!(cond.evaluate(&ctx).met);

        let ctx = context(&[("courseLevel", json!("basic"))]);
        let outcome = cond.evaluate(&ctx);
        assert!(!outcome.met);
        assert_eq!(outcome.reason.as_deref(), Some("Condition courseLevel not met"));

        // Missing context key fails the same way
        let outcome = cond.evaluate(&Map::new());
        assert!(!outcome.met);
        assert_eq!(outcome.reason.as_deref(), Some("Condition courseLevel not met"));
    }

    #[test]
    fn test_evaluate_conditions_short_circuits() {
        let mut conditions = Map::new();
        conditions.insert("enrolledOnly".into(), json!(true));
        conditions.insert("departmentId".into(), json!("math"));

        // First condition fails; its reason wins even though the second
        // would also fail.
        let outcome = evaluate_conditions(&conditions, &Map::new());
        assert!(!outcome.met);
        assert_eq!(outcome.reason.as_deref(), Some("Must be enrolled to access"));
    }

    #[test]
    fn test_empty_conditions_vacuously_met() {
        assert!(evaluate_conditions(&Map::new(), &Map::new()).met);
    }
}
