//! # Limitations
//!
//! Quantitative and temporal caps attached to a grant. Unlike conditions, a
//! violated limitation is terminal: the authorizer denies the check
//! immediately instead of trying further candidate grants.
//!
//! A limitation whose context operand has the wrong type (e.g. `maxPerDay`
//! declared but `usageToday` absent or non-numeric) is *inapplicable*, not
//! violated. This leniency is part of the engine's contract; the
//! [`RuleOutcome`] type keeps it visible for auditing and tests.

use chrono::{Local, NaiveTime, Timelike};
use serde_json::{Map, Value};

/// Three-valued outcome of checking a single limitation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule was checked and holds.
    Satisfied,
    /// The rule was checked and is violated, with a diagnostic reason.
    Violated(String),
    /// The rule could not be checked (missing or mistyped operand) and is
    /// treated as not violated.
    Inapplicable,
}

/// Outcome of evaluating a grant's full limitation map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitationOutcome {
    /// Whether no declared limitation was violated.
    pub allowed: bool,
    /// The reason for the first violated limitation, if any.
    pub reason: Option<String>,
}

impl LimitationOutcome {
    /// No limitation was violated.
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// A limitation was violated with the given reason.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

/// A single limitation, parsed from one entry of a grant's limitation map.
///
/// Unrecognized keys, and recognized keys with a mistyped value, parse to
/// [`Limitation::Other`], which is never violated.
#[derive(Debug, Clone, PartialEq)]
pub enum Limitation {
    /// `maxPerDay` — denies once `context.usageToday` reaches the cap.
    MaxPerDay(f64),

    /// `maxCourses` — denies once `context.courseCount` reaches the cap.
    MaxCourses(f64),

    /// `timeWindow` — denies outside the `start..end` window. Bounds are
    /// compared as strings; see [`Limitation::check`].
    TimeWindow {
        /// Window start, e.g. `"09:00"`.
        start: String,
        /// Window end, e.g. `"17:00"`.
        end: String,
    },

    /// Any other entry. Carried for round-tripping but never violated.
    Other {
        /// The raw limitation key from the grant.
        key: String,
        /// The raw value.
        value: Value,
    },
}

impl Limitation {
    /// Parse one limitation-map entry into its typed form.
    ///
    /// # Example
    ///
    /// ```
    /// use academy_authz::Limitation;
    /// use serde_json::json;
    ///
    /// assert!(matches!(
    ///     Limitation::from_entry("maxPerDay", &json!(5)),
    ///     Limitation::MaxPerDay(n) if n == 5.0
    /// ));
    /// // Mistyped value falls through to Other
    /// assert!(matches!(
    ///     Limitation::from_entry("maxPerDay", &json!("five")),
    ///     Limitation::Other { .. }
    /// ));
    /// ```
    pub fn from_entry(key: &str, value: &Value) -> Self {
        let other = || Limitation::Other {
            key: key.to_string(),
            value: value.clone(),
        };
        match key {
            "maxPerDay" => value.as_f64().map(Limitation::MaxPerDay).unwrap_or_else(other),
            "maxCourses" => value
                .as_f64()
                .map(Limitation::MaxCourses)
                .unwrap_or_else(other),
            "timeWindow" => match value.as_str().and_then(|s| s.split_once('-')) {
                Some((start, end)) => Limitation::TimeWindow {
                    start: start.to_string(),
                    end: end.to_string(),
                },
                None => other(),
            },
            _ => other(),
        }
    }

    /// Check this limitation against a request context at a given wall-clock
    /// time.
    ///
    /// The current time is rendered as `"H:MM"` — hour *not* zero-padded,
    /// minute zero-padded — and compared lexicographically against the
    /// window bounds. This string comparison (rather than numeric time
    /// comparison) is long-standing behavior that existing profile data
    /// depends on: single-digit hours sort after `"1x:xx"` bounds, so a
    /// window like `09:00-17:00` rejects `9:05`. Do not "fix" this without
    /// migrating stored windows.
    pub fn check(&self, context: &Map<String, Value>, now: NaiveTime) -> RuleOutcome {
        match self {
            Limitation::MaxPerDay(max) => {
                match context.get("usageToday").and_then(Value::as_f64) {
                    Some(usage) if usage >= *max => RuleOutcome::Violated(format!(
                        "Daily limit of {} exceeded",
                        format_cap(*max)
                    )),
                    Some(_) => RuleOutcome::Satisfied,
                    None => RuleOutcome::Inapplicable,
                }
            }
            Limitation::MaxCourses(max) => {
                match context.get("courseCount").and_then(Value::as_f64) {
                    Some(count) if count >= *max => RuleOutcome::Violated(format!(
                        "Maximum courses limit of {} reached",
                        format_cap(*max)
                    )),
                    Some(_) => RuleOutcome::Satisfied,
                    None => RuleOutcome::Inapplicable,
                }
            }
            Limitation::TimeWindow { start, end } => {
                let current = format_clock(now);
                if current.as_str() < start.as_str() || current.as_str() > end.as_str() {
                    RuleOutcome::Violated(format!(
                        "Access only allowed between {start} and {end}"
                    ))
                } else {
                    RuleOutcome::Satisfied
                }
            }
            Limitation::Other { .. } => RuleOutcome::Inapplicable,
        }
    }
}

/// Evaluate a grant's full limitation map against a request context, reading
/// the local wall clock for time windows.
pub fn evaluate_limitations(
    limitations: &Map<String, Value>,
    context: &Map<String, Value>,
) -> LimitationOutcome {
    evaluate_limitations_at(limitations, context, Local::now().time())
}

/// Evaluate a grant's full limitation map at a pinned wall-clock time.
///
/// Rules are checked in declaration order and combined with logical AND; the
/// first violated rule short-circuits with its reason. Inapplicable rules
/// count as satisfied. An empty map is vacuously allowed.
///
/// # Example
///
/// ```
/// use academy_authz::evaluate_limitations_at;
/// use chrono::NaiveTime;
/// use serde_json::{json, Map};
///
/// let mut limitations = Map::new();
/// limitations.insert("maxPerDay".into(), json!(5));
///
/// let mut context = Map::new();
/// context.insert("usageToday".into(), json!(5));
///
/// let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
/// let outcome = evaluate_limitations_at(&limitations, &context, noon);
/// assert!(!outcome.allowed);
/// assert_eq!(outcome.reason.as_deref(), Some("Daily limit of 5 exceeded"));
/// ```
pub fn evaluate_limitations_at(
    limitations: &Map<String, Value>,
    context: &Map<String, Value>,
    now: NaiveTime,
) -> LimitationOutcome {
    for (key, value) in limitations {
        match Limitation::from_entry(key, value).check(context, now) {
            RuleOutcome::Violated(reason) => return LimitationOutcome::denied(reason),
            RuleOutcome::Satisfied | RuleOutcome::Inapplicable => {}
        }
    }
    LimitationOutcome::allowed()
}

/// Render a cap for a denial reason, without a trailing `.0` for integral
/// values.
fn format_cap(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Render a wall-clock time as `"H:MM"` with an unpadded hour.
fn format_clock(now: NaiveTime) -> String {
    format!("{}:{:02}", now.hour(), now.minute())
}
