//! End-to-end authorization scenarios over realistic grant snapshots.
//!
//! These tests exercise the full decision procedure — matching, condition
//! evaluation, limitation evaluation — the way an application would, with
//! the clock pinned wherever a time window is involved.

use academy_authz::{has_permission_at, Grant, PermissionCheck};
use chrono::NaiveTime;
use serde_json::json;

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// A grant set resembling an instructor profile: broad read access, scoped
/// write access, capped course creation.
fn instructor_grants() -> Vec<Grant> {
    vec![
        Grant::new("*", &["read"]).with_description("Read anything"),
        Grant::new("courses", &["update", "delete"])
            .with_condition("ownResourceOnly", json!(true)),
        Grant::new("courses", &["create"]).with_limitation("maxCourses", json!(10)),
        Grant::new("enrollments", &["create", "delete"])
            .with_condition("departmentId", json!("cs")),
    ]
}

#[test]
fn wildcard_resource_grants_read_everywhere() {
    let grants = instructor_grants();
    for resource in ["courses", "users", "reports", "grades"] {
        let check = PermissionCheck::new(resource, "read");
        assert!(
            has_permission_at(&grants, &check, at(12, 0)).allowed,
            "read on {resource} should be allowed"
        );
    }
}

#[test]
fn wildcard_action_grants_any_action() {
    let grants = vec![Grant::new("courses", &["*"])];
    let check = PermissionCheck::new("courses", "delete");
    assert!(has_permission_at(&grants, &check, at(12, 0)).allowed);
}

#[test]
fn unmatched_resource_is_denied_with_no_match_reason() {
    let grants = instructor_grants();
    let check = PermissionCheck::new("billing", "update");
    let decision = has_permission_at(&grants, &check, at(12, 0));
    assert!(!decision.allowed);
    assert_eq!(
        decision.reason.as_deref(),
        Some("No matching permissions found")
    );
}

#[test]
fn ownership_condition_gates_updates() {
    let grants = instructor_grants();

    let own = PermissionCheck::new("courses", "update")
        .with_context("userId", json!("u1"))
        .with_context("ownerId", json!("u1"));
    assert!(has_permission_at(&grants, &own, at(12, 0)).allowed);

    let foreign = PermissionCheck::new("courses", "update")
        .with_context("userId", json!("u1"))
        .with_context("ownerId", json!("u2"));
    let decision = has_permission_at(&grants, &foreign, at(12, 0));
    assert!(!decision.allowed);
    assert_eq!(
        decision.reason.as_deref(),
        Some("Conditions or limitations not met")
    );
}

#[test]
fn max_courses_cap_applies_at_boundary() {
    let grants = instructor_grants();

    let under = PermissionCheck::new("courses", "create").with_context("courseCount", json!(9));
    assert!(has_permission_at(&grants, &under, at(12, 0)).allowed);

    let at_cap = PermissionCheck::new("courses", "create").with_context("courseCount", json!(10));
    let decision = has_permission_at(&grants, &at_cap, at(12, 0));
    assert!(!decision.allowed);
    assert_eq!(
        decision.reason.as_deref(),
        Some("Maximum courses limit of 10 reached")
    );
    // The violated grant's limitation map is echoed for UI hints.
    assert_eq!(
        decision.limitations.unwrap().get("maxCourses"),
        Some(&json!(10))
    );
}

#[test]
fn condition_failure_falls_back_limitation_failure_does_not() {
    // Grant A fails its condition, grant B allows: fallback works.
    let fallback = vec![
        Grant::new("courses", &["update"]).with_condition("ownResourceOnly", json!(true)),
        Grant::new("courses", &["update"]),
    ];
    let check = PermissionCheck::new("courses", "update")
        .with_context("userId", json!("u1"))
        .with_context("ownerId", json!("u2"));
    assert!(has_permission_at(&fallback, &check, at(12, 0)).allowed);

    // Grant A passes conditions but violates its limitation: terminal deny,
    // grant B never consulted.
    let terminal = vec![
        Grant::new("courses", &["update"])
            .with_condition("ownResourceOnly", json!(true))
            .with_limitation("maxPerDay", json!(2)),
        Grant::new("courses", &["update"]),
    ];
    let check = PermissionCheck::new("courses", "update")
        .with_context("userId", json!("u1"))
        .with_context("ownerId", json!("u1"))
        .with_context("usageToday", json!(2));
    let decision = has_permission_at(&terminal, &check, at(12, 0));
    assert!(!decision.allowed);
    assert_eq!(decision.reason.as_deref(), Some("Daily limit of 2 exceeded"));
}

#[test]
fn time_window_denies_outside_business_hours() {
    let grants = vec![Grant::new("grades", &["update"])
        .with_limitation("timeWindow", json!("09:00-17:00"))];
    let check = PermissionCheck::new("grades", "update");

    assert!(has_permission_at(&grants, &check, at(14, 30)).allowed);

    let decision = has_permission_at(&grants, &check, at(20, 0));
    assert!(!decision.allowed);
    assert_eq!(
        decision.reason.as_deref(),
        Some("Access only allowed between 09:00 and 17:00")
    );
}

#[test]
fn time_window_unpadded_hour_comparison_is_pinned() {
    // Clock times render with an unpadded hour and are compared as strings,
    // so 9:05 sorts *after* "17:00" and is denied despite being inside the
    // window numerically. This is load-bearing for stored profile data.
    let grants = vec![Grant::new("grades", &["update"])
        .with_limitation("timeWindow", json!("09:00-17:00"))];
    let check = PermissionCheck::new("grades", "update");

    let decision = has_permission_at(&grants, &check, at(9, 5));
    assert!(!decision.allowed);
    assert_eq!(
        decision.reason.as_deref(),
        Some("Access only allowed between 09:00 and 17:00")
    );
}

#[test]
fn inapplicable_limitations_do_not_block() {
    // usageToday missing from context: maxPerDay is skipped, not violated.
    let grants = vec![Grant::new("courses", &["create"])
        .with_limitation("maxPerDay", json!(5))];
    let check = PermissionCheck::new("courses", "create");
    let decision = has_permission_at(&grants, &check, at(12, 0));
    assert!(decision.allowed);
    assert!(decision.limitations.is_some());
}

#[test]
fn department_condition_uses_context() {
    let grants = instructor_grants();

    let cs = PermissionCheck::new("enrollments", "create")
        .with_context("departmentId", json!("cs"));
    assert!(has_permission_at(&grants, &cs, at(12, 0)).allowed);

    let math = PermissionCheck::new("enrollments", "create")
        .with_context("departmentId", json!("math"));
    assert!(!has_permission_at(&grants, &math, at(12, 0)).allowed);
}
