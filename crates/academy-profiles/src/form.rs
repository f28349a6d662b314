//! Profile form round-tripping
//!
//! Profile editor forms present condition and limitation maps as raw JSON
//! text fields. This module converts between [`CreateProfileDto`] and the
//! flat string form values, validating the JSON on the way back in.

use serde_json::{Map, Value};

use academy_authz::Grant;

use crate::error::{ProfileError, ProfileResult};
use crate::profile::CreateProfileDto;

/// Flat string values for one grant row in the profile editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionFormValues {
    /// Resource name, or `"*"`.
    pub resource: String,
    /// Comma-separated action list (e.g. `"read, create"`).
    pub actions: String,
    /// Condition map as JSON text; empty string means no conditions.
    pub conditions: String,
    /// Limitation map as JSON text; empty string means no limitations.
    pub limitations: String,
    /// Optional description; empty string means none.
    pub description: String,
}

/// Flat string values for the whole profile editor form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFormValues {
    /// Profile name.
    pub name: String,
    /// Profile description.
    pub description: String,
    /// One row per grant.
    pub permissions: Vec<PermissionFormValues>,
    /// Global limitation hints as JSON text; empty string means none.
    pub global_limitations: String,
}

/// Render a create-profile DTO as editable form values.
///
/// Empty maps render as empty strings so untouched fields stay blank in
/// the form.
pub fn format_profile_for_form(dto: &CreateProfileDto) -> ProfileFormValues {
    ProfileFormValues {
        name: dto.name.clone(),
        description: dto.description.clone(),
        permissions: dto.permissions.iter().map(format_permission).collect(),
        global_limitations: format_map(&dto.global_limitations),
    }
}

/// Parse form values back into a create-profile DTO.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidFormJson`] when a conditions, limitations,
/// or global-limitations field contains text that is not a JSON object.
pub fn parse_profile_from_form(values: &ProfileFormValues) -> ProfileResult<CreateProfileDto> {
    let mut permissions = Vec::with_capacity(values.permissions.len());
    for (index, row) in values.permissions.iter().enumerate() {
        permissions.push(parse_permission(index, row)?);
    }

    Ok(CreateProfileDto {
        name: values.name.trim().to_string(),
        description: values.description.trim().to_string(),
        permissions,
        global_limitations: parse_map("global_limitations", &values.global_limitations)?,
    })
}

fn format_permission(grant: &Grant) -> PermissionFormValues {
    PermissionFormValues {
        resource: grant.resource.clone(),
        actions: grant.actions.join(", "),
        conditions: format_map(&grant.conditions),
        limitations: format_map(&grant.limitations),
        description: grant.description.clone().unwrap_or_default(),
    }
}

fn parse_permission(index: usize, row: &PermissionFormValues) -> ProfileResult<Grant> {
    let actions: Vec<String> = row
        .actions
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();

    let description = row.description.trim();
    Ok(Grant {
        resource: row.resource.trim().to_string(),
        actions,
        conditions: parse_map(&format!("permissions[{index}].conditions"), &row.conditions)?,
        limitations: parse_map(&format!("permissions[{index}].limitations"), &row.limitations)?,
        description: if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        },
    })
}

fn format_map(map: &Map<String, Value>) -> String {
    if map.is_empty() {
        String::new()
    } else {
        // Serializing an in-memory map cannot fail.
        serde_json::to_string(map).unwrap_or_default()
    }
}

fn parse_map(field: &str, text: &str) -> ProfileResult<Map<String, Value>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Map::new());
    }
    serde_json::from_str(text).map_err(|e| ProfileError::InvalidFormJson {
        field: field.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_dto() -> CreateProfileDto {
        CreateProfileDto {
            name: "Instructor".into(),
            description: "Teaching staff".into(),
            permissions: vec![
                Grant::new("courses", &["read", "update"])
                    .with_condition("ownResourceOnly", json!(true))
                    .with_condition("departmentId", json!("cs"))
                    .with_limitation("maxPerDay", json!(20))
                    .with_limitation("timeWindow", json!("08:00-18:00"))
                    .with_description("Manage own courses"),
                Grant::new("*", &["read"]),
            ],
            global_limitations: {
                let mut map = Map::new();
                map.insert("maxCourses".into(), json!(15));
                map
            },
        }
    }

    #[test]
    fn test_round_trip_reproduces_dto() {
        let dto = sample_dto();
        let form = format_profile_for_form(&dto);
        let parsed = parse_profile_from_form(&form).unwrap();
        assert_eq!(parsed, dto);
    }

    #[test]
    fn test_empty_fields_parse_to_empty_maps() {
        let form = ProfileFormValues {
            name: "Minimal".into(),
            description: String::new(),
            permissions: vec![PermissionFormValues {
                resource: "courses".into(),
                actions: "read".into(),
                ..Default::default()
            }],
            global_limitations: String::new(),
        };
        let dto = parse_profile_from_form(&form).unwrap();
        assert!(dto.permissions[0].conditions.is_empty());
        assert!(dto.permissions[0].limitations.is_empty());
        assert!(dto.global_limitations.is_empty());
        assert!(dto.permissions[0].description.is_none());
    }

    #[test]
    fn test_actions_split_and_trimmed() {
        let form = ProfileFormValues {
            name: "P".into(),
            permissions: vec![PermissionFormValues {
                resource: "courses".into(),
                actions: " read , create ,, update ".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let dto = parse_profile_from_form(&form).unwrap();
        assert_eq!(dto.permissions[0].actions, vec!["read", "create", "update"]);
    }

    #[test]
    fn test_invalid_json_is_reported_with_field() {
        let form = ProfileFormValues {
            name: "P".into(),
            permissions: vec![PermissionFormValues {
                resource: "courses".into(),
                actions: "read".into(),
                conditions: "{not json".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let err = parse_profile_from_form(&form).unwrap_err();
        match err {
            ProfileError::InvalidFormJson { field, .. } => {
                assert_eq!(field, "permissions[0].conditions");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        let form = ProfileFormValues {
            name: "P".into(),
            global_limitations: "[1, 2, 3]".into(),
            ..Default::default()
        };
        assert!(parse_profile_from_form(&form).is_err());
    }
}
