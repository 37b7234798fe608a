use serde_json::Value;

/// Primitive kind a payload field must have on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// JSON integer, with an optional inclusive lower bound
    Integer { min: Option<i64> },
}

/// One field of a declared payload shape
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Shape of a create payload: every book attribute is required
pub const CREATE_SHAPE: &[FieldSpec] = &[
    FieldSpec {
        name: "isbn",
        kind: FieldKind::String,
    },
    FieldSpec {
        name: "amazon_url",
        kind: FieldKind::String,
    },
    FieldSpec {
        name: "author",
        kind: FieldKind::String,
    },
    FieldSpec {
        name: "language",
        kind: FieldKind::String,
    },
    FieldSpec {
        name: "pages",
        kind: FieldKind::Integer { min: Some(0) },
    },
    FieldSpec {
        name: "publisher",
        kind: FieldKind::String,
    },
    FieldSpec {
        name: "title",
        kind: FieldKind::String,
    },
    FieldSpec {
        name: "year",
        kind: FieldKind::Integer { min: None },
    },
];

/// Shape of an update payload: create shape minus isbn
pub const UPDATE_SHAPE: &[FieldSpec] = &[
    FieldSpec {
        name: "amazon_url",
        kind: FieldKind::String,
    },
    FieldSpec {
        name: "author",
        kind: FieldKind::String,
    },
    FieldSpec {
        name: "language",
        kind: FieldKind::String,
    },
    FieldSpec {
        name: "pages",
        kind: FieldKind::Integer { min: Some(0) },
    },
    FieldSpec {
        name: "publisher",
        kind: FieldKind::String,
    },
    FieldSpec {
        name: "title",
        kind: FieldKind::String,
    },
    FieldSpec {
        name: "year",
        kind: FieldKind::Integer { min: None },
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            violations: vec![],
        }
    }

    fn failed(violations: Vec<String>) -> Self {
        Self {
            valid: false,
            violations,
        }
    }
}

/// Checks a payload against a declared shape.
///
/// Violations come back in declared field order, one message per broken rule,
/// and are surfaced verbatim in the error response.
pub fn validate(shape: &[FieldSpec], payload: &Value) -> ValidationResult {
    let Some(object) = payload.as_object() else {
        return ValidationResult::failed(vec!["payload must be a JSON object".to_string()]);
    };

    let mut violations = Vec::new();
    for field in shape {
        match object.get(field.name) {
            None => violations.push(format!("{} is required", field.name)),
            Some(value) => match field.kind {
                FieldKind::String => {
                    if !value.is_string() {
                        violations.push(format!("{} must be a string", field.name));
                    }
                }
                FieldKind::Integer { min } => match value.as_i64() {
                    None => violations.push(format!("{} must be an integer", field.name)),
                    Some(number) => {
                        if let Some(min) = min {
                            if number < min {
                                violations.push(format!(
                                    "{} must be greater than or equal to {}",
                                    field.name, min
                                ));
                            }
                        }
                    }
                },
            },
        }
    }

    if violations.is_empty() {
        ValidationResult::ok()
    } else {
        ValidationResult::failed(violations)
    }
}

/// Validates a create payload: all book attributes present with correct types
pub fn validate_create(payload: &Value) -> ValidationResult {
    validate(CREATE_SHAPE, payload)
}

/// Validates an update payload.
///
/// isbn is immutable, so a payload carrying an `isbn` key is rejected outright
/// before any structural checks; the structural rules match the create shape
/// minus isbn.
pub fn validate_update(payload: &Value) -> ValidationResult {
    if payload.get("isbn").is_some() {
        return ValidationResult::failed(vec!["Not allowed to change isbn".to_string()]);
    }
    validate(UPDATE_SHAPE, payload)
}
