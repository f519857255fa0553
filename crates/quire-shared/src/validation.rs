//! Field-level validation of untyped JSON request bodies.
//!
//! A [`FieldReader`] walks a JSON object one field at a time, recording every
//! problem it sees instead of stopping at the first one. The resulting
//! [`ValidationErrors`] is what the API returns under `details`.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::SchemaEnum;

/// Machine-readable category of a [`ValidationIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    InvalidEnumValue,
    TooSmall,
}

/// One step in the path to an offending value: an object key or an array
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<u64>,
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl ValidationIssue {
    fn invalid_type(path: Vec<PathSegment>, expected: &str, received: &Value) -> Self {
        let received = json_type(received);
        Self {
            code: IssueCode::InvalidType,
            expected: Some(expected.to_string()),
            received: Some(received.to_string()),
            options: None,
            minimum: None,
            path,
            message: format!("Expected {expected}, received {received}"),
        }
    }

    fn required(field: &str, expected: &str) -> Self {
        Self {
            code: IssueCode::InvalidType,
            expected: Some(expected.to_string()),
            received: Some("undefined".to_string()),
            options: None,
            minimum: None,
            path: vec![field.into()],
            message: "Required".to_string(),
        }
    }

    fn invalid_enum<E: SchemaEnum>(field: &str, received: &str) -> Self {
        let options: Vec<String> = E::VARIANTS.iter().map(|v| v.as_str().to_string()).collect();
        Self {
            code: IssueCode::InvalidEnumValue,
            expected: None,
            received: Some(received.to_string()),
            message: format!(
                "Invalid enum value. Expected {}, received '{received}'",
                enum_expectation::<E>()
            ),
            options: Some(options),
            minimum: None,
            path: vec![field.into()],
        }
    }

    fn too_small(field: &str, minimum: u64) -> Self {
        Self {
            code: IssueCode::TooSmall,
            expected: None,
            received: None,
            options: None,
            minimum: Some(minimum),
            path: vec![field.into()],
            message: format!("Number must be greater than or equal to {minimum}"),
        }
    }
}

/// Every issue found in one request body, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{} validation issue(s)", .issues.len())]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether any issue points at `field` (at any depth below it).
    pub fn mentions(&self, field: &str) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.path.first(), Some(PathSegment::Key(k)) if k == field))
    }

    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }
}

/// A typed payload that can be validated out of an untyped JSON body.
pub trait FromJsonBody: Sized {
    fn from_json_body(body: &Value) -> Result<Self, ValidationErrors>;
}

/// Reads typed fields out of a JSON object, collecting issues as it goes.
///
/// Keys the caller never asks for are ignored. An explicit `null` is a type
/// error, not an absent field.
pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    /// Start reading `body`. Fails immediately if it is not a JSON object.
    pub fn new(body: &'a Value) -> Result<Self, ValidationErrors> {
        match body {
            Value::Object(object) => Ok(Self {
                object,
                errors: ValidationErrors::default(),
            }),
            other => {
                let mut errors = ValidationErrors::default();
                errors.push(ValidationIssue::invalid_type(Vec::new(), "object", other));
                Err(errors)
            }
        }
    }

    pub fn required_string(&mut self, field: &str) -> Option<String> {
        self.required(field, "string", Self::string)
    }

    pub fn optional_string(&mut self, field: &str) -> Option<String> {
        self.optional(field, Self::string)
    }

    pub fn required_string_list(&mut self, field: &str) -> Option<Vec<String>> {
        self.required(field, "array", Self::string_list)
    }

    pub fn optional_string_list(&mut self, field: &str) -> Option<Vec<String>> {
        self.optional(field, Self::string_list)
    }

    pub fn required_enum<E: SchemaEnum>(&mut self, field: &str) -> Option<E> {
        let expected = enum_expectation::<E>();
        self.required(field, &expected, Self::enumeration::<E>)
    }

    pub fn optional_enum<E: SchemaEnum>(&mut self, field: &str) -> Option<E> {
        self.optional(field, Self::enumeration::<E>)
    }

    pub fn required_size(&mut self, field: &str) -> Option<u64> {
        self.required(field, "number", Self::size)
    }

    pub fn optional_size(&mut self, field: &str) -> Option<u64> {
        self.optional(field, Self::size)
    }

    /// Whether no issue has been recorded so far.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }

    fn required<T>(
        &mut self,
        field: &str,
        expected: &str,
        read: fn(&mut Self, &str, &Value) -> Option<T>,
    ) -> Option<T> {
        match self.object.get(field) {
            Some(value) => read(self, field, value),
            None => {
                self.errors.push(ValidationIssue::required(field, expected));
                None
            }
        }
    }

    fn optional<T>(
        &mut self,
        field: &str,
        read: fn(&mut Self, &str, &Value) -> Option<T>,
    ) -> Option<T> {
        let value = self.object.get(field)?;
        read(self, field, value)
    }

    fn string(&mut self, field: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.errors
                    .push(ValidationIssue::invalid_type(vec![field.into()], "string", other));
                None
            }
        }
    }

    fn string_list(&mut self, field: &str, value: &Value) -> Option<Vec<String>> {
        let Value::Array(items) = value else {
            self.errors
                .push(ValidationIssue::invalid_type(vec![field.into()], "array", value));
            return None;
        };

        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                other => {
                    ok = false;
                    self.errors.push(ValidationIssue::invalid_type(
                        vec![field.into(), index.into()],
                        "string",
                        other,
                    ));
                }
            }
        }
        ok.then_some(out)
    }

    fn enumeration<E: SchemaEnum>(&mut self, field: &str, value: &Value) -> Option<E> {
        let Value::String(s) = value else {
            let expected = enum_expectation::<E>();
            self.errors
                .push(ValidationIssue::invalid_type(vec![field.into()], &expected, value));
            return None;
        };
        let parsed = E::parse(s);
        if parsed.is_none() {
            self.errors.push(ValidationIssue::invalid_enum::<E>(field, s));
        }
        parsed
    }

    fn size(&mut self, field: &str, value: &Value) -> Option<u64> {
        let Value::Number(n) = value else {
            self.errors
                .push(ValidationIssue::invalid_type(vec![field.into()], "number", value));
            return None;
        };

        if let Some(size) = n.as_u64() {
            return Some(size);
        }
        // `1024.0` is still a whole number of bytes.
        if let Some(whole) = n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
        {
            return Some(whole as u64);
        }
        if n.as_i64().is_some() || n.as_f64().is_some_and(|f| f < 0.0) {
            self.errors.push(ValidationIssue::too_small(field, 0));
        } else {
            let mut issue = ValidationIssue::invalid_type(vec![field.into()], "integer", value);
            issue.received = Some("float".to_string());
            issue.message = "Expected integer, received float".to_string();
            self.errors.push(issue);
        }
        None
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn enum_expectation<E: SchemaEnum>() -> String {
    E::VARIANTS
        .iter()
        .map(|v| format!("'{}'", v.as_str()))
        .collect::<Vec<_>>()
        .join(" | ")
}
