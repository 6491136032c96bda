//! GraphQL envelope validation
//!
//! Recursive descent over a parsed JSON value, checking it against the
//! response envelope shape:
//!
//! ```text
//! {
//!   data?:       object | null,
//!   errors?:     [{ message: string,
//!                   locations?: [{ line: number, column: number }],
//!                   path?: [string | number],
//!                   extensions?: object }],
//!   extensions?: object
//! }
//! ```
//!
//! Unknown keys are ignored at every level. The first violation stops the
//! walk and is reported with its JSON path.

use super::{ErrorLocation, GraphQLError, GraphQLResponse, PathSegment};
use serde_json::{Map, Number, Value};
use std::fmt;
use thiserror::Error;

/// The response does not have the envelope shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid GraphQL envelope at {path}: expected {expected}, found {found}")]
pub struct ValidationError {
    path: String,
    expected: &'static str,
    found: &'static str,
}

impl ValidationError {
    fn new(path: &Path<'_>, expected: &'static str, found: &'static str) -> Self {
        ValidationError {
            path: path.to_string(),
            expected,
            found,
        }
    }

    /// JSON path of the offending value, e.g. `$.errors[0].message`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Description of the shape that was required
    pub fn expected(&self) -> &'static str {
        self.expected
    }

    /// JSON kind that was found instead (`missing` for absent keys)
    pub fn found(&self) -> &'static str {
        self.found
    }
}

/// Name of a JSON value's kind, for error messages
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Linked JSON path, rendered only when an error is reported
#[derive(Clone, Copy)]
enum Path<'a> {
    Root,
    Key(&'a Path<'a>, &'a str),
    Index(&'a Path<'a>, usize),
}

impl<'a> Path<'a> {
    fn key(&'a self, key: &'a str) -> Path<'a> {
        Path::Key(self, key)
    }

    fn index(&'a self, index: usize) -> Path<'a> {
        Path::Index(self, index)
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Path::Root => f.write_str("$"),
            Path::Key(parent, key) => write!(f, "{parent}.{key}"),
            Path::Index(parent, index) => write!(f, "{parent}[{index}]"),
        }
    }
}

type Validated<T> = Result<T, ValidationError>;

/// Validate a parsed response body and convert it into an envelope
pub fn validate_envelope(value: Value) -> Validated<GraphQLResponse> {
    let root = Path::Root;
    let mut object = expect_object(value, &root)?;

    let data = match object.remove("data") {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            return Err(ValidationError::new(&root.key("data"), "object or null", kind_of(&other)))
        }
    };

    let errors = match object.remove("errors") {
        None => None,
        Some(value) => Some(errors(value, &root.key("errors"))?),
    };

    let extensions = optional_object(object.remove("extensions"), &root.key("extensions"))?;

    Ok(GraphQLResponse {
        data,
        errors,
        extensions,
    })
}

fn errors(value: Value, path: &Path<'_>) -> Validated<Vec<GraphQLError>> {
    expect_array(value, path)?
        .into_iter()
        .enumerate()
        .map(|(i, item)| error(item, &path.index(i)))
        .collect()
}

fn error(value: Value, path: &Path<'_>) -> Validated<GraphQLError> {
    let mut object = expect_object(value, path)?;

    let message = match object.remove("message") {
        Some(Value::String(message)) => message,
        Some(other) => return Err(ValidationError::new(&path.key("message"), "string", kind_of(&other))),
        None => return Err(ValidationError::new(&path.key("message"), "string", "missing")),
    };

    let locations = match object.remove("locations") {
        None => None,
        Some(value) => Some(locations(value, &path.key("locations"))?),
    };

    let error_path = match object.remove("path") {
        None => None,
        Some(value) => Some(error_path(value, &path.key("path"))?),
    };

    let extensions = optional_object(object.remove("extensions"), &path.key("extensions"))?;

    Ok(GraphQLError {
        message,
        locations,
        path: error_path,
        extensions,
    })
}

fn locations(value: Value, path: &Path<'_>) -> Validated<Vec<ErrorLocation>> {
    expect_array(value, path)?
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = path.index(i);
            let object = expect_object(item, &item_path)?;
            Ok(ErrorLocation {
                line: position(object.get("line"), &item_path.key("line"))?,
                column: position(object.get("column"), &item_path.key("column"))?,
            })
        })
        .collect()
}

fn position(value: Option<&Value>, path: &Path<'_>) -> Validated<Number> {
    match value {
        Some(Value::Number(n)) => Ok(n.clone()),
        Some(other) => Err(ValidationError::new(path, "number", kind_of(other))),
        None => Err(ValidationError::new(path, "number", "missing")),
    }
}

fn error_path(value: Value, path: &Path<'_>) -> Validated<Vec<PathSegment>> {
    expect_array(value, path)?
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(field) => Ok(PathSegment::Field(field)),
            Value::Number(index) => Ok(PathSegment::Index(index)),
            other => Err(ValidationError::new(&path.index(i), "string or number", kind_of(&other))),
        })
        .collect()
}

fn optional_object(value: Option<Value>, path: &Path<'_>) -> Validated<Option<Map<String, Value>>> {
    value.map(|v| expect_object(v, path)).transpose()
}

fn expect_object(value: Value, path: &Path<'_>) -> Validated<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::new(path, "object", kind_of(&other))),
    }
}

fn expect_array(value: Value, path: &Path<'_>) -> Validated<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(ValidationError::new(path, "array", kind_of(&other))),
    }
}
