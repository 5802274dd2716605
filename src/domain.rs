use std::collections::HashMap;
use std::fmt;
use std::io::Error;

use polars::error::PolarsError;

/// A single cell value.
///
/// `List` and `Record` carry structured data that can be displayed but not
/// sorted; handing one to the sorter raises `PageableError::UnsortableValue`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Record(Vec<(String, Value)>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "∅"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Value::Record(fields) => {
                let parts: Vec<String> =
                    fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

/// One row record, a mapping from field name to value.
pub type Row = HashMap<String, Value>;

#[derive(Debug)]
pub enum PageableError {
    IoError(Error),
    PolarsError(PolarsError),
    LoadingFailed(String),
    FileNotFound,
    PermissionDenied,
    UnknownFileType,
    UnknownColumn(String),
    UnsortableValue { kind: &'static str },
}

impl From<Error> for PageableError {
    fn from(err: Error) -> Self {
        PageableError::IoError(err)
    }
}

impl From<PolarsError> for PageableError {
    fn from(err: PolarsError) -> Self {
        PageableError::PolarsError(err)
    }
}

impl fmt::Display for PageableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageableError::IoError(e) => write!(f, "io error: {e}"),
            PageableError::PolarsError(e) => write!(f, "polars error: {e}"),
            PageableError::LoadingFailed(msg) => write!(f, "loading failed: {msg}"),
            PageableError::FileNotFound => write!(f, "file not found"),
            PageableError::PermissionDenied => write!(f, "permission denied"),
            PageableError::UnknownFileType => write!(f, "unknown file type"),
            PageableError::UnknownColumn(name) => write!(f, "unknown column \"{name}\""),
            PageableError::UnsortableValue { kind } => {
                write!(f, "values of type {kind} cannot be sorted")
            }
        }
    }
}

impl std::error::Error for PageableError {}
