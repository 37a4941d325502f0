//! # YAML Schema Validation
//!
//! This module reads YAML documents and validates them against JSON schemas
//! bundled with the crate. Validation follows draft-04 semantics and is done
//! by the `jsonschema` crate.
//!
//! ## Key Components
//!
//! - **[`read_yaml`]** / **[`read_yaml_from_file_path`]**: parse YAML text (or
//!   a file) and validate it against a bundled schema, returning the parsed
//!   document as a `serde_json::Value` tree.
//! - **[`schema_resource`]**: look up a bundled schema by its identifier.
//! - **[`Validator`]**: a compiled draft-04 schema that enumerates every
//!   violation of a document, each with its resolved path.
//!
//! Every failure is logged at error level before it is returned.
//!
//! ## Example
//!
//! ```
//! use repo_config::schema::read_yaml;
//!
//! let doc = read_yaml("compose:\n  modules:\n  - eog:f28\n", "schemas/container.json").unwrap();
//! assert_eq!(doc["compose"]["modules"][0], "eog:f28");
//!
//! let err = read_yaml("compose:\n  modules: 3\n", "schemas/container.json").unwrap_err();
//! assert!(err.to_string().contains("compose.modules"));
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use jsonschema::paths::LocationSegment;
use jsonschema::ValidationError;
use log::error;
use serde_json::Value;

use crate::error::{Error, Result};

/// Schemas compiled into the crate, keyed by identifier.
const BUNDLED_SCHEMAS: &[(&str, &str)] = &[(
    "schemas/container.json",
    include_str!("../schemas/container.json"),
)];

/// Return the raw text of the bundled schema `name`.
pub fn schema_resource(name: &str) -> Result<&'static str> {
    BUNDLED_SCHEMAS
        .iter()
        .find(|(id, _)| *id == name)
        .map(|(_, text)| *text)
        .ok_or_else(|| {
            error!("unable to extract JSON schema, cannot validate");
            Error::SchemaUnavailable {
                schema: name.to_string(),
                message: "no such bundled resource".to_string(),
            }
        })
}

/// Read the file at `file_path` and validate it with [`read_yaml`].
pub fn read_yaml_from_file_path(file_path: &Path, schema: &str) -> Result<Value> {
    let yaml_data = fs::read_to_string(file_path)?;
    read_yaml(&yaml_data, schema)
}

/// Parse `yaml_data` and validate it against the bundled schema `schema`.
///
/// An empty document parses as `Value::Null`.
pub fn read_yaml(yaml_data: &str, schema: &str) -> Result<Value> {
    let schema_text = schema_resource(schema)?;
    read_yaml_with_schema(yaml_data, schema, schema_text)
}

/// Like [`read_yaml`], with the schema supplied as text.
///
/// `schema_name` is only used in error messages.
pub fn read_yaml_with_schema(yaml_data: &str, schema_name: &str, schema_text: &str) -> Result<Value> {
    let schema: Value = serde_json::from_str(schema_text).map_err(|e| {
        error!("unable to decode JSON schema, cannot validate");
        Error::SchemaDecode {
            schema: schema_name.to_string(),
            message: e.to_string(),
        }
    })?;

    let data = serde_yaml::from_str::<Option<Value>>(yaml_data)?.unwrap_or(Value::Null);

    let validator = Validator::new(&schema).map_err(|message| {
        error!("invalid schema, cannot validate");
        Error::SchemaInvalid {
            schema: schema_name.to_string(),
            message,
        }
    })?;

    let violations = validator.iter_errors(&data);
    if violations.is_empty() {
        return Ok(data);
    }

    let messages = violations
        .iter()
        .map(|violation| {
            let path = violation.path_string();
            let location = if path.is_empty() {
                "at top level"
            } else {
                path.as_str()
            };
            error!("validation error ({}): {}", location, violation.message);
            format!("{}: {}", location, violation.message)
        })
        .collect();

    Err(Error::Validation { messages })
}

/// One step into a document: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElement {
    Key(String),
    Index(usize),
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Location of the offending value, from the document root.
    pub path: Vec<PathElement>,
    pub message: String,
}

impl Violation {
    /// Render the path as `a.b[0].c`.
    pub fn path_string(&self) -> String {
        let mut rendered = String::new();
        for element in &self.path {
            match element {
                PathElement::Key(key) => {
                    rendered.push('.');
                    rendered.push_str(key);
                }
                PathElement::Index(i) => rendered.push_str(&format!("[{}]", i)),
            }
        }
        match rendered.strip_prefix('.') {
            Some(stripped) => stripped.to_string(),
            None => rendered,
        }
    }
}

impl From<&ValidationError<'_>> for Violation {
    fn from(error: &ValidationError<'_>) -> Self {
        let path = error
            .instance_path()
            .iter()
            .map(|segment| match segment {
                LocationSegment::Property(key) => PathElement::Key(key.into_owned()),
                LocationSegment::Index(i) => PathElement::Index(i),
            })
            .collect();
        Violation {
            path,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Draft-04 validator compiled from a schema document.
pub struct Validator {
    inner: jsonschema::Validator,
}

impl Validator {
    /// Check `schema` against the draft-04 meta-schema and compile it.
    ///
    /// Fails with the meta-schema violation, an unresolvable `$ref` or a
    /// `pattern` that is not a valid regular expression.
    pub fn new(schema: &Value) -> std::result::Result<Self, String> {
        jsonschema::draft4::new(schema)
            .map(|inner| Validator { inner })
            .map_err(|e| e.to_string())
    }

    /// Enumerate every violation of `instance`.
    pub fn iter_errors(&self, instance: &Value) -> Vec<Violation> {
        self.inner
            .iter_errors(instance)
            .map(|error| Violation::from(&error))
            .collect()
    }

    /// True when `instance` has no violations.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.inner.is_valid(instance)
    }
}
