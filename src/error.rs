//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `repo-config` library. It uses the `thiserror` library to create a single
//! `Error` enum that covers every failure mode of loading a repository's build
//! configuration.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors. Each
//!   variant carries enough context (file path, schema name, offending value)
//!   to be reported to a user without further decoration.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants fall into a few groups:
//!
//! - Schema resource problems (`SchemaUnavailable`, `SchemaDecode`,
//!   `SchemaInvalid`).
//! - Document validation failures (`Validation`), one message per violation.
//! - Module specification errors (`InvalidModuleSpec`, and the aggregate
//!   `ModuleSpecs`).
//! - Repository file errors (`ContainerFile`, `RepoConfigFile`,
//!   `DockerfileRead`).
//! - Missing required configuration (`MissingRequiredField`).
//! - Wrapped library errors (I/O, YAML).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for repo-config operations
#[derive(Error, Debug)]
pub enum Error {
    /// The named JSON schema resource could not be found.
    #[error("Unable to extract JSON schema {schema}: {message}")]
    SchemaUnavailable { schema: String, message: String },

    /// The named JSON schema resource is not valid JSON.
    #[error("Unable to decode JSON schema {schema}: {message}")]
    SchemaDecode { schema: String, message: String },

    /// The JSON schema decoded, but is not itself a valid draft-04 schema.
    #[error("Invalid JSON schema {schema}: {message}")]
    SchemaInvalid { schema: String, message: String },

    /// A document failed schema validation.
    ///
    /// Holds one entry per violation, each already prefixed with the path of
    /// the offending value.
    #[error("{}", messages.join("\n"))]
    Validation { messages: Vec<String> },

    /// A single module specification string is malformed.
    #[error("{message}")]
    InvalidModuleSpec { spec: String, message: String },

    /// One or more module specifications from a list are malformed.
    #[error("Invalid module specifications: {}", errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    ModuleSpecs { errors: Vec<Error> },

    /// A field required by the configuration mode is missing.
    #[error("{message}")]
    MissingRequiredField { message: String },

    /// Reading labels or the base image from the Dockerfile failed.
    #[error("Could not parse Dockerfile in {}: {source}", path.display())]
    DockerfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The container configuration file could not be loaded or validated.
    #[error("Failed to load or validate container file \"{}\": {reason}", path.display())]
    ContainerFile { path: PathBuf, reason: String },

    /// The INI repository configuration file could not be parsed.
    #[error("Failed to read repository config file \"{}\": {message}", path.display())]
    RepoConfigFile { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
