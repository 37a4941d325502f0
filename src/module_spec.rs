//! Module specifications
//!
//! A module specification names a compose module that the build needs,
//! written as `NAME:STREAM[:VERSION[:CONTEXT]][/PROFILE]`. The architecture
//! component of the full module grammar is not supported (it is determined by
//! the build), and neither are partial forms such as `NAME:::CONTEXT`.
//!
//! ## Example
//!
//! ```
//! use repo_config::module_spec::ModuleSpec;
//!
//! let spec: ModuleSpec = "eog:f28:20180101/default".parse().unwrap();
//! assert_eq!(spec.name, "eog");
//! assert_eq!(spec.stream, "f28");
//! assert_eq!(spec.version.as_deref(), Some("20180101"));
//! assert_eq!(spec.profile.as_deref(), Some("default"));
//! assert_eq!(spec.to_str(false), "eog:f28:20180101");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Specification for a to-be-requested module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleSpec {
    pub name: String,
    pub stream: String,
    pub version: Option<String>,
    /// Only meaningful when `version` is set.
    pub context: Option<String>,
    pub profile: Option<String>,
}

impl ModuleSpec {
    /// Render the specification back to its string form.
    ///
    /// The `/PROFILE` suffix is omitted when `include_profile` is false or no
    /// profile is set.
    pub fn to_str(&self, include_profile: bool) -> String {
        let mut result = format!("{}:{}", self.name, self.stream);
        if let Some(version) = &self.version {
            result.push(':');
            result.push_str(version);
        }
        if let Some(context) = &self.context {
            result.push(':');
            result.push_str(context);
        }
        if include_profile {
            if let Some(profile) = &self.profile {
                result.push('/');
                result.push_str(profile);
            }
        }
        result
    }

    /// Parse every entry of `specs`, reporting all malformed entries at once.
    ///
    /// Returns [`Error::ModuleSpecs`] listing each failure when at least one
    /// entry does not parse; no partial list is returned in that case.
    pub fn parse_all<I, S>(specs: I) -> Result<Vec<ModuleSpec>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        let mut errors = Vec::new();
        for spec in specs {
            match spec.as_ref().parse::<ModuleSpec>() {
                Ok(module) => parsed.push(module),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(parsed)
        } else {
            Err(Error::ModuleSpecs { errors })
        }
    }
}

impl FromStr for ModuleSpec {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let (module, profile) = match text.rsplit_once('/') {
            Some((module, profile)) => (module, Some(profile)),
            None => (text, None),
        };

        let pieces: Vec<&str> = module.split(':').collect();
        if !(2..=4).contains(&pieces.len()) {
            return Err(Error::InvalidModuleSpec {
                spec: text.to_string(),
                message: format!(
                    "Module specification {} should be in \
                     NAME:STREAM[:VERSION[:CONTEXT]][/PROFILE] format",
                    module
                ),
            });
        }
        if pieces.iter().any(|piece| piece.is_empty()) || profile == Some("") {
            return Err(Error::InvalidModuleSpec {
                spec: text.to_string(),
                message: format!("Module specification {} contains empty fields", module),
            });
        }

        let piece = |i: usize| pieces.get(i).map(|s| s.to_string());
        Ok(ModuleSpec {
            name: pieces[0].to_string(),
            stream: pieces[1].to_string(),
            version: piece(2),
            context: piece(3),
            profile: profile.map(str::to_string),
        })
    }
}

impl fmt::Display for ModuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str(true))
    }
}
