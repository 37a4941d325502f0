//! Image labels
//!
//! Dockerfiles have used several spellings for the same well-known label over
//! time (`Name` and `name`, `BZComponent` and `com.redhat.component`, ...).
//! [`Labels`] wraps the raw label mapping and resolves a [`LabelType`] to
//! whichever spelling is present, preferring the current one.

use std::collections::BTreeMap;

use serde::Serialize;

/// Well-known labels with more than one accepted spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelType {
    Name,
    Component,
    Version,
    Release,
    Architecture,
}

impl LabelType {
    /// Accepted label names, preferred spelling first.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            LabelType::Name => &["name", "Name"],
            LabelType::Component => &["com.redhat.component", "BZComponent"],
            LabelType::Version => &["version", "Version"],
            LabelType::Release => &["release", "Release"],
            LabelType::Architecture => &["architecture", "Architecture"],
        }
    }

    /// The spelling used when writing a new label.
    pub fn preferred_name(self) -> &'static str {
        self.names()[0]
    }
}

/// Label name to value mapping of an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Labels {
    labels: BTreeMap<String, String>,
}

impl Labels {
    pub fn new<I, K, V>(labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Labels {
            labels: labels
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a label by its exact name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    /// Resolve `label_type` to the first present spelling and its value.
    pub fn get_name_and_value(&self, label_type: LabelType) -> Option<(&str, &str)> {
        label_type.names().iter().find_map(|name| {
            self.labels
                .get_key_value(*name)
                .map(|(k, v)| (k.as_str(), v.as_str()))
        })
    }

    /// Shorthand for the value part of [`Labels::get_name_and_value`].
    pub fn value_of(&self, label_type: LabelType) -> Option<&str> {
        self.get_name_and_value(label_type).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
