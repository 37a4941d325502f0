//! # Repository Configuration
//!
//! [`RepoConfiguration`] reads the build configuration stored in a
//! repository directory:
//!
//! 1. the INI file (`.osbs-repo-config`) holding the `[autorebuild]`
//!    `enabled` flag, overlaid on a default that disables autorebuild;
//! 2. `container.yaml`, validated against the bundled container schema;
//! 3. the derived `autorebuild` options, compose module specifications and
//!    flatpak settings.
//!
//! Every file is read during construction. A failure at any step aborts
//! construction, so a `RepoConfiguration` value is always complete.
//!
//! ## Example
//!
//! ```
//! use repo_config::repo_config::RepoConfiguration;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(
//!     dir.path().join("container.yaml"),
//!     "compose:\n  modules:\n  - eog:f28\nflatpak:\n  id: org.gnome.Eog\n",
//! )
//! .unwrap();
//!
//! let config = RepoConfiguration::from_dir(dir.path()).unwrap();
//! assert!(config.is_flatpak);
//! assert_eq!(config.container_module_specs[0].name, "eog");
//! assert!(!config.is_autorebuild_enabled());
//! ```

use std::path::{Path, PathBuf};

use ini::Ini;
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::defaults::{CONTAINER_SCHEMA, DEFAULT_REPO_CONFIG, REPO_CONFIG_FILE, REPO_CONTAINER_CONFIG};
use crate::error::{Error, Result};
use crate::module_spec::ModuleSpec;
use crate::schema::read_yaml_from_file_path;

/// Where to read a repository configuration from, and the repository
/// metadata to carry along with it.
#[derive(Debug, Clone)]
pub struct RepoConfigOptions {
    pub dir_path: PathBuf,
    /// Name of the INI file inside `dir_path`.
    pub config_file_name: String,
    /// Name of the container YAML file inside `dir_path`.
    pub container_file_name: String,
    pub depth: Option<u32>,
    pub git_uri: Option<String>,
    pub git_branch: Option<String>,
    pub git_ref: Option<String>,
}

impl Default for RepoConfigOptions {
    fn default() -> Self {
        RepoConfigOptions {
            dir_path: PathBuf::from("."),
            config_file_name: REPO_CONFIG_FILE.to_string(),
            container_file_name: REPO_CONTAINER_CONFIG.to_string(),
            depth: None,
            git_uri: None,
            git_branch: None,
            git_ref: None,
        }
    }
}

impl RepoConfigOptions {
    pub fn new(dir_path: impl Into<PathBuf>) -> Self {
        RepoConfigOptions {
            dir_path: dir_path.into(),
            ..Default::default()
        }
    }
}

/// Configuration read from a repository.
#[derive(Debug, Clone, Serialize)]
pub struct RepoConfiguration {
    /// Parsed `container.yaml`; an empty mapping when the file is absent.
    pub container: Value,
    /// The `autorebuild` section of `container.yaml`.
    pub autorebuild: Map<String, Value>,
    pub depth: u32,
    pub git_uri: Option<String>,
    pub git_branch: Option<String>,
    pub git_ref: Option<String>,
    pub container_module_specs: Vec<ModuleSpec>,
    pub is_flatpak: bool,
    pub flatpak_base_image: Option<String>,
    pub flatpak_component: Option<String>,
    pub flatpak_name: Option<String>,
    #[serde(skip)]
    dir_path: PathBuf,
    autorebuild_enabled: bool,
}

impl RepoConfiguration {
    /// Read the configuration described by `options`.
    pub fn load(options: RepoConfigOptions) -> Result<Self> {
        let RepoConfigOptions {
            dir_path,
            config_file_name,
            container_file_name,
            depth,
            git_uri,
            git_branch,
            git_ref,
        } = options;

        let autorebuild_enabled = read_autorebuild_flag(&dir_path.join(config_file_name))?;

        let file_path = dir_path.join(container_file_name);
        let mut container = Value::Object(Map::new());
        if file_path.exists() {
            debug!("Loading container configuration from {}", file_path.display());
            let document = read_yaml_from_file_path(&file_path, CONTAINER_SCHEMA).map_err(|e| {
                Error::ContainerFile {
                    path: file_path.clone(),
                    reason: e.to_string(),
                }
            })?;
            if !document.is_null() {
                container = document;
            }
        }

        // container values may be set to null
        let autorebuild = mapping(container.get("autorebuild"));
        let modules = mapping(container.get("compose"))
            .get("modules")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let container_module_specs =
            ModuleSpec::parse_all(modules.iter().filter_map(Value::as_str))?;

        let flatpak = mapping(container.get("flatpak"));
        let flatpak_field = |key: &str| flatpak.get(key).and_then(Value::as_str).map(str::to_string);

        Ok(RepoConfiguration {
            autorebuild,
            depth: depth.unwrap_or(0),
            git_uri,
            git_branch,
            git_ref,
            container_module_specs,
            is_flatpak: !flatpak.is_empty(),
            flatpak_base_image: flatpak_field("base_image"),
            flatpak_component: flatpak_field("component"),
            flatpak_name: flatpak_field("name"),
            container,
            dir_path,
            autorebuild_enabled,
        })
    }

    /// Read the configuration in `dir_path` with default file names.
    pub fn from_dir(dir_path: impl Into<PathBuf>) -> Result<Self> {
        Self::load(RepoConfigOptions::new(dir_path))
    }

    /// Value of `[autorebuild] enabled` from the INI file.
    pub fn is_autorebuild_enabled(&self) -> bool {
        self.autorebuild_enabled
    }

    /// The `tags` list of `container.yaml`.
    pub fn container_tags(&self) -> Vec<String> {
        self.container
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Directory the configuration was read from.
    pub fn dir_path(&self) -> &Path {
        &self.dir_path
    }
}

/// Treat a missing, null or non-mapping value as an empty mapping.
fn mapping(value: Option<&Value>) -> Map<String, Value> {
    value
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Merge the INI file at `config_path` over the defaults and read the
/// `[autorebuild] enabled` flag.
fn read_autorebuild_flag(config_path: &Path) -> Result<bool> {
    let mut config = Ini::load_from_str(DEFAULT_REPO_CONFIG).map_err(|e| Error::RepoConfigFile {
        path: config_path.to_path_buf(),
        message: e.to_string(),
    })?;

    if config_path.exists() {
        debug!("Loading repository config from {}", config_path.display());
        let overrides = Ini::load_from_file(config_path).map_err(|e| Error::RepoConfigFile {
            path: config_path.to_path_buf(),
            message: e.to_string(),
        })?;
        for (section, properties) in overrides.iter() {
            for (key, value) in properties.iter() {
                config
                    .with_section(section)
                    .set(key.to_ascii_lowercase(), value);
            }
        }
    }

    let value = config
        .get_from(Some("autorebuild"), "enabled")
        .unwrap_or("false");
    parse_boolean(value).ok_or_else(|| Error::RepoConfigFile {
        path: config_path.to_path_buf(),
        message: format!("Not a boolean: {}", value),
    })
}

/// Interpret an INI boolean the way configparser does.
fn parse_boolean(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}
