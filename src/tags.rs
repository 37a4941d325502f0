//! Additional image tags
//!
//! Besides its primary tag, an image can be tagged with extra names taken
//! either from the `tags` list of `container.yaml` or from an
//! `additional-tags` file in the repository, one tag per line. Tags supplied
//! from `container.yaml` win: when any are given the file is not read at all.
//!
//! Invalid tags never fail loading. They are dropped with a warning.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::defaults::ADDITIONAL_TAGS_FILE;
use crate::error::Result;

const VALID_TAG_PATTERN: &str = r"^[\w.]{0,127}$";

static VALID_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VALID_TAG_PATTERN).expect("tag pattern is a valid regex"));

/// Container for additional image tags.
#[derive(Debug, Clone, Default)]
pub struct AdditionalTagsConfig {
    tags: HashSet<String>,
    from_container_yaml: bool,
    file_path: PathBuf,
}

impl AdditionalTagsConfig {
    /// Collect tags from `tags`, or from `dir_path/file_name` when `tags` is empty.
    ///
    /// Fails only if the tags file exists but cannot be read.
    pub fn new<S: AsRef<str>>(dir_path: &Path, file_name: &str, tags: &[S]) -> Result<Self> {
        let mut config = AdditionalTagsConfig {
            tags: tags
                .iter()
                .map(|tag| tag.as_ref())
                .filter(|tag: &&str| Self::is_tag_valid(tag))
                .map(str::to_string)
                .collect(),
            from_container_yaml: !tags.is_empty(),
            file_path: dir_path.join(file_name),
        };
        config.populate_tags()?;
        Ok(config)
    }

    /// Read tags from `dir_path` using the default file name.
    pub fn from_dir(dir_path: &Path) -> Result<Self> {
        Self::new::<&str>(dir_path, ADDITIONAL_TAGS_FILE, &[])
    }

    fn populate_tags(&mut self) -> Result<()> {
        if self.from_container_yaml {
            warn!("Tags were read from container.yaml file. Additional tags are being ignored!");
            return Ok(());
        }

        if !self.file_path.exists() {
            return Ok(());
        }

        debug!("Reading additional tags from {}", self.file_path.display());
        let content = fs::read_to_string(&self.file_path)?;
        for line in content.lines() {
            let tag = line.trim();
            if Self::is_tag_valid(tag) {
                self.tags.insert(tag.to_string());
            }
        }
        Ok(())
    }

    /// True if `tag` is non-empty and matches `^[\w.]{0,127}$`.
    ///
    /// Logs a warning for non-empty invalid tags.
    pub fn is_tag_valid(tag: &str) -> bool {
        if tag.is_empty() {
            return false;
        }

        if !VALID_TAG_REGEX.is_match(tag) {
            warn!(
                "Invalid additional tag \"{}\", must match pattern {}",
                tag, VALID_TAG_PATTERN
            );
            return false;
        }

        true
    }

    /// The collected tags, in no particular order.
    pub fn tags(&self) -> Vec<String> {
        self.tags.iter().cloned().collect()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// True when the tags were supplied from `container.yaml`.
    pub fn from_container_yaml(&self) -> bool {
        self.from_container_yaml
    }

    /// Location of the tags file, whether or not it was read.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}
