//! Dockerfile access
//!
//! [`RepoInfo`](crate::repo_info::RepoInfo) needs two things from a
//! Dockerfile: its labels and its base image. [`DockerfileSource`] is that
//! capability; [`DockerfileParser`] implements it by reading a Dockerfile from
//! disk each time it is asked, so a missing file only surfaces as an I/O error
//! when labels or the base image are first needed.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Source of Dockerfile-derived image metadata.
pub trait DockerfileSource {
    /// All `LABEL` values, later definitions winning.
    fn labels(&self) -> io::Result<HashMap<String, String>>;

    /// Image named by the last `FROM` instruction, if any.
    fn base_image(&self) -> io::Result<Option<String>>;

    /// Location of the Dockerfile, for error messages.
    fn dockerfile_path(&self) -> &Path;
}

/// Reads `FROM` and `LABEL` instructions from a Dockerfile on disk.
#[derive(Debug, Clone)]
pub struct DockerfileParser {
    path: PathBuf,
}

impl DockerfileParser {
    /// `path` may be the Dockerfile itself or the directory containing it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = if path.is_dir() {
            path.join("Dockerfile")
        } else {
            path
        };
        DockerfileParser { path }
    }

    fn instructions(&self) -> io::Result<Vec<(String, String)>> {
        let content = fs::read_to_string(&self.path)?;
        Ok(parse_instructions(&content))
    }
}

impl DockerfileSource for DockerfileParser {
    fn labels(&self) -> io::Result<HashMap<String, String>> {
        let mut labels = HashMap::new();
        for (instruction, args) in self.instructions()? {
            if instruction == "LABEL" {
                labels.extend(parse_label_args(&args));
            }
        }
        Ok(labels)
    }

    fn base_image(&self) -> io::Result<Option<String>> {
        let base = self
            .instructions()?
            .into_iter()
            .filter(|(instruction, _)| instruction == "FROM")
            .filter_map(|(_, args)| {
                args.split_whitespace()
                    .find(|word| !word.starts_with("--"))
                    .map(str::to_string)
            })
            .last();
        Ok(base)
    }

    fn dockerfile_path(&self) -> &Path {
        &self.path
    }
}

/// Split Dockerfile content into `(INSTRUCTION, arguments)` pairs.
///
/// Joins `\` continuation lines and drops comments and blank lines.
fn parse_instructions(content: &str) -> Vec<(String, String)> {
    let mut instructions = Vec::new();
    let mut pending = String::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') || (trimmed.is_empty() && pending.is_empty()) {
            continue;
        }
        if let Some(body) = trimmed.strip_suffix('\\') {
            pending.push_str(body);
            pending.push(' ');
            continue;
        }
        pending.push_str(trimmed);

        let logical = std::mem::take(&mut pending);
        let logical = logical.trim();
        if logical.is_empty() {
            continue;
        }
        let (instruction, args) = logical.split_once(char::is_whitespace).unwrap_or((logical, ""));
        instructions.push((instruction.to_ascii_uppercase(), args.trim().to_string()));
    }

    instructions
}

/// Parse the arguments of one `LABEL` instruction.
///
/// Handles `key=value` pairs with quoting as well as the legacy
/// `LABEL key value with spaces` form.
fn parse_label_args(args: &str) -> Vec<(String, String)> {
    let words = split_words(args);
    match words.first() {
        Some(first) if !first.contains('=') => {
            vec![(first.clone(), words[1..].join(" "))]
        }
        _ => words
            .into_iter()
            .filter_map(|word| {
                word.split_once('=')
                    .map(|(k, v)| (k.to_string(), v.to_string()))
            })
            .collect(),
    }
}

/// Split on unquoted whitespace, removing quotes and backslash escapes.
fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }

    words
}
