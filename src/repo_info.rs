//! # Repository Info
//!
//! [`RepoInfo`] is the single object a build consumes: it combines the
//! repository configuration, the additional tags and the Dockerfile, and
//! exposes the image labels and base image.
//!
//! Labels and base image are derived on first access and kept afterwards.
//! For Flatpak builds they come from `container.yaml` (the flatpak section and
//! the first compose module); for every other build they come from the
//! Dockerfile.

use std::cell::OnceCell;

use log::debug;

use crate::defaults::ADDITIONAL_TAGS_FILE;
use crate::dockerfile::DockerfileSource;
use crate::error::{Error, Result};
use crate::labels::{LabelType, Labels};
use crate::repo_config::RepoConfiguration;
use crate::tags::AdditionalTagsConfig;

const FLATPAK_MISSING_MODULES: &str =
    "\"compose\" config is missing \"modules\", required for Flatpak";

/// Labels and base image, once derived.
#[derive(Debug)]
struct Parsed {
    labels: Labels,
    base_image: Option<String>,
}

/// Aggregator for the different aspects of a repository.
pub struct RepoInfo {
    dockerfile: Option<Box<dyn DockerfileSource>>,
    configuration: RepoConfiguration,
    additional_tags: AdditionalTagsConfig,
    parsed: OnceCell<Parsed>,
}

impl RepoInfo {
    /// Combine the parts of a repository.
    ///
    /// A missing `configuration` is read from the current directory. Missing
    /// `additional_tags` are built from the configuration's `tags` list, or
    /// from the tags file next to the configuration when that list is empty.
    pub fn new(
        dockerfile: Option<Box<dyn DockerfileSource>>,
        configuration: Option<RepoConfiguration>,
        additional_tags: Option<AdditionalTagsConfig>,
    ) -> Result<Self> {
        let configuration = match configuration {
            Some(configuration) => configuration,
            None => RepoConfiguration::from_dir(".")?,
        };
        let additional_tags = match additional_tags {
            Some(tags) => tags,
            None => AdditionalTagsConfig::new(
                configuration.dir_path(),
                ADDITIONAL_TAGS_FILE,
                &configuration.container_tags(),
            )?,
        };

        Ok(RepoInfo {
            dockerfile,
            configuration,
            additional_tags,
            parsed: OnceCell::new(),
        })
    }

    pub fn dockerfile(&self) -> Option<&dyn DockerfileSource> {
        self.dockerfile.as_deref()
    }

    pub fn configuration(&self) -> &RepoConfiguration {
        &self.configuration
    }

    pub fn additional_tags(&self) -> &AdditionalTagsConfig {
        &self.additional_tags
    }

    pub fn git_uri(&self) -> Option<&str> {
        self.configuration.git_uri.as_deref()
    }

    pub fn git_branch(&self) -> Option<&str> {
        self.configuration.git_branch.as_deref()
    }

    pub fn git_ref(&self) -> Option<&str> {
        self.configuration.git_ref.as_deref()
    }

    pub fn git_commit_depth(&self) -> u32 {
        self.configuration.depth
    }

    /// Image labels.
    pub fn labels(&self) -> Result<&Labels> {
        Ok(&self.ensure_parsed()?.labels)
    }

    /// Image the build starts from; `None` for a Flatpak without `base_image`
    /// or a Dockerfile without `FROM`.
    pub fn base_image(&self) -> Result<Option<&str>> {
        Ok(self.ensure_parsed()?.base_image.as_deref())
    }

    /// Derive labels and base image unless already done.
    ///
    /// A failed derivation is not stored, so the next access tries again.
    fn ensure_parsed(&self) -> Result<&Parsed> {
        if let Some(parsed) = self.parsed.get() {
            return Ok(parsed);
        }
        let parsed = if self.configuration.is_flatpak {
            self.parse_flatpak()?
        } else {
            self.parse_dockerfile()?
        };
        Ok(self.parsed.get_or_init(|| parsed))
    }

    fn parse_flatpak(&self) -> Result<Parsed> {
        let config = &self.configuration;
        let module = config
            .container_module_specs
            .first()
            .ok_or_else(|| Error::MissingRequiredField {
                message: FLATPAK_MISSING_MODULES.to_string(),
            })?;

        // modules is required for every Flatpak build, but only names the
        // image when container.yaml does not
        let name = config.flatpak_name.as_deref().unwrap_or(&module.name);
        let component = config.flatpak_component.as_deref().unwrap_or(&module.name);
        debug!("Flatpak image {} (component {}) from module {}", name, component, module);

        Ok(Parsed {
            labels: Labels::new([
                (LabelType::Name.preferred_name(), name),
                (LabelType::Component.preferred_name(), component),
                (LabelType::Version.preferred_name(), module.stream.as_str()),
            ]),
            base_image: config.flatpak_base_image.clone(),
        })
    }

    fn parse_dockerfile(&self) -> Result<Parsed> {
        let dockerfile = self
            .dockerfile
            .as_deref()
            .ok_or_else(|| Error::MissingRequiredField {
                message: "a Dockerfile is required for non-Flatpak builds".to_string(),
            })?;

        let read_error = |source| Error::DockerfileRead {
            path: dockerfile.dockerfile_path().to_path_buf(),
            source,
        };
        let labels = dockerfile.labels().map_err(read_error)?;
        let base_image = dockerfile.base_image().map_err(read_error)?;

        Ok(Parsed {
            labels: Labels::new(labels),
            base_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use crate::defaults::REPO_CONTAINER_CONFIG;

    struct MockDockerfile {
        missing: bool,
        reads: Rc<Cell<usize>>,
        path: PathBuf,
    }

    impl MockDockerfile {
        fn new(missing: bool) -> (Self, Rc<Cell<usize>>) {
            let reads = Rc::new(Cell::new(0));
            let mock = MockDockerfile {
                missing,
                reads: Rc::clone(&reads),
                path: PathBuf::from("/foo/bar"),
            };
            (mock, reads)
        }

        fn read(&self) -> io::Result<()> {
            self.reads.set(self.reads.get() + 1);
            if self.missing {
                Err(io::Error::new(io::ErrorKind::NotFound, "Can't read"))
            } else {
                Ok(())
            }
        }
    }

    impl DockerfileSource for MockDockerfile {
        fn labels(&self) -> io::Result<HashMap<String, String>> {
            self.read()?;
            Ok(HashMap::from([("name".to_string(), "image1".to_string())]))
        }

        fn base_image(&self) -> io::Result<Option<String>> {
            self.read()?;
            Ok(Some("fedora:latest".to_string()))
        }

        fn dockerfile_path(&self) -> &Path {
            &self.path
        }
    }

    fn config_with(container_yaml: &str) -> (tempfile::TempDir, RepoConfiguration) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(REPO_CONTAINER_CONFIG), container_yaml).unwrap();
        let config = RepoConfiguration::from_dir(dir.path()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_explicit_params() {
        let dir = tempfile::tempdir().unwrap();
        let configuration = RepoConfiguration::from_dir(dir.path()).unwrap();
        let tags = AdditionalTagsConfig::new(dir.path(), ADDITIONAL_TAGS_FILE, &["t1"]).unwrap();
        let (mock, _) = MockDockerfile::new(false);

        let info = RepoInfo::new(Some(Box::new(mock)), Some(configuration), Some(tags)).unwrap();
        assert!(info.dockerfile().is_some());
        assert_eq!(info.additional_tags().tags(), vec!["t1"]);
        assert_eq!(info.configuration().dir_path(), dir.path());
    }

    #[test]
    fn test_default_tags_from_container_yaml() {
        let (dir, config) = config_with("tags:\n- from_yaml\n");
        fs::write(dir.path().join(ADDITIONAL_TAGS_FILE), "from_file\n").unwrap();

        let info = RepoInfo::new(None, Some(config), None).unwrap();
        assert_eq!(info.additional_tags().tags(), vec!["from_yaml"]);
        assert!(info.additional_tags().from_container_yaml());
    }

    #[test]
    fn test_default_tags_from_file() {
        let (dir, config) = config_with("compose:\n");
        fs::write(dir.path().join(ADDITIONAL_TAGS_FILE), "from_file\n").unwrap();

        let info = RepoInfo::new(None, Some(config), None).unwrap();
        assert_eq!(info.additional_tags().tags(), vec!["from_file"]);
        assert!(!info.additional_tags().from_container_yaml());
    }

    #[test]
    fn test_image_labels_not_flatpak() {
        let dir = tempfile::tempdir().unwrap();
        let config = RepoConfiguration::from_dir(dir.path()).unwrap();
        let (mock, reads) = MockDockerfile::new(false);
        let info = RepoInfo::new(Some(Box::new(mock)), Some(config), None).unwrap();

        let labels = info.labels().unwrap();
        assert_eq!(labels.value_of(LabelType::Name), Some("image1"));
        assert_eq!(info.base_image().unwrap(), Some("fedora:latest"));
        assert_eq!(info.labels().unwrap().len(), 1);
        // labels and base image read once, then cached
        assert_eq!(reads.get(), 2);
    }

    #[test]
    fn test_image_labels_dockerfile_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = RepoConfiguration::from_dir(dir.path()).unwrap();
        let (mock, _) = MockDockerfile::new(true);
        let info = RepoInfo::new(Some(Box::new(mock)), Some(config), None).unwrap();

        let err = info.labels().unwrap_err();
        assert!(matches!(err, Error::DockerfileRead { .. }));
        assert!(err.to_string().contains("Could not parse Dockerfile in /foo/bar"));
        assert!(info.base_image().is_err());
    }

    #[test]
    fn test_not_flatpak_without_dockerfile() {
        let dir = tempfile::tempdir().unwrap();
        let config = RepoConfiguration::from_dir(dir.path()).unwrap();
        let info = RepoInfo::new(None, Some(config), None).unwrap();
        assert!(matches!(
            info.labels().unwrap_err(),
            Error::MissingRequiredField { .. }
        ));
    }

    fn flatpak_yaml(modules: &[&str], extra: &str) -> String {
        let mut yaml = String::from("compose:\n  modules:\n");
        for module in modules {
            yaml.push_str(&format!("  - {}\n", module));
        }
        yaml.push_str("flatpak:\n  id: org.gnome.Eog\n");
        yaml.push_str(extra);
        yaml
    }

    #[test]
    fn test_image_labels_flatpak() {
        let one = ["mod_name:mod_stream:mod_version"];
        let two = ["mod_name:mod_stream:mod_version", "mod_name2:mod_stream2:mod_version2"];
        let cases: [(&[&str], &str, &str, &str); 4] = [
            (&one, "", "mod_name", "mod_name"),
            (&two, "", "mod_name", "mod_name"),
            (&one, "  name: name2\n", "name2", "mod_name"),
            (&one, "  component: component2\n", "mod_name", "component2"),
        ];
        for (modules, extra, expected_name, expected_component) in cases {
            let (_dir, config) = config_with(&flatpak_yaml(modules, extra));
            let info = RepoInfo::new(None, Some(config), None).unwrap();

            let labels = info.labels().unwrap();
            assert_eq!(labels.value_of(LabelType::Name), Some(expected_name));
            assert_eq!(labels.value_of(LabelType::Component), Some(expected_component));
            assert_eq!(labels.value_of(LabelType::Version), Some("mod_stream"));
        }
    }

    #[test]
    fn test_image_labels_flatpak_missing_modules() {
        for modules in ["", "  modules:\n", "  modules: []\n"] {
            let yaml = format!("compose:\n{}flatpak:\n  id: org.gnome.Eog\n", modules);
            let (_dir, config) = config_with(&yaml);
            let info = RepoInfo::new(None, Some(config), None).unwrap();

            let err = info.labels().unwrap_err();
            assert!(matches!(err, Error::MissingRequiredField { .. }));
            assert!(err
                .to_string()
                .contains("\"compose\" config is missing \"modules\", required for Flatpak"));
        }
    }

    #[test]
    fn test_base_image_flatpak() {
        let (_dir, config) = config_with(&flatpak_yaml(&["mod_name:mod_stream"], ""));
        let info = RepoInfo::new(None, Some(config), None).unwrap();
        assert_eq!(info.base_image().unwrap(), None);

        let yaml = flatpak_yaml(&["mod_name:mod_stream"], "  base_image: fedora:latest\n");
        let (_dir, config) = config_with(&yaml);
        let info = RepoInfo::new(None, Some(config), None).unwrap();
        assert_eq!(info.base_image().unwrap(), Some("fedora:latest"));
    }

    #[test]
    fn test_git_passthroughs() {
        let dir = tempfile::tempdir().unwrap();
        let options = crate::repo_config::RepoConfigOptions {
            depth: Some(3),
            git_uri: Some("https://example.com/r.git".to_string()),
            git_branch: Some("main".to_string()),
            git_ref: Some("deadbeef".to_string()),
            ..crate::repo_config::RepoConfigOptions::new(dir.path())
        };
        let config = RepoConfiguration::load(options).unwrap();
        let info = RepoInfo::new(None, Some(config), None).unwrap();
        assert_eq!(info.git_uri(), Some("https://example.com/r.git"));
        assert_eq!(info.git_branch(), Some("main"));
        assert_eq!(info.git_ref(), Some("deadbeef"));
        assert_eq!(info.git_commit_depth(), 3);
    }
}
