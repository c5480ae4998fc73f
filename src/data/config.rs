use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    atlas::{Atlas, AtlasImage},
    definition::{AtlasDefinition, GroupRef},
};

static CONFIG_FILENAME: &str = "atlaspack.toml";

/// Configuration for atlaspack, contained in an atlaspack.toml file.
///
/// Lists every atlas that should be built, along with the groups of images
/// that go into each of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub atlases: Vec<AtlasConfig>,

    /// The path that this config came from. Channel paths from this config are
    /// relative to the folder containing this file.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Config {
    pub fn read_from_folder_or_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let meta = fs::metadata(path)?;

        if meta.is_file() {
            Self::read_from_file(path)
        } else {
            Self::read_from_folder(path)
        }
    }

    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ConfigError> {
        let folder_path = folder_path.as_ref();
        let file_path = &folder_path.join(CONFIG_FILENAME);

        Self::read_from_file(file_path)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let mut config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = path.to_owned();

        log::debug!(
            "Read {} atlas definitions from {}",
            config.atlases.len(),
            path.display()
        );

        Ok(config)
    }

    /// The path that paths in this Config should be considered relative to.
    pub fn folder(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Builds every configured atlas, applying group size limits and merging
    /// images that appear more than once.
    pub fn atlases(&self) -> Result<Vec<Atlas>, ConfigError> {
        let folder = self.folder();

        self.atlases
            .iter()
            .map(|atlas_config| atlas_config.build(folder))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct AtlasConfig {
    /// The atlas name, size, and margin, like `props@1024x1024:2`.
    pub definition: AtlasDefinition,

    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

impl AtlasConfig {
    fn build(&self, folder: &Path) -> Result<Atlas, ConfigError> {
        let mut atlas = Atlas::new(self.definition.clone());

        for group in &self.groups {
            for image in &group.images {
                let (width, height) = image.size;
                if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
                    return Err(ConfigError::InvalidImageSize {
                        atlas: self.definition.name.clone(),
                        image: image.name.clone(),
                        size: image.size,
                    });
                }

                let mut atlas_image = AtlasImage::new(image.name.clone(), image.size)
                    .with_size(group.group.constrain(image.size));

                for (channel, path) in &image.channels {
                    let path = folder.join(path).display().to_string();
                    atlas_image = atlas_image.with_channel(channel.clone(), path);
                }

                atlas.add_image(atlas_image);
            }
        }

        Ok(atlas)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct GroupConfig {
    /// The group name, optionally with the maximum edge length of its images,
    /// like `furniture@256`.
    pub group: GroupRef,

    #[serde(default)]
    pub images: Vec<ImageConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ImageConfig {
    pub name: String,

    /// The size of the image's source files.
    pub size: (f64, f64),

    /// Source files for each channel of this image, like `color` or `specular`.
    #[serde(default)]
    pub channels: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{source} in {}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(
        "image '{image}' in atlas '{atlas}' has size {}x{}, but sizes must be finite and greater than zero",
        .size.0,
        .size.1
    )]
    InvalidImageSize {
        atlas: String,
        image: String,
        size: (f64, f64),
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ConfigError {
    /// Tells whether this ConfigError originated because of a path not
    /// existing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io(source) => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static EXAMPLE: &str = r#"
        [[atlases]]
        definition = "props@128x64:2"

        [[atlases.groups]]
        group = "furniture@32"

        [[atlases.groups.images]]
        name = "chair"
        size = [64, 64]
        channels = { color = "textures/chair.png" }

        [[atlases.groups]]
        group = "lights"

        [[atlases.groups.images]]
        name = "lamp"
        size = [16, 40]
        channels = { color = "textures/lamp.png", emit = "textures/lamp_emit.png" }

        [[atlases.groups.images]]
        name = "chair"
        size = [20, 20]
        channels = { specular = "textures/chair_spec.png" }
    "#;

    #[test]
    fn parse_example() {
        let config: Config = toml::from_str(EXAMPLE).unwrap();

        assert_eq!(config.atlases.len(), 1);

        let atlas = &config.atlases[0];
        assert_eq!(atlas.definition.name, "props");
        assert_eq!(atlas.definition.size, (128.0, 64.0));
        assert_eq!(atlas.definition.margin, 2.0);
        assert_eq!(atlas.groups.len(), 2);
        assert_eq!(atlas.groups[0].group.max_size, Some(32.0));
        assert_eq!(atlas.groups[1].images[0].size, (16.0, 40.0));
    }

    #[test]
    fn build_applies_limits_and_merges() {
        let mut config: Config = toml::from_str(EXAMPLE).unwrap();
        config.file_path = PathBuf::from("project/atlaspack.toml");

        let atlases = config.atlases().unwrap();
        let images = atlases[0].images();

        assert_eq!(images.len(), 2);

        let chair = &images[0];
        assert_eq!(chair.name, "chair");
        assert_eq!(chair.source_size, (64.0, 64.0));
        assert_eq!(chair.size, (32.0, 32.0));
        assert_eq!(
            chair.channels.keys().collect::<Vec<_>>(),
            vec!["color", "specular"]
        );
        assert_eq!(
            Path::new(&chair.channels["color"]),
            Path::new("project").join("textures/chair.png")
        );

        let lamp = &images[1];
        assert_eq!(lamp.size, (16.0, 40.0));
    }

    #[test]
    fn rejects_unusable_image_sizes() {
        for size in &["[nan, 4]", "[4, inf]", "[-inf, 4]", "[-8, 4]", "[4, 0]"] {
            let config: Config = toml::from_str(&format!(
                r#"
                [[atlases]]
                definition = "props@64x64"

                [[atlases.groups]]
                group = "icons"
                images = [{{ name = "bad", size = {} }}]
                "#,
                size
            ))
            .unwrap();

            match config.atlases() {
                Err(ConfigError::InvalidImageSize { atlas, image, .. }) => {
                    assert_eq!(atlas, "props");
                    assert_eq!(image, "bad");
                }
                other => panic!("size {} was not rejected: {:?}", size, other),
            }
        }
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [[atlases]]
            definition = "props@64x64"
            colour = "red"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn rejects_bad_definition() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [[atlases]]
            definition = "props@64"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::read_from_folder(dir.path()).unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn read_from_folder_or_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&file_path, EXAMPLE).unwrap();

        let from_folder = Config::read_from_folder_or_file(dir.path()).unwrap();
        let from_file = Config::read_from_folder_or_file(&file_path).unwrap();

        assert_eq!(from_folder, from_file);
        assert_eq!(from_file.folder(), dir.path());
    }
}
