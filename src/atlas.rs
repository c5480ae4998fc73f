//! Atlases, the images that go into them, and the charts that result from
//! packing them.

use std::collections::BTreeMap;

use bspack::{BspPacker, Placement, Rect, Sizable};
use thiserror::Error;

use crate::{definition::AtlasDefinition, sampling::Sampling};

/// One image to be placed in an atlas.
///
/// An image may provide several channels (like `color` or `specular`), each
/// backed by its own source file. All channels share the same region of the
/// atlas, and each channel is rendered into its own atlas file.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasImage {
    pub name: String,

    /// The size of the source image files.
    pub source_size: (f64, f64),

    /// The size this image will occupy in the atlas. This can be smaller than
    /// `source_size` if the image's group limits its size.
    pub size: (f64, f64),

    /// Maps channel names to the source file for that channel.
    pub channels: BTreeMap<String, String>,
}

impl AtlasImage {
    pub fn new<S: Into<String>>(name: S, source_size: (f64, f64)) -> Self {
        Self {
            name: name.into(),
            source_size,
            size: source_size,
            channels: BTreeMap::new(),
        }
    }

    pub fn with_size(self, size: (f64, f64)) -> Self {
        Self { size, ..self }
    }

    pub fn with_channel<C: Into<String>, P: Into<String>>(mut self, channel: C, path: P) -> Self {
        self.channels.insert(channel.into(), path.into());
        self
    }

    /// Folds another use of the same image into this one. The image grows to
    /// cover both sizes and picks up every channel; when both define the same
    /// channel, `other` wins.
    pub fn merge(&mut self, other: AtlasImage) {
        self.source_size = max_size(self.source_size, other.source_size);
        self.size = max_size(self.size, other.size);
        self.channels.extend(other.channels);
    }
}

impl Sizable for AtlasImage {
    fn width(&self) -> f64 {
        self.size.0
    }

    fn height(&self) -> f64 {
        self.size.1
    }
}

fn max_size(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0.max(b.0), a.1.max(b.1))
}

#[derive(Debug, Clone)]
pub struct Atlas {
    definition: AtlasDefinition,
    images: Vec<AtlasImage>,

    /// Position of each image in `images`, by name.
    image_indices: BTreeMap<String, usize>,
}

impl Atlas {
    pub fn new(definition: AtlasDefinition) -> Self {
        Self {
            definition,
            images: Vec::new(),
            image_indices: BTreeMap::new(),
        }
    }

    pub fn definition(&self) -> &AtlasDefinition {
        &self.definition
    }

    pub fn images(&self) -> &[AtlasImage] {
        &self.images
    }

    /// Adds an image to the atlas. Images that share a name with one that was
    /// already added are merged into it instead of taking up more space.
    pub fn add_image(&mut self, image: AtlasImage) {
        match self.image_indices.get(&image.name) {
            Some(&index) => {
                log::trace!(
                    "Merging duplicate image {} in atlas {}",
                    image.name,
                    self.definition.name
                );
                self.images[index].merge(image);
            }
            None => {
                self.image_indices.insert(image.name.clone(), self.images.len());
                self.images.push(image);
            }
        }
    }

    pub fn pack(&self) -> Result<Chart<'_>, AtlasError> {
        let definition = &self.definition;

        log::debug!(
            "Packing {} images into atlas {}",
            self.images.len(),
            definition
        );

        let entries = BspPacker::new(definition.size)
            .margin(definition.margin)
            .pack(&self.images)
            .map_err(|err| AtlasError::Overflow {
                atlas: definition.name.clone(),
                image: err.item().name.clone(),
                size: err.item().size,
            })?;

        Ok(Chart {
            definition,
            entries,
        })
    }
}

/// Where each image of an atlas ended up.
#[derive(Debug, Clone)]
pub struct Chart<'a> {
    definition: &'a AtlasDefinition,
    entries: Vec<Placement<&'a AtlasImage>>,
}

impl<'a> Chart<'a> {
    pub fn definition(&self) -> &'a AtlasDefinition {
        self.definition
    }

    pub fn entries(&self) -> &[Placement<&'a AtlasImage>] {
        &self.entries
    }

    /// Groups the chart by channel: each channel of the atlas becomes its own
    /// sheet, listing the quads a renderer needs to draw into it.
    pub fn channels(&self) -> Vec<ChannelSheet<'a>> {
        let mut sheets: BTreeMap<&'a str, Vec<Quad<'a>>> = BTreeMap::new();

        for entry in &self.entries {
            let image: &'a AtlasImage = *entry.item();
            let rect = entry.rect();

            for (channel, source) in &image.channels {
                sheets.entry(channel.as_str()).or_default().push(Quad {
                    source: source.as_str(),
                    rect,
                    sampling: Sampling::classify(image.source_size, rect.size()),
                });
            }
        }

        sheets
            .into_iter()
            .map(|(channel, quads)| ChannelSheet {
                channel,
                file_name: format!("{}_{}.png", self.definition.name, channel),
                quads,
            })
            .collect()
    }
}

/// Everything needed to render one channel of an atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSheet<'a> {
    pub channel: &'a str,
    pub file_name: String,
    pub quads: Vec<Quad<'a>>,
}

/// A source image file and the region of the atlas it should be drawn into.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad<'a> {
    pub source: &'a str,
    pub rect: Rect,
    pub sampling: Sampling,
}

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("image '{image}' ({}x{}) does not fit in atlas '{atlas}'", .size.0, .size.1)]
    Overflow {
        atlas: String,
        image: String,
        size: (f64, f64),
    },
}

#[cfg(test)]
mod test {
    use super::*;

    fn atlas(definition: &str) -> Atlas {
        Atlas::new(definition.parse().unwrap())
    }

    #[test]
    fn duplicate_images_merge() {
        let mut atlas = atlas("props@64x64");

        atlas.add_image(AtlasImage::new("chair", (16.0, 32.0)).with_channel("color", "chair.png"));
        atlas.add_image(
            AtlasImage::new("chair", (32.0, 8.0)).with_channel("specular", "chair_spec.png"),
        );

        assert_eq!(atlas.images().len(), 1);

        let chair = &atlas.images()[0];
        assert_eq!(chair.size, (32.0, 32.0));
        assert_eq!(chair.channels.len(), 2);
    }

    #[test]
    fn merging_keeps_insertion_order() {
        let mut atlas = atlas("props@256x256");

        for name in &["sofa", "chair", "lamp", "rug"] {
            atlas.add_image(AtlasImage::new(*name, (8.0, 8.0)));
        }
        atlas.add_image(AtlasImage::new("chair", (16.0, 4.0)).with_channel("color", "chair.png"));
        atlas.add_image(AtlasImage::new("rug", (4.0, 12.0)));

        let names: Vec<&str> = atlas.images().iter().map(|image| image.name.as_str()).collect();
        assert_eq!(names, vec!["sofa", "chair", "lamp", "rug"]);

        assert_eq!(atlas.images()[1].size, (16.0, 8.0));
        assert_eq!(atlas.images()[1].channels["color"], "chair.png");
        assert_eq!(atlas.images()[3].size, (8.0, 12.0));
    }

    #[test]
    fn overflow_names_atlas_and_image() {
        let mut atlas = atlas("props@64x64:2");
        atlas.add_image(AtlasImage::new("table", (40.0, 40.0)));
        atlas.add_image(AtlasImage::new("rug", (63.0, 10.0)));

        let err = atlas.pack().unwrap_err();
        assert_eq!(
            err.to_string(),
            "image 'rug' (63x10) does not fit in atlas 'props'"
        );
    }

    #[test]
    fn channels_are_grouped() {
        let mut atlas = atlas("props@64x32");
        atlas.add_image(
            AtlasImage::new("chair", (64.0, 64.0))
                .with_size((32.0, 32.0))
                .with_channel("color", "chair.png")
                .with_channel("specular", "chair_spec.png"),
        );
        atlas.add_image(AtlasImage::new("lamp", (32.0, 32.0)).with_channel("color", "lamp.png"));

        let chart = atlas.pack().unwrap();
        let entries = chart.entries();
        assert_eq!(entries[0].item().name, "chair");
        assert_eq!(entries[0].rect(), Rect::new(0.0, 0.0, 32.0, 32.0));
        assert_eq!(entries[1].item().name, "lamp");
        assert_eq!(entries[1].rect(), Rect::new(32.0, 0.0, 32.0, 32.0));

        let sheets = chart.channels();
        assert_eq!(sheets.len(), 2);

        assert_eq!(sheets[0].channel, "color");
        assert_eq!(sheets[0].file_name, "props_color.png");
        assert_eq!(
            sheets[0].quads,
            vec![
                Quad {
                    source: "chair.png",
                    rect: Rect::new(0.0, 0.0, 32.0, 32.0),
                    sampling: Sampling::Down,
                },
                Quad {
                    source: "lamp.png",
                    rect: Rect::new(32.0, 0.0, 32.0, 32.0),
                    sampling: Sampling::None,
                },
            ]
        );

        assert_eq!(sheets[1].channel, "specular");
        assert_eq!(sheets[1].quads.len(), 1);
    }
}
