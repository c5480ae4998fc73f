use std::{io, path::Path};

use bspack::Rect;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{atlas::Chart, sampling::Sampling, uv::UvTransform};

/// Describes every packed atlas: where each image went, how to remap its
/// texture coordinates, and what a renderer needs to draw each channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub atlases: Vec<AtlasManifest>,
}

impl Manifest {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let contents = fs::read(path.as_ref())?;
        let manifest = serde_json::from_slice(&contents)?;

        Ok(manifest)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ManifestError> {
        let path = path.as_ref();
        let serialized = serde_json::to_vec_pretty(self)?;
        fs::write(path, serialized)?;

        log::trace!("Saved manifest to {}", path.display());

        Ok(())
    }

    pub fn write_to<W: io::Write>(&self, output: W) -> Result<(), ManifestError> {
        serde_json::to_writer_pretty(output, self)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AtlasManifest {
    pub name: String,
    pub size: (f64, f64),
    pub margin: f64,

    /// Every image in the atlas, in the order they were placed.
    pub entries: Vec<EntryManifest>,

    /// One render job per channel, in channel name order.
    pub channels: Vec<ChannelManifest>,
}

impl AtlasManifest {
    pub fn from_chart(chart: &Chart<'_>) -> Self {
        let definition = chart.definition();

        let entries = chart
            .entries()
            .iter()
            .map(|entry| EntryManifest {
                image: entry.item().name.clone(),
                rect: entry.rect().into(),
                uv: UvTransform::for_rect(entry.rect(), definition.size),
            })
            .collect();

        let channels = chart
            .channels()
            .into_iter()
            .map(|sheet| ChannelManifest {
                channel: sheet.channel.to_owned(),
                file: sheet.file_name,
                quads: sheet
                    .quads
                    .into_iter()
                    .map(|quad| QuadManifest {
                        source: quad.source.to_owned(),
                        rect: quad.rect.into(),
                        sampling: quad.sampling,
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: definition.name.clone(),
            size: definition.size,
            margin: definition.margin,
            entries,
            channels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EntryManifest {
    pub image: String,
    pub rect: ManifestRect,

    /// Transforms the image's original texture coordinates into the atlas.
    pub uv: UvTransform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChannelManifest {
    pub channel: String,

    /// The name of the image file this channel should be rendered into.
    pub file: String,
    pub quads: Vec<QuadManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct QuadManifest {
    pub source: String,
    pub rect: ManifestRect,
    pub sampling: Sampling,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManifestRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Rect> for ManifestRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
