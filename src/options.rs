use std::{path::PathBuf, str::FromStr};

use structopt::StructOpt;

use crate::definition::{parse_size, AtlasDefinition, DefinitionError};

#[derive(Debug, StructOpt)]
#[structopt(about = "Packs source images into fixed-size texture atlases")]
pub struct Options {
    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack every atlas described by an atlaspack.toml file and write out a
    /// manifest describing where each image went.
    Pack(PackOptions),

    /// Pack a list of sizes into a single atlas and print the resulting
    /// placements. Useful for trying out canvas sizes and margins.
    Fit(FitOptions),

    /// Remap texture coordinates of an image into the atlas it was packed
    /// into, using a manifest written by `pack`.
    Remap(RemapOptions),
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// The path to an atlaspack.toml file, or a folder containing one. Defaults
    /// to the current working directory.
    pub config_path: Option<PathBuf>,

    /// Where to write the manifest. If not specified, the manifest is printed
    /// to stdout.
    #[structopt(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct FitOptions {
    /// The atlas to pack into, like `sheet@1024x1024:2`.
    pub definition: AtlasDefinition,

    /// Sizes of the items to pack, like `64x32`.
    pub sizes: Vec<SizeArg>,
}

#[derive(Debug, StructOpt)]
pub struct RemapOptions {
    /// The manifest written by `atlaspack pack`.
    pub manifest: PathBuf,

    /// The name of the image whose coordinates should be remapped.
    pub image: String,

    /// Texture coordinates to remap, like `0.5,1`.
    pub coords: Vec<UvArg>,

    /// Only look for the image in this atlas.
    #[structopt(long)]
    pub atlas: Option<String>,
}

/// A `WIDTHxHEIGHT` command line argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeArg(pub f64, pub f64);

impl FromStr for SizeArg {
    type Err = DefinitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (width, height) = parse_size(value)?;
        Ok(SizeArg(width, height))
    }
}

/// A `U,V` command line argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvArg(pub f64, pub f64);

impl FromStr for UvArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid texture coordinate '{}'. Expected U,V.", value);

        let mut parts = value.split(',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(u), Some(v), None) => {
                let u = u.trim().parse().map_err(|_| invalid())?;
                let v = v.trim().parse().map_err(|_| invalid())?;
                Ok(UvArg(u, v))
            }
            _ => Err(invalid()),
        }
    }
}
